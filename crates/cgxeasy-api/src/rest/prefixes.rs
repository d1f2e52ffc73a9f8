// Prefix list endpoints
//
// Global lists (`networkpolicyglobalprefixes`) carry their prefixes
// directly. Local lists (`ngfwsecuritypolicylocalprefixes`) are a
// tenant-wide name plus one value object per site.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::{GlobalPrefix, LocalPrefix, SiteLocalPrefix};

const GLOBAL_VERSION: &str = "v2.1";
const LOCAL_VERSION: &str = "v2.0";

impl CgxClient {
    // ── Global ───────────────────────────────────────────────────────

    pub async fn list_global_prefixes(&self) -> Result<Vec<GlobalPrefix>, Error> {
        let url = self.tenant_url(GLOBAL_VERSION, "networkpolicyglobalprefixes")?;
        debug!("listing global prefix lists");
        self.get_items(url).await
    }

    pub async fn create_global_prefix(&self, prefix: &GlobalPrefix) -> Result<GlobalPrefix, Error> {
        let url = self.tenant_url(GLOBAL_VERSION, "networkpolicyglobalprefixes")?;
        debug!(name = %prefix.name, "creating global prefix list");
        self.post(url, prefix).await
    }

    pub async fn update_global_prefix(
        &self,
        prefix_id: &str,
        prefix: &GlobalPrefix,
    ) -> Result<GlobalPrefix, Error> {
        let path = format!("networkpolicyglobalprefixes/{prefix_id}");
        let url = self.tenant_url(GLOBAL_VERSION, &path)?;
        debug!(prefix_id, name = %prefix.name, "updating global prefix list");
        self.put(url, prefix).await
    }

    // ── Local: tenant-wide names ─────────────────────────────────────

    pub async fn list_local_prefixes(&self) -> Result<Vec<LocalPrefix>, Error> {
        let url = self.tenant_url(LOCAL_VERSION, "ngfwsecuritypolicylocalprefixes")?;
        debug!("listing local prefix lists");
        self.get_items(url).await
    }

    pub async fn create_local_prefix(&self, prefix: &LocalPrefix) -> Result<LocalPrefix, Error> {
        let url = self.tenant_url(LOCAL_VERSION, "ngfwsecuritypolicylocalprefixes")?;
        debug!(name = %prefix.name, "creating local prefix list");
        self.post(url, prefix).await
    }

    // ── Local: per-site values ───────────────────────────────────────

    pub async fn list_site_local_prefixes(
        &self,
        site_id: &str,
    ) -> Result<Vec<SiteLocalPrefix>, Error> {
        let path = format!("sites/{site_id}/ngfwsecuritypolicylocalprefixes");
        let url = self.tenant_url(LOCAL_VERSION, &path)?;
        debug!(site_id, "listing site local prefixes");
        self.get_items(url).await
    }

    pub async fn create_site_local_prefix(
        &self,
        site_id: &str,
        value: &SiteLocalPrefix,
    ) -> Result<SiteLocalPrefix, Error> {
        let path = format!("sites/{site_id}/ngfwsecuritypolicylocalprefixes");
        let url = self.tenant_url(LOCAL_VERSION, &path)?;
        debug!(site_id, prefix_id = %value.prefix_id, "creating site local prefix");
        self.post(url, value).await
    }

    pub async fn update_site_local_prefix(
        &self,
        site_id: &str,
        value_id: &str,
        value: &SiteLocalPrefix,
    ) -> Result<SiteLocalPrefix, Error> {
        let path = format!("sites/{site_id}/ngfwsecuritypolicylocalprefixes/{value_id}");
        let url = self.tenant_url(LOCAL_VERSION, &path)?;
        debug!(site_id, value_id, "updating site local prefix");
        self.put(url, value).await
    }
}
