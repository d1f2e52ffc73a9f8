// WAN interface and anynet link endpoints

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::{AnynetLink, WanInterface};

impl CgxClient {
    /// List the WAN circuits of a site.
    ///
    /// `GET /v2.7/api/tenants/{tenant}/sites/{site}/waninterfaces`
    pub async fn list_wan_interfaces(&self, site_id: &str) -> Result<Vec<WanInterface>, Error> {
        let url = self.tenant_url("v2.7", &format!("sites/{site_id}/waninterfaces"))?;
        debug!(site_id, "listing wan interfaces");
        self.get_items(url).await
    }

    /// Create a site-to-site anynet link.
    ///
    /// `POST /v4.0/api/tenants/{tenant}/anynetlinks`. A link that already
    /// exists comes back as an error for which
    /// [`Error::is_duplicate_link`] is true.
    pub async fn create_anynet_link(&self, link: &AnynetLink) -> Result<AnynetLink, Error> {
        let url = self.tenant_url("v4.0", "anynetlinks")?;
        debug!(
            ep1 = %link.ep1_wan_if_id,
            ep2 = %link.ep2_wan_if_id,
            "creating anynet link"
        );
        self.post(url, link).await
    }
}
