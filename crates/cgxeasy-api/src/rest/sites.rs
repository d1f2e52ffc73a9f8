// Site and element endpoints
//
// Both are tenant-wide listings; the resource cache in core turns them into
// name lookups.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::{Element, Site};

impl CgxClient {
    /// List every site in the tenant.
    ///
    /// `GET /v4.7/api/tenants/{tenant}/sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.tenant_url("v4.7", "sites")?;
        debug!("listing sites");
        self.get_items(url).await
    }

    /// List every element (ION device) in the tenant.
    ///
    /// `GET /v3.0/api/tenants/{tenant}/elements`
    pub async fn list_elements(&self) -> Result<Vec<Element>, Error> {
        let url = self.tenant_url("v3.0", "elements")?;
        debug!("listing elements");
        self.get_items(url).await
    }
}
