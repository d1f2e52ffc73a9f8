// Site DHCP server (pool) endpoints
//
// `/v2.1/api/tenants/{tenant}/sites/{site}/dhcpservers`

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::DhcpServer;

const VERSION: &str = "v2.1";

impl CgxClient {
    /// List the DHCP pools served at a site.
    pub async fn list_dhcp_servers(&self, site_id: &str) -> Result<Vec<DhcpServer>, Error> {
        let url = self.tenant_url(VERSION, &format!("sites/{site_id}/dhcpservers"))?;
        debug!(site_id, "listing dhcp servers");
        self.get_items(url).await
    }

    /// Replace a DHCP pool with the given full representation.
    pub async fn update_dhcp_server(
        &self,
        site_id: &str,
        server: &DhcpServer,
    ) -> Result<DhcpServer, Error> {
        let path = format!("sites/{site_id}/dhcpservers/{}", server.id);
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, subnet = %server.subnet, "updating dhcp server");
        self.put(url, server).await
    }

    /// Delete a DHCP pool.
    pub async fn delete_dhcp_server(&self, site_id: &str, server_id: &str) -> Result<(), Error> {
        let path = format!("sites/{site_id}/dhcpservers/{server_id}");
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, server_id, "deleting dhcp server");
        self.delete(url).await
    }
}
