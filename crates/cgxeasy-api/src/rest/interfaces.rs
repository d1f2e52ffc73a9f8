// Element interface endpoints
//
// `/v4.15/api/tenants/{tenant}/sites/{site}/elements/{element}/interfaces`

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::Interface;

const VERSION: &str = "v4.15";

fn collection(site_id: &str, element_id: &str) -> String {
    format!("sites/{site_id}/elements/{element_id}/interfaces")
}

impl CgxClient {
    /// List all interfaces of an element, sub-interfaces included.
    pub async fn list_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        let url = self.tenant_url(VERSION, &collection(site_id, element_id))?;
        debug!(site_id, element_id, "listing interfaces");
        self.get_items(url).await
    }

    /// Create an interface (sub-interfaces, loopbacks, ...).
    pub async fn create_interface(
        &self,
        site_id: &str,
        element_id: &str,
        interface: &Interface,
    ) -> Result<Interface, Error> {
        let url = self.tenant_url(VERSION, &collection(site_id, element_id))?;
        debug!(site_id, element_id, name = interface.name(), "creating interface");
        self.post(url, interface).await
    }

    /// Replace an interface with the given full representation.
    pub async fn update_interface(
        &self,
        site_id: &str,
        element_id: &str,
        interface_id: &str,
        interface: &Interface,
    ) -> Result<Interface, Error> {
        let path = format!("{}/{interface_id}", collection(site_id, element_id));
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, element_id, interface_id, "updating interface");
        self.put(url, interface).await
    }

    /// Delete an interface.
    pub async fn delete_interface(
        &self,
        site_id: &str,
        element_id: &str,
        interface_id: &str,
    ) -> Result<(), Error> {
        let path = format!("{}/{interface_id}", collection(site_id, element_id));
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, element_id, interface_id, "deleting interface");
        self.delete(url).await
    }
}
