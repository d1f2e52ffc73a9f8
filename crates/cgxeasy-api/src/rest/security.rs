// Security zone endpoints
//
// Zones are tenant-wide (`/securityzones`); their bindings to element
// interfaces live under the element (`/sites/{s}/elements/{e}/securityzones`).

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::{ElementSecurityZone, SecurityZone};

const VERSION: &str = "v2.0";

fn bindings(site_id: &str, element_id: &str) -> String {
    format!("sites/{site_id}/elements/{element_id}/securityzones")
}

impl CgxClient {
    /// List tenant security zones.
    pub async fn list_security_zones(&self) -> Result<Vec<SecurityZone>, Error> {
        let url = self.tenant_url(VERSION, "securityzones")?;
        debug!("listing security zones");
        self.get_items(url).await
    }

    /// List the zone bindings of one element.
    pub async fn list_element_security_zones(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<ElementSecurityZone>, Error> {
        let url = self.tenant_url(VERSION, &bindings(site_id, element_id))?;
        debug!(site_id, element_id, "listing element security zones");
        self.get_items(url).await
    }

    pub async fn create_element_security_zone(
        &self,
        site_id: &str,
        element_id: &str,
        binding: &ElementSecurityZone,
    ) -> Result<ElementSecurityZone, Error> {
        let url = self.tenant_url(VERSION, &bindings(site_id, element_id))?;
        debug!(site_id, element_id, zone_id = %binding.zone_id, "creating zone binding");
        self.post(url, binding).await
    }

    pub async fn update_element_security_zone(
        &self,
        site_id: &str,
        element_id: &str,
        binding_id: &str,
        binding: &ElementSecurityZone,
    ) -> Result<ElementSecurityZone, Error> {
        let path = format!("{}/{binding_id}", bindings(site_id, element_id));
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, element_id, binding_id, "updating zone binding");
        self.put(url, binding).await
    }

    pub async fn delete_element_security_zone(
        &self,
        site_id: &str,
        element_id: &str,
        binding_id: &str,
    ) -> Result<(), Error> {
        let path = format!("{}/{binding_id}", bindings(site_id, element_id));
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, element_id, binding_id, "deleting zone binding");
        self.delete(url).await
    }
}
