// Element SNMP agent endpoints
//
// `/v2.1/api/tenants/{tenant}/sites/{site}/elements/{element}/snmpagents`

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::SnmpAgent;

const VERSION: &str = "v2.1";

fn collection(site_id: &str, element_id: &str) -> String {
    format!("sites/{site_id}/elements/{element_id}/snmpagents")
}

impl CgxClient {
    /// List SNMP agents of an element (the controller allows at most one).
    pub async fn list_snmp_agents(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<SnmpAgent>, Error> {
        let url = self.tenant_url(VERSION, &collection(site_id, element_id))?;
        debug!(site_id, element_id, "listing snmp agents");
        self.get_items(url).await
    }

    pub async fn create_snmp_agent(
        &self,
        site_id: &str,
        element_id: &str,
        agent: &SnmpAgent,
    ) -> Result<SnmpAgent, Error> {
        let url = self.tenant_url(VERSION, &collection(site_id, element_id))?;
        debug!(site_id, element_id, "creating snmp agent");
        self.post(url, agent).await
    }

    pub async fn update_snmp_agent(
        &self,
        site_id: &str,
        element_id: &str,
        agent_id: &str,
        agent: &SnmpAgent,
    ) -> Result<SnmpAgent, Error> {
        let path = format!("{}/{agent_id}", collection(site_id, element_id));
        let url = self.tenant_url(VERSION, &path)?;
        debug!(site_id, element_id, agent_id, "updating snmp agent");
        self.put(url, agent).await
    }
}
