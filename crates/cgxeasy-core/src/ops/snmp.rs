// ── SNMP v3 users ──
//
// An element has at most one SNMP agent. Users are keyed by `user_name`
// within its `v3_config.users_access` list.

use cgxeasy_api::models::{SnmpAgent, SnmpV3Config, SnmpV3User};

use crate::error::CoreError;
use crate::ops::{Change, OpResult, Outcome, none_if_empty, report, require_id};
use crate::session::Session;

impl Session {
    /// Create the element's SNMP agent with this user, or update the
    /// user in place, or append it.
    pub async fn snmp_user_upsert(&self, element: &str, user: &SnmpV3User) -> OpResult {
        let target = format!("{element}/{}", user.user_name);
        report("snmp_user_upsert", &target, self.snmp_upsert(element, user).await)
    }

    async fn snmp_upsert(&self, element: &str, user: &SnmpV3User) -> Result<Outcome, CoreError> {
        if user.user_name.trim().is_empty() {
            return Err(CoreError::invalid("SNMP user name must not be empty"));
        }
        let client = self.client().await?;
        let element = self.element_ref(element).await?;
        let (site_id, element_id) = (element.site_id.as_str(), element.element_id.as_str());

        let Some(mut agent) = client
            .list_snmp_agents(site_id, element_id)
            .await?
            .into_iter()
            .next()
        else {
            let agent = SnmpAgent {
                v3_config: Some(SnmpV3Config {
                    enabled: true,
                    users_access: Some(vec![user.clone()]),
                    ..Default::default()
                }),
                ..Default::default()
            };
            client
                .create_snmp_agent(site_id, element_id, &agent)
                .await
                .map_err(|e| CoreError::write_failed("create SNMP agent", e))?;
            return Ok(Outcome::new(
                Change::Created,
                format!("SNMP agent created with user {}", user.user_name),
            ));
        };

        let v3 = agent.v3_config.get_or_insert_with(SnmpV3Config::default);
        let users = v3.users_access.get_or_insert_with(Vec::new);
        let message = match users.iter_mut().find(|u| u.user_name == user.user_name) {
            Some(existing) if existing == user && v3.enabled => {
                return Ok(Outcome::new(
                    Change::Unchanged,
                    format!("SNMP user {} already configured", user.user_name),
                ));
            }
            Some(existing) => {
                *existing = user.clone();
                format!("SNMP user {} updated", user.user_name)
            }
            None => {
                users.push(user.clone());
                format!("SNMP user {} added", user.user_name)
            }
        };
        v3.enabled = true;

        let id = require_id(agent.id.as_ref(), "SNMP agent")?;
        client
            .update_snmp_agent(site_id, element_id, &id, &agent)
            .await
            .map_err(|e| CoreError::write_failed("update SNMP agent", e))?;
        Ok(Outcome::new(Change::Updated, message))
    }

    /// Remove a v3 user from the element's SNMP agent.
    pub async fn snmp_user_remove(&self, element: &str, user_name: &str) -> OpResult {
        let target = format!("{element}/{user_name}");
        report("snmp_user_remove", &target, self.snmp_remove(element, user_name).await)
    }

    async fn snmp_remove(&self, element: &str, user_name: &str) -> Result<Outcome, CoreError> {
        let client = self.client().await?;
        let element = self.element_ref(element).await?;
        let (site_id, element_id) = (element.site_id.as_str(), element.element_id.as_str());

        let mut agent = client
            .list_snmp_agents(site_id, element_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::not_found("SNMP agent", element.name.clone()))?;

        let users = agent
            .v3_config
            .as_mut()
            .and_then(|v3| v3.users_access.take())
            .unwrap_or_default();
        if !users.iter().any(|u| u.user_name == user_name) {
            return Err(CoreError::not_found("SNMP user", user_name));
        }
        if let Some(v3) = agent.v3_config.as_mut() {
            v3.users_access = none_if_empty(users.into_iter().filter(|u| u.user_name != user_name).collect());
        }

        let id = require_id(agent.id.as_ref(), "SNMP agent")?;
        client
            .update_snmp_agent(site_id, element_id, &id, &agent)
            .await
            .map_err(|e| CoreError::write_failed("update SNMP agent", e))?;
        Ok(Outcome::new(Change::Updated, format!("SNMP user {user_name} removed")))
    }
}
