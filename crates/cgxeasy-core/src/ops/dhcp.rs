// ── DHCP pool operations ──
//
// Pools are addressed by site name and subnet string; the subnet is only
// a functional key, found by a linear scan of the site's pools.

use serde::{Deserialize, Serialize};

use cgxeasy_api::CgxClient;
use cgxeasy_api::models::{DhcpCustomOption, DhcpServer};

use crate::error::CoreError;
use crate::ops::{Change, OpResult, Outcome, none_if_empty, report};
use crate::session::Session;

/// A custom option to add to a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpOptionSpec {
    /// Option name as it appears in the definition (`tftp-server`).
    pub name: String,
    /// Full definition, e.g. `option tftp-server code 150 = ip-address;`.
    pub definition: String,
    pub value: String,
    #[serde(default)]
    pub vendor_class: Option<String>,
}

fn same_vendor_class(option: &DhcpCustomOption, vendor_class: Option<&str>) -> bool {
    fn normalize(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.is_empty())
    }
    normalize(option.vendor_class_identifier.as_deref()) == normalize(vendor_class)
}

impl Session {
    /// Delete the DHCP pool serving `subnet` at `site`.
    ///
    /// Fails with `"Site not found"` or `"DHCP subnet not found"` without
    /// issuing a delete.
    pub async fn dhcp_pool_delete(&self, site: &str, subnet: &str) -> OpResult {
        let target = format!("{site}/{subnet}");
        report("dhcp_pool_delete", &target, self.pool_delete(site, subnet).await)
    }

    async fn pool_delete(&self, site: &str, subnet: &str) -> Result<Outcome, CoreError> {
        let client = self.client().await?;
        let site = self.site(site).await?;
        let pool = find_pool(&client, &site.id, subnet).await?;

        client
            .delete_dhcp_server(&site.id, &pool.id)
            .await
            .map_err(|e| CoreError::write_failed("delete DHCP pool", e))?;
        Ok(Outcome::new(Change::Deleted, format!("DHCP pool {subnet} deleted")))
    }

    /// Append a custom option to the pool serving `subnet`.
    ///
    /// An option with the same name and vendor class is left alone and
    /// reported as already existing.
    pub async fn dhcp_option_add(&self, site: &str, subnet: &str, option: &DhcpOptionSpec) -> OpResult {
        let target = format!("{site}/{subnet}");
        report("dhcp_option_add", &target, self.option_add(site, subnet, option).await)
    }

    async fn option_add(
        &self,
        site: &str,
        subnet: &str,
        spec: &DhcpOptionSpec,
    ) -> Result<Outcome, CoreError> {
        let matcher = self.option_matcher();
        let candidate = DhcpCustomOption {
            option_definition: Some(spec.definition.clone()),
            option_value: Some(spec.value.clone()),
            vendor_class_identifier: spec.vendor_class.clone().filter(|v| !v.is_empty()),
            ..Default::default()
        };
        if !matcher.matches(&candidate, &spec.name) {
            return Err(CoreError::invalid(format!(
                "definition does not declare option {}",
                spec.name
            )));
        }

        let client = self.client().await?;
        let site = self.site(site).await?;
        let mut pool = find_pool(&client, &site.id, subnet).await?;

        let mut options = pool.custom_options.take().unwrap_or_default();
        if options.iter().any(|o| {
            matcher.matches(o, &spec.name) && same_vendor_class(o, spec.vendor_class.as_deref())
        }) {
            return Err(CoreError::already_exists("DHCP option", spec.name.clone()));
        }
        options.push(candidate);
        pool.custom_options = Some(options);

        client
            .update_dhcp_server(&site.id, &pool)
            .await
            .map_err(|e| CoreError::write_failed("update DHCP pool", e))?;
        Ok(Outcome::new(
            Change::Updated,
            format!("option {} added to {subnet}", spec.name),
        ))
    }

    /// Remove every custom option called `name` from the pool. With a
    /// vendor class only the options for that class go.
    pub async fn dhcp_option_remove(
        &self,
        site: &str,
        subnet: &str,
        name: &str,
        vendor_class: Option<&str>,
    ) -> OpResult {
        let target = format!("{site}/{subnet}");
        report(
            "dhcp_option_remove",
            &target,
            self.option_remove(site, subnet, name, vendor_class).await,
        )
    }

    async fn option_remove(
        &self,
        site: &str,
        subnet: &str,
        name: &str,
        vendor_class: Option<&str>,
    ) -> Result<Outcome, CoreError> {
        let matcher = self.option_matcher();
        let client = self.client().await?;
        let site = self.site(site).await?;
        let mut pool = find_pool(&client, &site.id, subnet).await?;

        let options = pool.custom_options.take().unwrap_or_default();
        let before = options.len();
        let kept: Vec<_> = options
            .into_iter()
            .filter(|o| {
                let hit = matcher.matches(o, name)
                    && (vendor_class.is_none() || same_vendor_class(o, vendor_class));
                !hit
            })
            .collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Err(CoreError::not_found("DHCP option", name));
        }
        pool.custom_options = none_if_empty(kept);

        client
            .update_dhcp_server(&site.id, &pool)
            .await
            .map_err(|e| CoreError::write_failed("update DHCP pool", e))?;
        Ok(Outcome::new(
            Change::Updated,
            format!("{removed} option(s) {name} removed from {subnet}"),
        ))
    }
}

async fn find_pool(client: &CgxClient, site_id: &str, subnet: &str) -> Result<DhcpServer, CoreError> {
    client
        .list_dhcp_servers(site_id)
        .await?
        .into_iter()
        .find(|p| p.subnet == subnet)
        .ok_or_else(|| CoreError::not_found("DHCP subnet", subnet))
}
