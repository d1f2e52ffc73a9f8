// ── Interface operations ──
//
// DHCP relay servers, tags and sub-interfaces. Every successful write
// invalidates the element's interface cache entry.

use std::net::IpAddr;

use cgxeasy_api::models::{DhcpRelay, Interface, SubInterface};

use crate::error::CoreError;
use crate::ops::{Change, OpResult, Outcome, none_if_empty, report, require_id};
use crate::session::{ElementRef, Session};

const SUBINTERFACE_TYPE: &str = "subinterface";
const DEFAULT_USED_FOR: &str = "lan";

impl Session {
    /// Fetch one interface of an element through the interface cache.
    async fn interface(&self, element: &ElementRef, name: &str) -> Result<Interface, CoreError> {
        let client = self.client().await?;
        self.interfaces()
            .find(&client, &element.site_id, &element.element_id, name)
            .await
    }

    /// PUT a modified interface and drop the element's cached list.
    async fn write_interface(&self, element: &ElementRef, iface: &Interface) -> Result<(), CoreError> {
        let client = self.client().await?;
        let id = require_id(iface.id.as_ref(), "interface")?;
        client
            .update_interface(&element.site_id, &element.element_id, &id, iface)
            .await
            .map_err(|e| CoreError::write_failed("update interface", e))?;
        self.interfaces()
            .invalidate(&element.site_id, &element.element_id)
            .await;
        Ok(())
    }

    // ── DHCP relay ───────────────────────────────────────────────

    /// Add `server_ip` to the interface's DHCP relay servers, enabling
    /// relay if it was unset. Adding a server that is already present is
    /// a no-op.
    pub async fn interface_dhcprelay_add(&self, element: &str, interface: &str, server_ip: &str) -> OpResult {
        let target = format!("{element}/{interface}");
        report(
            "interface_dhcprelay_add",
            &target,
            self.relay_add(element, interface, server_ip).await,
        )
    }

    async fn relay_add(&self, element: &str, interface: &str, server_ip: &str) -> Result<Outcome, CoreError> {
        let ip = parse_ip(server_ip)?;
        let element = self.element_ref(element).await?;
        let mut iface = self.interface(&element, interface).await?;

        let relay = iface.dhcp_relay.get_or_insert_with(|| DhcpRelay {
            enabled: true,
            ..Default::default()
        });
        let servers = relay.server_ips.get_or_insert_with(Vec::new);
        if servers.iter().any(|s| same_ip(s, &ip)) {
            return Ok(Outcome::new(
                Change::Unchanged,
                format!("{ip} already a relay server"),
            ));
        }
        servers.push(ip.clone());
        relay.enabled = true;

        self.write_interface(&element, &iface).await?;
        Ok(Outcome::new(Change::Updated, format!("relay server {ip} added")))
    }

    /// Remove `server_ip` from the relay servers. Removing the last one
    /// clears the relay configuration entirely.
    pub async fn interface_dhcprelay_remove(&self, element: &str, interface: &str, server_ip: &str) -> OpResult {
        let target = format!("{element}/{interface}");
        report(
            "interface_dhcprelay_remove",
            &target,
            self.relay_remove(element, interface, server_ip).await,
        )
    }

    async fn relay_remove(&self, element: &str, interface: &str, server_ip: &str) -> Result<Outcome, CoreError> {
        let ip = parse_ip(server_ip)?;
        let element = self.element_ref(element).await?;
        let mut iface = self.interface(&element, interface).await?;

        let servers = iface
            .dhcp_relay
            .as_mut()
            .and_then(|r| r.server_ips.take())
            .unwrap_or_default();
        if !servers.iter().any(|s| same_ip(s, &ip)) {
            return Err(CoreError::not_found("DHCP relay server", ip));
        }
        let remaining: Vec<String> = servers.into_iter().filter(|s| !same_ip(s, &ip)).collect();
        match none_if_empty(remaining) {
            None => iface.dhcp_relay = None,
            Some(rest) => {
                if let Some(relay) = iface.dhcp_relay.as_mut() {
                    relay.server_ips = Some(rest);
                }
            }
        }

        self.write_interface(&element, &iface).await?;
        Ok(Outcome::new(Change::Updated, format!("relay server {ip} removed")))
    }

    // ── Tags ─────────────────────────────────────────────────────

    pub async fn interface_tag_add(&self, element: &str, interface: &str, tag: &str) -> OpResult {
        let target = format!("{element}/{interface}");
        report("interface_tag_add", &target, self.tag_add(element, interface, tag).await)
    }

    async fn tag_add(&self, element: &str, interface: &str, tag: &str) -> Result<Outcome, CoreError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CoreError::invalid("tag must not be empty"));
        }
        let element = self.element_ref(element).await?;
        let mut iface = self.interface(&element, interface).await?;

        let tags = iface.tags.get_or_insert_with(Vec::new);
        if tags.iter().any(|t| t == tag) {
            return Ok(Outcome::new(Change::Unchanged, format!("tag {tag} already set")));
        }
        tags.push(tag.to_owned());

        self.write_interface(&element, &iface).await?;
        Ok(Outcome::new(Change::Updated, format!("tag {tag} added")))
    }

    pub async fn interface_tag_remove(&self, element: &str, interface: &str, tag: &str) -> OpResult {
        let target = format!("{element}/{interface}");
        report(
            "interface_tag_remove",
            &target,
            self.tag_remove(element, interface, tag).await,
        )
    }

    async fn tag_remove(&self, element: &str, interface: &str, tag: &str) -> Result<Outcome, CoreError> {
        let tag = tag.trim();
        let element = self.element_ref(element).await?;
        let mut iface = self.interface(&element, interface).await?;

        let tags = iface.tags.take().unwrap_or_default();
        if !tags.iter().any(|t| t == tag) {
            return Err(CoreError::not_found("Tag", tag));
        }
        iface.tags = none_if_empty(tags.into_iter().filter(|t| t != tag).collect());

        self.write_interface(&element, &iface).await?;
        Ok(Outcome::new(Change::Updated, format!("tag {tag} removed")))
    }

    // ── Sub-interfaces ───────────────────────────────────────────

    /// Create the VLAN sub-interface `<parent>.<vlan>`.
    pub async fn subinterface_create(
        &self,
        element: &str,
        parent: &str,
        vlan: u16,
        used_for: Option<&str>,
    ) -> OpResult {
        let target = format!("{element}/{parent}.{vlan}");
        report(
            "subinterface_create",
            &target,
            self.sub_create(element, parent, vlan, used_for).await,
        )
    }

    async fn sub_create(
        &self,
        element: &str,
        parent: &str,
        vlan: u16,
        used_for: Option<&str>,
    ) -> Result<Outcome, CoreError> {
        if !(1..=4094).contains(&vlan) {
            return Err(CoreError::invalid(format!("VLAN id {vlan} outside 1-4094")));
        }
        let element = self.element_ref(element).await?;
        let client = self.client().await?;
        let interfaces = self
            .interfaces()
            .get(&client, &element.site_id, &element.element_id)
            .await?;

        let parent_iface = interfaces
            .iter()
            .find(|i| i.name() == parent)
            .ok_or_else(|| CoreError::not_found("Interface", parent))?;
        if parent_iface.is_subinterface() {
            return Err(CoreError::invalid(format!(
                "{parent} is itself a sub-interface"
            )));
        }
        let name = format!("{parent}.{vlan}");
        if interfaces.iter().any(|i| i.name() == name) {
            return Err(CoreError::already_exists("Interface", name));
        }

        let sub = Interface {
            name: Some(name.clone()),
            interface_type: Some(SUBINTERFACE_TYPE.into()),
            parent: Some(require_id(parent_iface.id.as_ref(), "interface")?),
            admin_up: Some(true),
            used_for: Some(used_for.unwrap_or(DEFAULT_USED_FOR).into()),
            sub_interface: Some(SubInterface {
                vlan_id: Some(vlan),
                ..Default::default()
            }),
            ..Default::default()
        };
        client
            .create_interface(&element.site_id, &element.element_id, &sub)
            .await
            .map_err(|e| CoreError::write_failed("create interface", e))?;
        self.interfaces()
            .invalidate(&element.site_id, &element.element_id)
            .await;
        Ok(Outcome::new(Change::Created, format!("sub-interface {name} created")))
    }

    pub async fn subinterface_delete(&self, element: &str, name: &str) -> OpResult {
        let target = format!("{element}/{name}");
        report("subinterface_delete", &target, self.sub_delete(element, name).await)
    }

    async fn sub_delete(&self, element: &str, name: &str) -> Result<Outcome, CoreError> {
        let element = self.element_ref(element).await?;
        let iface = self.interface(&element, name).await?;
        if !iface.is_subinterface() {
            return Err(CoreError::invalid(format!("{name} is not a sub-interface")));
        }
        let id = require_id(iface.id.as_ref(), "interface")?;

        let client = self.client().await?;
        client
            .delete_interface(&element.site_id, &element.element_id, &id)
            .await
            .map_err(|e| CoreError::write_failed("delete interface", e))?;
        self.interfaces()
            .invalidate(&element.site_id, &element.element_id)
            .await;
        Ok(Outcome::new(Change::Deleted, format!("sub-interface {name} deleted")))
    }
}

/// Canonical text form of an IP address argument.
fn parse_ip(raw: &str) -> Result<String, CoreError> {
    raw.trim()
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| CoreError::invalid(format!("{raw} is not an IP address")))
}

/// Compare a stored server address with a canonical one by value, so
/// `2001:DB8::1` and `2001:db8::1` are the same server.
fn same_ip(stored: &str, canonical: &str) -> bool {
    parse_ip(stored).is_ok_and(|ip| ip == canonical)
}
