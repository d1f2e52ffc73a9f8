// ── Command model ──
//
// One reconciliation request plus the targets it applies to. The CLI and
// the line shell both build `Command`s; `Session::execute` fans element
// targets out into independent operations.

use std::path::PathBuf;

use regex::Regex;

use cgxeasy_api::models::SnmpV3User;

use crate::batch::BatchReport;
use crate::error::CoreError;
use crate::ops::OpResult;
use crate::ops::dhcp::DhcpOptionSpec;
use crate::session::Session;
use crate::store::{CollectionKey, Entity};
use crate::targets;

/// Which elements a command applies to.
#[derive(Debug, Clone)]
pub enum ElementTarget {
    /// One element by name.
    Name(String),
    /// Element names listed one per line in a file.
    File(PathBuf),
    /// Every element whose name matches.
    Pattern(Regex),
}

/// Which sites a command applies to.
#[derive(Debug, Clone)]
pub enum SiteTarget {
    Name(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub enum Command {
    // ── DHCP ─────────────────────────────────────────────────────
    DhcpPoolDelete {
        site: String,
        subnet: String,
    },
    DhcpOptionAdd {
        site: String,
        subnet: String,
        option: DhcpOptionSpec,
    },
    DhcpOptionRemove {
        site: String,
        subnet: String,
        name: String,
        vendor_class: Option<String>,
    },

    // ── Interfaces ───────────────────────────────────────────────
    RelayAdd {
        target: ElementTarget,
        interface: String,
        server_ip: String,
    },
    RelayRemove {
        target: ElementTarget,
        interface: String,
        server_ip: String,
    },
    TagAdd {
        target: ElementTarget,
        interface: String,
        tag: String,
    },
    TagRemove {
        target: ElementTarget,
        interface: String,
        tag: String,
    },
    ZoneSet {
        target: ElementTarget,
        interface: String,
        zone: String,
    },
    ZoneClear {
        target: ElementTarget,
        interface: String,
    },
    SubinterfaceCreate {
        target: ElementTarget,
        parent: String,
        vlan: u16,
        used_for: Option<String>,
    },
    SubinterfaceDelete {
        target: ElementTarget,
        name: String,
    },

    // ── SNMP ─────────────────────────────────────────────────────
    SnmpUserUpsert {
        target: ElementTarget,
        user: SnmpV3User,
    },
    SnmpUserRemove {
        target: ElementTarget,
        user_name: String,
    },

    // ── Prefix lists ─────────────────────────────────────────────
    GlobalPrefixUpsert {
        name: String,
        prefixes: Vec<String>,
    },
    LocalPrefixUpsert {
        sites: SiteTarget,
        name: String,
        prefixes: Vec<String>,
    },

    // ── Tunnels ──────────────────────────────────────────────────
    TunnelCreate {
        site_a: String,
        site_b: String,
    },
}

impl Command {
    /// Operation name reported on results.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::DhcpPoolDelete { .. } => "dhcp_pool_delete",
            Self::DhcpOptionAdd { .. } => "dhcp_option_add",
            Self::DhcpOptionRemove { .. } => "dhcp_option_remove",
            Self::RelayAdd { .. } => "interface_dhcprelay_add",
            Self::RelayRemove { .. } => "interface_dhcprelay_remove",
            Self::TagAdd { .. } => "interface_tag_add",
            Self::TagRemove { .. } => "interface_tag_remove",
            Self::ZoneSet { .. } => "set_interface_zone",
            Self::ZoneClear { .. } => "clear_interface_zone",
            Self::SubinterfaceCreate { .. } => "subinterface_create",
            Self::SubinterfaceDelete { .. } => "subinterface_delete",
            Self::SnmpUserUpsert { .. } => "snmp_user_upsert",
            Self::SnmpUserRemove { .. } => "snmp_user_remove",
            Self::GlobalPrefixUpsert { .. } => "global_prefix_list_upsert",
            Self::LocalPrefixUpsert { .. } => "local_prefix_list_upsert",
            Self::TunnelCreate { .. } => "create_site_tunnels",
        }
    }

    fn element_target(&self) -> Option<&ElementTarget> {
        match self {
            Self::RelayAdd { target, .. }
            | Self::RelayRemove { target, .. }
            | Self::TagAdd { target, .. }
            | Self::TagRemove { target, .. }
            | Self::ZoneSet { target, .. }
            | Self::ZoneClear { target, .. }
            | Self::SubinterfaceCreate { target, .. }
            | Self::SubinterfaceDelete { target, .. }
            | Self::SnmpUserUpsert { target, .. }
            | Self::SnmpUserRemove { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl Session {
    /// Run a command against its targets, one request at a time.
    ///
    /// Per-item failures land in the report. An `Err` means the target
    /// set itself could not be determined (unreadable file, no session).
    pub async fn execute(&self, command: Command) -> Result<BatchReport, CoreError> {
        if let Some(target) = command.element_target() {
            let elements = self.expand_elements(target).await?;
            let mut batch = BatchReport::new();
            for element in &elements {
                batch.push(self.run_on_element(&command, element).await);
            }
            return Ok(batch);
        }

        let report = match command {
            Command::DhcpPoolDelete { site, subnet } => {
                self.dhcp_pool_delete(&site, &subnet).await.into()
            }
            Command::DhcpOptionAdd {
                site,
                subnet,
                option,
            } => self.dhcp_option_add(&site, &subnet, &option).await.into(),
            Command::DhcpOptionRemove {
                site,
                subnet,
                name,
                vendor_class,
            } => self
                .dhcp_option_remove(&site, &subnet, &name, vendor_class.as_deref())
                .await
                .into(),
            Command::GlobalPrefixUpsert { name, prefixes } => {
                self.global_prefix_list_upsert(&name, &prefixes).await.into()
            }
            Command::LocalPrefixUpsert {
                sites: SiteTarget::Name(site),
                name,
                prefixes,
            } => self
                .local_prefix_list_upsert(&site, &name, &prefixes)
                .await
                .into(),
            Command::LocalPrefixUpsert {
                sites: SiteTarget::Pattern(pattern),
                name,
                prefixes,
            } => {
                self.local_prefix_list_upsert_matching(&pattern, &name, &prefixes)
                    .await
            }
            Command::TunnelCreate { site_a, site_b } => {
                self.create_site_tunnels(&site_a, &site_b).await
            }
            other => {
                return Err(CoreError::Internal(format!(
                    "{} has no element target",
                    other.operation()
                )));
            }
        };
        Ok(report)
    }

    async fn expand_elements(&self, target: &ElementTarget) -> Result<Vec<String>, CoreError> {
        match target {
            ElementTarget::Name(name) => Ok(vec![name.clone()]),
            ElementTarget::File(path) => targets::read_element_names(path),
            ElementTarget::Pattern(pattern) => Ok(self
                .resolve_by_pattern(CollectionKey::Name2Element, pattern)
                .await?
                .iter()
                .map(|e| Entity::name(e).to_owned())
                .collect()),
        }
    }

    async fn run_on_element(&self, command: &Command, element: &str) -> OpResult {
        match command {
            Command::RelayAdd {
                interface,
                server_ip,
                ..
            } => self.interface_dhcprelay_add(element, interface, server_ip).await,
            Command::RelayRemove {
                interface,
                server_ip,
                ..
            } => {
                self.interface_dhcprelay_remove(element, interface, server_ip)
                    .await
            }
            Command::TagAdd { interface, tag, .. } => {
                self.interface_tag_add(element, interface, tag).await
            }
            Command::TagRemove { interface, tag, .. } => {
                self.interface_tag_remove(element, interface, tag).await
            }
            Command::ZoneSet {
                interface, zone, ..
            } => self.set_interface_zone(element, interface, zone).await,
            Command::ZoneClear { interface, .. } => {
                self.clear_interface_zone(element, interface).await
            }
            Command::SubinterfaceCreate {
                parent,
                vlan,
                used_for,
                ..
            } => {
                self.subinterface_create(element, parent, *vlan, used_for.as_deref())
                    .await
            }
            Command::SubinterfaceDelete { name, .. } => {
                self.subinterface_delete(element, name).await
            }
            Command::SnmpUserUpsert { user, .. } => self.snmp_user_upsert(element, user).await,
            Command::SnmpUserRemove { user_name, .. } => {
                self.snmp_user_remove(element, user_name).await
            }
            other => OpResult::failed(
                other.operation(),
                element,
                &CoreError::Internal("command does not target elements".into()),
            ),
        }
    }
}
