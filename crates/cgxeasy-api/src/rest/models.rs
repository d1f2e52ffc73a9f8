// Controller resource models
//
// Objects are fetched, mutated and written back whole, so every model keeps
// the fields it does not understand in `extra`. List fields are
// `Option<Vec<_>>` without `skip_serializing_if`: the controller
// distinguishes `null` ("none configured") from `[]`, and a PUT must send
// `null` explicitly to clear a list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read a missing or `null` string as empty. Unclaimed and half-configured
/// objects come back with `null` names.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ── Session ──────────────────────────────────────────────────────────

/// The authenticated operator's profile (`GET /v2.1/api/profile`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub tenant_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Topology ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub admin_state: Option<String>,
    #[serde(default)]
    pub element_cluster_role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ION device. Unassigned elements report `site_id` as `null` or `"1"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Interfaces ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub interface_type: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub admin_up: Option<bool>,
    #[serde(default)]
    pub used_for: Option<String>,
    #[serde(default)]
    pub dhcp_relay: Option<DhcpRelay>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub sub_interface: Option<SubInterface>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Interface {
    /// The interface name, or an empty string for unnamed interfaces.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn is_subinterface(&self) -> bool {
        self.interface_type.as_deref() == Some("subinterface") || self.sub_interface.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DhcpRelay {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub server_ips: Option<Vec<String>>,
    #[serde(default)]
    pub source_interface: Option<String>,
    #[serde(default)]
    pub option_82: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubInterface {
    #[serde(default)]
    pub vlan_id: Option<u16>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── DHCP ─────────────────────────────────────────────────────────────

/// A site DHCP pool. The `subnet` string is the only usable key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DhcpServer {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subnet: String,
    #[serde(default)]
    pub custom_options: Option<Vec<DhcpCustomOption>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A custom option, e.g. `option_definition = "option tftp-server code 150 = ip-address;"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DhcpCustomOption {
    #[serde(default)]
    pub option_definition: Option<String>,
    #[serde(default)]
    pub option_value: Option<String>,
    #[serde(default)]
    pub vendor_class_identifier: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Security zones ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityZone {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Binding of one security zone to parts of one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSecurityZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub zone_id: String,
    #[serde(default)]
    pub interface_ids: Option<Vec<String>>,
    #[serde(default)]
    pub lannetwork_ids: Option<Vec<String>>,
    #[serde(default)]
    pub waninterface_ids: Option<Vec<String>>,
    #[serde(default)]
    pub wanoverlay_ids: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementSecurityZone {
    /// `true` when all four association lists are null or empty.
    pub fn is_empty(&self) -> bool {
        [
            &self.interface_ids,
            &self.lannetwork_ids,
            &self.waninterface_ids,
            &self.wanoverlay_ids,
        ]
        .iter()
        .all(|ids| ids.as_ref().is_none_or(Vec::is_empty))
    }

    pub fn has_interface(&self, interface_id: &str) -> bool {
        self.interface_ids
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|id| id == interface_id))
    }
}

// ── SNMP ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnmpAgent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub v2_config: Option<Value>,
    #[serde(default)]
    pub v3_config: Option<SnmpV3Config>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnmpV3Config {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub users_access: Option<Vec<SnmpV3User>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnmpV3User {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_name: String,
    #[serde(default)]
    pub engine_id: Option<String>,
    #[serde(default)]
    pub security_level: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub auth_phrase: Option<String>,
    #[serde(default)]
    pub enc_type: Option<String>,
    #[serde(default)]
    pub enc_phrase: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Prefix lists ─────────────────────────────────────────────────────

/// Tenant-wide named prefix list used by network policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalPrefix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub ipv4_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub ipv6_prefixes: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tenant-wide name of a site-local prefix list; values live per site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalPrefix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The prefixes a [`LocalPrefix`] resolves to at one site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteLocalPrefix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub prefix_id: String,
    #[serde(default)]
    pub ipv4_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub ipv6_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── WAN / tunnels ────────────────────────────────────────────────────

/// A site WAN circuit. `type` is `"publicwan"` or `"privatewan"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanInterface {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub wan_type: String,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub label_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WanInterface {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A site-to-site overlay tunnel between two WAN interfaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnynetLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ep1_site_id: String,
    pub ep1_wan_if_id: String,
    pub ep2_site_id: String,
    pub ep2_wan_if_id: String,
    #[serde(default)]
    pub admin_up: bool,
    #[serde(default)]
    pub forced: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interface_keeps_unknown_fields_on_round_trip() {
        let raw = json!({
            "id": "if-1",
            "name": "1",
            "type": "port",
            "mtu": 1500,
            "ipv4_config": {"type": "dhcp"},
            "dhcp_relay": null,
            "tags": null
        });
        let iface: Interface = serde_json::from_value(raw).unwrap();
        assert_eq!(iface.extra["mtu"], json!(1500));

        let back = serde_json::to_value(&iface).unwrap();
        assert_eq!(back["ipv4_config"], json!({"type": "dhcp"}));
        assert_eq!(back["type"], json!("port"));
    }

    #[test]
    fn cleared_lists_serialize_as_null() {
        let binding = ElementSecurityZone {
            id: Some("b1".into()),
            zone_id: "z1".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&binding).unwrap();
        assert_eq!(v["interface_ids"], Value::Null);
        assert_eq!(v["wanoverlay_ids"], Value::Null);
    }

    #[test]
    fn binding_emptiness_covers_all_lists() {
        let mut binding = ElementSecurityZone {
            zone_id: "z1".into(),
            interface_ids: Some(vec![]),
            ..Default::default()
        };
        assert!(binding.is_empty());

        binding.wanoverlay_ids = Some(vec!["ov-1".into()]);
        assert!(!binding.is_empty());
    }

    #[test]
    fn new_objects_omit_id() {
        let link = AnynetLink {
            ep1_site_id: "s1".into(),
            ep1_wan_if_id: "w1".into(),
            ep2_site_id: "s2".into(),
            ep2_wan_if_id: "w2".into(),
            admin_up: true,
            forced: true,
            ..Default::default()
        };
        let v = serde_json::to_value(&link).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["ep2_wan_if_id"], json!("w2"));
    }

    #[test]
    fn null_names_decode_as_empty() {
        let elements: Vec<Element> = serde_json::from_value(json!([
            { "id": "e1", "name": "ion-ca-1", "site_id": "s1" },
            { "id": "e9", "name": null, "site_id": null },
            { "id": "e10" }
        ]))
        .unwrap();
        let names: Vec<_> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ion-ca-1", "", ""]);

        let wan: WanInterface = serde_json::from_value(json!({ "id": "w1", "type": null })).unwrap();
        assert!(wan.wan_type.is_empty());
    }
}
