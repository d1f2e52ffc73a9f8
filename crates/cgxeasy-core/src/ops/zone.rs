// ── Security zone assignment ──
//
// An interface may appear in at most one zone binding of its element.
// Reassignment is planned as a list of transitions (detach from every
// other binding, then attach to the target) and executed in order.

use cgxeasy_api::models::ElementSecurityZone;

use crate::error::CoreError;
use crate::ops::{Change, OpResult, Outcome, none_if_empty, report, require_id};
use crate::session::{ElementRef, Session};

/// What happens to a binding the interface is removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachAction {
    /// All four association lists are now empty.
    Delete,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachAction {
    /// No binding for the zone exists on the element yet.
    Create,
    Update,
    /// The interface is already in the target binding.
    AlreadyBound,
}

/// One step of a zone reassignment, carrying the binding as it should be
/// written.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneTransition {
    Detaching {
        binding: ElementSecurityZone,
        action: DetachAction,
    },
    Attaching {
        binding: ElementSecurityZone,
        action: AttachAction,
    },
}

/// Plan moving `interface_id` into `target_zone` (or out of every zone
/// when `None`).
///
/// Detach steps come first, one per binding of another zone that lists
/// the interface; at most one attach step follows.
pub fn plan_zone_assignment(
    bindings: &[ElementSecurityZone],
    interface_id: &str,
    target_zone: Option<&str>,
) -> Vec<ZoneTransition> {
    let mut plan = Vec::new();

    for binding in bindings {
        if !binding.has_interface(interface_id) || Some(binding.zone_id.as_str()) == target_zone {
            continue;
        }
        let mut detached = binding.clone();
        let ids = detached.interface_ids.take().unwrap_or_default();
        detached.interface_ids = none_if_empty(ids.into_iter().filter(|id| id != interface_id).collect());
        let action = if detached.is_empty() {
            DetachAction::Delete
        } else {
            DetachAction::Update
        };
        plan.push(ZoneTransition::Detaching {
            binding: detached,
            action,
        });
    }

    let Some(zone_id) = target_zone else {
        return plan;
    };

    let attach = match bindings.iter().find(|b| b.zone_id == zone_id) {
        Some(existing) if existing.has_interface(interface_id) => ZoneTransition::Attaching {
            binding: existing.clone(),
            action: AttachAction::AlreadyBound,
        },
        Some(existing) => {
            let mut binding = existing.clone();
            binding
                .interface_ids
                .get_or_insert_with(Vec::new)
                .push(interface_id.to_owned());
            ZoneTransition::Attaching {
                binding,
                action: AttachAction::Update,
            }
        }
        None => ZoneTransition::Attaching {
            binding: ElementSecurityZone {
                zone_id: zone_id.to_owned(),
                interface_ids: Some(vec![interface_id.to_owned()]),
                ..Default::default()
            },
            action: AttachAction::Create,
        },
    };
    plan.push(attach);
    plan
}

impl Session {
    /// Bind an interface to the named security zone, unbinding it from
    /// any other zone first.
    pub async fn set_interface_zone(&self, element: &str, interface: &str, zone: &str) -> OpResult {
        let target = format!("{element}/{interface}");
        report(
            "set_interface_zone",
            &target,
            self.zone_assign(element, interface, Some(zone)).await,
        )
    }

    /// Remove an interface from whatever zone it is bound to.
    pub async fn clear_interface_zone(&self, element: &str, interface: &str) -> OpResult {
        let target = format!("{element}/{interface}");
        report(
            "clear_interface_zone",
            &target,
            self.zone_assign(element, interface, None).await,
        )
    }

    async fn zone_assign(
        &self,
        element: &str,
        interface: &str,
        zone: Option<&str>,
    ) -> Result<Outcome, CoreError> {
        let client = self.client().await?;
        let zone_id = match zone {
            Some(name) => Some(
                client
                    .list_security_zones()
                    .await?
                    .into_iter()
                    .find(|z| z.name == name)
                    .map(|z| z.id)
                    .ok_or_else(|| CoreError::not_found("Security zone", name))?,
            ),
            None => None,
        };

        let element = self.element_ref(element).await?;
        let iface = self
            .interfaces()
            .find(&client, &element.site_id, &element.element_id, interface)
            .await?;
        let iface_id = require_id(iface.id.as_ref(), "interface")?;

        let bindings = client
            .list_element_security_zones(&element.site_id, &element.element_id)
            .await?;
        let plan = plan_zone_assignment(&bindings, &iface_id, zone_id.as_deref());

        let mut wrote = false;
        for step in &plan {
            wrote |= self.apply_transition(&element, step).await?;
        }

        let message = match (zone, wrote) {
            (Some(z), true) => format!("{interface} bound to zone {z}"),
            (Some(z), false) => format!("{interface} already in zone {z}"),
            (None, true) => format!("{interface} removed from its zone"),
            (None, false) => format!("{interface} is not in any zone"),
        };
        let change = if wrote { Change::Updated } else { Change::Unchanged };
        Ok(Outcome::new(change, message))
    }

    /// Execute one planned step. Returns whether a write was issued.
    async fn apply_transition(&self, element: &ElementRef, step: &ZoneTransition) -> Result<bool, CoreError> {
        let client = self.client().await?;
        let (site_id, element_id) = (element.site_id.as_str(), element.element_id.as_str());

        match step {
            ZoneTransition::Detaching { binding, action } => {
                let id = require_id(binding.id.as_ref(), "zone binding")?;
                match action {
                    DetachAction::Delete => client
                        .delete_element_security_zone(site_id, element_id, &id)
                        .await
                        .map_err(|e| CoreError::write_failed("delete zone binding", e))?,
                    DetachAction::Update => {
                        client
                            .update_element_security_zone(site_id, element_id, &id, binding)
                            .await
                            .map_err(|e| CoreError::write_failed("update zone binding", e))?;
                    }
                }
                Ok(true)
            }
            ZoneTransition::Attaching { binding, action } => match action {
                AttachAction::AlreadyBound => Ok(false),
                AttachAction::Create => {
                    client
                        .create_element_security_zone(site_id, element_id, binding)
                        .await
                        .map_err(|e| CoreError::write_failed("create zone binding", e))?;
                    Ok(true)
                }
                AttachAction::Update => {
                    let id = require_id(binding.id.as_ref(), "zone binding")?;
                    client
                        .update_element_security_zone(site_id, element_id, &id, binding)
                        .await
                        .map_err(|e| CoreError::write_failed("update zone binding", e))?;
                    Ok(true)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn binding(id: &str, zone: &str, ifaces: &[&str]) -> ElementSecurityZone {
        ElementSecurityZone {
            id: Some(id.into()),
            zone_id: zone.into(),
            interface_ids: Some(ifaces.iter().map(|s| (*s).to_owned()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn moving_last_interface_deletes_old_binding() {
        let bindings = vec![binding("b1", "lan", &["if-1"])];
        let plan = plan_zone_assignment(&bindings, "if-1", Some("guest"));

        assert_eq!(plan.len(), 2);
        match &plan[0] {
            ZoneTransition::Detaching { binding, action } => {
                assert_eq!(*action, DetachAction::Delete);
                assert_eq!(binding.interface_ids, None);
            }
            other => panic!("expected detach, got {other:?}"),
        }
        match &plan[1] {
            ZoneTransition::Attaching { binding, action } => {
                assert_eq!(*action, AttachAction::Create);
                assert_eq!(binding.zone_id, "guest");
                assert_eq!(binding.interface_ids, Some(vec!["if-1".to_owned()]));
            }
            other => panic!("expected attach, got {other:?}"),
        }
    }

    #[test]
    fn old_binding_with_other_members_is_updated() {
        let mut lan = binding("b1", "lan", &["if-1"]);
        lan.lannetwork_ids = Some(vec!["ln-1".into()]);
        let bindings = vec![lan, binding("b2", "guest", &["if-9"])];

        let plan = plan_zone_assignment(&bindings, "if-1", Some("guest"));
        assert!(matches!(
            plan[0],
            ZoneTransition::Detaching {
                action: DetachAction::Update,
                ..
            }
        ));
        match &plan[1] {
            ZoneTransition::Attaching { binding, action } => {
                assert_eq!(*action, AttachAction::Update);
                assert_eq!(binding.id.as_deref(), Some("b2"));
                assert_eq!(
                    binding.interface_ids,
                    Some(vec!["if-9".to_owned(), "if-1".to_owned()])
                );
            }
            other => panic!("expected attach, got {other:?}"),
        }
    }

    #[test]
    fn already_bound_is_a_single_noop_step() {
        let bindings = vec![binding("b1", "lan", &["if-1"])];
        let plan = plan_zone_assignment(&bindings, "if-1", Some("lan"));
        assert_eq!(plan.len(), 1);
        assert!(matches!(
            plan[0],
            ZoneTransition::Attaching {
                action: AttachAction::AlreadyBound,
                ..
            }
        ));
    }

    #[test]
    fn clearing_detaches_from_every_binding() {
        let bindings = vec![
            binding("b1", "lan", &["if-1", "if-2"]),
            binding("b2", "guest", &["if-1"]),
        ];
        let plan = plan_zone_assignment(&bindings, "if-1", None);
        assert_eq!(plan.len(), 2);
        assert!(plan
            .iter()
            .all(|s| matches!(s, ZoneTransition::Detaching { .. })));
    }

    #[test]
    fn unbound_interface_clears_to_empty_plan() {
        let bindings = vec![binding("b1", "lan", &["if-2"])];
        assert!(plan_zone_assignment(&bindings, "if-1", None).is_empty());
    }
}
