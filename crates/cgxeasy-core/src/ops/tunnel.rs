// ── Site-to-site tunnels ──
//
// Every WAN interface of one site is paired with every WAN interface of
// the other that has the same circuit type. Each pair is its own result;
// a link the controller already has counts as done.

use cgxeasy_api::models::{AnynetLink, WanInterface};
use tracing::debug;

use crate::batch::BatchReport;
use crate::error::CoreError;
use crate::ops::{Change, OpResult, Outcome, report};
use crate::session::Session;

const OPERATION: &str = "create_site_tunnels";

/// Matching pairs of the two sites' WAN interfaces, in listing order.
/// Circuits without a type never pair.
pub fn pair_wan_interfaces<'a>(
    a: &'a [WanInterface],
    b: &'a [WanInterface],
) -> Vec<(&'a WanInterface, &'a WanInterface)> {
    a.iter()
        .filter(|wa| !wa.wan_type.is_empty())
        .flat_map(|wa| {
            b.iter()
                .filter(move |wb| wb.wan_type == wa.wan_type)
                .map(move |wb| (wa, wb))
        })
        .collect()
}

impl Session {
    /// Create anynet links between all matching WAN interfaces of two
    /// sites. Pairs are attempted independently; running this twice
    /// reports every pair as already existing the second time.
    pub async fn create_site_tunnels(&self, site_a: &str, site_b: &str) -> BatchReport {
        let target = format!("{site_a} <-> {site_b}");
        if site_a == site_b {
            let err = CoreError::invalid("tunnel endpoints must be different sites");
            return OpResult::failed(OPERATION, &target, &err).into();
        }

        let (a, b, wans_a, wans_b) = match self.tunnel_endpoints(site_a, site_b).await {
            Ok(endpoints) => endpoints,
            Err(e) => return OpResult::failed(OPERATION, &target, &e).into(),
        };
        let client = match self.client().await {
            Ok(client) => client,
            Err(e) => return OpResult::failed(OPERATION, &target, &e).into(),
        };

        let pairs = pair_wan_interfaces(&wans_a, &wans_b);
        debug!(pairs = pairs.len(), "{target}: matching WAN pairs");

        let mut batch = BatchReport::new();
        for (wa, wb) in pairs {
            let pair_target = format!(
                "{site_a}:{} <-> {site_b}:{}",
                wa.display_name(),
                wb.display_name()
            );
            let link = AnynetLink {
                ep1_site_id: a.clone(),
                ep1_wan_if_id: wa.id.clone(),
                ep2_site_id: b.clone(),
                ep2_wan_if_id: wb.id.clone(),
                admin_up: true,
                forced: true,
                ..Default::default()
            };
            let result = match client.create_anynet_link(&link).await {
                Ok(_) => Ok(Outcome::new(Change::Created, "tunnel created")),
                Err(e) if e.is_duplicate_link() => {
                    Ok(Outcome::new(Change::Unchanged, "tunnel already exists"))
                }
                Err(e) => Err(CoreError::write_failed("create anynet link", e)),
            };
            batch.push(report(OPERATION, &pair_target, result));
        }
        batch
    }

    async fn tunnel_endpoints(
        &self,
        site_a: &str,
        site_b: &str,
    ) -> Result<(String, String, Vec<WanInterface>, Vec<WanInterface>), CoreError> {
        let client = self.client().await?;
        let a = self.site(site_a).await?;
        let b = self.site(site_b).await?;
        let wans_a = client.list_wan_interfaces(&a.id).await?;
        let wans_b = client.list_wan_interfaces(&b.id).await?;
        Ok((a.id.clone(), b.id.clone(), wans_a, wans_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wan(id: &str, kind: &str) -> WanInterface {
        serde_json::from_value(serde_json::json!({ "id": id, "type": kind }))
            .unwrap_or_else(|e| panic!("bad fixture: {e}"))
    }

    #[test]
    fn pairs_only_same_circuit_type() {
        let a = vec![wan("a1", "publicwan"), wan("a2", "privatewan")];
        let b = vec![wan("b1", "publicwan"), wan("b2", "publicwan"), wan("b3", "privatewan")];

        let ids: Vec<_> = pair_wan_interfaces(&a, &b)
            .into_iter()
            .map(|(x, y)| (x.id.as_str(), y.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("a1", "b1"), ("a1", "b2"), ("a2", "b3")]);
    }

    #[test]
    fn no_common_type_means_no_pairs() {
        let a = vec![wan("a1", "publicwan")];
        let b = vec![wan("b1", "privatewan")];
        assert!(pair_wan_interfaces(&a, &b).is_empty());
    }

    #[test]
    fn untyped_circuits_never_pair() {
        let untyped = |id: &str| -> WanInterface {
            serde_json::from_value(serde_json::json!({ "id": id, "type": null }))
                .unwrap_or_else(|e| panic!("bad fixture: {e}"))
        };
        let a = vec![untyped("a1"), wan("a2", "publicwan")];
        let b = vec![untyped("b1"), wan("b2", "publicwan")];

        let ids: Vec<_> = pair_wan_interfaces(&a, &b)
            .into_iter()
            .map(|(x, y)| (x.id.as_str(), y.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("a2", "b2")]);
    }
}
