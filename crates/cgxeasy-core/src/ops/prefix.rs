// ── Prefix lists ──
//
// Both kinds of list hold separate IPv4 and IPv6 prefix arrays. An upsert
// is a set union with what the controller already has: existing entries
// keep their order, new ones are appended, duplicates never appear.

use std::collections::HashSet;
use std::net::IpAddr;

use indexmap::IndexSet;
use regex::Regex;

use cgxeasy_api::models::{GlobalPrefix, LocalPrefix, SiteLocalPrefix};

use crate::batch::BatchReport;
use crate::error::CoreError;
use crate::ops::{Change, OpResult, Outcome, none_if_empty, report, require_id};
use crate::session::Session;
use crate::store::{CollectionKey, Entity};

/// Validated prefixes split by address family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSet {
    pub ipv4: IndexSet<String>,
    pub ipv6: IndexSet<String>,
}

impl PrefixSet {
    /// Parse CIDR strings (`10.0.0.0/8`, `2001:db8::/32`). A bare address
    /// is taken as a host route.
    pub fn parse<S: AsRef<str>>(prefixes: &[S]) -> Result<Self, CoreError> {
        let mut set = Self::default();
        for raw in prefixes {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let (ip, canonical) = canonical_prefix(raw)?;
            if ip.is_ipv4() {
                set.ipv4.insert(canonical);
            } else {
                set.ipv6.insert(canonical);
            }
        }
        if set.ipv4.is_empty() && set.ipv6.is_empty() {
            return Err(CoreError::invalid("no prefixes given"));
        }
        Ok(set)
    }
}

/// Normalize one CIDR string to `<address>/<length>`.
fn canonical_prefix(raw: &str) -> Result<(IpAddr, String), CoreError> {
    let raw = raw.trim();
    let (addr, len) = raw.split_once('/').unwrap_or((raw, ""));
    let ip: IpAddr = addr
        .parse()
        .map_err(|_| CoreError::invalid(format!("{raw} is not an IP prefix")))?;
    let max = if ip.is_ipv4() { 32 } else { 128 };
    let len = if len.is_empty() {
        max
    } else {
        len.parse::<u8>()
            .ok()
            .filter(|l| *l <= max)
            .ok_or_else(|| CoreError::invalid(format!("{raw} has an invalid prefix length")))?
    };
    Ok((ip, format!("{ip}/{len}")))
}

/// Comparison key for a stored entry. Entries the controller holds in a
/// form we cannot parse are compared verbatim.
fn prefix_key(stored: &str) -> String {
    canonical_prefix(stored).map_or_else(|_| stored.trim().to_owned(), |(_, key)| key)
}

/// Union `existing` with `additions`. Returns the merged list (`None` when
/// both are empty) and how many entries were new.
///
/// Entries are compared by value, so a stored `2001:DB8::/32` already
/// covers `2001:db8::/32`. Stored entries are kept as the controller has
/// them.
pub fn merge_prefixes(existing: Option<Vec<String>>, additions: &IndexSet<String>) -> (Option<Vec<String>>, usize) {
    let mut merged = existing.unwrap_or_default();
    let mut seen: HashSet<String> = merged.iter().map(|p| prefix_key(p)).collect();
    let mut added = 0;
    for prefix in additions {
        if seen.insert(prefix_key(prefix)) {
            merged.push(prefix.clone());
            added += 1;
        }
    }
    (none_if_empty(merged), added)
}

impl Session {
    /// Create the global prefix list `name` or merge `prefixes` into it.
    pub async fn global_prefix_list_upsert(&self, name: &str, prefixes: &[String]) -> OpResult {
        report(
            "global_prefix_list_upsert",
            name,
            self.global_upsert(name, prefixes).await,
        )
    }

    async fn global_upsert(&self, name: &str, prefixes: &[String]) -> Result<Outcome, CoreError> {
        let set = PrefixSet::parse(prefixes)?;
        let client = self.client().await?;

        let existing = client
            .list_global_prefixes()
            .await?
            .into_iter()
            .find(|p| p.name == name);

        let Some(mut list) = existing else {
            let list = GlobalPrefix {
                name: name.to_owned(),
                ipv4_prefixes: merge_prefixes(None, &set.ipv4).0,
                ipv6_prefixes: merge_prefixes(None, &set.ipv6).0,
                ..Default::default()
            };
            client
                .create_global_prefix(&list)
                .await
                .map_err(|e| CoreError::write_failed("create global prefix list", e))?;
            return Ok(Outcome::new(
                Change::Created,
                format!("prefix list {name} created"),
            ));
        };

        let (v4, added4) = merge_prefixes(list.ipv4_prefixes.take(), &set.ipv4);
        let (v6, added6) = merge_prefixes(list.ipv6_prefixes.take(), &set.ipv6);
        if added4 + added6 == 0 {
            return Ok(Outcome::new(
                Change::Unchanged,
                format!("prefix list {name} already contains all prefixes"),
            ));
        }
        list.ipv4_prefixes = v4;
        list.ipv6_prefixes = v6;

        let id = require_id(list.id.as_ref(), "global prefix list")?;
        client
            .update_global_prefix(&id, &list)
            .await
            .map_err(|e| CoreError::write_failed("update global prefix list", e))?;
        Ok(Outcome::new(
            Change::Updated,
            format!("{} prefix(es) added to {name}", added4 + added6),
        ))
    }

    /// Ensure the local prefix list `name` exists and merge `prefixes`
    /// into its value at `site`.
    pub async fn local_prefix_list_upsert(&self, site: &str, name: &str, prefixes: &[String]) -> OpResult {
        let target = format!("{site}/{name}");
        report(
            "local_prefix_list_upsert",
            &target,
            self.local_upsert(site, name, prefixes).await,
        )
    }

    /// [`local_prefix_list_upsert`](Self::local_prefix_list_upsert) for
    /// every site whose name matches `pattern`.
    pub async fn local_prefix_list_upsert_matching(
        &self,
        pattern: &Regex,
        name: &str,
        prefixes: &[String],
    ) -> BatchReport {
        let sites = match self.resolve_by_pattern(CollectionKey::Name2Site, pattern).await {
            Ok(sites) => sites,
            Err(e) => {
                return OpResult::failed("local_prefix_list_upsert", pattern.as_str(), &e).into();
            }
        };

        let mut batch = BatchReport::new();
        for site in sites.iter().map(Entity::name) {
            batch.push(self.local_prefix_list_upsert(site, name, prefixes).await);
        }
        batch
    }

    async fn local_upsert(&self, site: &str, name: &str, prefixes: &[String]) -> Result<Outcome, CoreError> {
        let set = PrefixSet::parse(prefixes)?;
        let client = self.client().await?;
        let site = self.site(site).await?;

        let existing = client
            .list_local_prefixes()
            .await?
            .into_iter()
            .find(|p| p.name == name);
        let definition = match existing {
            Some(def) => def,
            None => client
                .create_local_prefix(&LocalPrefix {
                    name: name.to_owned(),
                    ..Default::default()
                })
                .await
                .map_err(|e| CoreError::write_failed("create local prefix list", e))?,
        };
        let prefix_id = require_id(definition.id.as_ref(), "local prefix list")?;

        let value = client
            .list_site_local_prefixes(&site.id)
            .await?
            .into_iter()
            .find(|v| v.prefix_id == prefix_id);

        let Some(mut value) = value else {
            let value = SiteLocalPrefix {
                prefix_id,
                ipv4_prefixes: merge_prefixes(None, &set.ipv4).0,
                ipv6_prefixes: merge_prefixes(None, &set.ipv6).0,
                ..Default::default()
            };
            client
                .create_site_local_prefix(&site.id, &value)
                .await
                .map_err(|e| CoreError::write_failed("create site prefix value", e))?;
            return Ok(Outcome::new(
                Change::Created,
                format!("prefix list {name} set at {}", site.name),
            ));
        };

        let (v4, added4) = merge_prefixes(value.ipv4_prefixes.take(), &set.ipv4);
        let (v6, added6) = merge_prefixes(value.ipv6_prefixes.take(), &set.ipv6);
        if added4 + added6 == 0 {
            return Ok(Outcome::new(
                Change::Unchanged,
                format!("prefix list {name} at {} already contains all prefixes", site.name),
            ));
        }
        value.ipv4_prefixes = v4;
        value.ipv6_prefixes = v6;

        let id = require_id(value.id.as_ref(), "site prefix value")?;
        client
            .update_site_local_prefix(&site.id, &id, &value)
            .await
            .map_err(|e| CoreError::write_failed("update site prefix value", e))?;
        Ok(Outcome::new(
            Change::Updated,
            format!("{} prefix(es) added to {name} at {}", added4 + added6, site.name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn set(items: &[&str]) -> IndexSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn parse_splits_families_and_dedupes() {
        let parsed = PrefixSet::parse(&["10.0.0.0/8", "2001:db8::/32", " 10.0.0.0/8 ", "192.168.1.1"])
            .unwrap_or_default();
        assert_eq!(parsed.ipv4, set(&["10.0.0.0/8", "192.168.1.1/32"]));
        assert_eq!(parsed.ipv6, set(&["2001:db8::/32"]));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(PrefixSet::parse(&["10.0.0.0/33"]).is_err());
        assert!(PrefixSet::parse(&["not-a-prefix"]).is_err());
        assert!(PrefixSet::parse::<&str>(&[]).is_err());
    }

    #[test]
    fn merge_is_a_union() {
        let existing = Some(vec!["10.0.0.0/8".to_owned(), "172.16.0.0/12".to_owned()]);
        let (merged, added) = merge_prefixes(existing, &set(&["172.16.0.0/12", "192.168.0.0/16"]));
        assert_eq!(added, 1);
        assert_eq!(
            merged,
            Some(vec![
                "10.0.0.0/8".to_owned(),
                "172.16.0.0/12".to_owned(),
                "192.168.0.0/16".to_owned()
            ])
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let additions = set(&["10.0.0.0/8"]);
        let (once, _) = merge_prefixes(None, &additions);
        let (twice, added) = merge_prefixes(once.clone(), &additions);
        assert_eq!(once, twice);
        assert_eq!(added, 0);
    }

    #[test]
    fn merge_compares_stored_entries_by_value() {
        let existing = Some(vec!["2001:DB8::/32".to_owned(), "10.0.0.0/08".to_owned()]);
        let parsed = PrefixSet::parse(&["2001:db8::/32", "10.0.0.0/8"]).unwrap_or_default();

        let (merged6, added6) = merge_prefixes(existing.clone(), &parsed.ipv6);
        let (merged4, added4) = merge_prefixes(existing.clone(), &parsed.ipv4);
        assert_eq!((added6, added4), (0, 0));
        assert_eq!(merged6, existing);
        assert_eq!(merged4, existing);
    }

    #[test]
    fn merge_keeps_unparseable_stored_entries() {
        let existing = Some(vec!["legacy-entry".to_owned()]);
        let (merged, added) = merge_prefixes(existing, &set(&["10.0.0.0/8"]));
        assert_eq!(added, 1);
        assert_eq!(merged, Some(vec!["legacy-entry".to_owned(), "10.0.0.0/8".to_owned()]));
    }

    #[test]
    fn merge_of_nothing_stays_null() {
        assert_eq!(merge_prefixes(None, &IndexSet::new()), (None, 0));
    }
}
