// ── Lazy name → entity tables ──
//
// Each collection is built from one full listing the first time a lookup
// finds its table empty, and is never refreshed afterwards. Writes made
// through the session do not touch these tables.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use tokio::sync::Mutex;
use tracing::debug;

use cgxeasy_api::CgxClient;
use cgxeasy_api::models::{Element, Site};

use crate::error::CoreError;

/// The lookup tables the cache maintains.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum CollectionKey {
    /// Site id → site.
    Id2Site,
    /// Site name → site.
    Name2Site,
    /// Element name → element.
    Name2Element,
}

impl CollectionKey {
    fn entity_label(self) -> &'static str {
        match self {
            Self::Id2Site | Self::Name2Site => "Site",
            Self::Name2Element => "Element",
        }
    }
}

/// A cached controller object.
#[derive(Debug, Clone)]
pub enum Entity {
    Site(Arc<Site>),
    Element(Arc<Element>),
}

impl Entity {
    pub fn id(&self) -> &str {
        match self {
            Self::Site(s) => &s.id,
            Self::Element(e) => &e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Site(s) => &s.name,
            Self::Element(e) => &e.name,
        }
    }

    pub fn as_site(&self) -> Option<&Arc<Site>> {
        match self {
            Self::Site(s) => Some(s),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Arc<Element>> {
        match self {
            Self::Element(e) => Some(e),
            Self::Site(_) => None,
        }
    }
}

type Table = IndexMap<String, Entity>;

/// Lazily built name/id lookup tables for sites and elements.
///
/// The table mutex is held across check, fetch and populate, so two
/// concurrent first lookups cost one listing call, not two.
#[derive(Default)]
pub struct ResourceCache {
    tables: Mutex<HashMap<CollectionKey, Table>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `lookup` in the given table, building it first if empty.
    pub async fn resolve(
        &self,
        client: &CgxClient,
        key: CollectionKey,
        lookup: &str,
    ) -> Result<Entity, CoreError> {
        let mut tables = self.tables.lock().await;
        let table = Self::ensure_built(&mut tables, client, key).await?;
        table
            .get(lookup)
            .cloned()
            .ok_or_else(|| CoreError::not_found(key.entity_label(), lookup))
    }

    /// Every entry whose key matches `pattern`, in controller order.
    pub async fn resolve_by_pattern(
        &self,
        client: &CgxClient,
        key: CollectionKey,
        pattern: &Regex,
    ) -> Result<Vec<Entity>, CoreError> {
        let mut tables = self.tables.lock().await;
        let table = Self::ensure_built(&mut tables, client, key).await?;
        Ok(table
            .iter()
            .filter(|(k, _)| pattern.is_match(k))
            .map(|(_, v)| v.clone())
            .collect())
    }

    /// All entries of a table, in controller order.
    pub async fn entries(
        &self,
        client: &CgxClient,
        key: CollectionKey,
    ) -> Result<Vec<Entity>, CoreError> {
        let mut tables = self.tables.lock().await;
        let table = Self::ensure_built(&mut tables, client, key).await?;
        Ok(table.values().cloned().collect())
    }

    async fn ensure_built<'a>(
        tables: &'a mut HashMap<CollectionKey, Table>,
        client: &CgxClient,
        key: CollectionKey,
    ) -> Result<&'a Table, CoreError> {
        // An empty table is indistinguishable from an unbuilt one, so a
        // controller with no sites is listed on every lookup.
        if tables.get(&key).is_none_or(IndexMap::is_empty) {
            match key {
                CollectionKey::Id2Site | CollectionKey::Name2Site => {
                    let sites = client.list_sites().await?;
                    debug!(count = sites.len(), "building site tables");
                    let (by_id, by_name) = site_tables(sites);
                    tables.insert(CollectionKey::Id2Site, by_id);
                    tables.insert(CollectionKey::Name2Site, by_name);
                }
                CollectionKey::Name2Element => {
                    let elements = client.list_elements().await?;
                    debug!(count = elements.len(), "building element table");
                    let by_name = elements
                        .into_iter()
                        .filter(|e| !e.name.is_empty())
                        .map(|e| (e.name.clone(), Entity::Element(Arc::new(e))))
                        .collect();
                    tables.insert(CollectionKey::Name2Element, by_name);
                }
            }
        }
        Ok(tables.entry(key).or_default())
    }
}

fn site_tables(sites: Vec<Site>) -> (Table, Table) {
    let mut by_id = Table::with_capacity(sites.len());
    let mut by_name = Table::with_capacity(sites.len());
    for site in sites {
        let entity = Entity::Site(Arc::new(site));
        by_id.insert(entity.id().to_owned(), entity.clone());
        if !entity.name().is_empty() {
            by_name.insert(entity.name().to_owned(), entity);
        }
    }
    (by_id, by_name)
}
