// ── Per-element interface lists ──
//
// Interfaces are fetched per (site, element) on first access. Unlike the
// resource tables this cache is explicitly invalidated after each
// interface write so the next read sees the controller's state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use cgxeasy_api::CgxClient;
use cgxeasy_api::models::Interface;

use crate::error::CoreError;

type ElementKey = (String, String);

#[derive(Default)]
pub struct InterfaceCache {
    entries: Mutex<HashMap<ElementKey, Arc<Vec<Interface>>>>,
}

impl InterfaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interfaces of one element, fetched if not cached.
    pub async fn get(
        &self,
        client: &CgxClient,
        site_id: &str,
        element_id: &str,
    ) -> Result<Arc<Vec<Interface>>, CoreError> {
        let key = (site_id.to_owned(), element_id.to_owned());
        let mut entries = self.entries.lock().await;
        if let Some(cached) = entries.get(&key) {
            return Ok(Arc::clone(cached));
        }

        let fetched = Arc::new(client.list_interfaces(site_id, element_id).await?);
        debug!(site_id, element_id, count = fetched.len(), "interfaces cached");
        entries.insert(key, Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Owned copy of the interface called `name`.
    pub async fn find(
        &self,
        client: &CgxClient,
        site_id: &str,
        element_id: &str,
        name: &str,
    ) -> Result<Interface, CoreError> {
        self.get(client, site_id, element_id)
            .await?
            .iter()
            .find(|i| i.name() == name)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Interface", name))
    }

    pub async fn invalidate(&self, site_id: &str, element_id: &str) {
        let key = (site_id.to_owned(), element_id.to_owned());
        if self.entries.lock().await.remove(&key).is_some() {
            debug!(site_id, element_id, "interface cache invalidated");
        }
    }
}
