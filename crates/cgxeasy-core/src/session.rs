// ── Controller session ──
//
// Owns the authenticated client and both lookup caches. Operations are
// implemented as inherent methods in `ops/*` and run strictly one
// request at a time.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use cgxeasy_api::CgxClient;
use cgxeasy_api::models::{Element, Profile, Site};

use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::matcher::{OptionMatcher, SubstringMatcher};
use crate::store::{CollectionKey, Entity, InterfaceCache, ResourceCache};

/// An authenticated handle to one controller tenant.
///
/// Cheaply cloneable via `Arc<SessionInner>`; clones share the client and
/// caches. Separate sessions share nothing.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: ControllerConfig,
    client: Mutex<Option<Arc<CgxClient>>>,
    resources: ResourceCache,
    interfaces: InterfaceCache,
    matcher: Box<dyn OptionMatcher>,
}

/// An element resolved to the ids its sub-resources are addressed by.
#[derive(Debug, Clone)]
pub(crate) struct ElementRef {
    pub site_id: String,
    pub element_id: String,
    pub name: String,
}

impl Session {
    /// Create a session from configuration. Does NOT connect -- call
    /// [`connect()`](Self::connect) before any lookup or operation.
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_option_matcher(config, SubstringMatcher)
    }

    /// Like [`new`](Self::new) with a non-default DHCP option matcher.
    pub fn with_option_matcher(config: ControllerConfig, matcher: impl OptionMatcher + 'static) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                config,
                client: Mutex::new(None),
                resources: ResourceCache::new(),
                interfaces: InterfaceCache::new(),
                matcher: Box::new(matcher),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.inner.resources
    }

    pub fn interfaces(&self) -> &InterfaceCache {
        &self.inner.interfaces
    }

    pub(crate) fn option_matcher(&self) -> &dyn OptionMatcher {
        self.inner.matcher.as_ref()
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Validate the token and resolve the tenant.
    ///
    /// This is the only failure callers are expected to treat as fatal.
    pub async fn connect(&self) -> Result<Profile, CoreError> {
        let config = &self.inner.config;
        let client = CgxClient::from_token(config.url.clone(), &config.token, &config.transport())?;
        let profile = client.login_with_token().await?;
        info!(tenant_id = %profile.tenant_id, url = %config.url, "connected to controller");

        *self.inner.client.lock().await = Some(Arc::new(client));
        Ok(profile)
    }

    pub async fn is_connected(&self) -> bool {
        self.inner.client.lock().await.is_some()
    }

    pub(crate) async fn client(&self) -> Result<Arc<CgxClient>, CoreError> {
        self.inner
            .client
            .lock()
            .await
            .clone()
            .ok_or(CoreError::NotInitialized)
    }

    // ── Lookups ──────────────────────────────────────────────────

    /// Resolve one cached entity by key.
    pub async fn resolve(&self, key: CollectionKey, lookup: &str) -> Result<Entity, CoreError> {
        let client = self.client().await?;
        self.inner.resources.resolve(&client, key, lookup).await
    }

    pub async fn resolve_by_pattern(
        &self,
        key: CollectionKey,
        pattern: &regex::Regex,
    ) -> Result<Vec<Entity>, CoreError> {
        let client = self.client().await?;
        self.inner
            .resources
            .resolve_by_pattern(&client, key, pattern)
            .await
    }

    pub async fn site(&self, name: &str) -> Result<Arc<Site>, CoreError> {
        let entity = self.resolve(CollectionKey::Name2Site, name).await?;
        entity
            .as_site()
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("site table holds non-site {name}")))
    }

    pub async fn element(&self, name: &str) -> Result<Arc<Element>, CoreError> {
        let entity = self.resolve(CollectionKey::Name2Element, name).await?;
        entity
            .as_element()
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("element table holds non-element {name}")))
    }

    /// All cached sites, building the table if needed.
    pub async fn sites(&self) -> Result<Vec<Arc<Site>>, CoreError> {
        let client = self.client().await?;
        let entries = self
            .inner
            .resources
            .entries(&client, CollectionKey::Name2Site)
            .await?;
        Ok(entries.iter().filter_map(Entity::as_site).cloned().collect())
    }

    /// All cached elements, building the table if needed.
    pub async fn elements(&self) -> Result<Vec<Arc<Element>>, CoreError> {
        let client = self.client().await?;
        let entries = self
            .inner
            .resources
            .entries(&client, CollectionKey::Name2Element)
            .await?;
        Ok(entries
            .iter()
            .filter_map(Entity::as_element)
            .cloned()
            .collect())
    }

    /// Resolve an element name to its site and element ids.
    pub(crate) async fn element_ref(&self, name: &str) -> Result<ElementRef, CoreError> {
        let element = self.element(name).await?;
        let site_id = match element.site_id.as_deref() {
            None | Some("" | "1") => {
                return Err(CoreError::invalid(format!(
                    "element {name} is not assigned to a site"
                )));
            }
            Some(id) => id.to_owned(),
        };
        debug!(element = name, site_id, "element resolved");
        Ok(ElementRef {
            site_id,
            element_id: element.id.clone(),
            name: element.name.clone(),
        })
    }
}
