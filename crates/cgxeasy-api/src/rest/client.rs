// Controller REST client
//
// Wraps `reqwest::Client` with tenant-scoped URL construction, `items`
// envelope unwrapping and `_error` payload decoding. Resource endpoints
// (sites, interfaces, dhcp, ...) are implemented as inherent methods in
// sibling files to keep this module focused on transport mechanics.

use std::sync::{PoisonError, RwLock};

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Collection reads come back as `{"items": [...], "count": N, ...}`.
#[derive(serde::Deserialize)]
struct ItemsEnvelope<T> {
    items: Option<Vec<T>>,
}

/// Failures carry `{"_error": [{"code": "...", "message": "..."}]}`,
/// occasionally alongside an HTTP 200.
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "_error", default)]
    errors: Vec<ErrorEntry>,
}

#[derive(serde::Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Async HTTP client for the SD-WAN controller.
///
/// Every request carries the `X-Auth-Token` header. Tenant-scoped paths
/// (`/{version}/api/tenants/{tenant}/...`) need the tenant id resolved by
/// [`login_with_token`](Self::login_with_token) first.
pub struct CgxClient {
    http: reqwest::Client,
    base_url: Url,
    tenant_id: RwLock<Option<String>>,
}

impl CgxClient {
    /// Build a client that authenticates with a static API token.
    ///
    /// The token is injected as a sensitive default header; no request is
    /// made until [`login_with_token`](Self::login_with_token).
    pub fn from_token(
        base_url: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value =
            HeaderValue::from_str(token.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid auth token header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert("X-Auth-Token", value);

        let http = transport.build_client(headers)?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            tenant_id: RwLock::new(None),
        }
    }

    /// Pre-seed the tenant id, skipping the profile lookup.
    pub fn with_tenant(self, tenant_id: impl Into<String>) -> Self {
        self.set_tenant_id(tenant_id.into());
        self
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The tenant id resolved at login, if any.
    pub fn tenant_id(&self) -> Option<String> {
        self.tenant_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_tenant_id(&self, tenant_id: String) {
        debug!(tenant_id, "tenant resolved");
        *self
            .tenant_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(tenant_id);
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{version}/api/{path}` for non-tenant endpoints.
    pub(crate) fn api_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{version}/api/{path}"))?)
    }

    /// Build `{base}/{version}/api/tenants/{tenant}/{path}`.
    pub(crate) fn tenant_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let tenant = self.tenant_id().ok_or(Error::SessionNotEstablished)?;
        self.api_url(version, &format!("tenants/{tenant}/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a collection and unwrap its `items` list. A null or missing
    /// list is returned as empty.
    pub(crate) async fn get_items<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let envelope: ItemsEnvelope<T> = Self::parse(resp).await?;
        Ok(envelope.items.unwrap_or_default())
    }

    /// GET a single object.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse(resp).await
    }

    /// POST a JSON body and decode the created object.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse(resp).await
    }

    /// PUT a full object and decode the stored representation.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        Self::parse(resp).await
    }

    /// DELETE an object. The echoed body is discarded.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        Self::parse_or_null(resp).await?;
        Ok(())
    }

    // ── Response decoding ────────────────────────────────────────────

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = Self::checked_body(resp).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }

    /// Like [`parse`](Self::parse) but tolerates an empty body.
    async fn parse_or_null(resp: reqwest::Response) -> Result<serde_json::Value, Error> {
        let body = Self::checked_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Turn HTTP status and `_error` payloads into [`Error`]s, returning
    /// the raw body on success.
    async fn checked_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "token expired or invalid".into(),
            });
        }

        let body = resp.text().await?;
        trace!(%status, len = body.len(), "response received");

        if let Some(err) = Self::decode_error(status.as_u16(), &body) {
            return Err(err);
        }

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                code: None,
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        Ok(body)
    }

    fn decode_error(status: u16, body: &str) -> Option<Error> {
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        let first = envelope.errors.into_iter().next()?;
        let code = first.code;
        let message = first
            .message
            .or_else(|| code.clone())
            .unwrap_or_else(|| "unknown controller error".into());
        Some(Error::Api {
            status,
            code,
            message,
        })
    }
}

/// First 200 characters of a response body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
