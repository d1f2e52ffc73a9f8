// ── Core error types ──
//
// The failure taxonomy of the reconciliation layer. Consumers never see
// HTTP status codes or JSON decode failures directly: the
// `From<cgxeasy_api::Error>` impl folds transport errors into domain
// variants, and operations turn every `CoreError` into a failed
// `OpResult` rather than propagating it.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Controller session not initialized -- call connect() first")]
    NotInitialized,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Reconciliation errors ────────────────────────────────────────
    /// A name or functional key did not resolve. Displays as
    /// `"<entity> not found"` (e.g. `"DHCP subnet not found"`).
    #[error("{entity} not found")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The controller rejected a create/update/delete.
    #[error("{operation} failed: {message}")]
    RemoteWriteFailed { operation: String, message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Controller error code (e.g. "ANYNETLINK_EXISTS").
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Cannot read target file {}: {source}", path.display())]
    TargetFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error class carried on failed results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Validation,
    RemoteWrite,
    Session,
    Remote,
    Input,
    Internal,
}

impl CoreError {
    pub(crate) fn not_found(entity: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub(crate) fn already_exists(entity: &str, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Wrap a failed controller write. Session-level failures keep their
    /// own variant so callers can still tell an expired token apart.
    pub(crate) fn write_failed(operation: &str, err: cgxeasy_api::Error) -> Self {
        match err {
            cgxeasy_api::Error::Authentication { .. } | cgxeasy_api::Error::SessionNotEstablished => {
                err.into()
            }
            other => Self::RemoteWriteFailed {
                operation: operation.into(),
                message: other.to_string(),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized | Self::AuthenticationFailed { .. } => ErrorKind::Session,
            Self::ConnectionFailed { .. } | Self::Timeout | Self::Api { .. } => ErrorKind::Remote,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::ValidationFailed { .. } => ErrorKind::Validation,
            Self::RemoteWriteFailed { .. } => ErrorKind::RemoteWrite,
            Self::TargetFile { .. } | Self::Config { .. } => ErrorKind::Input,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cgxeasy_api::Error> for CoreError {
    fn from(err: cgxeasy_api::Error) -> Self {
        match err {
            cgxeasy_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cgxeasy_api::Error::SessionNotEstablished => CoreError::NotInitialized,
            cgxeasy_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cgxeasy_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cgxeasy_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            cgxeasy_api::Error::Api {
                status,
                code,
                message,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            cgxeasy_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
