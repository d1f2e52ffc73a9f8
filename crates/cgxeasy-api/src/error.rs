use thiserror::Error;

/// Error code the controller returns when an anynet link between the same
/// two WAN interfaces is already present.
pub const DUPLICATE_LINK_CODE: &str = "ANYNETLINK_EXISTS";

/// Top-level error type for the `cgxeasy-api` crate.
///
/// Covers every failure mode of the controller REST surface:
/// authentication, transport, controller-reported errors and decoding.
/// `cgxeasy-core` maps these into the reconciliation error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected, expired, or profile lookup failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A tenant-scoped call was made before the token session resolved
    /// the tenant id.
    #[error("No controller session -- authenticate before issuing tenant requests")]
    SessionNotEstablished,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller ──────────────────────────────────────────────────
    /// Structured error from the controller (`{"_error": [{code, message}]}`).
    #[error("Controller error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Extract the controller error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if the controller refused an anynet link because the
    /// same link already exists.
    pub fn is_duplicate_link(&self) -> bool {
        match self {
            Self::Api { code, message, .. } => {
                code.as_deref() == Some(DUPLICATE_LINK_CODE)
                    || message.to_ascii_lowercase().contains("already exists")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<&str>, message: &str) -> Error {
        Error::Api {
            status,
            code: code.map(String::from),
            message: message.into(),
        }
    }

    #[test]
    fn duplicate_link_matches_code() {
        assert!(api(400, Some(DUPLICATE_LINK_CODE), "rejected").is_duplicate_link());
    }

    #[test]
    fn duplicate_link_matches_message_fragment() {
        assert!(api(400, None, "Link Already Exists between endpoints").is_duplicate_link());
    }

    #[test]
    fn other_errors_are_not_duplicates() {
        assert!(!api(400, Some("INVALID_WAN_INTERFACE"), "bad request").is_duplicate_link());
        assert!(!Error::SessionNotEstablished.is_duplicate_link());
    }

    #[test]
    fn error_code_only_on_controller_errors() {
        assert_eq!(api(404, Some("NOT_FOUND"), "x").api_error_code(), Some("NOT_FOUND"));
        assert_eq!(Error::SessionNotEstablished.api_error_code(), None);
    }
}
