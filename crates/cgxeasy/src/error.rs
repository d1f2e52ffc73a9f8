//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use cgxeasy_config::ConfigError;
use cgxeasy_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(cgxeasy::connection_failed),
        help(
            "Check that the controller URL is reachable.\n\
             URL: {url}\n\
             Behind a TLS-intercepting proxy? Try --insecure or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cgxeasy::auth_failed),
        help(
            "Verify the API token for profile '{profile}'.\n\
             Run: cgxeasy config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No auth token configured for profile '{profile}'")]
    #[diagnostic(
        code(cgxeasy::no_credentials),
        help(
            "Configure a token with: cgxeasy config init\n\
             Or set the CGX_AUTH_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(cgxeasy::not_found),
        help("Run: cgxeasy {list_command} to see what the controller knows about")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(cgxeasy::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(cgxeasy::api_error))]
    ApiError { code: String, message: String },

    // ── Batch ────────────────────────────────────────────────────────
    #[error("{failed} of {total} operations failed")]
    #[diagnostic(
        code(cgxeasy::operations_failed),
        help("Each failed row above names its target and the reason.")
    )]
    OperationsFailed { failed: usize, total: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cgxeasy::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cgxeasy::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cgxeasy config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(cgxeasy::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(cgxeasy::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(cgxeasy::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    #[error("Internal error: {0}")]
    #[diagnostic(code(cgxeasy::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            Self::Config(ConfigError::NoCredentials { .. }) => exit_code::AUTH,
            Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

fn list_command_for(entity: &str) -> String {
    match entity.to_ascii_lowercase().as_str() {
        "site" => "sites list".into(),
        "element" => "elements list".into(),
        _ => "--help".into(),
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                profile: "current".into(),
                message,
            },

            CoreError::NotInitialized => Self::AuthFailed {
                profile: "current".into(),
                message: "no controller session".into(),
            },

            CoreError::Timeout => Self::Timeout,

            CoreError::NotFound { entity, identifier } => Self::NotFound {
                list_command: list_command_for(&entity),
                resource_type: entity,
                identifier,
            },

            CoreError::AlreadyExists { entity, identifier } => Self::Conflict {
                resource_type: entity,
                identifier,
            },

            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::TargetFile { path, source } => Self::Validation {
                field: "elements-file".into(),
                reason: format!("{}: {source}", path.display()),
            },

            CoreError::RemoteWriteFailed { operation, message } => Self::ApiError {
                code: "write_failed".into(),
                message: format!("{operation}: {message}"),
            },

            CoreError::Api { message, code, .. } => Self::ApiError {
                code: code.unwrap_or_else(|| "api".into()),
                message,
            },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
