//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use vatusa_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the API at {url}")]
    #[diagnostic(
        code(vatusa::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Override the address with --base-url or VATUSA_BASE_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(vatusa::timeout),
        help("Increase timeout with --timeout or check API responsiveness.")
    )]
    Timeout,

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(vatusa::tls_error),
        help("Check ca_cert in your profile, or use --insecure (-k) for local servers.")
    )]
    TlsError { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(vatusa::auth_failed),
        help("Verify your API token and that it grants access to this endpoint.")
    )]
    AuthFailed { status: u16 },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(vatusa::no_credentials),
        help(
            "Pass --token, set VATUSA_TOKEN, or add token / token_env\n\
             to the profile in your config file."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(vatusa::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API returned HTTP {status}")]
    #[diagnostic(code(vatusa::api_error))]
    ApiError { status: u16 },

    #[error("Unexpected {shape} payload: {message}")]
    #[diagnostic(
        code(vatusa::payload),
        help("Re-run with -vvv to log the raw response body.")
    )]
    UnexpectedPayload { shape: String, message: String },

    #[error("'{feature}' is not yet implemented")]
    #[diagnostic(code(vatusa::not_implemented))]
    NotYetImplemented { feature: String },

    #[error("{0}")]
    #[diagnostic(code(vatusa::client))]
    Client(String),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vatusa::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vatusa::profile_not_found),
        help("Available profiles: {available}\nExpected config at: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("{0}")]
    #[diagnostic(code(vatusa::config))]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vatusa::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON rendering failed: {0}")]
    #[diagnostic(code(vatusa::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(vatusa::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout | Self::TlsError { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ApiError { status: 404 } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the looked-up resource to a 404.
    pub fn or_not_found(self, resource_type: &str, identifier: impl ToString) -> Self {
        match self {
            Self::ApiError { status: 404 } => Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.to_string(),
            },
            other => other,
        }
    }
}

// ── vatusa_api::Error → CliError mapping ─────────────────────────────

impl From<vatusa_api::Error> for CliError {
    fn from(err: vatusa_api::Error) -> Self {
        use vatusa_api::Error as ApiErr;

        match err {
            ApiErr::Transport(e) if e.is_timeout() => CliError::Timeout,
            ApiErr::Transport(e) => CliError::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: Box::new(e),
            },
            ApiErr::Tls(reason) => CliError::TlsError { reason },
            ApiErr::UnexpectedStatus { status: status @ (401 | 403) } => {
                CliError::AuthFailed { status }
            }
            ApiErr::UnexpectedStatus { status } => CliError::ApiError { status },
            ApiErr::InvalidBaseAddress { address, reason } => CliError::Validation {
                field: "base_url".into(),
                reason: format!("{address}: {reason}"),
            },
            ApiErr::InvalidCredential { reason } => CliError::Validation {
                field: "token".into(),
                reason,
            },
            ApiErr::InvalidRosterSelection => CliError::Validation {
                field: "roster".into(),
                reason: "select home controllers, visitors, or both".into(),
            },
            ApiErr::Deserialization { shape, message, .. } => {
                CliError::UnexpectedPayload { shape, message }
            }
            ApiErr::Unimplemented { operation } => CliError::NotYetImplemented {
                feature: operation.into(),
            },
            other => CliError::Client(other.to_string()),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
                path: vatusa_config::config_path().display().to_string(),
            },
            other => CliError::Config(other.to_string()),
        }
    }
}
