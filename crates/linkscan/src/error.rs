//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use linkscan_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to router at {url}")]
    #[diagnostic(
        code(linkscan::connection_failed),
        help(
            "Check that the router is powered on and reachable from this machine.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Router did not answer in time")]
    #[diagnostic(
        code(linkscan::timeout),
        help("Increase the limit with --timeout, or drop it to wait as long as the router needs.")
    )]
    Timeout,

    // ── Router responses ─────────────────────────────────────────────
    #[error("Router at {host} did not grant a session")]
    #[diagnostic(
        code(linkscan::login_rejected),
        help(
            "The login page answered without a session id, which usually means\n\
             the username or password is wrong."
        )
    )]
    LoginRejected { host: String },

    #[error("Router at {host} lists no wireless clients")]
    #[diagnostic(code(linkscan::no_clients))]
    NoClientsFound { host: String },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No password available for profile '{profile}'")]
    #[diagnostic(
        code(linkscan::no_credentials),
        help(
            "Pass --password-stdin, set LINKSCAN_PASSWORD, or store one with:\n\
             linkscan config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(linkscan::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(linkscan::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: linkscan config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No router configured")]
    #[diagnostic(
        code(linkscan::no_config),
        help(
            "Pass --host, set LINKSCAN_HOST, or create a profile with: linkscan config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(linkscan::config))]
    Config(Box<figment::Error>),

    #[error("Could not write configuration: {0}")]
    #[diagnostic(code(linkscan::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(linkscan::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::LoginRejected { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NoClientsFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Config { message } => CliError::Validation {
                field: "router".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
