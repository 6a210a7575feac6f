// ── Core error types ──
//
// Errors surfaced to the host. Only construction can fail: once a scanner
// exists, refresh failures degrade to an unsuccessful `RefreshOutcome`
// and a stale snapshot instead of an error.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Router request timed out")]
    Timeout,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if the router could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Timeout)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<linkscan_api::Error> for CoreError {
    fn from(err: linkscan_api::Error) -> Self {
        if err.is_timeout() {
            return CoreError::Timeout;
        }
        match err {
            linkscan_api::Error::Transport(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            linkscan_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            linkscan_api::Error::InvalidHost { host, reason } => CoreError::Config {
                message: format!("Invalid host '{host}': {reason}"),
            },
            linkscan_api::Error::ClientBuild(msg) => CoreError::Internal(msg),
        }
    }
}
