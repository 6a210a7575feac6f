use thiserror::Error;

/// Top-level error type for the `linkscan-api` crate.
///
/// The router speaks no structured API, so there is no "API error" variant:
/// anything that reaches the router and comes back is a body to scrape.
/// Only transport and URL construction can fail here.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured host cannot be used to build router URLs.
    #[error("Invalid router host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// Building the underlying `reqwest::Client` failed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl Error {
    /// Returns `true` if the router could not be reached at all
    /// (DNS, refused connection, timeout).
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` if the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
