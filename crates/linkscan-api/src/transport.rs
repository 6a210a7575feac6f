// Transport configuration for building the reqwest::Client used to talk
// to the router.
//
// The admin interface is plain HTTP on the LAN, so there is no TLS or
// cookie handling: the session travels in the URL path.

use std::time::Duration;

/// Default `User-Agent` sent to the router.
pub const DEFAULT_USER_AGENT: &str = concat!("linkscan/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout),
    /// so a refresh can block for as long as the OS keeps the socket open.
    pub timeout: Option<Duration>,
    /// Timeout for establishing the TCP connection only.
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::ClientBuild(e.to_string()))
    }
}
