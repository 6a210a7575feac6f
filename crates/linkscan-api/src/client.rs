// Router HTTP client
//
// Wraps `reqwest::Client` with the E900's URL layout. The login flow
// lives in `session.rs`; this module owns URL construction and the
// client list fetch.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::scrape::{SessionId, extract_mac_addresses};
use crate::transport::TransportConfig;

const LOGIN_PATH: &str = "login.cgi";
const CLIENT_LIST_PATH: &str = "WL_ClientList.asp";

/// HTTP client for a single router's web admin interface.
///
/// Holds no session state: every refresh logs in again and threads the
/// fresh session id through [`client_list_url`](Self::client_list_url).
#[derive(Clone)]
pub struct RouterClient {
    http: reqwest::Client,
    host: String,
    login_url: Url,
}

impl RouterClient {
    /// Create a client for `host` (address with optional port, no scheme).
    pub fn new(host: impl Into<String>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, host)
    }

    /// Create a router client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, host: impl Into<String>) -> Result<Self, Error> {
        let host = host.into();
        check_host(&host)?;
        let login_url = Url::parse(&format!("http://{host}/{LOGIN_PATH}"))?;
        Ok(Self {
            http,
            host,
            login_url,
        })
    }

    /// The router address this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `http://{host}/login.cgi`
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// `http://{host}/WL_ClientList.asp;session_id={session}`
    ///
    /// The session id rides in the path; there is no query string and no
    /// auth header.
    pub fn client_list_url(&self, session: &SessionId) -> Result<Url, Error> {
        let full = format!(
            "http://{}/{CLIENT_LIST_PATH};session_id={}",
            self.host,
            session.as_str()
        );
        Ok(Url::parse(&full)?)
    }

    /// Fetch the raw client list page for an authenticated session.
    ///
    /// The status code is not inspected: whatever the router returns is
    /// handed back for scraping.
    pub async fn fetch_client_list(&self, session: &SessionId) -> Result<String, Error> {
        let url = self.client_list_url(session)?;
        debug!("GET {}", redact_session(&url));

        let resp = self.http.get(url).send().await?;
        debug!(status = %resp.status(), "client list response");

        Ok(resp.text().await?)
    }

    /// Fetch the client list page and extract the MAC addresses on it.
    pub async fn list_wireless_clients(&self, session: &SessionId) -> Result<Vec<String>, Error> {
        let body = self.fetch_client_list(session).await?;
        Ok(extract_mac_addresses(&body))
    }
}

impl std::fmt::Debug for RouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterClient")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Reject hosts that would change the shape of the router URLs.
fn check_host(host: &str) -> Result<(), Error> {
    let reason = if host.is_empty() {
        Some("host is empty")
    } else if host.contains("://") {
        Some("host must not include a scheme")
    } else if host.contains(['/', '?', '#']) {
        Some("host must not include a path")
    } else if host.chars().any(char::is_whitespace) {
        Some("host must not contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidHost {
            host: host.to_owned(),
            reason: reason.to_owned(),
        }),
        None => Ok(()),
    }
}

/// Log-safe rendering of a URL carrying a session id in its path.
fn redact_session(url: &Url) -> String {
    let s = url.as_str();
    match s.find(";session_id=") {
        Some(at) => format!("{};session_id=...", &s[..at]),
        None => s.to_owned(),
    }
}
