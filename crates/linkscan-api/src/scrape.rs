// HTML scraping for the two pages the scanner reads
//
// The firmware has no machine-readable API. The login response embeds the
// session token in a link, and the client list page prints MAC addresses
// somewhere in its markup. Both are recovered by plain text search so the
// fragile parts stay testable against captured bodies.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Literal that precedes the session token in the login response body.
pub const SESSION_MARKER: &str = "index.asp;session_id=";

/// Six pairs of hex digits separated by colons, any case.
static MAC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}").expect("MAC pattern is valid")
});

/// Session token scraped from a login response.
///
/// Only meaningful for a few minutes and only for the refresh that
/// obtained it. May be empty when the login page carried no token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("SessionId(<none>)")
        } else {
            f.write_str("SessionId([REDACTED])")
        }
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Pull the session token out of a login response body.
///
/// The token is everything after [`SESSION_MARKER`] up to the next `"`.
/// If the marker is missing the result is empty; the client list request
/// is still made and simply comes back without any MAC addresses. If the
/// closing quote is missing the token runs up to, but not including, the
/// last character of the body, as the router's own web tooling reads it.
pub fn extract_session_id(body: &str) -> SessionId {
    let Some(marker_at) = body.find(SESSION_MARKER) else {
        return SessionId::default();
    };

    let rest = &body[marker_at + SESSION_MARKER.len()..];
    let end = rest
        .find('"')
        .unwrap_or_else(|| rest.char_indices().last().map_or(0, |(i, _)| i));
    SessionId(rest[..end].to_owned())
}

/// Collect every MAC address in the body, in order of appearance.
///
/// Matches do not overlap, keep the case they were written in, and are
/// not deduplicated.
pub fn extract_mac_addresses(body: &str) -> Vec<String> {
    MAC_PATTERN
        .find_iter(body)
        .map(|m| m.as_str().to_owned())
        .collect()
}
