// ── MacAddress ──
//
// A client record on this firmware is nothing but a MAC address. The text
// is kept exactly as the router printed it; comparisons that need to be
// case-insensitive go through `normalized()`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// MAC address as scraped from the client list page (`XX:XX:XX:XX:XX:XX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    /// The address exactly as found.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form (aa:bb:cc:dd:ee:ff), for matching across case.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MacAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MacAddress {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
