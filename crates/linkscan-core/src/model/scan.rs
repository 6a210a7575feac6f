// ── Scan results ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::mac_address::MacAddress;

/// What happened during one refresh.
///
/// Only [`Updated`](Self::Updated) counts as success. The other variants
/// all leave the cached snapshot untouched; they exist so logs and callers
/// can tell a refused login from an empty client list, which the boolean
/// alone cannot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// At least one MAC address was found; the snapshot was replaced.
    Updated { count: usize },
    /// Logged in, but the client list page had no MAC addresses.
    /// Either nobody is connected or the page format is unexpected.
    NoClients,
    /// The login response carried no session id (wrong credentials, or
    /// another admin session holds the router). The client list was still
    /// requested and came back empty.
    SessionNotGranted,
    /// The router could not be reached.
    Unreachable { reason: String },
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Result of a refresh: the success flag plus the MAC addresses it found.
///
/// A failed refresh carries no addresses; the previous successful
/// `ScanResult` stays cached in the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub success: bool,
    /// In order of appearance on the client list page, duplicates kept.
    pub mac_addresses: Vec<MacAddress>,
    pub outcome: RefreshOutcome,
    pub refreshed_at: DateTime<Utc>,
}

impl ScanResult {
    pub(crate) fn from_outcome(outcome: RefreshOutcome, mac_addresses: Vec<MacAddress>) -> Self {
        Self {
            success: outcome.is_success(),
            mac_addresses,
            outcome,
            refreshed_at: Utc::now(),
        }
    }

    pub(crate) fn failed(outcome: RefreshOutcome) -> Self {
        Self::from_outcome(outcome, Vec::new())
    }
}
