//! One-shot scan.

use std::collections::HashSet;

use serde::Serialize;
use tabled::Tabled;

use linkscan_core::{DeviceScanner, LinksysScanner, MacAddress, RefreshOutcome};

use crate::cli::{GlobalOpts, ScanArgs};
use crate::error::CliError;
use crate::output;

// ── Rows ────────────────────────────────────────────────────────────

/// One connected client, as printed by `scan` and `watch`.
#[derive(Debug, Serialize)]
pub struct DeviceEntry {
    pub mac: MacAddress,
    pub name: Option<String>,
}

#[derive(Tabled)]
pub struct DeviceRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&DeviceEntry> for DeviceRow {
    fn from(d: &DeviceEntry) -> Self {
        Self {
            mac: d.mac.to_string(),
            name: d.name.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub fn entries(scanner: &impl DeviceScanner, macs: Vec<MacAddress>) -> Vec<DeviceEntry> {
    macs.into_iter()
        .map(|mac| DeviceEntry {
            name: scanner.device_name(&mac),
            mac,
        })
        .collect()
}

/// Drop later addresses that only differ in case from an earlier one.
fn dedup_case_insensitive(macs: Vec<MacAddress>) -> Vec<MacAddress> {
    let mut seen = HashSet::new();
    macs.into_iter()
        .filter(|mac| seen.insert(mac.normalized()))
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

/// `connect()` has already refreshed once; print what it found.
pub fn handle(
    scanner: &LinksysScanner,
    args: &ScanArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if scanner.cached_result().is_none() {
        return Err(match scanner.last_outcome().as_deref() {
            Some(RefreshOutcome::SessionNotGranted) => CliError::LoginRejected {
                host: scanner.host().to_owned(),
            },
            _ => CliError::NoClientsFound {
                host: scanner.host().to_owned(),
            },
        });
    }

    let mut macs = scanner.last_results();
    if args.unique {
        macs = dedup_case_insensitive(macs);
    }
    tracing::debug!(count = macs.len(), "printing scan results");

    let devices = entries(scanner, macs);
    let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| {
        d.mac.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
