//! Presence scanning on top of `linkscan-api`.
//!
//! This crate is what a host presence framework plugs in:
//!
//! - **[`LinksysScanner`]**: one router, one set of credentials.
//!   [`connect()`](LinksysScanner::connect) encodes the password once,
//!   performs the first refresh and fails if the router is unreachable.
//!   Every later [`refresh()`](LinksysScanner::refresh) logs in again,
//!   scrapes the client list and replaces the cached snapshot only when
//!   at least one MAC address came back.
//!
//! - **[`DeviceScanner`]**: the host-facing contract: `scan_devices()`
//!   and `device_name()`.
//!
//! - **[`Poller`]**: optional background task that drives a scanner on
//!   an interval and publishes snapshots on a `watch` channel.
//!
//! - **Domain model** ([`model`]): [`MacAddress`], [`ScanResult`],
//!   [`RefreshOutcome`] and [`PresenceDiff`].

pub mod config;
pub mod error;
pub mod model;
pub mod poller;
pub mod scanner;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ScannerConfig;
pub use error::CoreError;
pub use model::{MacAddress, PresenceDiff, RefreshOutcome, ScanResult};
pub use poller::Poller;
pub use scanner::{DeviceScanner, LinksysScanner};

pub use linkscan_api::{EncodedPassword, encode_password};
