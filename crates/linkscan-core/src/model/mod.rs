// ── Domain model ──

pub mod mac_address;
pub mod presence;
pub mod scan;

pub use mac_address::MacAddress;
pub use presence::PresenceDiff;
pub use scan::{RefreshOutcome, ScanResult};
