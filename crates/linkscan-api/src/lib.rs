// linkscan-api: Async client for the Linksys E900 web admin interface
//
// Two pieces live here:
// - the legacy password obfuscation the login form expects (`password`)
// - the login + client list conversation (`client`, `session`, `scrape`)

pub mod client;
pub mod error;
pub mod password;
pub mod scrape;
pub mod session;
pub mod transport;

pub use client::RouterClient;
pub use error::Error;
pub use password::{EncodedPassword, encode_password};
pub use scrape::{SESSION_MARKER, SessionId, extract_mac_addresses, extract_session_id};
pub use transport::TransportConfig;
