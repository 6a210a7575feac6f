// ── Runtime scanner configuration ──
//
// Describes *which* router to scan and with what credentials. Carries
// secret material but never touches disk: the CLI (or any other host)
// builds a `ScannerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use linkscan_api::TransportConfig;

use crate::error::CoreError;

/// Configuration for scanning a single router.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Router address, optionally with port (e.g. `192.168.1.1`). No scheme.
    pub host: String,
    /// Web admin username.
    pub username: String,
    /// Web admin password in plaintext. Encoded once at construction.
    pub password: SecretString,
    /// Whole-request timeout. `None` = HTTP client default (unbounded).
    pub timeout: Option<Duration>,
    /// TCP connect timeout. `None` = HTTP client default.
    pub connect_timeout: Option<Duration>,
}

impl ScannerConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the fields a router URL is built from.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.host.trim().is_empty() {
            return Err(CoreError::Config {
                message: "host must not be empty".into(),
            });
        }
        if self.host.contains("://") {
            return Err(CoreError::Config {
                message: format!(
                    "host '{}' must be an address without a scheme (e.g. 192.168.1.1)",
                    self.host
                ),
            });
        }
        if self.username.is_empty() {
            return Err(CoreError::Config {
                message: "username must not be empty".into(),
            });
        }
        Ok(())
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            ..TransportConfig::default()
        }
    }
}
