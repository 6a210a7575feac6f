//! CLI-owned configuration: TOML profiles, credential resolution, and
//! translation to `linkscan_core::ScannerConfig`.
//!
//! Core never sees these types; it receives a pre-built `ScannerConfig`.

use std::collections::BTreeMap;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use linkscan_core::ScannerConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Username the router ships with.
pub const DEFAULT_USERNAME: &str = "admin";

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when --profile is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Seconds between scans for `watch`.
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Request timeout in seconds. Absent means no limit.
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            timeout: None,
        }
    }
}

fn default_interval() -> u64 {
    12
}

fn default_username() -> String {
    DEFAULT_USERNAME.into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Router address, e.g. "192.168.1.1". No scheme.
    pub host: String,

    #[serde(default = "default_username")]
    pub username: String,

    /// Plaintext password. Prefer `password_env`.
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    /// Overrides `defaults.timeout`.
    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "linkscan").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("linkscan");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from defaults, file and `LINKSCAN_` environment.
///
/// Nested keys use a double underscore, e.g.
/// `LINKSCAN_PROFILES__HOME__HOST=192.168.1.1`.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("LINKSCAN_").split("__"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file is missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

pub fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ScannerConfig` from the config file, profile, and CLI overrides.
///
/// Flags (and their env vars) win over profile values. A profile is only
/// required when `--host` is absent.
pub fn resolve_scanner_config(global: &GlobalOpts) -> Result<ScannerConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    if global.profile.is_some() && profile.is_none() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    let host = global
        .host
        .clone()
        .or_else(|| profile.map(|p| p.host.clone()))
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;

    let username = global
        .username
        .clone()
        .or_else(|| profile.map(|p| p.username.clone()))
        .unwrap_or_else(default_username);

    let password = resolve_password(global, profile, &profile_name)?;

    let mut scanner = ScannerConfig::new(host, username, password);
    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .or(cfg.defaults.timeout);
    if let Some(secs) = timeout {
        scanner = scanner.with_timeout(Duration::from_secs(secs));
    }

    Ok(scanner)
}

/// The `watch` interval when none is given on the command line.
pub fn default_watch_interval() -> u64 {
    load_config_or_default().defaults.interval
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

// ── Credential helpers ───────────────────────────────────────────────

/// Password chain: stdin flag, `LINKSCAN_PASSWORD`, profile env var,
/// profile plaintext, interactive prompt.
fn resolve_password(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if global.password_stdin {
        return read_secret_line(io::stdin().lock()).map(SecretString::from);
    }

    if let Ok(pw) = std::env::var("LINKSCAN_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    if let Some(profile) = profile {
        if let Some(pw) = profile
            .password_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
        {
            return Ok(SecretString::from(pw));
        }
        if let Some(ref pw) = profile.password {
            return Ok(SecretString::from(pw.clone()));
        }
    }

    if io::stdin().is_terminal() {
        let pw = rpassword::prompt_password("Router password: ")?;
        return Ok(SecretString::from(pw));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Read one line, stripping only the line terminator. Leading and trailing
/// spaces are part of the password.
pub fn read_secret_line(mut reader: impl BufRead) -> Result<String, CliError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
