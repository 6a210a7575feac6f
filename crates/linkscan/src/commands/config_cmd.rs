//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, DEFAULT_USERNAME, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    cfg
}

fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "interval = {}", cfg.defaults.interval);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        let _ = writeln!(out, "username = \"{}\"", p.username);
        if let Some(ref pw) = p.password {
            let _ = writeln!(out, "password = \"{pw}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(&global.output, &cfg, format_config)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: linkscan config init");
            }
            for (name, profile) in &cfg.profiles {
                let marker = if name == default { " *" } else { "" };
                println!("{name}{marker}\t{}", profile.host);
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("Default profile set to '{name}'");
            Ok(())
        }
    }
}

/// Interactive wizard. Adds (or replaces) one profile and makes it the default.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    let mut cfg = config::load_config_or_default();
    eprintln!("linkscan configuration");
    eprintln!("   Config path: {}\n", path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(prompt_err)?;

    let host: String = Input::new()
        .with_prompt("Router address")
        .default(global.host.clone().unwrap_or_else(|| "192.168.1.1".into()))
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.contains("://") || input.contains('/') {
                Err("enter a bare address such as 192.168.1.1, without http:// or a path")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;

    let username: String = Input::new()
        .with_prompt("Username")
        .default(DEFAULT_USERNAME.into())
        .interact_text()
        .map_err(prompt_err)?;

    let store = Confirm::new()
        .with_prompt("Store the password in the config file (plaintext)?")
        .default(false)
        .interact()
        .map_err(prompt_err)?;

    let (password, password_env) = if store {
        let pw = rpassword::prompt_password("Password: ")?;
        (Some(pw), None)
    } else {
        let var: String = Input::new()
            .with_prompt("Environment variable holding the password")
            .default("LINKSCAN_PASSWORD".into())
            .interact_text()
            .map_err(prompt_err)?;
        // LINKSCAN_PASSWORD is always consulted; no need to record it.
        (None, (var != "LINKSCAN_PASSWORD").then_some(var))
    };

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            host,
            username,
            password,
            password_env,
            timeout: None,
        },
    );
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\nConfiguration written to {}", path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: linkscan scan");
    Ok(())
}
