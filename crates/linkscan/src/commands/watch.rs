//! Continuous presence tracking: poll the router and print who arrives
//! and who leaves.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

use linkscan_core::{DeviceScanner, LinksysScanner, MacAddress, Poller, PresenceDiff};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::scan::{DeviceRow, entries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Presence {
    Arrived,
    Departed,
}

/// One line of `watch` output in the structured formats.
#[derive(Debug, Serialize)]
struct PresenceEvent<'a> {
    at: DateTime<Utc>,
    event: Presence,
    mac: &'a MacAddress,
}

fn events(diff: &PresenceDiff, at: DateTime<Utc>) -> Vec<PresenceEvent<'_>> {
    let arrived = diff.arrived.iter().map(|mac| PresenceEvent {
        at,
        event: Presence::Arrived,
        mac,
    });
    let departed = diff.departed.iter().map(|mac| PresenceEvent {
        at,
        event: Presence::Departed,
        mac,
    });
    arrived.chain(departed).collect()
}

fn render_event(
    event: &PresenceEvent<'_>,
    format: &OutputFormat,
    color: bool,
) -> Result<String, CliError> {
    let line = match format {
        OutputFormat::Json | OutputFormat::JsonCompact => serde_json::to_string(event)?,
        OutputFormat::Yaml => {
            output::render_single(format, event, |_| String::new())?
                .trim_end()
                .to_owned()
        }
        OutputFormat::Plain => match event.event {
            Presence::Arrived => format!("+ {}", event.mac),
            Presence::Departed => format!("- {}", event.mac),
        },
        OutputFormat::Table => {
            let stamp = event.at.with_timezone(&Local).format("%H:%M:%S");
            match (event.event, color) {
                (Presence::Arrived, true) => {
                    format!("{stamp} {} {}", "+".green(), event.mac.green())
                }
                (Presence::Departed, true) => {
                    format!("{stamp} {} {}", "-".red(), event.mac.red())
                }
                (Presence::Arrived, false) => format!("{stamp} + {}", event.mac),
                (Presence::Departed, false) => format!("{stamp} - {}", event.mac),
            }
        }
    };
    Ok(line)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    scanner: LinksysScanner,
    args: &WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interval =
        Duration::from_secs(args.interval.unwrap_or_else(config::default_watch_interval));
    let color = output::should_color(&global.color);

    let initial = scanner.last_results();
    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let devices = entries(&scanner, initial.clone());
        let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| {
            d.mac.to_string()
        })?;
        output::print_output(&out, false);
        eprintln!(
            "Watching {} every {}s (Ctrl-C to stop)",
            scanner.host(),
            interval.as_secs()
        );
    } else {
        // Everyone already connected counts as an arrival.
        let diff = PresenceDiff::between(&[], &initial);
        for event in events(&diff, Utc::now()) {
            println!("{}", render_event(&event, &global.output, color)?);
        }
    }

    let poller = Poller::spawn(Arc::new(scanner), interval);
    let mut rx = poller.subscribe();
    let mut previous = initial;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted; stopping poller");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = rx.borrow_and_update().clone();
                let diff = PresenceDiff::between(&previous, &current);
                for event in events(&diff, Utc::now()) {
                    println!("{}", render_event(&event, &global.output, color)?);
                }
                previous = current.as_ref().clone();
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}
