//! counter-plugin - Stream Deck plugin serving the counter action
//!
//! Launched by the Stream Deck application, which passes the connection
//! parameters on the command line.
//!
//! # Usage
//!
//! ```text
//! counter-plugin -port 28196 -pluginUUID <uuid> -registerEvent registerPlugin -info '{...}'
//! counter-plugin --port 28196 --pluginUUID <uuid> --registerEvent registerPlugin --info '{...}'
//! ```
//!
//! The host uses single-dash long flags; both spellings are accepted.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use deckhand::{Plugin, PluginConfig};
use deckhand_counter::CounterAction;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI Arguments
// ============================================================================

/// Long flags the host passes with a single dash.
const HOST_FLAGS: [&str; 4] = ["port", "pluginUUID", "registerEvent", "info"];

/// Default log file, relative to the plugin directory the host starts us in
const DEFAULT_LOG_FILE: &str = "plugin.log";

/// Counter plugin for the Stream Deck
#[derive(Parser, Debug)]
#[command(name = "counter-plugin")]
#[command(about = "Stream Deck plugin that counts key presses")]
#[command(version)]
struct Args {
    /// Port of the host's WebSocket server
    #[arg(long)]
    port: u16,

    /// UUID identifying this plugin instance
    #[arg(long = "pluginUUID")]
    plugin_uuid: String,

    /// Event name for the registration handshake
    #[arg(long = "registerEvent")]
    register_event: String,

    /// JSON blob describing the host, plugin and devices
    #[arg(long)]
    info: String,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

impl Args {
    fn config(&self) -> PluginConfig {
        PluginConfig::new(
            self.port,
            &self.plugin_uuid,
            &self.register_event,
            &self.info,
        )
    }
}

/// Rewrites `-port` style host flags to `--port` so clap accepts them.
fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.strip_prefix('-') {
            Some(name) if !name.starts_with('-') && HOST_FLAGS.contains(&name) => {
                format!("--{name}")
            }
            _ => arg,
        })
        .collect()
}

// ============================================================================
// Logging
// ============================================================================

/// Opens the log file in append mode. Returns `None` if it cannot be opened.
fn open_log_file(path: &Path) -> Option<std::fs::File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to open log file {path:?}: {e}");
            None
        }
    }
}

/// Installs the global subscriber. Logs go to `path`, or to stderr if the
/// file cannot be opened. `RUST_LOG` overrides the default level.
fn init_logging(path: &Path) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("counter_plugin=info".parse()?)
        .add_directive("deckhand=info".parse()?)
        .add_directive("deckhand_counter=info".parse()?);

    match open_log_file(path) {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_from(normalize_args(std::env::args()));

    init_logging(&args.log_file)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "counter-plugin starting"
    );

    let mut plugin = Plugin::new(args.config());
    plugin
        .register(CounterAction::new())
        .context("Failed to register counter action")?;

    if let Err(e) = plugin.run().await {
        error!(error = %e, "Plugin stopped");
        return Err(e).context("counter-plugin terminated");
    }

    Ok(())
}
