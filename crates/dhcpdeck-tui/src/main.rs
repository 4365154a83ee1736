//! `dhcpdeck`: terminal dashboard for Kea DHCPv4 leases and reservations.
//!
//! Browses the subnets a Kea control agent serves, shows each subnet's
//! active leases, static reservations or settings, searches them vi-style
//! and deletes leases. Every keystroke is handled to completion, control
//! agent round-trips included, before the next one is read.
//!
//! Logs are written to a file (default `/tmp/dhcpdeck.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod app;
mod event;
mod keymap;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dhcpdeck_core::{ConnectionConfig, Navigator, config};

use crate::app::App;

/// Terminal dashboard for Kea DHCPv4 leases and reservations.
#[derive(Parser, Debug)]
#[command(name = "dhcpdeck", version, about)]
struct Cli {
    /// Host running the Kea control agent
    #[arg(default_value = config::DEFAULT_HOST)]
    host: String,

    /// Control agent port
    #[arg(short, long, default_value_t = config::DEFAULT_PORT, env = "DHCPDECK_PORT")]
    port: u16,

    /// Log file path
    #[arg(long, default_value = "/tmp/dhcpdeck.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may reach stdout/stderr while the
/// dashboard owns the terminal. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "dhcpdeck={log_level},dhcpdeck_core={log_level},dhcpdeck_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("dhcpdeck.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let connection = ConnectionConfig::new(cli.host.clone(), cli.port);
    let url = connection.url()?;
    info!(%url, "starting dhcpdeck");

    // Subnets load before the terminal is taken over.
    let client = connection.connect()?;
    let navigator = Navigator::load(client, url.as_str().trim_end_matches('/')).await?;

    let mut app = App::new(navigator);
    app.run().await?;

    info!("dhcpdeck exited");
    Ok(())
}
