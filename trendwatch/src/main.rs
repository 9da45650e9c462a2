//! # trendwatch - Main Entry Point
//!
//! Wires the three halves of the session together: the gateway client, the
//! worker tasks on the tokio runtime, and the TUI on its own thread. The
//! session ends when the TUI exits; dropping the command sender closes the
//! worker loop, which stops the poller.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use trendwatch::cli::Args;
use trendwatch::gateway::ApiClient;
use trendwatch::{tui, worker};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_ERROR
        }
    });
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        println!("trendwatch v{}", env!("CARGO_PKG_VERSION"));
        println!("backend: {}", args.url);
    }

    let client = Arc::new(
        ApiClient::new(&args.url, Duration::from_millis(args.timeout_ms))
            .context("failed to build HTTP client")?,
    );

    let (update_tx, update_rx) = bounded(1000);
    let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();

    // Spawn TUI thread; it owns the terminal and the command sender.
    let base_url = client.base_url().to_string();
    let tui_handle = std::thread::spawn(move || tui::run(&update_rx, command_tx, &base_url));

    info!("session started, polling every {} ms", args.poll_ms);

    // Runs until the TUI drops its command sender.
    worker::run(client, command_rx, update_tx, Duration::from_millis(args.poll_ms)).await;

    tui_handle
        .join()
        .map_err(|_| anyhow::anyhow!("TUI thread panicked"))?
        .context("terminal error")?;

    info!("session ended");
    Ok(())
}
