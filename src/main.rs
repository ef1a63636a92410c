mod commands;
mod config;
mod diff;
mod error;
mod extract;
mod fetch;
mod monitor;
mod page;
mod report;
mod snapshot;
mod store;
mod telegram;

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::monitor::{Monitor, RunPath};
use crate::store::SnapshotStore;
use crate::telegram::TelegramChannel;

#[derive(Parser)]
#[command(name = "icsid_monitor", about = "ICSID case-page monitor with Telegram reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One monitoring pass: poll commands, fetch the page, report, persist
    Run,
    /// Fetch the page and print the extracted snapshot, without sending
    Fetch,
    /// Print the stored snapshot
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run => run().await,
        Commands::Fetch => fetch_once().await,
        Commands::Show => show(),
    }
}

async fn run() -> Result<()> {
    let t0 = Instant::now();
    let settings = Settings::load()?;
    let channel_cfg = match settings.channel() {
        Ok(cfg) => cfg,
        // Credentials are checked before any network or disk I/O.
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let monitor = Monitor::new(
        HttpFetcher::new()?,
        TelegramChannel::new(channel_cfg.token)?,
        SnapshotStore::new(settings.state_path.clone()),
        channel_cfg.chat_id,
        settings.case_url.clone(),
        settings.command_window(),
    );

    let outcome = monitor.run_once(Utc::now()).await?;
    println!("{}", outcome.report);
    println!();
    match outcome.path {
        RunPath::Automatic => println!(
            "Automatic pass: {} change(s), sent: {}, persisted: {}",
            outcome.changes.len(),
            outcome.notified,
            outcome.persisted
        ),
        RunPath::Manual(command) => {
            println!("Manual pass ({:?}), sent: {}", command, outcome.notified)
        }
        RunPath::FetchFailed => println!("Fetch failed; notice sent: {}", outcome.notified),
    }
    println!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}

async fn fetch_once() -> Result<()> {
    let settings = Settings::load()?;
    let fetcher = HttpFetcher::new()?;
    let raw = fetcher.fetch(&settings.case_url).await?;
    let snapshot = snapshot::build(&raw, Utc::now());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn show() -> Result<()> {
    let settings = Settings::load()?;
    let store = SnapshotStore::new(settings.state_path);
    match store.load() {
        Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        None => println!("No snapshot stored yet at {}", store.path().display()),
    }
    Ok(())
}
