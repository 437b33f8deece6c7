//! Larder RPC Server - HTTP backend for ingredient search.
//!
//! This binary serves the larder-core library over JSON-RPC 2.0 (`/rpc`) and a small
//! REST surface (`/api/*`) for the web frontend.

mod handlers;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use larder_core::config::{IndexConfig, PathsConfig};
use larder_core::LarderApi;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "larder-rpc")]
#[command(about = "Ingredient resolution server for Larder")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Ingredient JSON file (defaults to the platform data directory)
    #[arg(long, env = "LARDER_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Maximum edits per query character accepted by fuzzy matching
    #[arg(long, default_value_t = IndexConfig::DEFAULT_THRESHOLD)]
    fuzzy_threshold: f64,

    /// Keep a .bak copy of the ingredient file on every write
    #[arg(long)]
    keep_backup: bool,
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(PathsConfig::DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
        .join(PathsConfig::STORE_FILENAME)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting Larder RPC Server");

    let data_file = args.data_file.unwrap_or_else(default_data_file);
    info!("Ingredient file: {}", data_file.display());

    let api = LarderApi::builder(&data_file)
        .auto_create(true)
        .keep_backup(args.keep_backup)
        .fuzzy_threshold(args.fuzzy_threshold)
        .build()
        .with_context(|| format!("Failed to open ingredient store {}", data_file.display()))?;

    let addr = server::start_server(api, &args.host, args.port).await?;

    // Machine-readable port line for launchers and tests
    println!("LARDER_PORT={}", addr.port());

    info!("Server running on {}", addr);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
