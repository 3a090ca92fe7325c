//! Krystal server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http (axum, request id, timeout, trace)
//!                          │
//!                          ▼
//!                      dispatch ──▶ redirects
//!                          │
//!                          ▼
//!                      routing (Router + MapManager) ──▶ controller action
//!                          │                                  │
//!                          ▼ miss                             ▼
//!                      default route (404)              200 + rendered page
//!
//!     Cross-cutting: config (+ watcher), module manager, lifecycle, observability
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use krystal::config::{load_config, watcher::ConfigWatcher};
use krystal::lifecycle::signals::spawn_signal_handler;
use krystal::module::site::builtin_factories;
use krystal::observability::{logging, metrics};
use krystal::{Bootstrap, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "krystal")]
#[command(about = "Module-based routing server", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "krystal.toml")]
    config: PathBuf,

    /// Rebuild the application when the config file changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(path = ?args.config, error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    logging::init_logging(&config.observability.log_level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "krystal starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        modules = ?config.modules.names,
        "Configuration loaded"
    );

    match run(args, config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: krystal::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        // Validation already checked the address.
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let bind_address = config.server.bind_address.clone();
    let server = HttpServer::new(Bootstrap::new(config).with_factories(builtin_factories()))?;

    let listener = TcpListener::bind(&bind_address).await?;

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, config_updates) = if args.watch {
        let (watcher, rx) = ConfigWatcher::new(&args.config);
        (Some(watcher.run()?), rx)
    } else {
        let (_tx, rx) = mpsc::unbounded_channel();
        (None, rx)
    };

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    server.run(listener, config_updates, shutdown_rx).await?;
    Ok(())
}
