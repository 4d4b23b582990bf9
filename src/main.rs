mod config;
mod discovery;
mod error;
mod listing;
mod network;
mod records;
mod rollup;
mod routes;
mod server;
mod service;
mod settings;
mod state;
mod stats;

use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{CliArgs, ServiceConfig};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(args.log_file.as_deref())?;

    info!("Starting runlog-stats v{}", env!("CARGO_PKG_VERSION"));
    info!("Log dir: {:?}", args.log_dir);
    info!("Suffix: {}", args.suffix);

    let config = ServiceConfig::from_args(args);
    let networks = settings::resolve_network_table(config.networks_file.as_deref())?;
    info!(
        "Networks: {} prefix rule(s), fallback {:?}",
        networks.rules().len(),
        networks.fallback()
    );

    // Missing dir is not fatal: requests report it until it appears
    if !config.log_dir.is_dir() {
        warn!("Log directory {:?} is not readable yet", config.log_dir);
    }

    let addr = config.listen_addr();
    let state = Arc::new(AppState::new(config, networks));

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

fn init_tracing(
    log_file: Option<&std::path::Path>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "runlog_stats=info,tower_http=info".into());

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
