//! portal-search - Main entry point
//!
//! Serves `GET /search/all` over the site's content database (read-only).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portal_common::config::{default_config_path, load_toml_config, resolve_database_path};
use portal_search::sources::{default_catalog, sqlite_sources};
use portal_search::{build_router, db, AppState, SearchAggregator};

const MODULE_NAME: &str = "portal-search";

/// Command-line arguments for portal-search
#[derive(Parser, Debug)]
#[command(name = "portal-search")]
#[command(about = "Cross-entity search service for the institutional site")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the SQLite content database
    #[arg(short, long, env = "PORTAL_DATABASE")]
    database: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "PORTAL_SEARCH_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(MODULE_NAME));
    let config = load_toml_config(&config_path).context("Failed to load configuration")?;

    // Initialize tracing (RUST_LOG wins over the configured level)
    let default_filter = format!(
        "portal_search={level},portal_common={level},tower_http={level}",
        level = config.logging.level
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting portal-search v{} ({} {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    );
    if config_path.exists() {
        info!("Config file: {}", config_path.display());
    } else {
        info!("No config file at {}, using defaults", config_path.display());
    }

    let db_path = resolve_database_path(args.database.as_deref(), "PORTAL_DATABASE", &config);
    info!("Database: {}", db_path.display());

    let pool = db::connect_readonly(&db_path).await?;

    let sources = sqlite_sources(&pool, default_catalog());
    let source_timeout = Duration::from_millis(config.search.source_timeout_ms);
    info!(
        "Searching {} sources (per-source timeout {:?})",
        sources.len(),
        source_timeout
    );

    let state = AppState::new(SearchAggregator::new(sources, source_timeout));
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", config.bind_address, port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
