//! Users CRUD service entry point.

use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*};

use users_api::api::{create_router, metrics_router, AppState};
use users_api::config::Config;
use users_api::error::AppError;
use users_api::metrics;
use users_api::users::MySqlUserStore;
use users_api::utils::{log_filter, shutdown_signal};

/// JSON CRUD service for the users table.
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(about = "HTTP CRUD service for a MySQL users table")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listening port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Do not create the users table on startup.
    #[arg(long, global = true)]
    skip_schema: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Create the users table and exit.
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Env files first, so RUST_LOG from them applies
    Config::load_env_files();

    // Initialize logging
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(args.verbose, rust_log.as_deref());

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::InitDb) => cmd_init_db().await,
        Some(Command::Serve) | None => cmd_serve(args.port, args.skip_schema).await,
    }
}

/// Load and validate configuration, logging failures.
fn load_config() -> Result<Config, AppError> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        AppError::InvalidConfig(e)
    })?;

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("USERS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    for (key, value) in config.redacted_summary() {
        println!("  {}: {}", key, value);
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Create the users table and exit.
async fn cmd_init_db() -> anyhow::Result<()> {
    let config = load_config()?;
    let store = MySqlUserStore::connect(&config)
        .await
        .context("connecting to database")?;

    store.ensure_schema().await.context("creating users table")?;
    info!("users table ready in {}", config.database);

    store.close().await;
    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>, skip_schema: bool) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    let prometheus = metrics::install_recorder().context("installing metrics recorder")?;

    let store = MySqlUserStore::connect(&config)
        .await
        .context("connecting to database")?;

    if !skip_schema {
        store.ensure_schema().await.context("creating users table")?;
    }

    let app_state = AppState::with_mysql(store.clone());
    let router = create_router(app_state).merge(metrics_router(prometheus));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on port: {}", config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing database pool");
    store.close().await;

    Ok(())
}
