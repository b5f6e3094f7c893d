//! Items CRUD service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use items_api::api::{create_router, AppState};
use items_api::config::{Config, API_V1_STR};
use items_api::items::{InMemoryItemRepository, MongoItemRepository};
use items_api::metrics;
use items_api::utils::shutdown_signal;
use items_api::ServiceError;

/// CRUD HTTP service for items stored in MongoDB.
#[derive(Parser, Debug)]
#[command(name = "items-api")]
#[command(about = "CRUD HTTP service for items stored in MongoDB")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

/// Options for serving the HTTP API.
#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Serve from an in-process store instead of MongoDB.
    #[arg(long)]
    in_memory: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve(ServeArgs),

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG from .env is honored
    let config = Config::load();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("items_api=debug,info")
    } else {
        let fallback = config
            .as_ref()
            .map(|c| c.rust_log.clone())
            .unwrap_or_else(|_| "warn".to_string());
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Serve(serve)) => cmd_serve(config, serve).await,
        None => cmd_serve(config, args.serve).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ITEMS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
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
    println!("  Project: {}", config.project_name);
    println!("  MongoDB URL: {}", config.redacted_mongodb_url());
    println!("  Database: {}", config.mongodb_database);
    println!("  Collection: {}", config.mongodb_collection);
    println!("  Port: {}", config.port);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(
    config: Result<Config, envy::Error>,
    serve: ServeArgs,
) -> anyhow::Result<()> {
    let mut config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ServiceError::from(e)
    })?;

    if let Some(port) = serve.port {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    info!("Configuration loaded for {}", config.project_name);

    // Connect storage
    let mongo = if serve.in_memory {
        warn!("Serving from in-memory store; data is lost on exit");
        None
    } else {
        Some(MongoItemRepository::connect(&config).await?)
    };

    let mut state = match &mongo {
        Some(repo) => AppState::new(Arc::new(repo.clone())),
        None => AppState::new(Arc::new(InMemoryItemRepository::new())),
    };

    // Initialize metrics
    match metrics::install_recorder() {
        Ok(handle) => {
            metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
            state = state.with_metrics(handle);
        }
        Err(e) => warn!("Metrics recorder not installed: {}", e),
    }

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {} (items under {})", addr, API_V1_STR);

    let router = create_router(state, &config.project_name);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(repo) = mongo {
        repo.shutdown().await;
    }

    info!("Server stopped");
    Ok(())
}
