//! Petstore HTTP Server Binary
//!
//! This is the main entry point for the petstore REST API server.
//! It loads configuration, opens the repository, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # SQLite file database (default)
//! cargo run --bin petstore-server
//!
//! # Listen on another port
//! cargo run --bin petstore-server -- --port 8080
//!
//! # In-memory store
//! PETSTORE_DB_DRIVER=memory cargo run --bin petstore-server
//! ```
//!
//! # Command-line flags
//!
//! - `--port <port>` / `--host <host>`: Listener address; wins over file and environment
//! - `--config <path>`: Configuration file; replaces the `petstore.toml` search
//!
//! # Environment Variables
//!
//! - `PETSTORE_CONFIG`: Path to a TOML configuration file (default: search for `petstore.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 18080)
//! - `PETSTORE_DB_DRIVER`: `sqlite` or `memory` (default: sqlite)
//! - `PETSTORE_DB_DATA_SOURCE` / `DATABASE_URL`: SQLite data source (default: petstore.db)
//! - `RUST_LOG`: Log filter (default: info)

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use petstore::config::AppConfig;
use petstore::db::RepositoryFactory;
use petstore::http::{create_router, AppState};

/// `petstore-server` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "petstore-server", about = "Petstore REST API server", version)]
struct CliArgs {
    /// Port for the HTTP listener.
    #[arg(long, value_name = "port")]
    port: Option<u16>,
    /// Host address for the HTTP listener.
    #[arg(long, value_name = "host")]
    host: Option<String>,
    /// Path to a TOML configuration file.
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting petstore HTTP server");

    let config =
        AppConfig::load_from(args.config.as_deref())?.with_listener(args.host, args.port);
    let addr = config.server.bind_addr()?;

    let repository =
        RepositoryFactory::create(&config.database).context("failed to open repository")?;
    info!(
        driver = %config.database.driver,
        data_source = %config.database.data_source,
        "Repository initialized successfully"
    );

    let app = create_router(AppState::from_repository(repository));

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let args = CliArgs::try_parse_from(["petstore-server"]).unwrap();
        assert_eq!(args.port, None);
        assert_eq!(args.host, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_port_flag_overrides_config() {
        let args = CliArgs::try_parse_from(["petstore-server", "--port", "8080"]).unwrap();
        let config = AppConfig::default().with_listener(args.host, args.port);
        assert_eq!(config.server.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_bad_port_flag_rejected() {
        assert!(CliArgs::try_parse_from(["petstore-server", "--port", "99999"]).is_err());
        assert!(CliArgs::try_parse_from(["petstore-server", "--port", "http"]).is_err());
    }
}
