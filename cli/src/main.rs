//! Game catalog - CLI server
//!
//! Headless REST service for the game catalog, suitable for deployment
//! as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/game-catalog/config.toml)
//! catalog-service
//!
//! # Custom config path
//! catalog-service --config /etc/game-catalog/config.toml
//!
//! # Override the port
//! catalog-service --port 8080
//!
//! # Validate config without starting
//! catalog-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use game_catalog::config::{AppConfig, CONFIG_ENV};
use game_catalog::server::{init_tracing, ServerHandle, ServerOptions};

/// Game catalog REST service.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-service",
    version,
    about = "REST service managing video games, publishers and stock clearing",
    long_about = "Game catalog: REST API for games and their publishers, \
                  with a scheduled job that discounts or removes old stock.\n\n\
                  Default config: ~/.config/game-catalog/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(game_catalog::default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        let mut config = loaded?;
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        println!("Configuration is valid");
        println!("   Config file    : {}", config_path.display());
        println!("   API address    : {}", config.server.address());
        println!("   Database       : {}", config.database.url);
        println!("   Log level      : {}", config.logging.level);
        println!(
            "   Stock clearing : {} (every {}s)",
            if config.stock_clearing.enabled { "enabled" } else { "disabled" },
            config.stock_clearing.interval_secs
        );
        return Ok(());
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
