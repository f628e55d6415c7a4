//! Reusable game catalog server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, REST API, the scheduled stock clearing job,
//! and graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{start_stock_clearing_task, CatalogService, PublisherService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
use crate::interfaces::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the catalog service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running catalog service.
///
/// # Examples
///
/// ```rust,no_run
/// use game_catalog::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Game catalog service shared with the HTTP layer.
    pub catalog: Arc<CatalogService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the REST API is listening on.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    stock_task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Start the catalog service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations
    /// 2. Wire repositories and services
    /// 3. Start the stock clearing task (if enabled)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting game catalog service...");

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let policy = app_cfg.stock_clearing.policy()?;
        let catalog = Arc::new(CatalogService::from_repos(repos.as_ref()).with_policy(policy));
        let publishers = Arc::new(PublisherService::from_repos(repos.as_ref()));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        let stock_task = if app_cfg.stock_clearing.enabled {
            Some(start_stock_clearing_task(
                catalog.clone(),
                shutdown_signal.clone(),
                app_cfg.stock_clearing.interval_secs,
            ))
        } else {
            info!("Scheduled stock clearing disabled");
            None
        };

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(catalog.clone(), publishers);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let api_port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("Game catalog service started");

        Ok(Self {
            repos,
            catalog,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
            stock_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Call [`wait`](Self::wait) to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    ///
    /// Once the signal fires, in-flight work gets `shutdown_timeout`
    /// seconds before the tasks are abandoned.
    pub async fn wait(self) {
        let signal = self.shutdown.signal();
        let grace = Duration::from_secs(self.shutdown.timeout_secs());

        let mut api_task = self.api_task;
        let exited_early = tokio::select! {
            result = &mut api_task => Some(result),
            _ = signal.wait() => None,
        };

        match exited_early {
            Some(result) => {
                match result {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                // the server exiting on its own still has to stop the job
                signal.trigger();
            }
            None => {
                info!("Waiting for server tasks to complete...");
                match tokio::time::timeout(grace, &mut api_task).await {
                    Ok(Ok(())) => info!("REST API server stopped"),
                    Ok(Err(e)) => error!("REST API server task panicked: {}", e),
                    Err(_) => {
                        warn!(timeout_secs = grace.as_secs(), "REST API server did not stop in time");
                        api_task.abort();
                    }
                }
            }
        }

        if let Some(mut task) = self.stock_task {
            match tokio::time::timeout(grace, &mut task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Stock clearing task panicked: {}", e),
                Err(_) => {
                    warn!("Stock clearing run did not finish in time, aborting");
                    task.abort();
                }
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Game catalog service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down game catalog service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call this once at process startup
/// (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
