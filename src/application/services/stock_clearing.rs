//! Background task that periodically runs the stock clearing job.
//!
//! Runs in a tokio::spawn loop, calling `CatalogService::clear_stock`
//! every `interval_secs` until shutdown.

use std::sync::Arc;

use tokio::time::{Duration, MissedTickBehavior};
use tracing::{info, warn};

use super::CatalogService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the stock clearing background task.
///
/// The first run happens one full interval after startup.
pub fn start_stock_clearing_task(
    catalog: Arc<CatalogService>,
    shutdown: ShutdownSignal,
    interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval = interval_secs, "Stock clearing task started");

        let period = Duration::from_secs(interval_secs.max(1));
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match catalog.clear_stock().await {
                        Ok(report) => info!(
                            deleted = report.deleted,
                            discounted = report.discounted,
                            "Scheduled stock clearing finished"
                        ),
                        Err(e) => warn!(error = %e, "Scheduled stock clearing failed"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Stock clearing task shutting down");
                    break;
                }
            }
        }

        info!("Stock clearing task stopped");
    })
}
