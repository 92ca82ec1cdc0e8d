//! Background jobs. The clock trigger lives here; the deduction logic
//! itself is in the core scheduler and is shared with the manual
//! run-tick endpoint.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::main_lib::AppState;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Spawn the daily auto-deduction cycle. The first tick fires immediately
/// so goals due today are not left waiting a full period after a restart.
pub fn spawn_daily_deduction_job(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(DAY);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let today = Utc::now().date_naive();
            match state.scheduler.run_tick(today).await {
                Ok(summary) => {
                    tracing::info!(
                        date = %today,
                        due = summary.due,
                        deducted = summary.deducted,
                        completed = summary.completed,
                        skipped = summary.skipped_insufficient,
                        failed = summary.failed,
                        "daily deduction cycle finished"
                    );
                }
                Err(error) => {
                    tracing::error!(date = %today, "daily deduction cycle failed: {error}");
                }
            }
        }
    })
}
