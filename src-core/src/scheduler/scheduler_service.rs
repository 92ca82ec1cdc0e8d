//! Recurring-contribution scheduler.
//!
//! `run_tick` is invoked once per period by an external clock trigger and
//! processes every due goal independently: a failure on one goal is logged
//! and never aborts the tick for the others. Within one goal the wallet
//! debit and goal update happen through [`SchedulerStore`], which serializes
//! per-wallet mutations; re-running a tick cannot double-deduct a goal whose
//! next deduction date was already advanced past today.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::errors::Result;
use crate::goals::goals_model::{ContributionTransaction, GoalStatus, SavingsGoal};
use crate::store::store_model::{ActivityEntry, GoalProgressUpdate, Notification, Severity};
use crate::store::store_traits::{ActivityLogger, Notifier, SchedulerStore};

/// Per-tick counters for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSummary {
    pub due: usize,
    pub deducted: usize,
    pub completed: usize,
    pub skipped_insufficient: usize,
    pub failed: usize,
}

enum DeductionOutcome {
    Applied { goal_completed: bool },
    InsufficientFunds,
}

pub struct ContributionScheduler<S, N, L>
where
    S: SchedulerStore,
    N: Notifier,
    L: ActivityLogger,
{
    store: Arc<S>,
    notifier: Arc<N>,
    activity_log: Arc<L>,
}

impl<S, N, L> ContributionScheduler<S, N, L>
where
    S: SchedulerStore,
    N: Notifier,
    L: ActivityLogger,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, activity_log: Arc<L>) -> Self {
        ContributionScheduler {
            store,
            notifier,
            activity_log,
        }
    }

    /// Process all goals due on `today`. Fails only when the due-goal
    /// selection itself fails; per-goal errors are counted and logged.
    pub async fn run_tick(&self, today: NaiveDate) -> Result<TickSummary> {
        let due_goals = self.store.goals_due_for_deduction(today).await?;
        let mut summary = TickSummary {
            due: due_goals.len(),
            ..TickSummary::default()
        };

        if due_goals.is_empty() {
            log::info!("auto-deduction tick {today}: no goals due");
            return Ok(summary);
        }

        for goal in &due_goals {
            match self.process_goal(goal, today).await {
                Ok(DeductionOutcome::Applied { goal_completed }) => {
                    summary.deducted += 1;
                    if goal_completed {
                        summary.completed += 1;
                    }
                }
                Ok(DeductionOutcome::InsufficientFunds) => {
                    summary.skipped_insufficient += 1;
                }
                Err(error) => {
                    summary.failed += 1;
                    log::error!(
                        "auto-deduction failed for goal {} (owner {}): {error}",
                        goal.id,
                        goal.owner_id
                    );
                }
            }
        }

        log::info!(
            "auto-deduction tick {today}: {} due, {} deducted, {} completed, {} skipped, {} failed",
            summary.due,
            summary.deducted,
            summary.completed,
            summary.skipped_insufficient,
            summary.failed
        );
        Ok(summary)
    }

    async fn process_goal(&self, goal: &SavingsGoal, today: NaiveDate) -> Result<DeductionOutcome> {
        let balance = self.store.get_wallet_balance(&goal.wallet_id).await?;
        if balance < goal.contribution_amount {
            self.record_insufficient_funds(goal, balance).await;
            return Ok(DeductionOutcome::InsufficientFunds);
        }

        // The balance may have changed since the read; the debit re-checks
        // under the store's per-wallet serialization.
        if !self
            .store
            .debit_wallet(&goal.wallet_id, goal.contribution_amount)
            .await?
        {
            self.record_insufficient_funds(goal, balance).await;
            return Ok(DeductionOutcome::InsufficientFunds);
        }

        let new_amount = goal.current_amount + goal.contribution_amount;
        let goal_completed = new_amount >= goal.target_amount;
        let new_status = if goal_completed {
            GoalStatus::Completed
        } else {
            GoalStatus::Active
        };
        let next_deduction_date = if goal_completed {
            None
        } else {
            goal.frequency.next_date(today)
        };

        self.store
            .update_goal_progress(
                &goal.id,
                GoalProgressUpdate {
                    current_amount: new_amount,
                    status: new_status,
                    next_deduction_date,
                    completed_at: goal_completed.then(Utc::now),
                },
            )
            .await?;

        self.store
            .insert_contribution_transaction(ContributionTransaction::record(
                goal,
                goal.contribution_amount,
            ))
            .await?;

        let entry = ActivityEntry::system(
            &goal.owner_id,
            "AUTO_DEDUCTION_APPLIED",
            format!(
                "Deducted {} from wallet {} into goal \"{}\" ({} of {})",
                goal.contribution_amount, goal.wallet_id, goal.name, new_amount, goal.target_amount
            ),
        );
        if let Err(error) = self.activity_log.log_activity(entry).await {
            log::warn!("failed to write deduction activity log for goal {}: {error}", goal.id);
        }

        // Notification and email are side channels; their failures never
        // roll back the debit and goal update that already committed.
        self.notify_success(goal, goal_completed).await;
        self.send_receipt_email(goal, goal_completed).await;

        Ok(DeductionOutcome::Applied { goal_completed })
    }

    async fn record_insufficient_funds(&self, goal: &SavingsGoal, balance: rust_decimal::Decimal) {
        log::warn!(
            "wallet {} balance {} below contribution {} for goal \"{}\"",
            goal.wallet_id,
            balance,
            goal.contribution_amount,
            goal.name
        );

        let entry = ActivityEntry::system(
            &goal.owner_id,
            "AUTO_DEDUCTION_SKIPPED",
            format!(
                "Wallet {} cannot cover contribution {} for goal \"{}\"",
                goal.wallet_id, goal.contribution_amount, goal.name
            ),
        );
        if let Err(error) = self.activity_log.log_activity(entry).await {
            log::warn!("failed to write skip activity log for goal {}: {error}", goal.id);
        }

        let notification = Notification::for_goal(
            &goal.owner_id,
            Severity::Warning,
            "Automatic contribution skipped",
            format!(
                "Your wallet balance does not cover the {} contribution for \"{}\". The deduction will be retried on the next cycle.",
                goal.contribution_amount, goal.name
            ),
            &goal.id,
        );
        if let Err(error) = self.notifier.notify(notification).await {
            log::warn!("failed to notify owner {} of skipped deduction: {error}", goal.owner_id);
        }
    }

    async fn notify_success(&self, goal: &SavingsGoal, goal_completed: bool) {
        let (title, message) = if goal_completed {
            (
                "Savings goal completed",
                format!(
                    "The final contribution of {} was applied and your goal \"{}\" is now complete.",
                    goal.contribution_amount, goal.name
                ),
            )
        } else {
            (
                "Automatic contribution applied",
                format!(
                    "{} was moved into your goal \"{}\".",
                    goal.contribution_amount, goal.name
                ),
            )
        };

        let notification =
            Notification::for_goal(&goal.owner_id, Severity::Success, title, message, &goal.id);
        if let Err(error) = self.notifier.notify(notification).await {
            log::warn!("failed to notify owner {} of deduction: {error}", goal.owner_id);
        }
    }

    async fn send_receipt_email(&self, goal: &SavingsGoal, goal_completed: bool) {
        let address = match self.store.owner_email(&goal.owner_id).await {
            Ok(Some(address)) => address,
            Ok(None) => return,
            Err(error) => {
                log::warn!("failed to look up email for owner {}: {error}", goal.owner_id);
                return;
            }
        };

        let subject = if goal_completed {
            "Savings goal completed"
        } else {
            "Automatic contribution applied"
        };
        let text = format!(
            "{} was moved into your goal \"{}\".",
            goal.contribution_amount, goal.name
        );
        let html = format!(
            "<h3>{subject}</h3><p>{} was moved into your goal \"{}\".</p>",
            goal.contribution_amount, goal.name
        );

        if let Err(error) = self
            .notifier
            .send_email(&address, subject, &text, Some(&html))
            .await
        {
            log::warn!("failed to email {address} about goal {}: {error}", goal.id);
        }
    }
}
