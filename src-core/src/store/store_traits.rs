//! Collaborator seams of the planning core.
//!
//! The persistent store, notifier, and audit logger are external subsystems;
//! the core reaches them only through these traits so that every component
//! can be exercised against the in-memory implementations in
//! [`memory`](super::memory) without a database.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{ContributionTransaction, SavingsGoal};
use crate::recommendation::recommendation_model::{AllocationTarget, Asset};
use crate::risk::risk_model::SurveyAnswer;
use crate::store::store_model::{ActivityEntry, GoalProgressUpdate, Notification};

/// Read side of the recommendation path plus append-only persistence of the
/// allocation targets it produces.
#[async_trait]
pub trait PlanningStore: Send + Sync {
    async fn get_asset_catalog(&self) -> Result<Vec<Asset>>;

    async fn get_survey_answers(&self, owner_id: &str) -> Result<Vec<SurveyAnswer>>;

    async fn get_goal_by_id(&self, goal_id: &str) -> Result<Option<SavingsGoal>>;

    /// Appends new rows; prior recommendation runs are never mutated.
    async fn insert_allocation_targets(&self, targets: Vec<AllocationTarget>) -> Result<usize>;

    async fn allocation_targets_for_goal(&self, goal_id: &str) -> Result<Vec<AllocationTarget>>;
}

/// Store operations of the contribution scheduler.
#[async_trait]
pub trait SchedulerStore: Send + Sync {
    /// Active goals whose next deduction date is on or before `date`.
    /// Goals without a next deduction date are never selected.
    async fn goals_due_for_deduction(&self, date: NaiveDate) -> Result<Vec<SavingsGoal>>;

    async fn get_wallet_balance(&self, wallet_id: &str) -> Result<Decimal>;

    /// Debits the wallet by `amount`, serialized per wallet. Returns false
    /// when the balance no longer covers the amount (no partial debit).
    async fn debit_wallet(&self, wallet_id: &str, amount: Decimal) -> Result<bool>;

    async fn update_goal_progress(&self, goal_id: &str, update: GoalProgressUpdate) -> Result<()>;

    async fn insert_contribution_transaction(
        &self,
        transaction: ContributionTransaction,
    ) -> Result<()>;

    async fn owner_email(&self, owner_id: &str) -> Result<Option<String>>;
}

/// Outbound notification channels. Email is a best-effort side channel;
/// callers log and swallow its failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<()>;

    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&str>,
    ) -> Result<()>;
}

/// Audit logging, called on every branch of the scheduler and the
/// recommendation request. Observability only.
#[async_trait]
pub trait ActivityLogger: Send + Sync {
    async fn log_activity(&self, entry: ActivityEntry) -> Result<()>;
}
