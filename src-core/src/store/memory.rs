//! In-memory implementations of the collaborator traits.
//!
//! Backing store for tests and for server deployments without an external
//! database. All state lives behind tokio `RwLock`s; wallet debits re-check
//! the balance under the write lock, so concurrent debit requests cannot
//! produce a lost update or a negative balance.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::errors::{Error, Result};
use crate::goals::goals_model::{ContributionTransaction, GoalStatus, SavingsGoal, Wallet};
use crate::recommendation::recommendation_model::{AllocationTarget, Asset};
use crate::risk::risk_model::SurveyAnswer;
use crate::store::store_model::{ActivityEntry, GoalProgressUpdate, Notification};
use crate::store::store_traits::{ActivityLogger, Notifier, PlanningStore, SchedulerStore};

#[derive(Default)]
pub struct MemoryStore {
    goals: RwLock<HashMap<String, SavingsGoal>>,
    wallets: RwLock<HashMap<String, Wallet>>,
    transactions: RwLock<Vec<ContributionTransaction>>,
    allocation_targets: RwLock<Vec<AllocationTarget>>,
    survey_answers: RwLock<HashMap<String, Vec<SurveyAnswer>>>,
    assets: RwLock<Vec<Asset>>,
    emails: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_goal(&self, goal: SavingsGoal) {
        self.goals.write().await.insert(goal.id.clone(), goal);
    }

    pub async fn insert_wallet(&self, wallet: Wallet) {
        self.wallets.write().await.insert(wallet.id.clone(), wallet);
    }

    pub async fn insert_assets(&self, assets: Vec<Asset>) {
        self.assets.write().await.extend(assets);
    }

    pub async fn insert_survey_answers(&self, owner_id: &str, answers: Vec<SurveyAnswer>) {
        self.survey_answers
            .write()
            .await
            .insert(owner_id.to_string(), answers);
    }

    pub async fn set_owner_email(&self, owner_id: &str, address: &str) {
        self.emails
            .write()
            .await
            .insert(owner_id.to_string(), address.to_string());
    }

    pub async fn goal(&self, goal_id: &str) -> Option<SavingsGoal> {
        self.goals.read().await.get(goal_id).cloned()
    }

    pub async fn wallet(&self, wallet_id: &str) -> Option<Wallet> {
        self.wallets.read().await.get(wallet_id).cloned()
    }

    pub async fn transactions_for_goal(&self, goal_id: &str) -> Vec<ContributionTransaction> {
        self.transactions
            .read()
            .await
            .iter()
            .filter(|transaction| transaction.goal_id == goal_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PlanningStore for MemoryStore {
    async fn get_asset_catalog(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.read().await.clone())
    }

    async fn get_survey_answers(&self, owner_id: &str) -> Result<Vec<SurveyAnswer>> {
        Ok(self
            .survey_answers
            .read()
            .await
            .get(owner_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_goal_by_id(&self, goal_id: &str) -> Result<Option<SavingsGoal>> {
        Ok(self.goals.read().await.get(goal_id).cloned())
    }

    async fn insert_allocation_targets(&self, targets: Vec<AllocationTarget>) -> Result<usize> {
        let inserted = targets.len();
        self.allocation_targets.write().await.extend(targets);
        Ok(inserted)
    }

    async fn allocation_targets_for_goal(&self, goal_id: &str) -> Result<Vec<AllocationTarget>> {
        Ok(self
            .allocation_targets
            .read()
            .await
            .iter()
            .filter(|target| target.goal_id == goal_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SchedulerStore for MemoryStore {
    async fn goals_due_for_deduction(&self, date: NaiveDate) -> Result<Vec<SavingsGoal>> {
        Ok(self
            .goals
            .read()
            .await
            .values()
            .filter(|goal| {
                goal.status == GoalStatus::Active
                    && goal
                        .next_deduction_date
                        .map_or(false, |due_date| due_date <= date)
            })
            .cloned()
            .collect())
    }

    async fn get_wallet_balance(&self, wallet_id: &str) -> Result<Decimal> {
        self.wallets
            .read()
            .await
            .get(wallet_id)
            .map(|wallet| wallet.balance)
            .ok_or_else(|| Error::Storage(format!("Wallet {wallet_id} not found")))
    }

    async fn debit_wallet(&self, wallet_id: &str, amount: Decimal) -> Result<bool> {
        let mut wallets = self.wallets.write().await;
        let wallet = wallets
            .get_mut(wallet_id)
            .ok_or_else(|| Error::Storage(format!("Wallet {wallet_id} not found")))?;
        if wallet.balance < amount {
            return Ok(false);
        }
        wallet.balance -= amount;
        Ok(true)
    }

    async fn update_goal_progress(&self, goal_id: &str, update: GoalProgressUpdate) -> Result<()> {
        let mut goals = self.goals.write().await;
        let goal = goals
            .get_mut(goal_id)
            .ok_or_else(|| Error::Storage(format!("Goal {goal_id} not found")))?;
        goal.current_amount = update.current_amount;
        goal.status = update.status;
        goal.next_deduction_date = update.next_deduction_date;
        if update.completed_at.is_some() {
            goal.completed_at = update.completed_at;
        }
        Ok(())
    }

    async fn insert_contribution_transaction(
        &self,
        transaction: ContributionTransaction,
    ) -> Result<()> {
        self.transactions.write().await.push(transaction);
        Ok(())
    }

    async fn owner_email(&self, owner_id: &str) -> Result<Option<String>> {
        Ok(self.emails.read().await.get(owner_id).cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Records notifications and emails instead of delivering them. The email
/// channel can be switched to fail for exercising the best-effort path.
#[derive(Default)]
pub struct MemoryNotifier {
    notifications: RwLock<Vec<Notification>>,
    emails: RwLock<Vec<SentEmail>>,
    fail_emails: std::sync::atomic::AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_emails(&self, fail: bool) {
        self.fail_emails
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn emails(&self) -> Vec<SentEmail> {
        self.emails.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        self.notifications.write().await.push(notification);
        Ok(())
    }

    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&str>,
    ) -> Result<()> {
        if self.fail_emails.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(Error::Notification("email delivery unavailable".to_string()));
        }
        self.emails.write().await.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.map(str::to_string),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryActivityLog {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.read().await.clone()
    }

    pub async fn entries_with_action(&self, action: &str) -> Vec<ActivityEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|entry| entry.action == action)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ActivityLogger for MemoryActivityLog {
    async fn log_activity(&self, entry: ActivityEntry) -> Result<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
