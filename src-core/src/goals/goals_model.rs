use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contribution cadence of a savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    OneTime,
}

impl Frequency {
    /// Normalized monthly-equivalent rate of a contribution at this cadence.
    /// One-time contributions have no recurring rate.
    pub fn monthly_equivalent(self, contribution: Decimal) -> Decimal {
        match self {
            Frequency::Daily => contribution * dec!(30),
            Frequency::Weekly => contribution * dec!(4),
            Frequency::Monthly => contribution,
            Frequency::OneTime => Decimal::ZERO,
        }
    }

    /// Next deduction date after a deduction on `from`. Monthly keeps the
    /// day-of-month, clamped to the target month's length. One-time cadences
    /// are consumed by their single deduction.
    pub fn next_date(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => from.checked_add_days(Days::new(1)),
            Frequency::Weekly => from.checked_add_days(Days::new(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
            Frequency::OneTime => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
}

/// A user-defined savings target with a recurring or one-time contribution
/// plan. The central mutable entity of the planning core; mutated only by
/// manual contributions or the contribution scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub owner_id: String,
    pub wallet_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub contribution_amount: Decimal,
    pub frequency: Frequency,
    pub status: GoalStatus,
    pub next_deduction_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Goal creation payload from the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub owner_id: String,
    pub wallet_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub contribution_amount: Decimal,
    pub frequency: Frequency,
    /// First deduction date; defaults to the creation date
    pub start_date: Option<NaiveDate>,
}

impl SavingsGoal {
    /// New active goal with zero progress and its first deduction scheduled.
    pub fn create(new_goal: NewGoal, today: NaiveDate) -> Self {
        SavingsGoal {
            id: Uuid::new_v4().to_string(),
            owner_id: new_goal.owner_id,
            wallet_id: new_goal.wallet_id,
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: Decimal::ZERO,
            contribution_amount: new_goal.contribution_amount,
            frequency: new_goal.frequency,
            status: GoalStatus::Active,
            next_deduction_date: Some(new_goal.start_date.unwrap_or(today)),
            completed_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
}

/// Append-only record of one successful deduction. Never updated or deleted;
/// the sum of a goal's transactions must reconcile with its progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionTransaction {
    pub id: String,
    pub owner_id: String,
    pub wallet_id: String,
    pub goal_id: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub occurred_at: DateTime<Utc>,
}

impl ContributionTransaction {
    pub fn record(goal: &SavingsGoal, amount: Decimal) -> Self {
        ContributionTransaction {
            id: Uuid::new_v4().to_string(),
            owner_id: goal.owner_id.clone(),
            wallet_id: goal.wallet_id.clone(),
            goal_id: goal.id.clone(),
            amount,
            status: TransactionStatus::Completed,
            occurred_at: Utc::now(),
        }
    }
}

/// Wallet snapshot. Owned by the wallet subsystem; this core only reads the
/// balance and requests debits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub owner_id: String,
    pub balance: Decimal,
}
