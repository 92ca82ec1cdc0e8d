use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::goals_model::GoalStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Success,
}

/// Write-once user notification created by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub owner_id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub reference_type: String,
    pub reference_id: String,
}

impl Notification {
    pub fn for_goal(
        owner_id: &str,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        goal_id: &str,
    ) -> Self {
        Notification {
            owner_id: owner_id.to_string(),
            severity,
            title: title.into(),
            message: message.into(),
            reference_type: "goal".to_string(),
            reference_id: goal_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    User,
    Admin,
    System,
    Api,
}

/// One audit-log row. Observability only; failures to write it never affect
/// the operation being logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// The affected user
    pub owner_id: String,
    pub actor_id: Option<String>,
    pub actor_type: ActorType,
    pub action: String,
    pub description: Option<String>,
    pub context: Option<serde_json::Value>,
}

impl ActivityEntry {
    /// Entry for an action performed by the system on a user's behalf.
    pub fn system(owner_id: &str, action: &str, description: impl Into<String>) -> Self {
        ActivityEntry {
            owner_id: owner_id.to_string(),
            actor_id: None,
            actor_type: ActorType::System,
            action: action.to_string(),
            description: Some(description.into()),
            context: None,
        }
    }

    /// Entry for an action the user performed themselves.
    pub fn user(owner_id: &str, action: &str, description: impl Into<String>) -> Self {
        ActivityEntry {
            owner_id: owner_id.to_string(),
            actor_id: Some(owner_id.to_string()),
            actor_type: ActorType::User,
            action: action.to_string(),
            description: Some(description.into()),
            context: None,
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Scheduler-computed goal mutation, applied as one atomically-visible unit
/// together with the wallet debit it follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressUpdate {
    pub current_amount: Decimal,
    pub status: GoalStatus,
    pub next_deduction_date: Option<NaiveDate>,
    /// Set iff this update transitions the goal to completed
    pub completed_at: Option<DateTime<Utc>>,
}
