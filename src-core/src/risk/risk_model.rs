use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coarse financial-risk tier derived from a customer's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Investment risk appetite used to tag assets and filter the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskProfileName {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<RiskLevel> for RiskProfileName {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => RiskProfileName::Conservative,
            RiskLevel::Medium => RiskProfileName::Moderate,
            RiskLevel::High => RiskProfileName::Aggressive,
        }
    }
}

impl RiskProfileName {
    /// The tier this profile corresponds to, for tier-keyed advice.
    pub fn level(self) -> RiskLevel {
        match self {
            RiskProfileName::Conservative => RiskLevel::Low,
            RiskProfileName::Moderate => RiskLevel::Medium,
            RiskProfileName::Aggressive => RiskLevel::High,
        }
    }
}

/// Classifier input. Validation of numeric ranges is a caller precondition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAttributes {
    pub id: String,
    /// Age in whole years
    pub age: u32,
    /// Monthly income in currency units
    pub income: Decimal,
    pub credit_score: u32,
}

/// Derived, immutable classification result. Never persisted as mutable
/// state; a fresh value is produced on every classification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub subject_id: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    /// Explanatory factors in fixed order: age, income, credit
    pub factors: Vec<String>,
}

/// Common output shape of both classifier variants, so the allocation
/// recommender is agnostic to which one produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfileResult {
    pub profile: RiskProfileName,
    pub score: f64,
}

impl From<&RiskProfile> for RiskProfileResult {
    fn from(profile: &RiskProfile) -> Self {
        RiskProfileResult {
            profile: profile.risk_level.into(),
            score: profile.risk_score as f64,
        }
    }
}

/// One row of a user's onboarding survey, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswer {
    pub question_id: u32,
    pub answer_value: String,
}

/// Answers collapsed by question id. Multi-choice questions accumulate.
pub type GroupedAnswers = HashMap<u32, Vec<String>>;
