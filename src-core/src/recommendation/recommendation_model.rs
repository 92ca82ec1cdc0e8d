use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::risk::risk_model::{RiskProfileName, RiskProfileResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    EquityDomestic,
    EquityForeign,
    Fund,
}

/// Catalog entry. Owned by an external catalog; read-only to this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub kind: AssetKind,
    pub symbol: String,
    pub risk_profile: RiskProfileName,
    pub industry_tag: String,
}

/// Recommended share of a goal's funds to place into one asset.
/// Immutable once written; recommendation runs append, never mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationTarget {
    pub goal_id: String,
    pub asset_kind: AssetKind,
    pub asset_ref_id: String,
    /// 0-100; all targets of one goal sum to at most 100
    pub recommended_percent: Decimal,
}

/// One outstanding debt, as reported by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtItem {
    pub debt_type: String,
    pub amount: Decimal,
    pub monthly_payment: Decimal,
    /// Annual percentage rate, when known. Drives the safety override.
    pub interest_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdviceCategory {
    Debt,
    Saving,
    Investment,
    FinancialHealth,
}

/// Qualitative, tier-specific guidance returned alongside the targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    /// Lower is more urgent; advice is returned sorted by priority
    pub priority: u8,
    pub category: AdviceCategory,
    pub title: String,
    pub message: String,
}

/// Pure result of one recommendation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationOutcome {
    pub general_advice: Vec<Advice>,
    pub investments_to_save: Vec<AllocationTarget>,
}

/// Inbound payload of the generate-recommendations boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub owner_id: String,
    pub goal_id: String,
    pub main_income: Decimal,
    pub side_income: Decimal,
    pub debts: Vec<DebtItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub risk_profile: RiskProfileResult,
    pub general_advice: Vec<Advice>,
    pub saved_investments: Vec<AllocationTarget>,
}
