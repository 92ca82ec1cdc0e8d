//! Allocation recommender.
//!
//! `recommend` is a pure function from a risk assessment, the asset catalog,
//! and the caller's debt picture to advice plus percentage allocation
//! targets. [`RecommendationService`] wraps it with the store round trips of
//! the generate-recommendations boundary: survey lookup, goal ownership
//! check, term estimation, and append-only persistence of the targets.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{Error, Result, ValidationError};
use crate::goals::term::estimate_duration_months;
use crate::recommendation::recommendation_model::{
    Advice, AdviceCategory, AllocationTarget, Asset, DebtItem, RecommendationOutcome,
    RecommendationRequest, RecommendationResponse,
};
use crate::risk::risk_model::{RiskLevel, RiskProfileName, RiskProfileResult};
use crate::risk::risk_service::{group_answers, interests, RiskAssessment};
use crate::store::store_model::ActivityEntry;
use crate::store::store_traits::{ActivityLogger, PlanningStore};

/// Debt above this annual rate triggers the conservative safety override.
const HIGH_INTEREST_THRESHOLD: Decimal = dec!(10);
/// Debt-to-income bands, in percent.
const DTI_YELLOW_THRESHOLD: Decimal = dec!(36);
const DTI_RED_THRESHOLD: Decimal = dec!(43);

const MAX_RECOMMENDED_ASSETS: usize = 3;

/// Pick assets and assign percentage weights for one goal.
///
/// Targets never sum above 100; a sum below 100 leaves the remainder
/// implicitly held as cash. An empty candidate set is a degenerate result,
/// not an error: the advice explains why no allocation was possible.
pub fn recommend(
    risk: &RiskProfileResult,
    catalog: &[Asset],
    goal_id: &str,
    goal_term_months: u32,
    debts: &[DebtItem],
    interest_tags: &[String],
    monthly_income: Decimal,
) -> RecommendationOutcome {
    let mut advice: Vec<Advice> = Vec::new();
    let mut effective = risk.clone();

    // Safety override: any high-interest debt forces a conservative plan
    // and puts debt reduction ahead of everything else.
    if let Some(debt) = find_high_interest_debt(debts) {
        effective = RiskProfileResult {
            profile: RiskProfileName::Conservative,
            score: 0.0,
        };
        advice.push(Advice {
            priority: 1,
            category: AdviceCategory::Debt,
            title: format!("Pay off high-interest debt first: {}", debt.debt_type),
            message: format!(
                "This debt carries {}% interest. Paying it down is the best guaranteed return available to you right now.",
                debt.interest_rate.unwrap_or_default()
            ),
        });
    } else {
        match debt_to_income(debts, monthly_income) {
            Some(dti) if dti > DTI_RED_THRESHOLD => advice.push(Advice {
                priority: 1,
                category: AdviceCategory::Debt,
                title: "Reduce your debt load urgently".to_string(),
                message: format!(
                    "Your debt-to-income ratio is {:.2}%, which is very high. Prioritize paying down debt to restore liquidity.",
                    dti
                ),
            }),
            Some(dti) if dti > DTI_YELLOW_THRESHOLD => advice.push(Advice {
                priority: 2,
                category: AdviceCategory::Debt,
                title: "Build an emergency fund and contain debt".to_string(),
                message: format!(
                    "Your debt-to-income ratio is {:.2}%. Build an emergency fund covering 3-6 months of expenses and avoid taking on new debt.",
                    dti
                ),
            }),
            None if !debts.is_empty() => advice.push(Advice {
                priority: 1,
                category: AdviceCategory::Debt,
                title: "Reduce your debt load urgently".to_string(),
                message: "You carry debt without recurring income to service it. Prioritize paying it down before investing.".to_string(),
            }),
            _ => {}
        }
    }

    if advice.is_empty() {
        advice.push(Advice {
            priority: 1,
            category: AdviceCategory::Saving,
            title: "Start an emergency fund".to_string(),
            message: "Keep 3-6 months of expenses in reserve to absorb unexpected events.".to_string(),
        });
    }

    advice.extend(tier_advice(effective.profile.level(), monthly_income));

    // Outstanding debt always keeps debt reduction on the list.
    if !debts.is_empty()
        && !advice
            .iter()
            .any(|item| item.category == AdviceCategory::Debt)
    {
        advice.push(Advice {
            priority: 2,
            category: AdviceCategory::Debt,
            title: "Keep paying down outstanding debt".to_string(),
            message: "Reducing your existing debt frees up future contributions for your goals.".to_string(),
        });
    }

    let investments_to_save =
        suggest_investments(&effective, catalog, goal_id, goal_term_months, interest_tags);

    if investments_to_save.is_empty() {
        advice.push(Advice {
            priority: 3,
            category: AdviceCategory::Investment,
            title: "No investment allocation available".to_string(),
            message: "No assets in the catalog match your profile and goal horizon. Contributions stay uninvested as cash for now.".to_string(),
        });
    } else {
        advice.push(Advice {
            priority: 3,
            category: AdviceCategory::Investment,
            title: "Consider the recommended allocation plan".to_string(),
            message: format!(
                "This allocation plan is suited to your {:?} profile and goal horizon.",
                effective.profile
            ),
        });
    }

    advice.sort_by_key(|item| item.priority);

    RecommendationOutcome {
        general_advice: advice,
        investments_to_save,
    }
}

fn find_high_interest_debt(debts: &[DebtItem]) -> Option<&DebtItem> {
    debts.iter().find(|debt| {
        debt.interest_rate
            .map_or(false, |rate| rate > HIGH_INTEREST_THRESHOLD)
    })
}

/// Debt-to-income ratio in percent. `None` when there is no recurring
/// income to measure against.
fn debt_to_income(debts: &[DebtItem], monthly_income: Decimal) -> Option<Decimal> {
    if monthly_income <= Decimal::ZERO {
        return None;
    }
    let total_payments: Decimal = debts.iter().map(|debt| debt.monthly_payment).sum();
    Some(total_payments / monthly_income * dec!(100))
}

/// Tier-specific guidance mirroring the classifier's factors.
fn tier_advice(tier: RiskLevel, monthly_income: Decimal) -> Vec<Advice> {
    match tier {
        RiskLevel::High => {
            let mut advice = vec![
                Advice {
                    priority: 2,
                    category: AdviceCategory::Debt,
                    title: "Consider debt consolidation".to_string(),
                    message: "Consolidating obligations can lower your total interest burden.".to_string(),
                },
                Advice {
                    priority: 2,
                    category: AdviceCategory::FinancialHealth,
                    title: "Seek financial counseling".to_string(),
                    message: "A counselor can help structure a plan around your current obligations.".to_string(),
                },
            ];
            if monthly_income < dec!(30_000) {
                advice.push(Advice {
                    priority: 2,
                    category: AdviceCategory::FinancialHealth,
                    title: "Look for additional income sources".to_string(),
                    message: "Diversifying income reduces the risk of missing contributions.".to_string(),
                });
            }
            advice
        }
        RiskLevel::Medium => vec![
            Advice {
                priority: 2,
                category: AdviceCategory::Saving,
                title: "Review and reduce unnecessary expenses".to_string(),
                message: "Trimming recurring expenses frees room for your contribution plan.".to_string(),
            },
            Advice {
                priority: 2,
                category: AdviceCategory::Saving,
                title: "Create an emergency fund".to_string(),
                message: "An emergency fund keeps one setback from derailing your goals.".to_string(),
            },
        ],
        RiskLevel::Low => vec![
            Advice {
                priority: 3,
                category: AdviceCategory::FinancialHealth,
                title: "Plan for long-term financial goals".to_string(),
                message: "Your position allows planning beyond the current goal horizon.".to_string(),
            },
            Advice {
                priority: 3,
                category: AdviceCategory::FinancialHealth,
                title: "Review insurance coverage".to_string(),
                message: "Adequate coverage protects the progress you have already made.".to_string(),
            },
        ],
    }
}

/// Filter the catalog by profile, goal horizon, and declared interests, then
/// split 100% equally across at most three assets (remainder on the last
/// target so the total is exact).
fn suggest_investments(
    risk: &RiskProfileResult,
    catalog: &[Asset],
    goal_id: &str,
    goal_term_months: u32,
    interest_tags: &[String],
) -> Vec<AllocationTarget> {
    let mut candidates: Vec<&Asset> = if goal_term_months <= 12 {
        // Short horizons get the lowest-risk assets regardless of profile.
        catalog
            .iter()
            .filter(|asset| asset.risk_profile == RiskProfileName::Conservative)
            .collect()
    } else {
        let mut matching: Vec<&Asset> = catalog
            .iter()
            .filter(|asset| asset.risk_profile == risk.profile)
            .collect();
        if goal_term_months <= 36 {
            matching.retain(|asset| asset.risk_profile != RiskProfileName::Aggressive);
        }
        matching
    };

    if candidates.is_empty() {
        return Vec::new();
    }

    let interest_matched: Vec<&Asset> = candidates
        .iter()
        .copied()
        .filter(|asset| interest_tags.contains(&asset.industry_tag))
        .collect();
    if !interest_matched.is_empty() {
        candidates = interest_matched;
    }

    candidates.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    candidates.truncate(MAX_RECOMMENDED_ASSETS);

    let count = candidates.len();
    let share = (dec!(100) / Decimal::from(count)).round_dp(2);

    candidates
        .iter()
        .enumerate()
        .map(|(index, asset)| {
            let is_last = index == count - 1;
            let percent = if is_last {
                dec!(100) - share * Decimal::from(count as u64 - 1)
            } else {
                share
            };
            AllocationTarget {
                goal_id: goal_id.to_string(),
                asset_kind: asset.kind,
                asset_ref_id: asset.id.clone(),
                recommended_percent: percent,
            }
        })
        .collect()
}

pub struct RecommendationService<S: PlanningStore, L: ActivityLogger> {
    store: Arc<S>,
    activity_log: Arc<L>,
}

impl<S: PlanningStore, L: ActivityLogger> RecommendationService<S, L> {
    pub fn new(store: Arc<S>, activity_log: Arc<L>) -> Self {
        RecommendationService {
            store,
            activity_log,
        }
    }

    /// Handle one generate-recommendations request end to end.
    pub async fn generate(&self, request: RecommendationRequest) -> Result<RecommendationResponse> {
        validate_request(&request)?;

        let result = self.generate_inner(&request).await;

        let entry = match &result {
            Ok(response) => ActivityEntry::user(
                &request.owner_id,
                "RECOMMENDATIONS_GENERATED",
                format!(
                    "Generated {} allocation targets for goal {}",
                    response.saved_investments.len(),
                    request.goal_id
                ),
            ),
            Err(error) => ActivityEntry::user(
                &request.owner_id,
                "RECOMMENDATIONS_FAILED",
                format!("Recommendation for goal {} failed: {}", request.goal_id, error),
            ),
        };
        if let Err(log_error) = self.activity_log.log_activity(entry).await {
            log::warn!("failed to write recommendation activity log: {log_error}");
        }

        result
    }

    async fn generate_inner(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse> {
        let answers = self.store.get_survey_answers(&request.owner_id).await?;
        if answers.is_empty() {
            return Err(Error::NotFound(format!(
                "No survey answers found for owner {}",
                request.owner_id
            )));
        }

        let goal = self
            .store
            .get_goal_by_id(&request.goal_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Goal {} not found", request.goal_id)))?;
        if goal.owner_id != request.owner_id {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Goal {} does not belong to the requesting owner",
                request.goal_id
            ))));
        }

        let goal_term_months =
            estimate_duration_months(goal.target_amount, goal.contribution_amount, goal.frequency);
        let risk_profile = RiskAssessment::Survey(answers.clone()).assess();
        let catalog = self.store.get_asset_catalog().await?;
        let interest_tags = interests(&group_answers(&answers));
        let monthly_income = request.main_income + request.side_income;

        let outcome = recommend(
            &risk_profile,
            &catalog,
            &goal.id,
            goal_term_months,
            &request.debts,
            &interest_tags,
            monthly_income,
        );

        if !outcome.investments_to_save.is_empty() {
            self.store
                .insert_allocation_targets(outcome.investments_to_save.clone())
                .await?;
        }

        Ok(RecommendationResponse {
            risk_profile,
            general_advice: outcome.general_advice,
            saved_investments: outcome.investments_to_save,
        })
    }

    /// Previously saved allocation targets for a goal.
    pub async fn saved_for_goal(&self, goal_id: &str) -> Result<Vec<AllocationTarget>> {
        self.store.allocation_targets_for_goal(goal_id).await
    }
}

fn validate_request(request: &RecommendationRequest) -> Result<()> {
    if request.owner_id.trim().is_empty() {
        return Err(ValidationError::MissingField("ownerId".to_string()).into());
    }
    if request.goal_id.trim().is_empty() {
        return Err(ValidationError::MissingField("goalId".to_string()).into());
    }
    if request.main_income < Decimal::ZERO || request.side_income < Decimal::ZERO {
        return Err(
            ValidationError::InvalidInput("Income amounts must not be negative".to_string()).into(),
        );
    }
    Ok(())
}
