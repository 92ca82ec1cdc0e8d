/// Tests for the allocation recommender: percentage invariants, the debt
/// safety overrides, goal-horizon gates, and the request orchestration.
use std::sync::Arc;

use moneylab_core::errors::Error;
use moneylab_core::recommendation::{
    recommend, AdviceCategory, Asset, AssetKind, DebtItem, RecommendationRequest,
    RecommendationService,
};
use moneylab_core::risk::{RiskProfileName, RiskProfileResult, SurveyAnswer};
use moneylab_core::store::{MemoryActivityLog, MemoryStore, PlanningStore};
use moneylab_core::goals::{Frequency, NewGoal, SavingsGoal};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn asset(id: &str, symbol: &str, profile: RiskProfileName, tag: &str) -> Asset {
    Asset {
        id: id.to_string(),
        kind: AssetKind::Fund,
        symbol: symbol.to_string(),
        risk_profile: profile,
        industry_tag: tag.to_string(),
    }
}

fn catalog() -> Vec<Asset> {
    vec![
        asset("a-1", "CONS1", RiskProfileName::Conservative, "FINANCE"),
        asset("a-2", "CONS2", RiskProfileName::Conservative, "TECH"),
        asset("a-3", "MOD1", RiskProfileName::Moderate, "TECH"),
        asset("a-4", "MOD2", RiskProfileName::Moderate, "HEALTHCARE"),
        asset("a-5", "AGG1", RiskProfileName::Aggressive, "TECH"),
        asset("a-6", "AGG2", RiskProfileName::Aggressive, "ENERGY_UTILITIES"),
        asset("a-7", "AGG3", RiskProfileName::Aggressive, "CONSUMER"),
        asset("a-8", "AGG4", RiskProfileName::Aggressive, "FINANCE"),
    ]
}

fn profile(name: RiskProfileName) -> RiskProfileResult {
    RiskProfileResult {
        profile: name,
        score: 50.0,
    }
}

fn percent_sum(targets: &[moneylab_core::recommendation::AllocationTarget]) -> Decimal {
    targets.iter().map(|t| t.recommended_percent).sum()
}

const LONG_TERM: u32 = 60;

#[test]
fn test_targets_never_sum_above_100() {
    for name in [
        RiskProfileName::Conservative,
        RiskProfileName::Moderate,
        RiskProfileName::Aggressive,
    ] {
        for size in 1..=catalog().len() {
            let subset: Vec<Asset> = catalog().into_iter().take(size).collect();
            let outcome = recommend(
                &profile(name),
                &subset,
                "goal-1",
                LONG_TERM,
                &[],
                &[],
                dec!(40_000),
            );
            let total = percent_sum(&outcome.investments_to_save);
            assert!(
                total <= dec!(100),
                "targets for {name:?} over {size} assets sum to {total}"
            );
            if !outcome.investments_to_save.is_empty() {
                assert_eq!(total, dec!(100), "selected assets deploy exactly 100%");
            }
        }
    }
}

#[test]
fn test_three_way_split_carries_remainder_on_last_target() {
    let outcome = recommend(
        &profile(RiskProfileName::Aggressive),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &[],
        &[],
        dec!(40_000),
    );
    let percents: Vec<Decimal> = outcome
        .investments_to_save
        .iter()
        .map(|t| t.recommended_percent)
        .collect();
    assert_eq!(percents, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
}

#[test]
fn test_empty_catalog_is_degenerate_not_an_error() {
    let outcome = recommend(
        &profile(RiskProfileName::Moderate),
        &[],
        "goal-1",
        LONG_TERM,
        &[],
        &[],
        dec!(40_000),
    );
    assert!(outcome.investments_to_save.is_empty());
    assert!(
        !outcome.general_advice.is_empty(),
        "advice must explain that no allocation was possible"
    );
    assert!(outcome
        .general_advice
        .iter()
        .any(|a| a.category == AdviceCategory::Investment));
}

#[test]
fn test_high_interest_debt_forces_conservative_targets() {
    let debts = vec![DebtItem {
        debt_type: "credit card".to_string(),
        amount: dec!(80_000),
        monthly_payment: dec!(2_000),
        interest_rate: Some(dec!(18)),
    }];
    let outcome = recommend(
        &profile(RiskProfileName::Aggressive),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &debts,
        &[],
        dec!(40_000),
    );
    for target in &outcome.investments_to_save {
        let asset = catalog()
            .into_iter()
            .find(|a| a.id == target.asset_ref_id)
            .unwrap();
        assert_eq!(asset.risk_profile, RiskProfileName::Conservative);
    }
    let first = &outcome.general_advice[0];
    assert_eq!(first.priority, 1);
    assert_eq!(first.category, AdviceCategory::Debt);
}

#[test]
fn test_dti_bands_drive_debt_advice() {
    let debt = |payment: Decimal| {
        vec![DebtItem {
            debt_type: "car loan".to_string(),
            amount: dec!(200_000),
            monthly_payment: payment,
            interest_rate: Some(dec!(5)),
        }]
    };

    // 50% DTI: red band, priority-1 debt advice
    let red = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &debt(dec!(20_000)),
        &[],
        dec!(40_000),
    );
    assert!(red
        .general_advice
        .iter()
        .any(|a| a.category == AdviceCategory::Debt && a.priority == 1));

    // 40% DTI: yellow band, priority-2 debt advice and no priority-1
    let yellow = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &debt(dec!(16_000)),
        &[],
        dec!(40_000),
    );
    assert!(yellow
        .general_advice
        .iter()
        .any(|a| a.category == AdviceCategory::Debt && a.priority == 2));
    assert!(!yellow
        .general_advice
        .iter()
        .any(|a| a.priority == 1 && a.category == AdviceCategory::Debt));
}

#[test]
fn test_zero_income_with_debts_is_urgent_without_a_ratio() {
    let debts = vec![DebtItem {
        debt_type: "personal loan".to_string(),
        amount: dec!(20_000),
        monthly_payment: dec!(500),
        interest_rate: Some(dec!(5)),
    }];
    let outcome = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &debts,
        &[],
        Decimal::ZERO,
    );
    assert!(
        outcome
            .general_advice
            .iter()
            .any(|a| a.category == AdviceCategory::Debt && a.priority == 1),
        "debt without income to service it is urgent"
    );
}

#[test]
fn test_zero_income_without_debts_defaults_to_emergency_fund() {
    let outcome = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &[],
        &[],
        Decimal::ZERO,
    );
    assert!(!outcome
        .general_advice
        .iter()
        .any(|a| a.category == AdviceCategory::Debt && a.priority == 1));
    assert!(outcome
        .general_advice
        .iter()
        .any(|a| a.category == AdviceCategory::Saving && a.priority == 1));
}

#[test]
fn test_any_debt_keeps_debt_advice_present() {
    // Low DTI, low interest: still expect debt-reduction advice
    let debts = vec![DebtItem {
        debt_type: "student loan".to_string(),
        amount: dec!(50_000),
        monthly_payment: dec!(1_000),
        interest_rate: Some(dec!(3)),
    }];
    let outcome = recommend(
        &profile(RiskProfileName::Conservative),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &debts,
        &[],
        dec!(40_000),
    );
    assert!(outcome
        .general_advice
        .iter()
        .any(|a| a.category == AdviceCategory::Debt));
}

#[test]
fn test_short_horizon_forces_conservative_assets() {
    let outcome = recommend(
        &profile(RiskProfileName::Aggressive),
        &catalog(),
        "goal-1",
        12,
        &[],
        &[],
        dec!(40_000),
    );
    assert!(!outcome.investments_to_save.is_empty());
    for target in &outcome.investments_to_save {
        let asset = catalog()
            .into_iter()
            .find(|a| a.id == target.asset_ref_id)
            .unwrap();
        assert_eq!(asset.risk_profile, RiskProfileName::Conservative);
    }
}

#[test]
fn test_medium_horizon_excludes_aggressive_assets() {
    // An aggressive profile over a 13-36 month horizon has no candidates
    let outcome = recommend(
        &profile(RiskProfileName::Aggressive),
        &catalog(),
        "goal-1",
        24,
        &[],
        &[],
        dec!(40_000),
    );
    assert!(outcome.investments_to_save.is_empty());

    let moderate = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        24,
        &[],
        &[],
        dec!(40_000),
    );
    assert!(!moderate.investments_to_save.is_empty());
}

#[test]
fn test_interest_tags_filter_with_fallback() {
    let tagged = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &[],
        &["TECH".to_string()],
        dec!(40_000),
    );
    assert_eq!(tagged.investments_to_save.len(), 1);
    assert_eq!(tagged.investments_to_save[0].asset_ref_id, "a-3");

    // No catalog asset carries the tag: fall back to the risk-filtered set
    let fallback = recommend(
        &profile(RiskProfileName::Moderate),
        &catalog(),
        "goal-1",
        LONG_TERM,
        &[],
        &["AGRICULTURE".to_string()],
        dec!(40_000),
    );
    assert_eq!(fallback.investments_to_save.len(), 2);
}

// --- request orchestration over the in-memory store ---

fn survey() -> Vec<SurveyAnswer> {
    let answer = |question_id: u32, value: &str| SurveyAnswer {
        question_id,
        answer_value: value.to_string(),
    };
    vec![
        answer(1, "B"),
        answer(2, "B"),
        answer(3, "B"),
        answer(4, "BOND"),
        answer(5, "STABLE_GROWTH"),
        answer(6, "TECH"),
    ]
}

fn request(owner: &str, goal: &str) -> RecommendationRequest {
    RecommendationRequest {
        owner_id: owner.to_string(),
        goal_id: goal.to_string(),
        main_income: dec!(35_000),
        side_income: dec!(5_000),
        debts: vec![],
    }
}

async fn seeded_service() -> (
    Arc<MemoryStore>,
    RecommendationService<MemoryStore, MemoryActivityLog>,
    String,
) {
    let store = Arc::new(MemoryStore::new());
    let log = Arc::new(MemoryActivityLog::new());
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let goal = SavingsGoal::create(
        NewGoal {
            owner_id: "owner-1".to_string(),
            wallet_id: "wallet-1".to_string(),
            name: "House deposit".to_string(),
            target_amount: dec!(600_000),
            contribution_amount: dec!(10_000),
            frequency: Frequency::Monthly,
            start_date: None,
        },
        today,
    );
    let goal_id = goal.id.clone();
    store.insert_goal(goal).await;
    store.insert_survey_answers("owner-1", survey()).await;
    store.insert_assets(catalog()).await;

    let service = RecommendationService::new(store.clone(), log);
    (store, service, goal_id)
}

#[tokio::test]
async fn test_generate_persists_targets_append_only() {
    let (store, service, goal_id) = seeded_service().await;

    let response = service.generate(request("owner-1", &goal_id)).await.unwrap();
    assert_eq!(response.risk_profile.profile, RiskProfileName::Moderate);
    assert!(!response.saved_investments.is_empty());

    let saved = service.saved_for_goal(&goal_id).await.unwrap();
    assert_eq!(saved, response.saved_investments);

    // A second run appends, never mutates prior rows
    let second = service.generate(request("owner-1", &goal_id)).await.unwrap();
    let all = store.allocation_targets_for_goal(&goal_id).await.unwrap();
    assert_eq!(
        all.len(),
        response.saved_investments.len() + second.saved_investments.len()
    );
}

#[tokio::test]
async fn test_generate_without_survey_answers_is_not_found() {
    let (_store, service, goal_id) = seeded_service().await;
    let result = service.generate(request("owner-2", &goal_id)).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_generate_for_missing_goal_is_not_found() {
    let (_store, service, _goal_id) = seeded_service().await;
    let result = service.generate(request("owner-1", "no-such-goal")).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_generate_for_foreign_goal_is_rejected() {
    let (store, service, _goal_id) = seeded_service().await;
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let foreign = SavingsGoal::create(
        NewGoal {
            owner_id: "owner-9".to_string(),
            wallet_id: "wallet-9".to_string(),
            name: "Someone else's goal".to_string(),
            target_amount: dec!(1_000),
            contribution_amount: dec!(100),
            frequency: Frequency::Monthly,
            start_date: None,
        },
        today,
    );
    let foreign_id = foreign.id.clone();
    store.insert_goal(foreign).await;

    let result = service.generate(request("owner-1", &foreign_id)).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_generate_rejects_malformed_request() {
    let (_store, service, goal_id) = seeded_service().await;

    let mut missing_goal = request("owner-1", &goal_id);
    missing_goal.goal_id = String::new();
    assert!(matches!(
        service.generate(missing_goal).await,
        Err(Error::Validation(_))
    ));

    let mut negative_income = request("owner-1", &goal_id);
    negative_income.main_income = dec!(-1);
    assert!(matches!(
        service.generate(negative_income).await,
        Err(Error::Validation(_))
    ));
}
