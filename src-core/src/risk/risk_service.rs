//! Both risk-classifier variants.
//!
//! The demographic classifier scores age / income / credit on an additive
//! point scale and maps the total to a LOW/MEDIUM/HIGH tier. The survey
//! classifier derives the same three-tier outcome from weighted onboarding
//! answers. [`RiskAssessment`] is the shared entry point so downstream code
//! depends on the abstraction, not on either concrete variant.

use rust_decimal_macros::dec;

use crate::risk::risk_model::{
    CustomerAttributes, GroupedAnswers, RiskLevel, RiskProfile, RiskProfileName,
    RiskProfileResult, SurveyAnswer,
};

/// Survey question carrying the user's industry interests (multi-choice).
pub const QUESTION_INTERESTS: u32 = 6;

// Weights of the survey questions, risk tolerance dominating.
const W_RISK_TOLERANCE: f64 = 0.40; // Q1
const W_SAVING_BEHAVIOR: f64 = 0.05; // Q2
const W_INCOME_STABILITY: f64 = 0.15; // Q3
const W_PRODUCT_KNOWLEDGE: f64 = 0.10; // Q4
const W_DECLARED_GOAL: f64 = 0.30; // Q5

const AGGRESSIVE_THRESHOLD: f64 = 66.0;
const MODERATE_THRESHOLD: f64 = 34.0;

/// Either classifier variant; both yield a [`RiskProfileResult`].
#[derive(Debug, Clone)]
pub enum RiskAssessment {
    Demographic(CustomerAttributes),
    Survey(Vec<SurveyAnswer>),
}

impl RiskAssessment {
    pub fn assess(&self) -> RiskProfileResult {
        match self {
            RiskAssessment::Demographic(customer) => RiskProfileResult::from(&classify(customer)),
            RiskAssessment::Survey(answers) => assess_survey(answers),
        }
    }
}

/// Demographic classification: attributes -> score -> tier + factors.
///
/// Total function over the documented domain; numeric-range validation is a
/// caller precondition.
pub fn classify(customer: &CustomerAttributes) -> RiskProfile {
    let risk_score = risk_score(customer);
    RiskProfile {
        subject_id: customer.id.clone(),
        risk_score,
        risk_level: risk_level(risk_score),
        factors: risk_factors(customer),
    }
}

/// Additive point scale over age, income, and credit score. Range 0-100.
pub fn risk_score(customer: &CustomerAttributes) -> u32 {
    let mut score = 0;

    if customer.age < 25 {
        score += 30;
    } else if customer.age < 35 {
        score += 20;
    } else if customer.age < 50 {
        score += 10;
    }

    if customer.income < dec!(15_000) {
        score += 30;
    } else if customer.income < dec!(30_000) {
        score += 20;
    } else if customer.income < dec!(50_000) {
        score += 10;
    }

    if customer.credit_score < 500 {
        score += 40;
    } else if customer.credit_score < 700 {
        score += 20;
    } else if customer.credit_score < 800 {
        score += 10;
    }

    score
}

/// Cut-points are inclusive on the lower bound: 70 is HIGH, 40 is MEDIUM.
pub fn risk_level(score: u32) -> RiskLevel {
    if score >= 70 {
        RiskLevel::High
    } else if score >= 40 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn risk_factors(customer: &CustomerAttributes) -> Vec<String> {
    let mut factors = Vec::new();
    if customer.age < 25 {
        factors.push("Young age".to_string());
    }
    if customer.income < dec!(15_000) {
        factors.push("Low income".to_string());
    }
    if customer.credit_score < 500 {
        factors.push("Poor credit history".to_string());
    }
    factors
}

/// Collapse survey rows into per-question value lists.
pub fn group_answers(answers: &[SurveyAnswer]) -> GroupedAnswers {
    let mut grouped = GroupedAnswers::new();
    for answer in answers {
        grouped
            .entry(answer.question_id)
            .or_default()
            .push(answer.answer_value.clone());
    }
    grouped
}

/// Survey classification: weighted per-question scores, safety-first
/// defaults (missing or SKIP answers score 0, i.e. Conservative).
pub fn assess_survey(answers: &[SurveyAnswer]) -> RiskProfileResult {
    let grouped = group_answers(answers);

    let single = |question: u32| -> &str {
        grouped
            .get(&question)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    };

    let risk_tolerance = match single(1) {
        "C" => 100.0,
        "B" => 50.0,
        _ => 0.0,
    };
    let saving_behavior = match single(2) {
        "A" => 100.0,
        "B" => 50.0,
        _ => 0.0,
    };
    let income_stability = match single(3) {
        "A" => 100.0,
        "B" => 50.0,
        _ => 0.0,
    };
    let product_knowledge = knowledge_score(grouped.get(&4).map(Vec::as_slice).unwrap_or(&[]));
    let declared_goal = match single(5) {
        "MAX_RETURN" => 100.0,
        "STABLE_GROWTH" => 50.0,
        _ => 0.0,
    };

    let score = risk_tolerance * W_RISK_TOLERANCE
        + declared_goal * W_DECLARED_GOAL
        + income_stability * W_INCOME_STABILITY
        + product_knowledge * W_PRODUCT_KNOWLEDGE
        + saving_behavior * W_SAVING_BEHAVIOR;

    let profile = if score > AGGRESSIVE_THRESHOLD {
        RiskProfileName::Aggressive
    } else if score > MODERATE_THRESHOLD {
        RiskProfileName::Moderate
    } else {
        RiskProfileName::Conservative
    };

    RiskProfileResult { profile, score }
}

/// Scored by the riskiest product the user already knows.
fn knowledge_score(known: &[String]) -> f64 {
    let knows = |product: &str| known.iter().any(|value| value == product);
    if knows("STOCK") || knows("CRYPTO") {
        100.0
    } else if knows("MUTUAL_FUND") || knows("BOND") {
        50.0
    } else {
        0.0
    }
}

/// The user's declared industry interests (question 6), if any.
pub fn interests(grouped: &GroupedAnswers) -> Vec<String> {
    grouped.get(&QUESTION_INTERESTS).cloned().unwrap_or_default()
}
