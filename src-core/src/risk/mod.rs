pub mod risk_model;
pub mod risk_service;

pub use risk_model::{
    CustomerAttributes, GroupedAnswers, RiskLevel, RiskProfile, RiskProfileName,
    RiskProfileResult, SurveyAnswer,
};
pub use risk_service::{
    assess_survey, classify, group_answers, interests, risk_level, risk_score, RiskAssessment,
};
