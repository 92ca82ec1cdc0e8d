pub mod recommendation_model;
pub mod recommendation_service;

pub use recommendation_model::{
    Advice, AdviceCategory, AllocationTarget, Asset, AssetKind, DebtItem, RecommendationOutcome,
    RecommendationRequest, RecommendationResponse,
};
pub use recommendation_service::{recommend, RecommendationService};
