use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use moneylab_core::recommendation::{
    AllocationTarget, RecommendationRequest, RecommendationResponse,
};

use crate::{error::ApiResult, main_lib::AppState};

async fn generate_recommendations(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationRequest>,
) -> ApiResult<Json<RecommendationResponse>> {
    let response = state.recommendation_service.generate(request).await?;
    Ok(Json(response))
}

async fn get_saved_targets(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AllocationTarget>>> {
    let targets = state.recommendation_service.saved_for_goal(&goal_id).await?;
    Ok(Json(targets))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations/generate", post(generate_recommendations))
        .route("/recommendations/goal/:goal_id", get(get_saved_targets))
}
