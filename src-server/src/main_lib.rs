//! Application state and router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use moneylab_core::recommendation::RecommendationService;
use moneylab_core::scheduler::ContributionScheduler;
use moneylab_core::store::{MemoryActivityLog, MemoryNotifier, MemoryStore};

use crate::api;

pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub recommendation_service: RecommendationService<MemoryStore, MemoryActivityLog>,
    pub scheduler: ContributionScheduler<MemoryStore, MemoryNotifier, MemoryActivityLog>,
}

impl AppState {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let activity_log = Arc::new(MemoryActivityLog::new());

        AppState {
            recommendation_service: RecommendationService::new(
                store.clone(),
                activity_log.clone(),
            ),
            scheduler: ContributionScheduler::new(store.clone(), notifier, activity_log),
            store,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api::router())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
