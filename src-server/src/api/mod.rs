use std::sync::Arc;

use axum::Router;

use crate::main_lib::AppState;

pub mod recommendations;
pub mod scheduler;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(recommendations::router())
        .merge(scheduler::router())
}
