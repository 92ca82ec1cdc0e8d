use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use moneylab_core::scheduler::TickSummary;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize, Default)]
struct RunTickRequest {
    /// Tick date in YYYY-MM-DD; defaults to today
    date: Option<NaiveDate>,
}

/// Manual trigger for the deduction cycle, used by ops tooling and tests.
/// The daily background job drives the same code path.
async fn run_tick(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RunTickRequest>>,
) -> ApiResult<Json<TickSummary>> {
    let date = body
        .and_then(|Json(request)| request.date)
        .unwrap_or_else(|| Utc::now().date_naive());
    let summary = state.scheduler.run_tick(date).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/scheduler/run-tick", post(run_tick))
}
