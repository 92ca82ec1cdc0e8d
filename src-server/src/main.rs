use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod jobs;
mod main_lib;

use main_lib::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "moneylab_server=info,moneylab_core=info,tower_http=info".into()
        }))
        .with(fmt::layer())
        .init();

    let state = Arc::new(AppState::new());
    jobs::spawn_daily_deduction_job(state.clone());

    let port = std::env::var("MONEYLAB_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
