mod config;
mod db;
mod error;
mod pipeline;
mod places;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offbeat=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(pool.as_ref()).await?;

    let state = Arc::new(state::AppState {
        pool,
        google: places::GoogleClient::new(config.google_api_key.clone()),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/api/search", post(routes::search))
        .route("/api/submit", post(routes::submit))
        .route("/api/vote", post(routes::vote))
        .route("/api/admin-list", get(routes::list_submissions))
        .route("/api/admin-approve", post(routes::approve_submission))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Offbeat listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
