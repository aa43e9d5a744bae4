pub mod auth;
pub mod dashboard;
pub mod extract;
pub mod flash;
pub mod matching;
pub mod middleware;
pub mod requests;
pub mod state;
pub mod waste;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    trace::TraceLayer,
    timeout::TimeoutLayer,
};
use std::time::Duration;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health check
        .route("/health", get(health))

        // Session endpoints
        .route("/", get(auth::index))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))

        // Marketplace endpoints
        .route("/dashboard", get(dashboard::dashboard))
        .route("/add_waste", get(waste::add_waste_page).post(waste::add_waste))
        .route("/create_request/:waste_id", post(requests::create_request))
        .route("/handle_request/:request_id/:action", post(requests::handle_request))
        .route("/ai_match", get(matching::ai_match))

        // Resolve the session cookie for every route
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
