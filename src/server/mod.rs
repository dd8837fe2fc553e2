//! HTTP surface: route table, handlers and error mapping.

mod ai;
mod error;
mod recipes;
mod state;
mod users;


pub use error::{ApiJson, ApiQuery, ErrorBody};
pub use state::AppState;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::auth::require_token;

/// `{message}` body shared by several endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no auth required)
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the full route table.
pub fn router(state: AppState) -> Router {
    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/protected", get(users::protected))
        .layer(middleware::from_fn_with_state(state.tokens(), require_token));

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/recipes", get(recipes::search).post(recipes::create))
        .route(
            "/recipes/{id}",
            get(recipes::get).put(recipes::update).delete(recipes::delete),
        )
        .route("/cuisines", get(recipes::cuisines))
        .route("/tags", get(recipes::tags))
        .route("/ai/recipes", get(ai::search).post(ai::create))
        .route("/users", post(users::register))
        .route("/login", post(users::login));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
