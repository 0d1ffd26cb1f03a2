use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Prefix of the runnable routes
pub const CHAIN_PATH: &str = "/langchain-chain";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Explicit translation endpoint
        .route("/translate/", post(handlers::translate_text))

        // Runnable surface (single-shot invoke only)
        .nest(CHAIN_PATH, runnable_routes())
}

fn runnable_routes() -> Router<AppState> {
    Router::new()
        .route("/invoke", post(handlers::invoke_chain))
        .route("/input_schema", get(handlers::input_schema))
        .route("/output_schema", get(handlers::output_schema))
}

/// Full application with middleware, ready to serve.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
