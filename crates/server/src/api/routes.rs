use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, solve};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Solving
        .route("/solve", get(solve::solve_report));

    Router::new()
        .route("/play/daily", get(solve::play_daily))
        .route("/smart/play/daily", get(solve::smart_play_daily))
        .route("/metrics", get(handlers::get_metrics))
        .nest("/api/v1", api_routes)
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
