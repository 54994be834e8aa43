use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, quota, recipes};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Recommendations
        .route("/recommend", post(recipes::recommend))
        .route("/recipes/{id}", get(recipes::get_recipe))
        // Budgets
        .route("/quota", get(quota::get_usage))
        .route("/quota/search/reset", post(quota::reset_search))
        .route("/quota/translation/reset", post(quota::reset_translation))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(super::middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
