//! Recipe API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use kondate_core::{
    provider::ProviderError, EngineError, RecipeCandidate, RecommendRequest, RecommendResponse,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct RecipeErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/recommend
///
/// Run the recommendation pipeline against the posted pantry snapshot.
/// Always answers 200: exhausted budgets and provider outages degrade to
/// synthesized fallback candidates instead of failing the request.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
    Json(state.engine().recommend(body).await)
}

/// GET /api/v1/recipes/{id}
///
/// Look up a single recipe by provider id, localized for display.
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecipeCandidate>, impl IntoResponse> {
    match state.engine().recipe_detail(&id).await {
        Ok(candidate) => Ok(Json(candidate)),
        Err(EngineError::InvalidIdentifier(id)) => Err((
            StatusCode::BAD_REQUEST,
            Json(RecipeErrorResponse {
                error: format!("Invalid recipe id: {}", id),
            }),
        )),
        Err(EngineError::QuotaExhausted) => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(RecipeErrorResponse {
                error: "Daily search budget exhausted".to_string(),
            }),
        )),
        Err(EngineError::Provider(ProviderError::NotFound(id))) => Err((
            StatusCode::NOT_FOUND,
            Json(RecipeErrorResponse {
                error: format!("Recipe not found: {}", id),
            }),
        )),
        Err(EngineError::Provider(e)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RecipeErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
