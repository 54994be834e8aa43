//! Budget usage and reset handlers.
//!
//! Resets are meant to be driven by an external scheduler (daily cron for
//! search, first-of-month for translation); the engine never resets its
//! own counters.

use axum::{extract::State, Json};
use std::sync::Arc;
use kondate_core::{BudgetKind, UsageSummary};

use crate::state::AppState;

/// GET /api/v1/quota
///
/// Current spend and limits for both budgets.
pub async fn get_usage(State(state): State<Arc<AppState>>) -> Json<UsageSummary> {
    Json(state.quota().usage())
}

/// POST /api/v1/quota/search/reset
///
/// Zero the daily search counter and return the updated summary.
pub async fn reset_search(State(state): State<Arc<AppState>>) -> Json<UsageSummary> {
    state.quota().reset(BudgetKind::Search);
    Json(state.quota().usage())
}

/// POST /api/v1/quota/translation/reset
///
/// Zero the monthly translation counter and return the updated summary.
pub async fn reset_translation(State(state): State<Arc<AppState>>) -> Json<UsageSummary> {
    state.quota().reset(BudgetKind::Translation);
    Json(state.quota().usage())
}
