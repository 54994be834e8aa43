//! Ingredient-driven recipe recommendation.
//!
//! The engine runs one request through a fixed pipeline:
//! - **Selection**: score and shortlist pantry ingredients
//! - **Search**: escalating provider strategies, gated by the search budget
//! - **Ranking**: dedupe, score, truncate
//! - **Localization**: budget-gated translation of display text
//!
//! Any empty intermediate result short-circuits to synthesized fallback
//! recipes, so a request always yields candidates.

mod runner;
mod types;

pub use runner::RecommendationEngine;
pub use types::{Difficulty, EngineError, RecipeCandidate, RecommendRequest, RecommendResponse};
