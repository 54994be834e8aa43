//! Types for the recommendation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::Ingredient;
use crate::provider::ProviderError;
use crate::quota::UsageSummary;

/// Errors surfaced to the caller of the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested recipe id is not in the provider's numeric form.
    #[error("invalid recipe identifier: {0}")]
    InvalidIdentifier(String),

    /// The search budget is exhausted; the call was not attempted.
    #[error("search budget exhausted")]
    QuotaExhausted,

    /// Provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Rough effort estimate derived from ingredient and step counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Estimate from how many ingredients a recipe needs and how many
    /// instruction steps it has.
    pub fn estimate(ingredient_count: usize, step_count: usize) -> Self {
        if ingredient_count > 10 || step_count > 8 {
            Difficulty::Hard
        } else if ingredient_count <= 5 && step_count <= 4 {
            Difficulty::Easy
        } else {
            Difficulty::Medium
        }
    }
}

/// A recommendation request from the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Current pantry snapshot from the inventory ledger.
    pub ingredients: Vec<Ingredient>,
    /// Requested cuisine tag; unknown values fall back to the neutral
    /// profile.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Ingredient names to never search on.
    #[serde(default)]
    pub exclude_list: Vec<String>,
    /// Ingredient names to prefer using up.
    #[serde(default)]
    pub priority_list: Vec<String>,
    /// Cap on returned candidates; the engine default applies when absent.
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// A scored, localized recommendation returned to the caller.
///
/// Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCandidate {
    /// Provider id, or a synthetic id for fallback recipes.
    pub id: u64,
    pub localized_title: String,
    pub original_title: String,
    /// Localized ingredient display lines.
    pub ingredient_list: Vec<String>,
    /// Minutes to cook, when the provider reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    pub estimated_difficulty: Difficulty,
    /// Dish category tag, e.g. "soup" or "main course".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Localized excerpt of the cooking instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_excerpt: Option<String>,
    /// Composite relevance score, 0-100.
    pub relevance_score: f64,
    /// Search layer that produced the candidate.
    pub source_strategy: String,
    pub is_fallback: bool,
    /// False when any display text degraded to dictionary substitution.
    pub fully_translated: bool,
}

/// Result of one recommendation request.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    /// Unique id for this request, for log correlation.
    pub request_id: String,
    pub candidates: Vec<RecipeCandidate>,
    /// Budget usage after serving the request.
    pub usage: UsageSummary,
    /// Present when the candidates were synthesized instead of searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub duration_ms: u64,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_estimate() {
        assert_eq!(Difficulty::estimate(3, 3), Difficulty::Easy);
        assert_eq!(Difficulty::estimate(7, 5), Difficulty::Medium);
        assert_eq!(Difficulty::estimate(12, 4), Difficulty::Hard);
        assert_eq!(Difficulty::estimate(4, 9), Difficulty::Hard);
    }

    #[test]
    fn test_recommend_request_minimal() {
        let json = r#"{"ingredients": [{"name": "cabbage"}]}"#;
        let request: RecommendRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.ingredients.len(), 1);
        assert!(request.cuisine.is_none());
        assert!(request.exclude_list.is_empty());
        assert!(request.max_results.is_none());
    }

    #[test]
    fn test_recipe_candidate_serialization() {
        let candidate = RecipeCandidate {
            id: 42,
            localized_title: "キャベツ炒め".to_string(),
            original_title: "Cabbage stir fry".to_string(),
            ingredient_list: vec!["キャベツ".to_string()],
            estimated_time: Some(20),
            estimated_difficulty: Difficulty::Easy,
            category: None,
            instructions_excerpt: None,
            relevance_score: 72.5,
            source_strategy: "direct".to_string(),
            is_fallback: false,
            fully_translated: true,
        };

        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains("\"estimated_difficulty\":\"easy\""));
        assert!(!json.contains("category"));

        let parsed: RecipeCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 42);
        assert_eq!(parsed.original_title, "Cabbage stir fry");
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidIdentifier("abc".to_string());
        assert_eq!(err.to_string(), "invalid recipe identifier: abc");

        let err = EngineError::QuotaExhausted;
        assert_eq!(err.to_string(), "search budget exhausted");
    }
}
