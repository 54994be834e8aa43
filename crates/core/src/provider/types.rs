//! Types for the recipe search provider boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider-native recipe record, normalized at ingestion.
///
/// Every optional field is settled here, once, at the provider boundary;
/// downstream scoring and display code never re-checks raw payload shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Provider recipe id.
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// How many of the searched ingredients the provider matched.
    #[serde(default)]
    pub used_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredient_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Ingredient names reported by the provider, lowercased.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Provider popularity metric (likes).
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub cuisines: Vec<String>,
    /// Priority of the search layer that produced this candidate
    /// (lower = more authoritative). Tagged by the orchestrator.
    #[serde(default)]
    pub layer_priority: u8,
}

impl RawCandidate {
    pub fn has_instructions(&self) -> bool {
        self.instructions
            .as_ref()
            .map(|i| !i.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Full provider record for a single recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Ingredient names, lowercased.
    #[serde(default)]
    pub extended_ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub likes: u32,
}

/// Errors from the recipe search provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Provider API error: {0}")]
    ApiError(String),

    #[error("Recipe not found: {0}")]
    NotFound(u64),

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to parse provider response: {0}")]
    ParseError(String),
}

/// Trait for recipe search backends.
///
/// Every method is billed one unit against the daily search budget; the
/// caller checks quota before invoking and consumes after success.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Find recipes that use a pantry ingredient.
    async fn search_by_ingredients(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RawCandidate>, ProviderError>;

    /// Free-text recipe search, optionally filtered by cuisine.
    async fn search_by_query(
        &self,
        text: &str,
        cuisine: Option<&str>,
    ) -> Result<Vec<RawCandidate>, ProviderError>;

    /// Fetch the full record for one recipe.
    async fn recipe_detail(&self, id: u64) -> Result<RecipeDetail, ProviderError>;
}
