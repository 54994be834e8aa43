//! Spoonacular recipe search backend.
//!
//! Free-tier usage is metered in daily points; every call here costs one
//! search unit, so the orchestrator gates each call through the quota
//! governor before it lands in this client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;

use super::types::{ProviderError, RawCandidate, RecipeDetail, RecipeProvider};

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Spoonacular REST client.
pub struct SpoonacularClient {
    client: Client,
    config: ProviderConfig,
}

impl SpoonacularClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn build_ingredient_search_url(&self, ingredient: &str) -> String {
        format!(
            "{}/recipes/findByIngredients?apiKey={}&ingredients={}&number={}&ranking=1",
            self.base_url(),
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(ingredient),
            self.config.results_per_call
        )
    }

    fn build_query_search_url(&self, text: &str, cuisine: Option<&str>) -> String {
        let mut url = format!(
            "{}/recipes/complexSearch?apiKey={}&query={}&number={}&addRecipeInformation=true",
            self.base_url(),
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(text),
            self.config.results_per_call
        );

        if let Some(cuisine) = cuisine {
            url.push_str(&format!("&cuisine={}", urlencoding::encode(cuisine)));
        }

        url
    }

    fn build_detail_url(&self, id: u64) -> String {
        format!(
            "{}/recipes/{}/information?apiKey={}&includeNutrition=false",
            self.base_url(),
            id,
            urlencoding::encode(&self.config.api_key)
        )
    }

    fn map_send_error(e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_connect() {
            ProviderError::ConnectionFailed(e.to_string())
        } else {
            ProviderError::ApiError(e.to_string())
        }
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    fn name(&self) -> &str {
        "spoonacular"
    }

    async fn search_by_ingredients(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RawCandidate>, ProviderError> {
        let url = self.build_ingredient_search_url(ingredient);
        debug!(ingredient = ingredient, "Searching recipes by ingredient");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let results: Vec<IngredientSearchResult> = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        debug!(
            ingredient = ingredient,
            results = results.len(),
            "Ingredient search complete"
        );

        Ok(results.into_iter().map(normalize_ingredient_result).collect())
    }

    async fn search_by_query(
        &self,
        text: &str,
        cuisine: Option<&str>,
    ) -> Result<Vec<RawCandidate>, ProviderError> {
        let url = self.build_query_search_url(text, cuisine);
        debug!(query = text, cuisine = ?cuisine, "Searching recipes by query");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: ComplexSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        debug!(
            query = text,
            results = parsed.results.len(),
            "Query search complete"
        );

        Ok(parsed
            .results
            .into_iter()
            .map(normalize_complex_result)
            .collect())
    }

    async fn recipe_detail(&self, id: u64) -> Result<RecipeDetail, ProviderError> {
        let url = self.build_detail_url(id);
        debug!(id = id, "Fetching recipe detail");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: InformationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(normalize_information(parsed))
    }
}

fn normalize_names(items: Option<Vec<IngredientRef>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|i| i.name)
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

fn normalize_tags(tags: Option<Vec<String>>) -> Vec<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn normalize_ingredient_result(r: IngredientSearchResult) -> RawCandidate {
    let mut ingredients = normalize_names(r.usedIngredients);
    ingredients.extend(normalize_names(r.missedIngredients));

    RawCandidate {
        id: r.id,
        title: r.title,
        image: r.image,
        used_ingredient_count: r.usedIngredientCount.unwrap_or(0),
        missed_ingredient_count: r.missedIngredientCount.unwrap_or(0),
        instructions: None, // not returned by this endpoint
        ingredients,
        likes: r.likes.unwrap_or(0),
        cuisines: Vec::new(),
        layer_priority: 0,
    }
}

fn normalize_complex_result(r: ComplexSearchResult) -> RawCandidate {
    RawCandidate {
        id: r.id,
        title: r.title,
        image: r.image,
        used_ingredient_count: 0,
        missed_ingredient_count: 0,
        instructions: None,
        ingredients: Vec::new(),
        likes: r.aggregateLikes.unwrap_or(0),
        cuisines: normalize_tags(r.cuisines),
        layer_priority: 0,
    }
}

fn normalize_information(r: InformationResponse) -> RecipeDetail {
    RecipeDetail {
        id: r.id,
        title: r.title,
        image: r.image,
        instructions: r.instructions.filter(|i| !i.trim().is_empty()),
        extended_ingredients: normalize_names(r.extendedIngredients),
        servings: r.servings.map(|s| s.round() as u32),
        ready_in_minutes: r.readyInMinutes,
        cuisines: normalize_tags(r.cuisines),
        dish_types: normalize_tags(r.dishTypes),
        likes: r.aggregateLikes.unwrap_or(0),
    }
}

// Spoonacular API response types
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct IngredientSearchResult {
    id: u64,
    title: String,
    image: Option<String>,
    usedIngredientCount: Option<u32>,
    missedIngredientCount: Option<u32>,
    likes: Option<u32>,
    usedIngredients: Option<Vec<IngredientRef>>,
    missedIngredients: Option<Vec<IngredientRef>>,
}

#[derive(Debug, Deserialize)]
struct IngredientRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    results: Vec<ComplexSearchResult>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct ComplexSearchResult {
    id: u64,
    title: String,
    image: Option<String>,
    cuisines: Option<Vec<String>>,
    aggregateLikes: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct InformationResponse {
    id: u64,
    title: String,
    image: Option<String>,
    instructions: Option<String>,
    extendedIngredients: Option<Vec<IngredientRef>>,
    servings: Option<f64>,
    readyInMinutes: Option<u32>,
    cuisines: Option<Vec<String>>,
    dishTypes: Option<Vec<String>>,
    aggregateLikes: Option<u32>,
}
