use crate::cuisine::{self, CuisineProfile};

/// One concrete provider call planned by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    /// Ingredient-based search against the find-by-ingredients endpoint.
    ByIngredients { ingredient: String },
    /// Free-text search, optionally restricted to a cuisine.
    ByQuery {
        text: String,
        cuisine: Option<String>,
    },
}

impl ProviderCall {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::ByIngredients { ingredient } => format!("ingredients:{}", ingredient),
            Self::ByQuery {
                text,
                cuisine: Some(cuisine),
            } => format!("query:{} [{}]", text, cuisine),
            Self::ByQuery { text, cuisine: None } => format!("query:{}", text),
        }
    }
}

/// The escalation ladder, most authoritative first.
///
/// Each strategy turns one ingredient plus a cuisine profile into a
/// small batch of provider calls. Results are tagged with the strategy's
/// layer priority so duplicate hits resolve toward the more
/// authoritative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    /// Search by the ingredient name itself.
    Direct,
    /// Ingredient combined with cuisine-typical preparation verbs.
    CookingMethod,
    /// Ingredient combined with commonly co-occurring ingredients.
    Pairing,
    /// Representative dishes of the requested cuisine.
    CuisineCategory,
    /// Direct search repeated with taxonomically similar ingredients.
    SimilarIngredient,
}

impl SearchStrategy {
    /// All strategies in escalation order.
    pub const ALL: [SearchStrategy; 5] = [
        SearchStrategy::Direct,
        SearchStrategy::CookingMethod,
        SearchStrategy::Pairing,
        SearchStrategy::CuisineCategory,
        SearchStrategy::SimilarIngredient,
    ];

    /// Lower is more authoritative. Duplicate candidates keep the copy
    /// from the lowest layer.
    pub fn layer_priority(&self) -> u8 {
        match self {
            SearchStrategy::Direct => 1,
            SearchStrategy::CookingMethod => 2,
            SearchStrategy::Pairing => 3,
            SearchStrategy::CuisineCategory => 4,
            SearchStrategy::SimilarIngredient => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Direct => "direct",
            SearchStrategy::CookingMethod => "cooking_method",
            SearchStrategy::Pairing => "pairing",
            SearchStrategy::CuisineCategory => "cuisine_category",
            SearchStrategy::SimilarIngredient => "similar_ingredient",
        }
    }

    /// Plan the provider calls for one ingredient under one cuisine
    /// profile. An empty plan means the strategy has nothing to
    /// contribute and is skipped.
    pub fn build_calls(&self, ingredient: &str, profile: &CuisineProfile) -> Vec<ProviderCall> {
        let cuisine = cuisine_param(profile);
        match self {
            SearchStrategy::Direct => vec![ProviderCall::ByIngredients {
                ingredient: ingredient.to_string(),
            }],
            SearchStrategy::CookingMethod => profile
                .prep_verbs
                .iter()
                .take(2)
                .map(|verb| ProviderCall::ByQuery {
                    text: format!("{} {}", verb, ingredient),
                    cuisine: cuisine.clone(),
                })
                .collect(),
            SearchStrategy::Pairing => cuisine::pairing_partners(ingredient, profile.name)
                .iter()
                .take(2)
                .map(|partner| ProviderCall::ByQuery {
                    text: format!("{} {}", ingredient, partner),
                    cuisine: cuisine.clone(),
                })
                .collect(),
            SearchStrategy::CuisineCategory => profile
                .dish_names
                .iter()
                .take(2)
                .map(|dish| ProviderCall::ByQuery {
                    text: format!("{} {}", ingredient, dish),
                    cuisine: cuisine.clone(),
                })
                .collect(),
            SearchStrategy::SimilarIngredient => cuisine::similar_ingredients(ingredient)
                .iter()
                .take(2)
                .map(|substitute| ProviderCall::ByIngredients {
                    ingredient: substitute.to_string(),
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The neutral profile carries no cuisine restriction.
fn cuisine_param(profile: &CuisineProfile) -> Option<String> {
    if profile.name == "any" {
        None
    } else {
        Some(profile.name.to_string())
    }
}
