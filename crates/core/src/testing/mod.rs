//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service
//! traits, allowing comprehensive E2E testing without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use kondate_core::testing::{fixtures, MockProvider, MockTranslator};
//!
//! let provider = MockProvider::new();
//! let translator = MockTranslator::new();
//!
//! // Configure mock responses
//! provider.set_results(vec![
//!     fixtures::raw_candidate(101, "Cabbage Stir Fry"),
//! ]).await;
//! translator.set_response("Cabbage Stir Fry", "キャベツ炒め").await;
//!
//! // Use in an engine or AppState...
//! ```

mod mock_provider;
mod mock_translator;

pub use mock_provider::{MockProvider, RecordedCall};
pub use mock_translator::{MockTranslator, RecordedTranslation};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::inventory::Ingredient;
    use crate::provider::{RawCandidate, RecipeDetail};

    /// Create a test candidate with reasonable defaults.
    pub fn raw_candidate(id: u64, title: &str) -> RawCandidate {
        RawCandidate {
            id,
            title: title.to_string(),
            image: Some(format!("https://img.example.com/{}.jpg", id)),
            used_ingredient_count: 1,
            missed_ingredient_count: 2,
            instructions: Some("Slice everything. Cook until done.".to_string()),
            ingredients: vec![
                "cabbage".to_string(),
                "garlic".to_string(),
                "soy sauce".to_string(),
            ],
            likes: 120,
            cuisines: Vec::new(),
            layer_priority: 0,
        }
    }

    /// Candidate with no image, no instructions and no likes.
    pub fn bare_candidate(id: u64, title: &str) -> RawCandidate {
        RawCandidate {
            image: None,
            instructions: None,
            likes: 0,
            ..raw_candidate(id, title)
        }
    }

    /// Create a recipe detail with reasonable defaults.
    pub fn recipe_detail(id: u64, title: &str) -> RecipeDetail {
        RecipeDetail {
            id,
            title: title.to_string(),
            image: Some(format!("https://img.example.com/{}.jpg", id)),
            instructions: Some(
                "Slice the cabbage. Stir-fry over high heat. Season and serve.".to_string(),
            ),
            extended_ingredients: vec![
                "1 head cabbage".to_string(),
                "2 cloves garlic".to_string(),
                "1 tbsp soy sauce".to_string(),
            ],
            servings: Some(2),
            ready_in_minutes: Some(25),
            cuisines: vec!["korean".to_string()],
            dish_types: vec!["main course".to_string()],
            likes: 120,
        }
    }

    /// Create a pantry ingredient with reasonable defaults.
    pub fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            current_amount: 1.0,
            unit: "pcs".to_string(),
            days_until_expiry: None,
            is_opened: false,
            notification_threshold: 0.0,
        }
    }

    /// Ingredient expiring in the given number of days.
    pub fn expiring_ingredient(name: &str, days: i32) -> Ingredient {
        Ingredient {
            days_until_expiry: Some(days),
            ..ingredient(name)
        }
    }
}
