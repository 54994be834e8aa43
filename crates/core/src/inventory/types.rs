//! Pantry ingredient records supplied by the inventory ledger.

use serde::{Deserialize, Serialize};

/// One pantry item from the ledger snapshot.
///
/// Read-only view; the engine never mutates the ledger. `days_until_expiry`
/// comes pre-computed from the ledger and may be negative for items that
/// already expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i32>,
    #[serde(default)]
    pub is_opened: bool,
    /// The ledger's low-stock alert level for this item.
    #[serde(default)]
    pub notification_threshold: f64,
}

/// An ingredient that survived selection, with its derived priority.
///
/// Created once per request and discarded after the search target is
/// chosen.
#[derive(Debug, Clone, Serialize)]
pub struct PrioritizedIngredient {
    pub ingredient: Ingredient,
    pub priority_score: i32,
}

impl PrioritizedIngredient {
    pub fn name(&self) -> &str {
        &self.ingredient.name
    }
}

/// Options bag for one selection pass.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorOptions {
    /// Ingredient names the user explicitly ruled out.
    #[serde(default)]
    pub exclude_list: Vec<String>,
    /// Ingredient names the user explicitly asked to use up.
    #[serde(default)]
    pub priority_list: Vec<String>,
    /// Shortlist length after scoring.
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: usize,
    /// Days ahead within which an expiry earns an urgency bonus.
    #[serde(default = "default_days_left_threshold")]
    pub days_left_threshold: i32,
}

fn default_max_ingredients() -> usize {
    5
}

fn default_days_left_threshold() -> i32 {
    3
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            exclude_list: Vec::new(),
            priority_list: Vec::new(),
            max_ingredients: default_max_ingredients(),
            days_left_threshold: default_days_left_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_deserializes_with_defaults() {
        let json = r#"{"name": "cabbage"}"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();

        assert_eq!(ingredient.name, "cabbage");
        assert_eq!(ingredient.current_amount, 0.0);
        assert_eq!(ingredient.unit, "");
        assert!(ingredient.days_until_expiry.is_none());
        assert!(!ingredient.is_opened);
    }

    #[test]
    fn test_ingredient_full_roundtrip() {
        let json = r#"{
            "name": "tofu",
            "current_amount": 1.0,
            "unit": "pack",
            "days_until_expiry": 2,
            "is_opened": true,
            "notification_threshold": 1.0
        }"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();

        assert_eq!(ingredient.name, "tofu");
        assert_eq!(ingredient.days_until_expiry, Some(2));
        assert!(ingredient.is_opened);

        let serialized = serde_json::to_string(&ingredient).unwrap();
        assert!(serialized.contains("\"days_until_expiry\":2"));
    }

    #[test]
    fn test_selector_options_defaults() {
        let options = SelectorOptions::default();
        assert_eq!(options.max_ingredients, 5);
        assert_eq!(options.days_left_threshold, 3);
        assert!(options.exclude_list.is_empty());

        let from_empty: SelectorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(from_empty.max_ingredients, options.max_ingredients);
    }
}
