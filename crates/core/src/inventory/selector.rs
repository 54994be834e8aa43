//! Ingredient selection: exclusion rules plus priority scoring.
//!
//! Pure and synchronous. Works entirely on the ledger snapshot handed in
//! with the request; no I/O, no clock reads.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::types::{Ingredient, PrioritizedIngredient, SelectorOptions};

/// Ledger rows that are not actually ingredients: leftover containers,
/// ambiguous quantities, bare units.
static NON_INGREDIENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^leftover(s)?\b",
        r"(?i)\bleftover(s)?$",
        r"(?i)^(some|a few|a bit of|half of|rest of|remaining)\b",
        r"(?i)^(about|approx\.?|roughly)\s",
        r"(?i)^(ml|l|g|kg|oz|lb|pcs?|pieces?|pack|bottle|can|tbsp|tsp|cup)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Staples that pile up and spoil in practice; they get a standing bonus
/// so they surface even without an expiry date on the ledger row.
static PROBLEMATIC_STAPLES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(cabbage|lettuce|spinach|sprouts?|mushrooms?|tofu|chicken|pork|beef|ground meat|milk|yogurt|daikon|radish|cucumber|eggplant|celery|broccoli)\b",
    )
    .unwrap()
});

/// Scores and orders pantry ingredients for search priority.
///
/// Exclusion happens first (explicit exclude list, malformed ledger rows,
/// empty stock), then each survivor is scored and the list is truncated
/// to the configured shortlist length. An empty output is valid and tells
/// the caller to fall back.
pub struct IngredientSelector;

impl IngredientSelector {
    pub fn new() -> Self {
        Self
    }

    /// Run the full selection pass over a ledger snapshot.
    pub fn select(
        &self,
        ingredients: &[Ingredient],
        options: &SelectorOptions,
    ) -> Vec<PrioritizedIngredient> {
        let mut prioritized: Vec<PrioritizedIngredient> = ingredients
            .iter()
            .filter(|i| !self.is_excluded(i, options))
            .map(|i| PrioritizedIngredient {
                ingredient: i.clone(),
                priority_score: self.score(i, options),
            })
            .collect();

        // Stable sort keeps input order on equal scores
        prioritized.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
        prioritized.truncate(options.max_ingredients);

        debug!(
            input = ingredients.len(),
            selected = prioritized.len(),
            "ingredient selection finished"
        );
        prioritized
    }

    fn is_excluded(&self, ingredient: &Ingredient, options: &SelectorOptions) -> bool {
        let name = ingredient.name.trim();

        if options
            .exclude_list
            .iter()
            .any(|e| e.trim().eq_ignore_ascii_case(name))
        {
            return true;
        }
        if !Self::is_real_ingredient(name) {
            return true;
        }
        ingredient.current_amount <= 0.0
    }

    /// Reject ledger rows whose name is not a usable ingredient.
    fn is_real_ingredient(name: &str) -> bool {
        if name.is_empty() || name.chars().count() <= 1 {
            return false;
        }
        !NON_INGREDIENT_PATTERNS.iter().any(|p| p.is_match(name))
    }

    fn score(&self, ingredient: &Ingredient, options: &SelectorOptions) -> i32 {
        let name = ingredient.name.trim();
        let mut score = 0;

        if options
            .priority_list
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(name))
        {
            score += 100;
        }

        // Urgency grows the closer (or further past) the expiry date
        if let Some(days) = ingredient.days_until_expiry {
            if days <= options.days_left_threshold {
                let bonus = 50 + 10 * (options.days_left_threshold - days);
                if bonus > 0 {
                    score += bonus;
                }
            }
        }

        if PROBLEMATIC_STAPLES.is_match(name) {
            score += 30;
        }
        if ingredient.current_amount <= ingredient.notification_threshold {
            score += 20;
        }
        if ingredient.is_opened {
            score += 15;
        }

        score
    }
}

impl Default for IngredientSelector {
    fn default() -> Self {
        Self::new()
    }
}
