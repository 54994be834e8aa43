//! Synthesized fallback recipes for when the pipeline comes up empty.
//!
//! Deterministic templates built around the best available ingredient and
//! the requested cuisine. Never touches the network or either budget;
//! localization goes through the static dictionary only.

use std::fmt;

use tracing::info;

use crate::cuisine;
use crate::engine::{Difficulty, RecipeCandidate};
use crate::localize::dictionary;
use crate::metrics;

/// Reserved id range start; provider ids never reach this high.
const FALLBACK_ID_BASE: u64 = 900_000_001;

/// Why the pipeline fell back to synthesized recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Selection produced no usable ingredient.
    NoIngredientSelected,
    /// The search budget ran out before any results arrived.
    QuotaExhausted,
    /// Every search layer returned nothing.
    NoUpstreamResults,
}

impl FallbackReason {
    /// Label value for the fallback counter.
    pub fn metric_label(&self) -> &'static str {
        match self {
            FallbackReason::NoIngredientSelected => "no_ingredient",
            FallbackReason::QuotaExhausted => "quota_exhausted",
            FallbackReason::NoUpstreamResults => "no_results",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FallbackReason::NoIngredientSelected => "no ingredient selected",
            FallbackReason::QuotaExhausted => "quota exhausted",
            FallbackReason::NoUpstreamResults => "no upstream results",
        };
        f.write_str(text)
    }
}

struct FallbackTemplate {
    dish: &'static str,
    category: &'static str,
    minutes: u32,
    extras: &'static [&'static str],
    /// Step text with a `{}` slot for the ingredient.
    steps: &'static str,
}

static TEMPLATES: &[FallbackTemplate] = &[
    FallbackTemplate {
        dish: "stir fry",
        category: "main course",
        minutes: 15,
        extras: &["oil", "garlic", "soy sauce"],
        steps: "Heat oil in a pan. Add the {} and stir fry until crisp. \
                Season with soy sauce and serve.",
    },
    FallbackTemplate {
        dish: "soup",
        category: "soup",
        minutes: 25,
        extras: &["broth", "onion", "salt"],
        steps: "Chop the {} into bite-size pieces. Simmer in broth until \
                soft. Season with salt and serve hot.",
    },
    FallbackTemplate {
        dish: "salad",
        category: "salad",
        minutes: 10,
        extras: &["cucumber", "sesame oil", "salt"],
        steps: "Slice the {} thinly. Toss with sesame oil and a pinch of \
                salt. Chill before serving.",
    },
];

/// Generates placeholder recipes when the search pipeline yields nothing.
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize one recipe per template for the given ingredient.
    ///
    /// Output is deterministic for a given (ingredient, cuisine) pair and
    /// every candidate is flagged `is_fallback`.
    pub fn generate(
        &self,
        ingredient: Option<&str>,
        cuisine: Option<&str>,
        reason: FallbackReason,
    ) -> Vec<RecipeCandidate> {
        let ingredient = ingredient
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("seasonal vegetables");
        let profile = cuisine::profile_for(cuisine);

        metrics::FALLBACKS
            .with_label_values(&[reason.metric_label()])
            .inc();
        info!(
            reason = %reason,
            ingredient = ingredient,
            cuisine = profile.name,
            "synthesizing fallback recipes"
        );

        TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let title = if profile.name == "any" {
                    format!("{} {}", ingredient, template.dish)
                } else {
                    format!("{} {} {}", profile.name, ingredient, template.dish)
                };
                let original_title = capitalize(&title);
                let steps = template.steps.replacen("{}", ingredient, 1);

                let mut ingredient_list = Vec::with_capacity(template.extras.len() + 1);
                ingredient_list.push(dictionary::substitute(ingredient));
                for extra in template.extras {
                    ingredient_list.push(dictionary::substitute(extra));
                }

                RecipeCandidate {
                    id: FALLBACK_ID_BASE + i as u64,
                    localized_title: dictionary::substitute(&original_title),
                    original_title,
                    ingredient_list,
                    estimated_time: Some(template.minutes),
                    estimated_difficulty: Difficulty::Easy,
                    category: Some(template.category.to_string()),
                    instructions_excerpt: Some(dictionary::substitute(&steps)),
                    relevance_score: 0.0,
                    source_strategy: "fallback".to_string(),
                    is_fallback: true,
                    fully_translated: false,
                }
            })
            .collect()
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
