//! Pantry ingredient model and search-priority selection.

mod selector;
mod types;

pub use selector::IngredientSelector;
pub use types::{Ingredient, PrioritizedIngredient, SelectorOptions};
