//! Recipe search provider boundary.
//!
//! Provider payloads are normalized into [`RawCandidate`] /
//! [`RecipeDetail`] records here, at ingestion; the rest of the engine
//! never inspects provider-native shapes.

mod spoonacular;
mod types;

pub use spoonacular::SpoonacularClient;
pub use types::{ProviderError, RawCandidate, RecipeDetail, RecipeProvider};
