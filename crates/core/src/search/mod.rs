//! Layered recipe search.
//!
//! One ingredient fans out into an ordered ladder of query strategies;
//! the orchestrator walks the ladder under budget control and the
//! merger collapses duplicate hits.

mod merge;
mod orchestrator;
mod strategy;

pub use merge::merge_candidates;
pub use orchestrator::{SearchOrchestrator, SearchOutcome, StopReason, StrategyError};
pub use strategy::{ProviderCall, SearchStrategy};
