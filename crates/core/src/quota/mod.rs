//! Usage budget tracking for the metered external providers.
//!
//! Two independent budgets gate all outbound calls: search API calls
//! (reset daily) and machine-translation characters (reset monthly).
//! The shared [`QuotaGovernor`] is the single synchronization point for
//! both counters across concurrent requests.

mod governor;
mod types;

pub use governor::QuotaGovernor;
pub use types::{Budget, BudgetKind, BudgetWindow, UsageSummary};
