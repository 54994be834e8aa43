//! Budget records shared by the quota governor.

use serde::{Deserialize, Serialize};

/// Which metered budget a provider call is billed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetKind {
    /// Recipe search API calls, one unit per call.
    Search,
    /// Machine translation, billed in source-text characters.
    Translation,
}

impl BudgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetKind::Search => "search",
            BudgetKind::Translation => "translation",
        }
    }
}

impl std::fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reset cadence of a budget window. Resets are driven by an external
/// scheduler, never by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetWindow {
    Daily,
    Monthly,
}

/// A counted resource with a hard limit.
///
/// Invariant: `0 <= used <= limit` at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub used: u64,
    pub limit: u64,
    pub window: BudgetWindow,
}

impl Budget {
    pub fn new(limit: u64, window: BudgetWindow) -> Self {
        Self {
            used: 0,
            limit,
            window,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

/// Snapshot of both budgets, shaped for display by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub search_used: u64,
    pub search_limit: u64,
    pub translation_used: u64,
    pub translation_limit: u64,
}
