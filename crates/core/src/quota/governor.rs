//! Process-wide budget accounting for the two metered providers.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use super::types::{Budget, BudgetKind, BudgetWindow, UsageSummary};

/// Tracks and gates the search-call and translation-character budgets.
///
/// One governor is shared by every concurrent recommendation request, so
/// check and consume go through an internal mutex. Callers must check
/// `can_consume` before the call it guards, and call `consume` only after
/// the guarded call actually executed. A call that errors before
/// completing must not consume quota.
pub struct QuotaGovernor {
    inner: Mutex<Inner>,
}

struct Inner {
    search: Budget,
    translation: Budget,
}

impl Inner {
    fn budget_mut(&mut self, kind: BudgetKind) -> &mut Budget {
        match kind {
            BudgetKind::Search => &mut self.search,
            BudgetKind::Translation => &mut self.translation,
        }
    }

    fn budget(&self, kind: BudgetKind) -> &Budget {
        match kind {
            BudgetKind::Search => &self.search,
            BudgetKind::Translation => &self.translation,
        }
    }
}

impl QuotaGovernor {
    /// Create a governor with fresh budgets at the given limits.
    pub fn new(search_limit: u64, translation_limit: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                search: Budget::new(search_limit, BudgetWindow::Daily),
                translation: Budget::new(translation_limit, BudgetWindow::Monthly),
            }),
        }
    }

    /// Whether `amount` more units still fit in the budget.
    pub fn can_consume(&self, kind: BudgetKind, amount: u64) -> bool {
        let inner = self.inner.lock().unwrap();
        let budget = inner.budget(kind);
        budget.used.saturating_add(amount) <= budget.limit
    }

    /// Record usage after a guarded call completed.
    ///
    /// `used` is clamped at `limit`; returns `true` when the requested
    /// amount did not fully fit (saturation), `false` otherwise.
    pub fn consume(&self, kind: BudgetKind, amount: u64) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let budget = inner.budget_mut(kind);
        let requested = budget.used.saturating_add(amount);
        let saturated = requested > budget.limit;
        budget.used = requested.min(budget.limit);
        if saturated {
            warn!(
                budget = kind.as_str(),
                used = budget.used,
                limit = budget.limit,
                "budget consume clamped at limit"
            );
        } else {
            debug!(
                budget = kind.as_str(),
                used = budget.used,
                limit = budget.limit,
                "budget consumed"
            );
        }
        saturated
    }

    /// Reset a budget's counter to zero.
    ///
    /// Invoked by the external scheduler at window boundaries (daily for
    /// search, first-of-month for translation), never by the engine.
    pub fn reset(&self, kind: BudgetKind) {
        let mut inner = self.inner.lock().unwrap();
        let budget = inner.budget_mut(kind);
        let previous = budget.used;
        budget.used = 0;
        info!(
            budget = kind.as_str(),
            previous_used = previous,
            "budget reset"
        );
    }

    /// Snapshot of one budget.
    pub fn budget(&self, kind: BudgetKind) -> Budget {
        let inner = self.inner.lock().unwrap();
        inner.budget(kind).clone()
    }

    /// Atomic snapshot of both budgets for display.
    pub fn usage(&self) -> UsageSummary {
        let inner = self.inner.lock().unwrap();
        UsageSummary {
            search_used: inner.search.used,
            search_limit: inner.search.limit,
            translation_used: inner.translation.used,
            translation_limit: inner.translation.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_can_consume_fresh_budget() {
        let governor = QuotaGovernor::new(150, 500_000);
        assert!(governor.can_consume(BudgetKind::Search, 1));
        assert!(governor.can_consume(BudgetKind::Search, 150));
        assert!(!governor.can_consume(BudgetKind::Search, 151));
        assert!(governor.can_consume(BudgetKind::Translation, 500_000));
    }

    #[test]
    fn test_consume_increments_used() {
        let governor = QuotaGovernor::new(10, 1000);

        assert!(!governor.consume(BudgetKind::Search, 3));
        assert_eq!(governor.budget(BudgetKind::Search).used, 3);

        assert!(!governor.consume(BudgetKind::Search, 7));
        assert_eq!(governor.budget(BudgetKind::Search).used, 10);
        assert!(governor.budget(BudgetKind::Search).is_exhausted());
    }

    #[test]
    fn test_consume_clamps_and_reports_saturation() {
        let governor = QuotaGovernor::new(10, 1000);

        governor.consume(BudgetKind::Search, 8);
        // 8 + 5 exceeds the limit: clamp to 10, flag saturation
        assert!(governor.consume(BudgetKind::Search, 5));
        assert_eq!(governor.budget(BudgetKind::Search).used, 10);
    }

    #[test]
    fn test_used_never_exceeds_limit() {
        let governor = QuotaGovernor::new(5, 100);
        for _ in 0..20 {
            governor.consume(BudgetKind::Search, 1);
        }
        let budget = governor.budget(BudgetKind::Search);
        assert_eq!(budget.used, 5);
        assert_eq!(budget.limit, 5);
    }

    #[test]
    fn test_exhausted_budget_denies_consume() {
        let governor = QuotaGovernor::new(2, 100);
        governor.consume(BudgetKind::Search, 2);
        assert!(!governor.can_consume(BudgetKind::Search, 1));
        // The other budget is unaffected
        assert!(governor.can_consume(BudgetKind::Translation, 1));
    }

    #[test]
    fn test_reset_restores_capacity() {
        let governor = QuotaGovernor::new(2, 100);
        governor.consume(BudgetKind::Search, 2);
        assert!(!governor.can_consume(BudgetKind::Search, 1));

        governor.reset(BudgetKind::Search);
        assert_eq!(governor.budget(BudgetKind::Search).used, 0);
        assert!(governor.can_consume(BudgetKind::Search, 1));
    }

    #[test]
    fn test_budgets_are_independent() {
        let governor = QuotaGovernor::new(10, 100);
        governor.consume(BudgetKind::Translation, 100);
        assert!(!governor.can_consume(BudgetKind::Translation, 1));
        assert!(governor.can_consume(BudgetKind::Search, 10));

        governor.reset(BudgetKind::Translation);
        assert!(governor.can_consume(BudgetKind::Translation, 100));
        assert_eq!(governor.budget(BudgetKind::Search).used, 0);
    }

    #[test]
    fn test_usage_snapshot() {
        let governor = QuotaGovernor::new(150, 500_000);
        governor.consume(BudgetKind::Search, 12);
        governor.consume(BudgetKind::Translation, 3400);

        let usage = governor.usage();
        assert_eq!(usage.search_used, 12);
        assert_eq!(usage.search_limit, 150);
        assert_eq!(usage.translation_used, 3400);
        assert_eq!(usage.translation_limit, 500_000);
    }

    #[tokio::test]
    async fn test_concurrent_consume_never_overspends() {
        let governor = Arc::new(QuotaGovernor::new(50, 1000));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let governor = Arc::clone(&governor);
            handles.push(tokio::spawn(async move {
                for _ in 0..10 {
                    if governor.can_consume(BudgetKind::Search, 1) {
                        governor.consume(BudgetKind::Search, 1);
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let budget = governor.budget(BudgetKind::Search);
        assert!(budget.used <= budget.limit);
        assert_eq!(budget.used, 50);
    }
}
