//! Iteration budget for the procurement engine.

/// Caps the number of work-queue pops in Stage 2.
///
/// The limit is `n(n+1)/2 + buffer` for `n` initial candidates.
///
/// # Example
///
/// ```
/// use loadout_solver::IterationBudget;
///
/// let mut budget = IterationBudget::for_candidates(3, 10);
/// assert_eq!(budget.limit(), 16);
///
/// for _ in 0..16 {
///     assert!(!budget.is_exhausted());
///     budget.tick();
/// }
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct IterationBudget {
    limit: u64,
    used: u64,
}

impl IterationBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    pub fn for_candidates(candidates: usize, buffer: u64) -> Self {
        let n = candidates as u64;
        let triangle = n.saturating_mul(n.saturating_add(1)) / 2;
        Self::new(triangle.saturating_add(buffer))
    }

    pub fn tick(&mut self) {
        self.used += 1;
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn used(&self) -> u64 {
        self.used
    }
}
