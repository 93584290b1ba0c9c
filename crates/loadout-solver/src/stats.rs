//! Solve statistics.

use std::time::{Duration, Instant};

use crate::primary::PrimaryOutcome;
use crate::secondary::SecondaryOutcome;

/// Counters for one solve invocation.
///
/// # Example
///
/// ```
/// use loadout_solver::SolveStats;
///
/// let mut stats = SolveStats::default();
/// stats.start();
/// stats.matched_groups = 2;
/// assert_eq!(stats.matched_groups, 2);
/// assert!(!stats.budget_exceeded);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SolveStats {
    start_time: Option<Instant>,
    /// Real demand groups in Stage 1.
    pub groups: usize,
    pub dummy_groups: usize,
    /// Inventory units considered by Stage 1.
    pub candidates: usize,
    pub matched_groups: usize,
    /// Members moved by the relaxation pass.
    pub relaxed_members: usize,
    pub procurement_groups: usize,
    /// Units in the initial Stage-2 work queue.
    pub procurement_candidates: usize,
    pub iterations: u64,
    pub binds: u64,
    /// Units returned to the queue after being shadowed.
    pub requeues: u64,
    /// Units no group wanted any more.
    pub discards: u64,
    pub budget_exceeded: bool,
}

impl SolveStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub(crate) fn record_primary(&mut self, outcome: &PrimaryOutcome) {
        self.groups = outcome.group_count;
        self.dummy_groups = outcome.dummy_count;
        self.candidates = outcome.candidate_count;
        self.matched_groups = outcome.matched_groups;
        self.relaxed_members = outcome.relaxed_members;
    }

    pub(crate) fn record_secondary(&mut self, outcome: &SecondaryOutcome) {
        self.procurement_groups = outcome.group_count;
        self.procurement_candidates = outcome.candidate_count;
        self.iterations = outcome.iterations;
        self.binds = outcome.binds;
        self.requeues = outcome.requeues;
        self.discards = outcome.discards;
        self.budget_exceeded = outcome.budget_exceeded;
    }
}
