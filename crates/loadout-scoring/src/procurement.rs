//! Procurement-tree scoring.

use loadout_core::EdgeScore;

use crate::policy::ProcurementWeights;

/// What the engine knows about binding one unit into one procurement group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcurementFacts {
    /// Binding would fulfil the receiving member's whole tree.
    pub completes_tree: bool,
    /// Shallowest depth at which the item is still wanted in the group.
    pub min_depth: u32,
    pub group_size: usize,
    /// Unfulfilled atoms left in the receiving member's tree.
    pub remaining: usize,
    pub min_origin_priority: i32,
}

/// Scores a unit against a procurement group.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcurementScorer {
    weights: ProcurementWeights,
}

impl ProcurementScorer {
    pub fn new(weights: ProcurementWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ProcurementWeights {
        &self.weights
    }

    /// Weighted score of binding into a group that wants the item.
    ///
    /// Whether the group wants it at all is decided by the caller from the
    /// group's occurrences; every edge that reaches here is real. Arithmetic
    /// saturates and the result is clamped into the real-edge range like
    /// [`DirectWeights::combine`](crate::DirectWeights::combine).
    pub fn score(&self, facts: &ProcurementFacts) -> EdgeScore {
        let w = &self.weights;
        let completion = if facts.completes_tree { w.completion } else { 0 };
        let group_size = facts.group_size.min(w.group_size_cap) as i64;
        EdgeScore::bounded(
            w.offset
                .saturating_add(completion)
                .saturating_sub(i64::from(facts.min_depth).saturating_mul(w.depth))
                .saturating_add(group_size.saturating_mul(w.group_size))
                .saturating_sub((facts.remaining as i64).saturating_mul(w.remaining))
                .saturating_sub(
                    i64::from(facts.min_origin_priority).saturating_mul(w.origin_priority),
                ),
        )
    }
}
