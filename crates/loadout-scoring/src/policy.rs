//! Tier weights.
//!
//! Each score is a weighted sum of tiers. The defaults are spaced so that a
//! higher tier always dominates every combination of the tiers below it, as
//! long as origin priorities stay below `100_000` and counts stay below the cap.

/// Weights for direct slot scoring, highest tier first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectWeights {
    /// Bonus when any group member is manually locked.
    pub manual_override: i64,
    /// Per sub-component shared between unit and requirement.
    pub common_sub_component: i64,
    /// Per group member, up to `member_count_cap`.
    pub member_count: i64,
    pub member_count_cap: usize,
    /// Multiplier on the (negated) minimum origin priority.
    pub origin_priority: i64,
}

impl Default for DirectWeights {
    fn default() -> Self {
        Self {
            manual_override: 1_000_000_000,
            common_sub_component: 10_000_000,
            member_count: 100_000,
            member_count_cap: 99,
            origin_priority: 1,
        }
    }
}

/// Weights for procurement-tree scoring, highest tier first.
///
/// `offset` shifts every procurement score well below any direct score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcurementWeights {
    pub offset: i64,
    /// Bonus when the bind completes the member's tree.
    pub completion: i64,
    /// Multiplier on the (negated) minimum depth of the item.
    pub depth: i64,
    /// Per group member, capped like [`DirectWeights::member_count_cap`].
    pub group_size: i64,
    pub group_size_cap: usize,
    /// Multiplier on the (negated) count of unfulfilled atoms.
    pub remaining: i64,
    pub origin_priority: i64,
}

impl Default for ProcurementWeights {
    fn default() -> Self {
        Self {
            offset: -500_000_000_000,
            completion: 10_000_000_000,
            depth: 100_000_000,
            group_size: 1_000_000,
            group_size_cap: 99,
            remaining: 10_000,
            origin_priority: 1,
        }
    }
}
