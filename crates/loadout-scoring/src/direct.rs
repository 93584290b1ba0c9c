//! Direct slot scoring.

use loadout_core::{DemandGroup, EdgeScore, InventoryItem};

use crate::compat::consume;
use crate::policy::DirectWeights;

/// Raw tier values of a direct edge, before weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectTiers {
    pub manual_override: bool,
    pub common_sub_components: usize,
    pub member_count: usize,
    pub min_origin_priority: i32,
}

impl DirectWeights {
    /// Folds tier values into a single score.
    ///
    /// Arithmetic saturates and the result is clamped into the real-edge
    /// range, so oversized weights can never produce a `NO_EDGE` cell.
    pub fn combine(&self, tiers: &DirectTiers) -> EdgeScore {
        let members = tiers.member_count.min(self.member_count_cap) as i64;
        let manual = if tiers.manual_override {
            self.manual_override
        } else {
            0
        };
        let common =
            (tiers.common_sub_components as i64).saturating_mul(self.common_sub_component);
        let priority = i64::from(tiers.min_origin_priority).saturating_mul(self.origin_priority);
        EdgeScore::bounded(
            manual
                .saturating_add(common)
                .saturating_add(members.saturating_mul(self.member_count))
                .saturating_sub(priority),
        )
    }
}

/// Scores a unit against a direct demand group.
///
/// # Examples
///
/// ```
/// use loadout_core::{DemandEntry, DemandGroup, EntryRef, InventoryItem, ItemId};
/// use loadout_scoring::{DirectScorer, DirectWeights};
///
/// let entry = DemandEntry::new(ItemId(100)).with_required([ItemId(5), ItemId(5)]);
/// let group = DemandGroup::seed(EntryRef::new(0, 0), &entry);
/// let scorer = DirectScorer::new(DirectWeights::default(), true);
///
/// let full = InventoryItem::with_sub_components(ItemId(100), [ItemId(5), ItemId(5)]);
/// let half = InventoryItem::with_sub_components(ItemId(100), [ItemId(5)]);
/// let other = InventoryItem::new(ItemId(101));
///
/// assert!(scorer.score(&full, &group).is_some());
/// assert!(scorer.score(&half, &group).is_none()); // strict
/// assert!(scorer.score(&other, &group).is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectScorer {
    weights: DirectWeights,
    strict: bool,
}

impl DirectScorer {
    pub fn new(weights: DirectWeights, strict: bool) -> Self {
        Self { weights, strict }
    }

    pub fn weights(&self) -> &DirectWeights {
        &self.weights
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Tier values of the edge, or `None` if the unit cannot serve the group.
    pub fn tiers(&self, candidate: &InventoryItem, group: &DemandGroup) -> Option<DirectTiers> {
        if candidate.item_id != group.item_id {
            return None;
        }
        let consumption = consume(&candidate.sub_components, &group.signature);
        if self.strict && !consumption.satisfied {
            return None;
        }
        if group.is_dummy() {
            return Some(DirectTiers {
                manual_override: false,
                common_sub_components: 0,
                member_count: 0,
                min_origin_priority: 0,
            });
        }
        Some(DirectTiers {
            manual_override: group.manually_locked_any,
            common_sub_components: consumption.common_count(),
            member_count: group.member_count(),
            min_origin_priority: group.min_origin_priority,
        })
    }

    /// Weighted score of the edge, or `None` for no edge.
    pub fn score(&self, candidate: &InventoryItem, group: &DemandGroup) -> Option<EdgeScore> {
        self.tiers(candidate, group)
            .map(|tiers| self.weights.combine(&tiers))
    }
}
