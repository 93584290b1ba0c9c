//! Aggregated item demand of one or more procurement trees.

use std::collections::BTreeMap;

use crate::domain::ItemId;

/// Where and how often an item is still wanted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occurrence {
    /// Shallowest depth at which the item appears (root children are depth 1).
    pub min_depth: u32,
    pub count: usize,
}

/// `item id -> (min depth, occurrence count)` over unfulfilled atoms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccurrenceMap {
    entries: BTreeMap<ItemId, Occurrence>,
}

impl OccurrenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item_id: ItemId, depth: u32) {
        self.entries
            .entry(item_id)
            .and_modify(|o| {
                o.min_depth = o.min_depth.min(depth);
                o.count += 1;
            })
            .or_insert(Occurrence {
                min_depth: depth,
                count: 1,
            });
    }

    pub fn merge(&mut self, other: &OccurrenceMap) {
        for (item_id, theirs) in &other.entries {
            self.entries
                .entry(*item_id)
                .and_modify(|o| {
                    o.min_depth = o.min_depth.min(theirs.min_depth);
                    o.count += theirs.count;
                })
                .or_insert(*theirs);
        }
    }

    pub fn get(&self, item_id: ItemId) -> Option<Occurrence> {
        self.entries.get(&item_id).copied()
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entries.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Occurrence)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}
