//! Demand grouping.
//!
//! Entries that one physical unit can serve are clustered into a
//! [`DemandGroup`], so the matcher sees one column per distinct demand rather
//! than one per slot. Groups are rebuilt on every solve.

use std::collections::HashSet;

use loadout_config::GroupingMode;
use loadout_core::{
    Configuration, DemandEntry, DemandGroup, EntryRef, InventoryItem, ItemId, LoadoutError, Result,
};
use loadout_scoring::can_satisfy;
use tracing::trace;

/// Clusters demand entries into groups.
///
/// # Example
///
/// ```
/// use loadout_config::GroupingMode;
/// use loadout_core::{Configuration, ConfigurationId, DemandEntry, ItemId};
/// use loadout_solver::DemandGrouper;
///
/// let configs = vec![
///     Configuration::new(ConfigurationId(0)).with_entry(DemandEntry::new(ItemId(200))),
///     Configuration::new(ConfigurationId(1)).with_entry(DemandEntry::new(ItemId(200))),
/// ];
///
/// let shared = DemandGrouper::new(GroupingMode::Shared, false).group_all(&configs).unwrap();
/// assert_eq!(shared.len(), 1);
///
/// let exclusive = DemandGrouper::new(GroupingMode::Exclusive, false).group_all(&configs).unwrap();
/// assert_eq!(exclusive.len(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DemandGrouper {
    mode: GroupingMode,
    reserve_locked: bool,
}

impl Default for DemandGrouper {
    fn default() -> Self {
        Self::new(GroupingMode::Shared, false)
    }
}

impl DemandGrouper {
    pub fn new(mode: GroupingMode, reserve_locked: bool) -> Self {
        Self {
            mode,
            reserve_locked,
        }
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Whether an entry takes part in grouping at all.
    ///
    /// Locked entries stay out, unless they are collected and locked items
    /// reserve their unit.
    pub fn admits(&self, entry: &DemandEntry) -> bool {
        !entry.manually_locked || (self.reserve_locked && entry.collected)
    }

    /// Groups every admitted entry of every configuration.
    pub fn group_all(&self, configurations: &[Configuration]) -> Result<Vec<DemandGroup>> {
        self.group(configurations, EntryRef::all(configurations))
    }

    /// Groups the given entries.
    ///
    /// Entries are visited by ascending origin priority; ties keep the order
    /// in which they were handed in. An entry joins the first group for the
    /// same item whose signature it is compatible with, otherwise it seeds a
    /// new group.
    pub fn group<I>(
        &self,
        configurations: &[Configuration],
        handles: I,
    ) -> Result<Vec<DemandGroup>>
    where
        I: IntoIterator<Item = EntryRef>,
    {
        let mut ordered = Vec::new();
        for handle in handles {
            let entry = handle
                .resolve(configurations)
                .ok_or(LoadoutError::UnknownEntry(handle))?;
            if self.admits(entry) {
                ordered.push((handle, entry));
            }
        }
        ordered.sort_by_key(|(_, entry)| entry.origin_priority);

        let mut groups: Vec<DemandGroup> = Vec::new();
        for (handle, entry) in ordered {
            match groups.iter_mut().find(|g| self.joins(g, handle, entry)) {
                Some(group) => {
                    trace!(entry = %handle, item = %entry.item_id, "merged into group");
                    group.absorb(handle, entry);
                }
                None => groups.push(DemandGroup::seed(handle, entry)),
            }
        }
        Ok(groups)
    }

    fn joins(&self, group: &DemandGroup, handle: EntryRef, entry: &DemandEntry) -> bool {
        match self.mode {
            GroupingMode::Exclusive => false,
            GroupingMode::Shared => {
                group.item_id == entry.item_id
                    && !group.has_member_from(handle.configuration)
                    && compatible(&group.signature, &entry.required_sub_components)
            }
        }
    }

    /// Appends one memberless group per candidate item id that no group covers.
    ///
    /// Returns how many were added.
    pub fn add_dummies(groups: &mut Vec<DemandGroup>, candidates: &[InventoryItem]) -> usize {
        let mut covered: HashSet<_> = groups.iter().map(|g| g.item_id).collect();
        let mut added = 0;
        for candidate in candidates {
            if covered.insert(candidate.item_id) {
                groups.push(DemandGroup::dummy(candidate.item_id));
                added += 1;
            }
        }
        added
    }
}

/// One unit can serve both requirements when either covers the other.
fn compatible(signature: &[ItemId], required: &[ItemId]) -> bool {
    can_satisfy(required, signature) || can_satisfy(signature, required)
}

#[cfg(test)]
#[path = "grouping_tests.rs"]
mod tests;
