//! Writes Stage-1 decisions back into demand entries.

use std::collections::HashSet;

use loadout_core::{
    Assignment, Configuration, ConfigurationId, DemandEntry, InventoryItem, LoadoutError, Result,
    SubComponents,
};
use loadout_scoring::consume;
use tracing::trace;

/// Sub-components a unit brings into a slot.
///
/// With a requirement, the unit's sub-components that the requirement
/// consumed; without one, all of them. Either way no more than the slot holds.
///
/// # Example
///
/// ```
/// use loadout_core::{DemandEntry, InventoryItem, ItemId};
/// use loadout_solver::attachable;
///
/// let unit = InventoryItem::with_sub_components(ItemId(100), [ItemId(9), ItemId(5), ItemId(5)]);
/// let slot = DemandEntry::new(ItemId(100))
///     .with_required([ItemId(5)])
///     .with_capacity(2);
/// assert_eq!(attachable(&unit, &slot).as_slice(), &[ItemId(5)]);
/// ```
pub fn attachable(unit: &InventoryItem, entry: &DemandEntry) -> SubComponents {
    let mut attached = if entry.required_sub_components.is_empty() {
        unit.sub_components.clone()
    } else {
        consume(&unit.sub_components, &entry.required_sub_components).matched
    };
    attached.truncate(entry.sub_component_capacity);
    attached
}

/// How many entries the applier changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub collected: usize,
    pub cleared: usize,
    /// Members skipped because they are locked or outside the solvable set.
    pub skipped: usize,
}

/// Applies assignments to the entries of solvable configurations.
#[derive(Clone, Debug, Default)]
pub struct AssignmentApplier {
    solvable: HashSet<ConfigurationId>,
}

impl AssignmentApplier {
    pub fn new<I>(solvable: I) -> Self
    where
        I: IntoIterator<Item = ConfigurationId>,
    {
        Self {
            solvable: solvable.into_iter().collect(),
        }
    }

    /// Marks members of resolved assignments collected and every other member
    /// not collected. Locked entries are never touched.
    pub fn apply(
        &self,
        assignments: &[Assignment],
        configurations: &mut [Configuration],
    ) -> Result<ApplySummary> {
        let mut summary = ApplySummary::default();
        for assignment in assignments {
            for member in &assignment.members {
                let owner = member
                    .owner(configurations)
                    .ok_or(LoadoutError::UnknownEntry(*member))?;
                let entry = member
                    .resolve_mut(configurations)
                    .ok_or(LoadoutError::UnknownEntry(*member))?;
                if entry.manually_locked || !self.solvable.contains(&owner) {
                    summary.skipped += 1;
                    continue;
                }
                match &assignment.resolved_item {
                    Some(unit) => {
                        let attached = attachable(unit, entry);
                        trace!(
                            entry = %member,
                            item = %unit.item_id,
                            attached = attached.len(),
                            "collected"
                        );
                        entry.mark_collected(attached);
                        summary.collected += 1;
                    }
                    None => {
                        entry.mark_uncollected();
                        summary.cleared += 1;
                    }
                }
            }
        }
        Ok(summary)
    }
}
