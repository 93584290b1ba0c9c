//! Demand groups.
//!
//! Groups are ephemeral: the solver rebuilds them on every invocation and
//! they only ever hold [`EntryRef`] handles, never copies of entries.

use crate::error::{LoadoutError, Result};

use super::{
    Configuration, DemandEntry, EntryRef, ItemId, OccurrenceMap, ProcurementForest, SubComponents,
};

/// A cluster of equivalent demand entries.
///
/// All members share `item_id`, and `signature` is the largest sub-component
/// requirement among them, sorted descending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemandGroup {
    pub item_id: ItemId,
    pub signature: SubComponents,
    pub members: Vec<EntryRef>,
    pub min_origin_priority: i32,
    pub manually_locked_any: bool,
}

impl DemandGroup {
    /// Starts a group from its first member.
    pub fn seed(handle: EntryRef, entry: &DemandEntry) -> Self {
        Self {
            item_id: entry.item_id,
            signature: sorted_signature(&entry.required_sub_components),
            members: vec![handle],
            min_origin_priority: entry.origin_priority,
            manually_locked_any: entry.manually_locked,
        }
    }

    /// A memberless group standing in for an inventory id nobody asked for.
    pub fn dummy(item_id: ItemId) -> Self {
        Self {
            item_id,
            signature: SubComponents::new(),
            members: Vec::new(),
            min_origin_priority: 0,
            manually_locked_any: false,
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Adds a member, keeping the larger signature and the lowest priority.
    pub fn absorb(&mut self, handle: EntryRef, entry: &DemandEntry) {
        debug_assert_eq!(self.item_id, entry.item_id);
        if entry.required_sub_components.len() > self.signature.len() {
            self.signature = sorted_signature(&entry.required_sub_components);
        }
        self.members.push(handle);
        self.min_origin_priority = if self.members.len() == 1 {
            entry.origin_priority
        } else {
            self.min_origin_priority.min(entry.origin_priority)
        };
        self.manually_locked_any |= entry.manually_locked;
    }

    /// Removes a member. Priority and lock flags are recomputed from the remaining members.
    pub fn remove(&mut self, handle: EntryRef, configurations: &[Configuration]) -> Result<bool> {
        let Some(pos) = self.members.iter().position(|m| *m == handle) else {
            return Ok(false);
        };
        self.members.remove(pos);

        self.min_origin_priority = 0;
        self.manually_locked_any = false;
        let mut signature = SubComponents::new();
        for (i, member) in self.members.iter().enumerate() {
            let entry = member
                .resolve(configurations)
                .ok_or(LoadoutError::UnknownEntry(*member))?;
            self.min_origin_priority = if i == 0 {
                entry.origin_priority
            } else {
                self.min_origin_priority.min(entry.origin_priority)
            };
            self.manually_locked_any |= entry.manually_locked;
            if entry.required_sub_components.len() > signature.len() {
                signature = sorted_signature(&entry.required_sub_components);
            }
        }
        self.signature = signature;
        Ok(true)
    }

    /// Returns true if a member of this group belongs to the given configuration index.
    pub fn has_member_from(&self, configuration: usize) -> bool {
        self.members.iter().any(|m| m.configuration == configuration)
    }
}

fn sorted_signature(required: &SubComponents) -> SubComponents {
    let mut signature = required.clone();
    signature.sort_unstable_by(|a, b| b.cmp(a));
    signature
}

/// A demand group for procurement, carrying the aggregated tree demand of its members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrerequisiteDemandGroup {
    pub group: DemandGroup,
    pub occurrences: OccurrenceMap,
}

impl PrerequisiteDemandGroup {
    /// Wraps a group and computes its occurrence map.
    pub fn build(
        group: DemandGroup,
        configurations: &[Configuration],
        forest: &ProcurementForest,
    ) -> Result<Self> {
        let mut built = Self {
            group,
            occurrences: OccurrenceMap::new(),
        };
        built.refresh(configurations, forest)?;
        Ok(built)
    }

    /// Recomputes the occurrence map from the members' current tree state.
    pub fn refresh(
        &mut self,
        configurations: &[Configuration],
        forest: &ProcurementForest,
    ) -> Result<()> {
        let mut occurrences = OccurrenceMap::new();
        for member in &self.group.members {
            let entry = member
                .resolve(configurations)
                .ok_or(LoadoutError::UnknownEntry(*member))?;
            if let Some(root) = entry.procurement {
                occurrences.merge(&forest.occurrences(root)?);
            }
        }
        self.occurrences = occurrences;
        Ok(())
    }

    pub fn wants(&self, item_id: ItemId) -> bool {
        self.occurrences.contains(item_id)
    }
}
