//! Stage-1 assignment results.

use super::{EntryRef, InventoryItem};

/// The decision for one demand group.
///
/// `resolved_item` is the unit chosen for the group; `None` means every member
/// is left unsatisfied by direct matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub resolved_item: Option<InventoryItem>,
    pub members: Vec<EntryRef>,
}

impl Assignment {
    pub fn resolved(item: InventoryItem, members: Vec<EntryRef>) -> Self {
        Self {
            resolved_item: Some(item),
            members,
        }
    }

    pub fn unresolved(members: Vec<EntryRef>) -> Self {
        Self {
            resolved_item: None,
            members,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_item.is_some()
    }

    /// Members satisfied by this assignment (empty when unresolved).
    pub fn satisfied_members(&self) -> &[EntryRef] {
        if self.is_resolved() {
            &self.members
        } else {
            &[]
        }
    }
}
