//! Demand entries and the configurations that own them.

use std::fmt;

use super::{ConfigurationId, ItemId, NodeId, SubComponents};

/// A single slot requirement for one item.
///
/// The solve-owned state (`collected`, `attached`) is written by the applier;
/// everything else is input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandEntry {
    pub item_id: ItemId,
    /// Sub-components the unit must carry. Empty means any unit will do.
    pub required_sub_components: SubComponents,
    /// Lower values were declared earlier and win ties.
    pub origin_priority: i32,
    /// Locked entries are never grouped, matched or written by the solver.
    pub manually_locked: bool,
    /// How many sub-components the slot itself can hold.
    ///
    /// Zero for a fresh entry; [`DemandEntry::with_required`] raises it to at
    /// least the number of required sub-components.
    pub sub_component_capacity: usize,
    /// Root atom of this slot's procurement tree, if the item can be procured.
    pub procurement: Option<NodeId>,
    pub collected: bool,
    pub attached: SubComponents,
}

impl DemandEntry {
    /// Creates an uncollected entry with no sub-component requirement and no
    /// sub-component capacity.
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            required_sub_components: SubComponents::new(),
            origin_priority: 0,
            manually_locked: false,
            sub_component_capacity: 0,
            procurement: None,
            collected: false,
            attached: SubComponents::new(),
        }
    }

    /// Sets the required sub-components. The capacity grows to hold them all.
    pub fn with_required<I>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.required_sub_components = required.into_iter().collect();
        self.sub_component_capacity = self
            .sub_component_capacity
            .max(self.required_sub_components.len());
        self
    }

    pub fn with_priority(mut self, origin_priority: i32) -> Self {
        self.origin_priority = origin_priority;
        self
    }

    /// Overrides the capacity, including one implied by the requirement.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.sub_component_capacity = capacity;
        self
    }

    pub fn with_procurement(mut self, root: NodeId) -> Self {
        self.procurement = Some(root);
        self
    }

    /// Marks the entry as locked by the user in its current collected state.
    pub fn locked(mut self, collected: bool) -> Self {
        self.manually_locked = true;
        self.collected = collected;
        self
    }

    /// Records that a unit was found, with the sub-components it brings along.
    pub fn mark_collected(&mut self, attached: SubComponents) {
        self.collected = true;
        self.attached = attached;
    }

    /// Records that no unit serves this entry.
    pub fn mark_uncollected(&mut self) {
        self.collected = false;
        self.attached.clear();
    }
}

/// An ordered list of demand entries, e.g. one gear set.
///
/// An entry belongs to the configuration whose `entries` hold it; there is no
/// separate owner field to keep in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    pub id: ConfigurationId,
    pub entries: Vec<DemandEntry>,
}

impl Configuration {
    pub fn new(id: ConfigurationId) -> Self {
        Self {
            id,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: DemandEntry) -> Self {
        self.push(entry);
        self
    }

    pub fn push(&mut self, entry: DemandEntry) {
        self.entries.push(entry);
    }
}

/// Non-owning handle to an entry: configuration index plus slot index.
///
/// Handles are positional and only valid against the slice they were built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryRef {
    pub configuration: usize,
    pub slot: usize,
}

impl EntryRef {
    pub const fn new(configuration: usize, slot: usize) -> Self {
        Self {
            configuration,
            slot,
        }
    }

    /// Id of the configuration holding this entry.
    pub fn owner(&self, configurations: &[Configuration]) -> Option<ConfigurationId> {
        configurations.get(self.configuration).map(|c| c.id)
    }

    pub fn resolve<'a>(&self, configurations: &'a [Configuration]) -> Option<&'a DemandEntry> {
        configurations
            .get(self.configuration)
            .and_then(|c| c.entries.get(self.slot))
    }

    pub fn resolve_mut<'a>(
        &self,
        configurations: &'a mut [Configuration],
    ) -> Option<&'a mut DemandEntry> {
        configurations
            .get_mut(self.configuration)
            .and_then(|c| c.entries.get_mut(self.slot))
    }

    /// Every entry handle in declaration order: configurations first, then slots.
    pub fn all(configurations: &[Configuration]) -> impl Iterator<Item = EntryRef> + '_ {
        configurations
            .iter()
            .enumerate()
            .flat_map(|(c, cfg)| (0..cfg.entries.len()).map(move |s| EntryRef::new(c, s)))
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.configuration, self.slot)
    }
}
