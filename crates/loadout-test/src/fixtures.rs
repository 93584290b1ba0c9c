//! One-line builders.
//!
//! # Example
//!
//! ```
//! use loadout_test::fixtures::{configuration, entry, unit};
//!
//! let cfg = configuration(1, vec![entry(100).with_priority(2)]);
//! assert_eq!(cfg.id.0, 1);
//! assert_eq!(cfg.entries[0].origin_priority, 2);
//!
//! let item = unit(100, &[5, 5]);
//! assert_eq!(item.sub_components.len(), 2);
//! ```

use loadout_core::{
    Configuration, ConfigurationId, DemandEntry, InventoryItem, ItemId, SubComponents,
};

/// An inventory unit with the given sub-components.
pub fn unit(item_id: u32, sub_components: &[u32]) -> InventoryItem {
    InventoryItem::with_sub_components(ItemId(item_id), sub_components.iter().map(|&s| ItemId(s)))
}

pub fn subs(ids: &[u32]) -> SubComponents {
    ids.iter().map(|&s| ItemId(s)).collect()
}

/// A plain entry with no requirement and room for five sub-components.
pub fn entry(item_id: u32) -> DemandEntry {
    DemandEntry::new(ItemId(item_id)).with_capacity(5)
}

pub fn configuration(id: u32, entries: Vec<DemandEntry>) -> Configuration {
    let mut cfg = Configuration::new(ConfigurationId(id));
    for e in entries {
        cfg.push(e);
    }
    cfg
}
