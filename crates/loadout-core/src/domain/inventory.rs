//! Inventory units.

use smallvec::SmallVec;

use super::ItemId;

/// Ordered list of sub-component ids.
///
/// Slots rarely hold more than five sub-components, so these stay inline.
pub type SubComponents = SmallVec<[ItemId; 5]>;

/// One physical unit from the inventory snapshot.
///
/// A stack of N units is expanded into N independent entries before solving.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub sub_components: SubComponents,
}

impl InventoryItem {
    /// Creates a unit with no attached sub-components.
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            sub_components: SubComponents::new(),
        }
    }

    /// Creates a unit carrying the given sub-components, in order.
    pub fn with_sub_components<I>(item_id: ItemId, sub_components: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self {
            item_id,
            sub_components: sub_components.into_iter().collect(),
        }
    }

    /// Expands a stack into `count` independent units.
    ///
    /// # Examples
    ///
    /// ```
    /// use loadout_core::{InventoryItem, ItemId};
    ///
    /// let units = InventoryItem::expand_stack(&InventoryItem::new(ItemId(7)), 3);
    /// assert_eq!(units.len(), 3);
    /// assert!(units.iter().all(|u| u.item_id == ItemId(7)));
    /// ```
    pub fn expand_stack(item: &InventoryItem, count: usize) -> Vec<InventoryItem> {
        vec![item.clone(); count]
    }
}
