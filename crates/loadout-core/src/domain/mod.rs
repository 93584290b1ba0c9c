//! Domain model for inventory matching
//!
//! Configurations own ordered demand entries. Each entry may point at the root of
//! a procurement tree held in a shared [`ProcurementForest`]. Solving groups
//! entries, pairs them with inventory units and writes the outcome back into the
//! entries and trees.

mod assignment;
mod demand;
mod group;
mod ids;
mod inventory;
mod procurement;

#[cfg(test)]
mod tests;

pub use assignment::Assignment;
pub use demand::{Configuration, DemandEntry, EntryRef};
pub use group::{DemandGroup, PrerequisiteDemandGroup};
pub use ids::{ConfigurationId, ItemId};
pub use inventory::{InventoryItem, SubComponents};
pub use procurement::{
    AtomNode, Demand, NodeId, Occurrence, OccurrenceMap, OrBranch, ProcurementForest,
    ProcurementNode,
};
