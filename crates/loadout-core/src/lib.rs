//! Loadout Core - domain types for inventory-to-demand matching
//!
//! This crate provides the data model the matching engine reads and mutates:
//! - Inventory units and their attached sub-components
//! - Demand entries grouped into configurations
//! - Demand groups (ephemeral, rebuilt on every solve)
//! - Procurement trees stored in an arena
//! - Edge scores and the error type shared by every loadout crate

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    Assignment, AtomNode, Configuration, ConfigurationId, Demand, DemandEntry, DemandGroup,
    EntryRef, InventoryItem, ItemId, NodeId, Occurrence, OccurrenceMap, OrBranch,
    PrerequisiteDemandGroup, ProcurementForest, ProcurementNode, SubComponents,
};
pub use error::{LoadoutError, Result};
pub use score::{EdgeScore, EDGE_LIMIT, NO_EDGE};
