//! Loadout - inventory to demand matching in Rust
//!
//! Matches the units a player owns against the slots their configurations ask
//! for, then spends what is left on procurement trees.
//!
//! # Example
//!
//! ```rust
//! use loadout::prelude::*;
//!
//! let slot = DemandEntry::new(ItemId(100))
//!     .with_required([ItemId(5)])
//!     .with_capacity(1);
//! let mut configurations = vec![Configuration::new(ConfigurationId(0)).with_entry(slot)];
//! let inventory = vec![InventoryItem::with_sub_components(ItemId(100), [ItemId(5)])];
//! let mut forest = ProcurementForest::new();
//!
//! let assignments = solve(
//!     &mut configurations,
//!     &mut forest,
//!     &[ConfigurationId(0)],
//!     &inventory,
//!     true,
//! )
//! .unwrap();
//!
//! assert_eq!(assignments.len(), 1);
//! assert!(configurations[0].entries[0].collected);
//! ```

// Domain model
pub use loadout_core::{
    Assignment, Configuration, ConfigurationId, DemandEntry, DemandGroup, EdgeScore, EntryRef,
    InventoryItem, ItemId, LoadoutError, NodeId, ProcurementForest, ProcurementNode, Result,
    SubComponents,
};

// Scoring policy
pub use loadout_scoring::{DirectScorer, DirectWeights, ProcurementScorer, ProcurementWeights};

// Configuration
pub use loadout_config::{ConfigError, GroupingMode, SolverConfig};

// Solving
pub use loadout_solver::{
    solve, QueueError, SolveOutcome, SolveQueue, SolveStats, SolveTicket, Solver,
};

#[cfg(feature = "console")]
pub use loadout_console as console;

mod run;
pub use run::{run_solve, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        Assignment, Configuration, ConfigurationId, DemandEntry, InventoryItem, ItemId,
        ProcurementForest,
    };
    pub use super::{run_solve, solve, GroupingMode, SolveOutcome, Solver, SolverConfig};
}
