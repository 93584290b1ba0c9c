//! Procurement trees.
//!
//! A procurement tree encodes alternative ways of obtaining an item: trade-ins,
//! vendor exchanges, loot sources. Nodes live in a [`ProcurementForest`] arena
//! and are addressed by [`NodeId`]; each configuration slot owns one tree root.
//!
//! Collected state only ever flows downward. Collecting an atom cascades to
//! every descendant atom, while a fully collected subtree never marks its
//! parent collected. Whether a node's requirement is met regardless of how is
//! answered separately by [`ProcurementForest::is_fulfilled`].

mod forest;
mod node;
mod occurrence;

#[cfg(test)]
mod tests;

pub use forest::{Demand, ProcurementForest};
pub use node::{AtomNode, NodeId, OrBranch, ProcurementNode};
pub use occurrence::{Occurrence, OccurrenceMap};
