//! Edge-weight model for loadout.
//!
//! This crate decides how well an inventory unit serves a demand group:
//! - [`consume`] / [`can_satisfy`] - multiset compatibility of sub-components
//! - [`DirectScorer`] - tiered score for direct slot demand
//! - [`ProcurementScorer`] - tiered score for procurement-tree demand
//!
//! Tier weights are plain data ([`DirectWeights`], [`ProcurementWeights`]) so a
//! scorer can be exercised with any weighting in isolation.

pub mod compat;
pub mod direct;
pub mod policy;
pub mod procurement;

pub use compat::{can_satisfy, consume, Consumption};
pub use direct::{DirectScorer, DirectTiers};
pub use policy::{DirectWeights, ProcurementWeights};
pub use procurement::{ProcurementFacts, ProcurementScorer};
