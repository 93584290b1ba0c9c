//! Loadout Solver Engine
//!
//! This crate turns configurations, procurement trees and an inventory
//! snapshot into collected/attached state:
//! - Demand grouping (grouping module)
//! - Stage 1: optimal direct matching with relaxation (primary module)
//! - Stage 2: greedy procurement-tree binding with requeue (secondary module)
//! - Applying Stage-1 results to entries (apply module)
//! - The `solve` entry point, `Solver` and run statistics
//! - A single-worker queue that serialises solves
//! - Configuration wiring (builder module)

pub mod apply;
pub mod builder;
pub mod grouping;
pub mod matrix;
pub mod primary;
pub mod queue;
pub mod secondary;
pub mod solver;
pub mod stats;
pub mod termination;

pub use apply::{attachable, AssignmentApplier, ApplySummary};
pub use builder::PolicyBuilder;
pub use grouping::DemandGrouper;
pub use matrix::ScoreMatrix;
pub use primary::{optimal_pairs, PrimaryOutcome, PrimarySolver};
pub use queue::{QueueError, SolveQueue, SolveTicket};
pub use secondary::{SecondaryEngine, SecondaryOutcome};
pub use solver::{solve, SolveOutcome, Solver};
pub use stats::SolveStats;
pub use termination::IterationBudget;

pub use loadout_config::{GroupingMode, SolverConfig};

#[cfg(test)]
mod tests;
