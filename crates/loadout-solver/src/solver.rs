//! Solve entry point.
//!
//! Logging levels:
//! - **INFO**: Solve start/end, stage summaries
//! - **DEBUG**: Relaxation moves, binds, shadowing and discards
//! - **TRACE**: Individual edge evaluations

use std::collections::HashSet;

use loadout_config::SolverConfig;
use loadout_core::{
    Assignment, Configuration, ConfigurationId, EntryRef, InventoryItem, ProcurementForest,
    Result,
};
use tracing::info;

use crate::apply::AssignmentApplier;
use crate::builder::PolicyBuilder;
use crate::primary::PrimarySolver;
use crate::secondary::SecondaryEngine;
use crate::stats::SolveStats;

/// Result of [`Solver::run`].
#[derive(Debug)]
pub struct SolveOutcome {
    /// One per real Stage-1 demand group, in group order.
    pub assignments: Vec<Assignment>,
    pub stats: SolveStats,
}

/// Two-stage matcher configured once and run many times.
///
/// # Example
///
/// ```
/// use loadout_core::{
///     Configuration, ConfigurationId, DemandEntry, InventoryItem, ItemId, ProcurementForest,
/// };
/// use loadout_solver::{Solver, SolverConfig};
///
/// let mut configs = vec![
///     Configuration::new(ConfigurationId(0)).with_entry(DemandEntry::new(ItemId(200))),
/// ];
/// let mut forest = ProcurementForest::new();
/// let inventory = vec![InventoryItem::new(ItemId(200))];
///
/// let solver = Solver::new(SolverConfig::default());
/// let outcome = solver
///     .run(&mut configs, &mut forest, &[ConfigurationId(0)], &inventory)
///     .unwrap();
///
/// assert_eq!(outcome.assignments.len(), 1);
/// assert!(configs[0].entries[0].collected);
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    config: SolverConfig,
    primary: PrimarySolver,
    secondary: SecondaryEngine,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        let primary = PolicyBuilder::primary(&config);
        let secondary = PolicyBuilder::secondary(&config);
        Self {
            config,
            primary,
            secondary,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs both stages and applies the result.
    ///
    /// Every configuration takes part in grouping and matching, but only
    /// entries owned by `solvable` configurations are written or get their
    /// procurement trees bound. On a Stage-1 failure nothing is written.
    pub fn run(
        &self,
        configurations: &mut [Configuration],
        forest: &mut ProcurementForest,
        solvable: &[ConfigurationId],
        inventory: &[InventoryItem],
    ) -> Result<SolveOutcome> {
        let mut stats = SolveStats::default();
        stats.start();
        info!(
            event = "solve_start",
            configuration_count = configurations.len(),
            solvable_count = solvable.len(),
            inventory_count = inventory.len(),
            strict = self.config.strict_sub_component_matching,
        );

        info!(event = "stage_start", stage = 1u64);
        let primary = self.primary.run(configurations, inventory)?;
        stats.record_primary(&primary);
        info!(
            event = "stage_end",
            stage = 1u64,
            group_count = primary.group_count as u64,
            candidate_count = primary.candidate_count as u64,
            matched = primary.matched_groups as u64,
            relaxed = primary.relaxed_members as u64,
        );

        let solvable_set: HashSet<ConfigurationId> = solvable.iter().copied().collect();
        let mut reset = Vec::new();
        let mut pending = Vec::new();
        for handle in EntryRef::all(configurations) {
            let (Some(owner), Some(entry)) =
                (handle.owner(configurations), handle.resolve(configurations))
            else {
                continue;
            };
            if entry.manually_locked || !solvable_set.contains(&owner) {
                continue;
            }
            if let Some(root) = entry.procurement {
                reset.push(root);
                if !primary.satisfied.contains(&handle) {
                    pending.push(handle);
                }
            }
        }

        info!(event = "stage_start", stage = 2u64);
        let secondary = self.secondary.run(
            configurations,
            forest,
            &reset,
            &pending,
            inventory,
            &primary.leftovers,
        )?;
        stats.record_secondary(&secondary);
        info!(
            event = "stage_end",
            stage = 2u64,
            group_count = secondary.group_count as u64,
            candidate_count = secondary.candidate_count as u64,
            binds = secondary.binds,
            requeues = secondary.requeues,
            budget_exceeded = secondary.budget_exceeded,
        );

        let summary =
            AssignmentApplier::new(solvable_set).apply(&primary.assignments, configurations)?;
        info!(
            event = "solve_end",
            assignment_count = primary.assignments.len() as u64,
            collected = summary.collected as u64,
            cleared = summary.cleared as u64,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        Ok(SolveOutcome {
            assignments: primary.assignments,
            stats,
        })
    }
}

/// Solves with default weights and grouping.
///
/// `configurations` is the full list; only those in `solvable` are written.
pub fn solve(
    configurations: &mut [Configuration],
    forest: &mut ProcurementForest,
    solvable: &[ConfigurationId],
    inventory: &[InventoryItem],
    strict_sub_component_matching: bool,
) -> Result<Vec<Assignment>> {
    let config = SolverConfig::new().with_strict_matching(strict_sub_component_matching);
    Solver::new(config)
        .run(configurations, forest, solvable, inventory)
        .map(|outcome| outcome.assignments)
}
