//! Stage 2: greedy procurement-tree binding.
//!
//! Leftover units are pushed through a FIFO work queue. Each pop rescores the
//! unit against every live prerequisite group and binds it to the deepest
//! matching atom of the best group. Binding an atom collects its whole
//! subtree, so units bound further down are shadowed and go back on the queue.

use std::collections::{BTreeMap, VecDeque};

use loadout_core::{
    Configuration, Demand, EntryRef, InventoryItem, ItemId, LoadoutError, NodeId,
    PrerequisiteDemandGroup, ProcurementForest, Result,
};
use loadout_scoring::{ProcurementFacts, ProcurementScorer};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::grouping::DemandGrouper;
use crate::termination::IterationBudget;

/// What Stage 2 did. The tree state itself lives in the forest.
#[derive(Debug, Default)]
pub struct SecondaryOutcome {
    /// Unit (inventory index) bound to each atom at the end of the pass.
    pub bindings: BTreeMap<NodeId, usize>,
    pub group_count: usize,
    pub candidate_count: usize,
    pub iterations: u64,
    pub binds: u64,
    pub requeues: u64,
    pub discards: u64,
    pub budget_exceeded: bool,
    /// Units still queued when the budget ran out.
    pub unprocessed: Vec<usize>,
}

/// Where a unit would go inside one group.
#[derive(Clone, Copy, Debug)]
struct Target {
    root: NodeId,
    demand: Demand,
}

/// Stage-2 engine.
#[derive(Clone, Copy, Debug)]
pub struct SecondaryEngine {
    scorer: ProcurementScorer,
    grouper: DemandGrouper,
    iteration_buffer: u64,
    iteration_limit: Option<u64>,
}

impl Default for SecondaryEngine {
    fn default() -> Self {
        Self::new(ProcurementScorer::default(), DemandGrouper::default(), 10)
    }
}

impl SecondaryEngine {
    pub fn new(scorer: ProcurementScorer, grouper: DemandGrouper, iteration_buffer: u64) -> Self {
        Self {
            scorer,
            grouper,
            iteration_buffer,
            iteration_limit: None,
        }
    }

    /// Replaces the `n(n+1)/2 + buffer` budget with a fixed limit.
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    fn budget(&self, candidates: usize) -> IterationBudget {
        match self.iteration_limit {
            Some(limit) => IterationBudget::new(limit),
            None => IterationBudget::for_candidates(candidates, self.iteration_buffer),
        }
    }

    /// Runs Stage 2.
    ///
    /// `reset` lists the tree roots returned to Uncollected first; `pending`
    /// the entries still waiting for a unit; `leftovers` the inventory
    /// indices Stage 1 did not consume.
    pub fn run(
        &self,
        configurations: &[Configuration],
        forest: &mut ProcurementForest,
        reset: &[NodeId],
        pending: &[EntryRef],
        inventory: &[InventoryItem],
        leftovers: &[usize],
    ) -> Result<SecondaryOutcome> {
        for &root in reset {
            forest.validate(root)?;
        }
        for &root in reset {
            forest.reset(root)?;
        }

        let mut groups = Vec::new();
        for group in self.grouper.group(configurations, pending.iter().copied())? {
            groups.push(PrerequisiteDemandGroup::build(group, configurations, forest)?);
        }

        let mut queue: VecDeque<usize> = leftovers
            .iter()
            .copied()
            .filter(|&i| {
                inventory
                    .get(i)
                    .is_some_and(|u| groups.iter().any(|g| g.wants(u.item_id)))
            })
            .collect();

        let mut outcome = SecondaryOutcome {
            group_count: groups.len(),
            candidate_count: queue.len(),
            ..SecondaryOutcome::default()
        };
        let mut budget = self.budget(queue.len());

        while let Some(unit) = queue.pop_front() {
            if budget.is_exhausted() {
                queue.push_front(unit);
                outcome.budget_exceeded = true;
                break;
            }
            budget.tick();
            outcome.iterations += 1;

            let item_id = inventory.get(unit).map(|u| u.item_id).ok_or_else(|| {
                LoadoutError::Internal(format!("inventory index {} out of range", unit))
            })?;

            let best = self.best_group(&groups, item_id, configurations, forest)?;
            let Some((g, target)) = best else {
                outcome.discards += 1;
                debug!(event = "discard", unit, item = %item_id);
                continue;
            };

            forest.collect(target.demand.node)?;
            outcome.bindings.insert(target.demand.node, unit);
            outcome.binds += 1;
            debug!(
                event = "bind",
                unit,
                item = %item_id,
                node = %target.demand.node,
                depth = target.demand.depth,
                group = g,
            );

            let mut shadowed: SmallVec<[usize; 4]> = SmallVec::new();
            for atom in forest.descendant_atoms(target.demand.node)? {
                if let Some(previous) = outcome.bindings.remove(&atom) {
                    shadowed.push(previous);
                    debug!(
                        event = "shadowed",
                        unit = previous,
                        node = %atom,
                        by = %target.demand.node,
                    );
                }
            }
            outcome.requeues += shadowed.len() as u64;
            queue.extend(shadowed);

            groups[g].refresh(configurations, forest)?;
        }

        if outcome.budget_exceeded {
            warn!(
                event = "budget_exceeded",
                limit = budget.limit(),
                remaining = queue.len(),
                "procurement iteration budget exhausted, keeping partial bindings"
            );
            outcome.unprocessed = queue.into_iter().collect();
        }
        Ok(outcome)
    }

    /// The best-scoring group for a unit and the atom it would be bound to.
    ///
    /// Ties go to the earlier group.
    fn best_group(
        &self,
        groups: &[PrerequisiteDemandGroup],
        item_id: ItemId,
        configurations: &[Configuration],
        forest: &ProcurementForest,
    ) -> Result<Option<(usize, Target)>> {
        let mut best = None;
        for (g, group) in groups.iter().enumerate() {
            let Some(occurrence) = group.occurrences.get(item_id) else {
                continue;
            };
            let Some(target) = deepest_target(group, item_id, configurations, forest)? else {
                continue;
            };
            let facts = ProcurementFacts {
                completes_tree: forest.would_fulfill(target.root, target.demand.node)?,
                min_depth: occurrence.min_depth,
                group_size: group.group.member_count(),
                remaining: forest.remaining_count(target.root)?,
                min_origin_priority: group.group.min_origin_priority,
            };
            let score = self.scorer.score(&facts);
            trace!(item = %item_id, group = g, score = score.value(), "procurement edge");
            if best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                best = Some((score, g, target));
            }
        }
        Ok(best.map(|(_, g, target)| (g, target)))
    }
}

/// Deepest unfulfilled atom for `item_id` across the group's member trees.
///
/// Ties go to the earlier member, then to the earlier atom in tree order.
fn deepest_target(
    group: &PrerequisiteDemandGroup,
    item_id: ItemId,
    configurations: &[Configuration],
    forest: &ProcurementForest,
) -> Result<Option<Target>> {
    let mut best: Option<Target> = None;
    for member in &group.group.members {
        let entry = member
            .resolve(configurations)
            .ok_or(LoadoutError::UnknownEntry(*member))?;
        let Some(root) = entry.procurement else {
            continue;
        };
        for demand in forest.remaining_demand(root)? {
            if demand.item_id == item_id && best.map_or(true, |b| demand.depth > b.demand.depth) {
                best = Some(Target { root, demand });
            }
        }
    }
    Ok(best)
}

#[cfg(test)]
#[path = "secondary_tests.rs"]
mod tests;
