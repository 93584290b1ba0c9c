//! Stage 1: optimal direct matching.
//!
//! Builds the candidate × group matrix, solves it with Kuhn–Munkres and, when
//! strict sub-component matching is off, folds unmatched groups into matched
//! groups of the same item.

use std::collections::{BTreeSet, HashSet};
use std::panic::{self, AssertUnwindSafe};

use loadout_config::GroupingMode;
use loadout_core::{
    Assignment, Configuration, DemandGroup, EdgeScore, EntryRef, InventoryItem, LoadoutError,
    Result,
};
use loadout_scoring::DirectScorer;
use pathfinding::kuhn_munkres::{kuhn_munkres, Weights};
use tracing::{debug, error, trace};

use crate::grouping::DemandGrouper;
use crate::matrix::ScoreMatrix;

/// Solves the assignment problem on `matrix`, maximising the total.
///
/// Returns the total and `(row, column)` pairs in the matrix's own
/// orientation, sorted by row. Every row of the smaller side is paired, even
/// through [`NO_EDGE`](loadout_core::NO_EDGE) cells. A degenerate matrix
/// yields no pairs without invoking the algorithm.
///
/// # Example
///
/// ```
/// use loadout_solver::{optimal_pairs, ScoreMatrix};
///
/// let m = ScoreMatrix::from_rows(vec![vec![1, 9], vec![8, 2], vec![5, 5]]).unwrap();
/// let (total, pairs) = optimal_pairs(&m).unwrap();
/// assert_eq!(total, 17);
/// assert_eq!(pairs, vec![(0, 1), (1, 0)]);
/// ```
pub fn optimal_pairs(matrix: &ScoreMatrix) -> Result<(i64, Vec<(usize, usize)>)> {
    if matrix.is_degenerate() {
        return Ok((0, Vec::new()));
    }

    // Kuhn–Munkres needs rows <= columns.
    let flipped;
    let view = if Weights::<i64>::rows(matrix) > Weights::<i64>::columns(matrix) {
        flipped = matrix.transposed();
        &flipped
    } else {
        matrix
    };

    let (total, assigned) = panic::catch_unwind(AssertUnwindSafe(|| kuhn_munkres(view)))
        .map_err(|cause| {
            let reason = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown failure".to_string());
            LoadoutError::Matching(reason)
        })?;

    let swap = view.is_transposed() != matrix.is_transposed();
    let mut pairs: Vec<(usize, usize)> = assigned
        .into_iter()
        .enumerate()
        .map(|(r, c)| if swap { (c, r) } else { (r, c) })
        .collect();
    pairs.sort_unstable();
    Ok((total, pairs))
}

/// What Stage 1 decided.
#[derive(Debug, Default)]
pub struct PrimaryOutcome {
    /// One per real group that still has members, in group order.
    pub assignments: Vec<Assignment>,
    /// Inventory indices not consumed by a real match.
    pub leftovers: Vec<usize>,
    /// Entries served by a resolved assignment.
    pub satisfied: BTreeSet<EntryRef>,
    pub group_count: usize,
    pub dummy_count: usize,
    pub candidate_count: usize,
    pub matched_groups: usize,
    pub relaxed_members: usize,
}

/// Stage-1 matcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimarySolver {
    scorer: DirectScorer,
    grouper: DemandGrouper,
}

impl PrimarySolver {
    pub fn new(scorer: DirectScorer, grouper: DemandGrouper) -> Self {
        Self { scorer, grouper }
    }

    /// Runs Stage 1 over every configuration.
    ///
    /// Nothing is written; the caller applies the returned assignments.
    pub fn run(
        &self,
        configurations: &[Configuration],
        inventory: &[InventoryItem],
    ) -> Result<PrimaryOutcome> {
        let mut groups = self.grouper.group_all(configurations)?;
        let real = groups.len();

        let demanded: HashSet<_> = configurations
            .iter()
            .flat_map(|c| c.entries.iter().map(|e| e.item_id))
            .collect();
        let candidate_idx: Vec<usize> = (0..inventory.len())
            .filter(|&i| demanded.contains(&inventory[i].item_id))
            .collect();
        let candidates: Vec<InventoryItem> =
            candidate_idx.iter().map(|&i| inventory[i].clone()).collect();

        let mut outcome = PrimaryOutcome {
            group_count: real,
            candidate_count: candidates.len(),
            ..PrimaryOutcome::default()
        };

        if real == 0 || candidates.is_empty() {
            outcome.assignments = groups
                .into_iter()
                .map(|g| Assignment::unresolved(g.members))
                .collect();
            outcome.leftovers = (0..inventory.len()).collect();
            return Ok(outcome);
        }

        outcome.dummy_count = DemandGrouper::add_dummies(&mut groups, &candidates);
        let matrix = ScoreMatrix::build(&candidates, &groups, &self.scorer);
        debug!(
            rows = Weights::<i64>::rows(&matrix),
            columns = Weights::<i64>::columns(&matrix),
            "score matrix built"
        );

        let (total, pairs) = match optimal_pairs(&matrix) {
            Ok(solved) => solved,
            Err(err) => {
                let rows: Vec<String> = candidates.iter().map(unit_label).collect();
                let columns: Vec<String> = groups.iter().map(group_label).collect();
                error!(
                    event = "matching_failed",
                    error = %err,
                    matrix = %matrix.render_labelled(&rows, &columns),
                );
                return Err(err);
            }
        };
        trace!(total, pairs = pairs.len(), "kuhn-munkres finished");

        // Unit (candidate row) per real group, real edges only.
        let mut resolved: Vec<Option<usize>> = vec![None; real];
        for (row, column) in pairs {
            if column < real && matrix.edge(row, column).is_some() {
                resolved[column] = Some(row);
            }
        }
        outcome.matched_groups = resolved.iter().filter(|r| r.is_some()).count();

        if !self.scorer.is_strict() && self.grouper.mode() == GroupingMode::Shared {
            outcome.relaxed_members =
                self.relax(configurations, &candidates, &mut groups[..real], &resolved)?;
        }

        let mut used = HashSet::new();
        for (group, unit) in groups.into_iter().take(real).zip(&resolved) {
            if group.is_dummy() {
                continue;
            }
            match unit {
                Some(row) => {
                    used.insert(candidate_idx[*row]);
                    outcome.satisfied.extend(group.members.iter().copied());
                    outcome
                        .assignments
                        .push(Assignment::resolved(candidates[*row].clone(), group.members));
                }
                None => outcome.assignments.push(Assignment::unresolved(group.members)),
            }
        }
        outcome.leftovers = (0..inventory.len()).filter(|i| !used.contains(i)).collect();
        Ok(outcome)
    }

    /// Moves members of unmatched groups into matched groups of the same item.
    ///
    /// Targets are ranked by how well their unit scores against the unmatched
    /// group; a target never takes a second member from one configuration.
    fn relax(
        &self,
        configurations: &[Configuration],
        candidates: &[InventoryItem],
        groups: &mut [DemandGroup],
        resolved: &[Option<usize>],
    ) -> Result<usize> {
        let mut moved = 0;
        for g in 0..groups.len() {
            if resolved[g].is_some() {
                continue;
            }
            let members = groups[g].members.clone();
            for member in members {
                let mut best: Option<(EdgeScore, usize)> = None;
                for (h, unit) in resolved.iter().enumerate() {
                    let Some(row) = unit else { continue };
                    if groups[h].item_id != groups[g].item_id
                        || groups[h].has_member_from(member.configuration)
                    {
                        continue;
                    }
                    if let Some(score) = self.scorer.score(&candidates[*row], &groups[g]) {
                        if best.map_or(true, |(s, _)| score > s) {
                            best = Some((score, h));
                        }
                    }
                }
                let Some((score, target)) = best else { continue };

                let entry = member
                    .resolve(configurations)
                    .ok_or(LoadoutError::UnknownEntry(member))?;
                groups[target].absorb(member, entry);
                groups[g].remove(member, configurations)?;
                moved += 1;
                debug!(
                    event = "relaxation",
                    entry = %member,
                    item = %entry.item_id,
                    from_group = g,
                    to_group = target,
                    score = score.value(),
                );
            }
        }
        Ok(moved)
    }
}

fn unit_label(item: &InventoryItem) -> String {
    if item.sub_components.is_empty() {
        item.item_id.to_string()
    } else {
        let subs: Vec<String> = item.sub_components.iter().map(|s| s.to_string()).collect();
        format!("{}[{}]", item.item_id, subs.join(","))
    }
}

fn group_label(group: &DemandGroup) -> String {
    if group.is_dummy() {
        format!("{}(dummy)", group.item_id)
    } else {
        format!("{}x{}", group.item_id, group.member_count())
    }
}

#[cfg(test)]
#[path = "primary_tests.rs"]
mod tests;
