//! Tests for Stage-1 matching.

use super::*;
use loadout_core::{ItemId, NO_EDGE};
use loadout_scoring::DirectWeights;
use loadout_test::brute::best_total;
use loadout_test::fixtures::{configuration, entry, subs, unit};
use loadout_test::scenarios;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn solver(strict: bool, mode: GroupingMode) -> PrimarySolver {
    PrimarySolver::new(
        DirectScorer::new(DirectWeights::default(), strict),
        DemandGrouper::new(mode, false),
    )
}

fn random_cells(rng: &mut ChaCha8Rng, rows: usize, columns: usize) -> Vec<Vec<i64>> {
    (0..rows)
        .map(|_| {
            (0..columns)
                .map(|_| {
                    if rng.random_bool(0.25) {
                        NO_EDGE
                    } else {
                        rng.random_range(-50..1_000)
                    }
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_degenerate_matrix_short_circuits() {
    let m = ScoreMatrix::from_rows(vec![]).unwrap();
    assert_eq!(optimal_pairs(&m).unwrap(), (0, vec![]));
}

#[test]
fn test_optimal_pairs_match_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let rows = rng.random_range(1..=5);
        let columns = rng.random_range(1..=5);
        let cells = random_cells(&mut rng, rows, columns);
        let m = ScoreMatrix::from_rows(cells.clone()).unwrap();

        let (total, pairs) = optimal_pairs(&m).unwrap();

        assert_eq!(total, best_total(&cells), "matrix {:?}", cells);
        assert_eq!(pairs.len(), rows.min(columns));
        let used_rows: HashSet<_> = pairs.iter().map(|p| p.0).collect();
        let used_columns: HashSet<_> = pairs.iter().map(|p| p.1).collect();
        assert_eq!(used_rows.len(), pairs.len());
        assert_eq!(used_columns.len(), pairs.len());
        let recomputed: i64 = pairs.iter().map(|&(r, c)| cells[r][c]).sum();
        assert_eq!(recomputed, total);
    }
}

#[test]
fn test_all_no_edge_still_pairs_every_row() {
    let m = ScoreMatrix::from_rows(vec![vec![NO_EDGE; 3]; 2]).unwrap();
    let (_, pairs) = optimal_pairs(&m).unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|&(r, c)| m.edge(r, c).is_none()));
}

#[test]
fn test_full_meld_preferred() {
    let s = scenarios::melded_pair();
    let outcome = solver(true, GroupingMode::Shared)
        .run(&s.configurations, &s.inventory)
        .unwrap();

    assert_eq!(outcome.assignments.len(), 1);
    let chosen = outcome.assignments[0].resolved_item.as_ref().unwrap();
    assert_eq!(chosen.sub_components, subs(&[5, 5]));
    assert_eq!(outcome.leftovers, vec![0]);
    assert!(outcome.satisfied.contains(&EntryRef::new(0, 0)));
}

#[test]
fn test_full_meld_preferred_without_strictness() {
    let s = scenarios::melded_pair();
    let outcome = solver(false, GroupingMode::Shared)
        .run(&s.configurations, &s.inventory)
        .unwrap();
    let chosen = outcome.assignments[0].resolved_item.as_ref().unwrap();
    assert_eq!(chosen.sub_components, subs(&[5, 5]));
}

#[test]
fn test_single_unit_goes_to_earlier_priority() {
    let s = scenarios::one_unit_two_configurations();
    let outcome = solver(true, GroupingMode::Exclusive)
        .run(&s.configurations, &s.inventory)
        .unwrap();

    assert_eq!(outcome.assignments.len(), 2);
    assert_eq!(outcome.matched_groups, 1);
    assert!(outcome.satisfied.contains(&EntryRef::new(1, 0)));
    assert!(!outcome.satisfied.contains(&EntryRef::new(0, 0)));
    let unresolved: Vec<_> = outcome
        .assignments
        .iter()
        .filter(|a| !a.is_resolved())
        .collect();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].members, vec![EntryRef::new(0, 0)]);
}

#[test]
fn test_single_unit_shared_serves_both() {
    let s = scenarios::one_unit_two_configurations();
    let outcome = solver(true, GroupingMode::Shared)
        .run(&s.configurations, &s.inventory)
        .unwrap();

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.satisfied.len(), 2);
}

#[test]
fn test_no_edge_pair_is_not_a_match() {
    let configs = vec![configuration(0, vec![entry(100).with_required(subs(&[5]))])];
    let inventory = vec![unit(100, &[6])];
    let outcome = solver(true, GroupingMode::Shared)
        .run(&configs, &inventory)
        .unwrap();

    assert_eq!(outcome.matched_groups, 0);
    assert!(!outcome.assignments[0].is_resolved());
    assert_eq!(outcome.leftovers, vec![0]);
}

#[test]
fn test_unrequested_units_are_leftovers() {
    let configs = vec![configuration(0, vec![entry(100)])];
    let inventory = vec![unit(400, &[]), unit(100, &[]), unit(100, &[])];
    let outcome = solver(true, GroupingMode::Shared)
        .run(&configs, &inventory)
        .unwrap();

    assert_eq!(outcome.assignments.len(), 1);
    assert!(outcome.assignments[0].is_resolved());
    assert_eq!(outcome.candidate_count, 2);
    assert_eq!(outcome.leftovers.len(), 2);
    assert!(outcome.leftovers.contains(&0));
}

#[test]
fn test_dummy_groups_are_not_reported() {
    let configs = vec![configuration(0, vec![entry(100), entry(200).locked(true)])];
    let inventory = vec![unit(200, &[]), unit(100, &[])];
    let outcome = solver(true, GroupingMode::Shared)
        .run(&configs, &inventory)
        .unwrap();

    assert_eq!(outcome.dummy_count, 1);
    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(
        outcome.assignments[0].resolved_item.as_ref().map(|u| u.item_id),
        Some(ItemId(100))
    );
    assert_eq!(outcome.leftovers, vec![0]);
}

#[test]
fn test_no_candidates_leaves_groups_unresolved() {
    let configs = vec![configuration(0, vec![entry(100), entry(101)])];
    let inventory = vec![unit(400, &[])];
    let outcome = solver(true, GroupingMode::Shared)
        .run(&configs, &inventory)
        .unwrap();

    assert_eq!(outcome.assignments.len(), 2);
    assert!(outcome.assignments.iter().all(|a| !a.is_resolved()));
    assert_eq!(outcome.leftovers, vec![0]);
}

#[test]
fn test_relaxation_folds_unmatched_group() {
    let configs = vec![
        configuration(0, vec![entry(100).with_required(subs(&[5, 5]))]),
        configuration(1, vec![entry(100).with_required(subs(&[6])).with_priority(1)]),
    ];
    let inventory = vec![unit(100, &[5, 5])];
    let outcome = solver(false, GroupingMode::Shared)
        .run(&configs, &inventory)
        .unwrap();

    assert_eq!(outcome.relaxed_members, 1);
    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(
        outcome.assignments[0].members,
        vec![EntryRef::new(0, 0), EntryRef::new(1, 0)]
    );
    assert_eq!(outcome.satisfied.len(), 2);
}

#[test]
fn test_relaxation_respects_one_member_per_configuration() {
    let configs = vec![configuration(
        0,
        vec![
            entry(100).with_required(subs(&[5, 5])),
            entry(100).with_required(subs(&[6])),
        ],
    )];
    let inventory = vec![unit(100, &[5, 5])];
    let outcome = solver(false, GroupingMode::Shared)
        .run(&configs, &inventory)
        .unwrap();

    assert_eq!(outcome.relaxed_members, 0);
    assert_eq!(outcome.assignments.len(), 2);
    assert!(!outcome.satisfied.contains(&EntryRef::new(0, 1)));
}

#[test]
fn test_no_relaxation_when_strict_or_exclusive() {
    let configs = vec![
        configuration(0, vec![entry(100).with_required(subs(&[5, 5]))]),
        configuration(1, vec![entry(100).with_required(subs(&[6]))]),
    ];
    let inventory = vec![unit(100, &[5, 5])];

    for s in [solver(true, GroupingMode::Shared), solver(false, GroupingMode::Exclusive)] {
        let outcome = s.run(&configs, &inventory).unwrap();
        assert_eq!(outcome.relaxed_members, 0);
        assert!(!outcome.satisfied.contains(&EntryRef::new(1, 0)));
    }
}

#[test]
fn test_reserved_locked_entry_claims_unit() {
    let configs = vec![
        configuration(0, vec![entry(100).with_priority(5).locked(true)]),
        configuration(1, vec![entry(100).with_priority(0)]),
    ];
    let inventory = vec![unit(100, &[])];
    let reserving = PrimarySolver::new(
        DirectScorer::default(),
        DemandGrouper::new(GroupingMode::Exclusive, true),
    );
    let outcome = reserving.run(&configs, &inventory).unwrap();

    assert!(outcome.satisfied.contains(&EntryRef::new(0, 0)));
    assert!(!outcome.satisfied.contains(&EntryRef::new(1, 0)));
}
