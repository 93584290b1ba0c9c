//! End-to-end tests for the solve entry point.

use loadout_core::{
    Configuration, ConfigurationId, DemandEntry, EntryRef, ItemId, ProcurementForest,
};
use loadout_test::fixtures::{configuration, entry, subs, unit};
use loadout_test::scenarios;

use crate::{solve, GroupingMode, Solver, SolverConfig};

#[test]
fn test_solve_collects_full_meld_with_attachments() {
    let mut s = scenarios::melded_pair();
    let ids = s.all_ids();
    let assignments =
        solve(&mut s.configurations, &mut s.forest, &ids, &s.inventory, true).unwrap();

    assert_eq!(assignments.len(), 1);
    let slot = &s.configurations[0].entries[0];
    assert!(slot.collected);
    assert_eq!(slot.attached, subs(&[5, 5]));
}

#[test]
fn test_exclusive_single_unit_goes_to_earlier_priority() {
    let mut s = scenarios::one_unit_two_configurations();
    let ids = s.all_ids();
    let solver = Solver::new(SolverConfig::new().with_grouping(GroupingMode::Exclusive));
    let outcome = solver
        .run(&mut s.configurations, &mut s.forest, &ids, &s.inventory)
        .unwrap();

    assert_eq!(outcome.stats.matched_groups, 1);
    assert!(s.configurations[1].entries[0].collected);
    assert!(!s.configurations[0].entries[0].collected);
}

#[test]
fn test_token_collects_tree_through_solve() {
    let (mut s, tree) = scenarios::token_or_ores();
    let ids = s.all_ids();
    let assignments =
        solve(&mut s.configurations, &mut s.forest, &ids, &s.inventory, true).unwrap();

    assert_eq!(assignments.len(), 1);
    assert!(!assignments[0].is_resolved());
    assert!(!s.configurations[0].entries[0].collected);
    assert!(s.forest.is_collected(tree.token).unwrap());
    assert!(s.forest.is_fulfilled(tree.root).unwrap());
    assert!(!s.forest.is_collected(tree.ores[0]).unwrap());
}

#[test]
fn test_shadowing_reported_in_stats() {
    let (mut s, h) = scenarios::shadowing();
    let ids = s.all_ids();
    let outcome = Solver::default()
        .run(&mut s.configurations, &mut s.forest, &ids, &s.inventory)
        .unwrap();

    assert_eq!(outcome.stats.procurement_candidates, 2);
    assert_eq!(outcome.stats.requeues, 1);
    assert_eq!(outcome.stats.binds, 3);
    assert!(!outcome.stats.budget_exceeded);
    assert!(s.forest.is_collected(h.second_ore).unwrap());
}

#[test]
fn test_only_solvable_configurations_are_written() {
    let mut configs = vec![
        configuration(0, vec![entry(200)]),
        configuration(1, vec![entry(200)]),
    ];
    configs[1].entries[0].mark_collected(subs(&[9]));
    let mut forest = ProcurementForest::new();
    let inventory = vec![unit(200, &[])];

    solve(&mut configs, &mut forest, &[ConfigurationId(0)], &inventory, true).unwrap();

    assert!(configs[0].entries[0].collected);
    assert_eq!(configs[1].entries[0].attached, subs(&[9]));
}

#[test]
fn test_literal_configuration_is_written_by_its_id() {
    let mut configs = vec![
        Configuration {
            id: ConfigurationId(3),
            entries: vec![DemandEntry::new(ItemId(100))],
        },
        Configuration {
            id: ConfigurationId(7),
            entries: vec![DemandEntry::new(ItemId(200))],
        },
    ];
    let mut forest = ProcurementForest::new();
    let inventory = vec![unit(100, &[]), unit(200, &[])];

    let assignments =
        solve(&mut configs, &mut forest, &[ConfigurationId(7)], &inventory, true).unwrap();

    assert!(assignments.iter().all(|a| a.is_resolved()));
    assert!(configs[1].entries[0].collected);
    assert!(!configs[0].entries[0].collected);
}

#[test]
fn test_inactive_configuration_still_consumes_units() {
    let mut configs = vec![
        configuration(0, vec![entry(200).with_priority(0)]),
        configuration(1, vec![entry(200).with_priority(1)]),
    ];
    let mut forest = ProcurementForest::new();
    let inventory = vec![unit(200, &[])];
    let solver = Solver::new(SolverConfig::new().with_grouping(GroupingMode::Exclusive));

    let outcome = solver
        .run(&mut configs, &mut forest, &[ConfigurationId(1)], &inventory)
        .unwrap();

    let winner = outcome.assignments.iter().find(|a| a.is_resolved()).unwrap();
    assert_eq!(winner.members, vec![EntryRef::new(0, 0)]);
    assert!(!configs[1].entries[0].collected);
    assert!(!configs[0].entries[0].collected);
}

#[test]
fn test_inactive_configuration_trees_are_left_alone() {
    let mut forest = ProcurementForest::new();
    let ore = forest.atom(ItemId(500));
    let root = forest.atom_via(ItemId(300), ore).unwrap();
    forest.collect(ore).unwrap();
    let mut configs = vec![
        configuration(0, vec![entry(100)]),
        configuration(1, vec![entry(300).with_procurement(root)]),
    ];

    solve(&mut configs, &mut forest, &[ConfigurationId(0)], &[], true).unwrap();

    assert!(forest.is_collected(ore).unwrap());
}

#[test]
fn test_locked_entries_are_never_touched() {
    let mut configs = vec![configuration(
        0,
        vec![entry(100).locked(true), entry(101).locked(false)],
    )];
    configs[0].entries[0].attached = subs(&[4]);
    let mut forest = ProcurementForest::new();
    let inventory = vec![unit(101, &[]), unit(100, &[])];

    let assignments =
        solve(&mut configs, &mut forest, &[ConfigurationId(0)], &inventory, true).unwrap();

    assert!(assignments.is_empty());
    assert!(configs[0].entries[0].collected);
    assert_eq!(configs[0].entries[0].attached, subs(&[4]));
    assert!(!configs[0].entries[1].collected);
}

#[test]
fn test_directly_satisfied_entry_skips_procurement() {
    let (mut s, tree) = scenarios::token_or_ores();
    s.inventory.push(unit(300, &[]));
    s.forest.collect(tree.ores[0]).unwrap();
    let ids = s.all_ids();

    solve(&mut s.configurations, &mut s.forest, &ids, &s.inventory, true).unwrap();

    assert!(s.configurations[0].entries[0].collected);
    assert!(!s.forest.is_collected(tree.token).unwrap());
    assert!(!s.forest.is_collected(tree.ores[0]).unwrap());
}

#[test]
fn test_empty_inventory_clears_previous_collection() {
    let mut configs = vec![configuration(0, vec![entry(100)])];
    configs[0].entries[0].mark_collected(subs(&[1]));
    let mut forest = ProcurementForest::new();

    let assignments =
        solve(&mut configs, &mut forest, &[ConfigurationId(0)], &[], true).unwrap();

    assert_eq!(assignments.len(), 1);
    assert!(!configs[0].entries[0].collected);
    assert!(configs[0].entries[0].attached.is_empty());
}

#[test]
fn test_repeated_solves_are_stable() {
    let (mut s, h) = scenarios::shadowing();
    let ids = s.all_ids();
    let solver = Solver::default();

    solver
        .run(&mut s.configurations, &mut s.forest, &ids, &s.inventory)
        .unwrap();
    let first = s.forest.clone();
    solver
        .run(&mut s.configurations, &mut s.forest, &ids, &s.inventory)
        .unwrap();

    for node in [h.first_token, h.first_ore, h.second_ore] {
        assert_eq!(
            first.is_collected(node).unwrap(),
            s.forest.is_collected(node).unwrap()
        );
    }
}

#[test]
fn test_oversized_config_weights_still_match() {
    let config =
        SolverConfig::from_toml_str("[weights]\ncommon_sub_component = 4611686018427387904\n")
            .unwrap();
    let mut s = scenarios::melded_pair();
    let ids = s.all_ids();

    let outcome = Solver::new(config)
        .run(&mut s.configurations, &mut s.forest, &ids, &s.inventory)
        .unwrap();

    assert_eq!(outcome.stats.matched_groups, 1);
    assert!(s.configurations[0].entries[0].collected);
}
