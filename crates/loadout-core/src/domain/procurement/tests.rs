//! Tests for procurement trees.

use super::*;
use crate::domain::ItemId;
use crate::error::LoadoutError;

// Atom(300) <- Or[ Atom(400), And[Atom(500), Atom(500), Atom(600)] ]
struct Item300 {
    forest: ProcurementForest,
    root: NodeId,
    token: NodeId,
    and: NodeId,
    ores: [NodeId; 3],
}

fn item_300() -> Item300 {
    let mut forest = ProcurementForest::new();
    let token = forest.atom(ItemId(400));
    let ore_a = forest.atom(ItemId(500));
    let ore_b = forest.atom(ItemId(500));
    let crystal = forest.atom(ItemId(600));
    let and = forest.and(vec![ore_a, ore_b, crystal]).unwrap();
    let or = forest.or(vec![token, and]).unwrap();
    let root = forest.atom_via(ItemId(300), or).unwrap();
    Item300 {
        forest,
        root,
        token,
        and,
        ores: [ore_a, ore_b, crystal],
    }
}

#[test]
fn test_token_fulfils_root_without_touching_other_branch() {
    let mut t = item_300();
    let changed = t.forest.collect(t.token).unwrap();

    assert_eq!(changed, vec![t.token]);
    assert!(t.forest.is_fulfilled(t.root).unwrap());
    for ore in t.ores {
        assert!(!t.forest.is_collected(ore).unwrap());
    }
}

#[test]
fn test_collecting_parent_cascades_to_every_descendant() {
    let mut forest = ProcurementForest::new();
    let a = forest.atom(ItemId(1));
    let b = forest.atom(ItemId(2));
    let inner = forest.atom(ItemId(3));
    let c = forest.atom_via(ItemId(4), inner).unwrap();
    let and = forest.and(vec![a, b, c]).unwrap();
    let parent = forest.atom_via(ItemId(10), and).unwrap();

    let changed = forest.collect(parent).unwrap();

    assert_eq!(changed.len(), 5);
    for id in [parent, a, b, c, inner] {
        assert!(forest.is_collected(id).unwrap());
    }
}

#[test]
fn test_last_and_child_does_not_mark_parent_collected() {
    let mut forest = ProcurementForest::new();
    let a = forest.atom(ItemId(1));
    let b = forest.atom(ItemId(2));
    let and = forest.and(vec![a, b]).unwrap();
    let parent = forest.atom_via(ItemId(10), and).unwrap();

    forest.collect(a).unwrap();
    forest.collect(b).unwrap();

    assert!(!forest.is_collected(parent).unwrap());
    assert!(forest.is_fulfilled(parent).unwrap());
}

#[test]
fn test_collect_never_touches_ancestors() {
    let mut t = item_300();
    t.forest.collect(t.ores[0]).unwrap();

    assert!(!t.forest.is_collected(t.root).unwrap());
    assert!(!t.forest.is_fulfilled(t.and).unwrap());
}

#[test]
fn test_multiple_alternatives_is_a_hard_error() {
    let mut forest = ProcurementForest::new();
    let a = forest.atom(ItemId(1));
    let b = forest.atom(ItemId(2));
    let broken = forest
        .atom_with_alternatives(ItemId(3), vec![a, b])
        .unwrap();

    match forest.nested(broken) {
        Err(LoadoutError::ProcurementInvariant { node, alternatives }) => {
            assert_eq!(node, broken);
            assert_eq!(alternatives, 2);
        }
        other => panic!("expected invariant violation, got {:?}", other),
    }

    let root = forest.atom_via(ItemId(4), broken).unwrap();
    assert!(forest.validate(root).is_err());
    assert!(forest.remaining_demand(root).is_err());
    assert!(forest.collect(root).is_err());
}

#[test]
fn test_empty_composites_are_rejected() {
    let mut forest = ProcurementForest::new();
    assert!(matches!(forest.and(vec![]), Err(LoadoutError::DomainModel(_))));
    assert!(matches!(forest.or(vec![]), Err(LoadoutError::DomainModel(_))));
}

#[test]
fn test_unknown_child_is_rejected() {
    let mut forest = ProcurementForest::new();
    let a = forest.atom(ItemId(1));
    let mut other = ProcurementForest::new();
    other.atom(ItemId(1));
    other.atom(ItemId(2));
    let foreign = other.atom(ItemId(3));

    assert!(matches!(
        forest.and(vec![a, foreign]),
        Err(LoadoutError::UnknownNode(_))
    ));
}

#[test]
fn test_remaining_demand_depths() {
    let t = item_300();
    let demand = t.forest.remaining_demand(t.root).unwrap();

    assert_eq!(demand.len(), 4);
    assert!(demand.iter().all(|d| d.depth == 1));

    let occurrences = t.forest.occurrences(t.root).unwrap();
    assert_eq!(
        occurrences.get(ItemId(500)),
        Some(Occurrence {
            min_depth: 1,
            count: 2
        })
    );
    assert!(!occurrences.contains(ItemId(300)));
}

#[test]
fn test_remaining_demand_nested_depth() {
    let mut forest = ProcurementForest::new();
    let ore = forest.atom(ItemId(500));
    let crystal = forest.atom(ItemId(600));
    let and = forest.and(vec![ore, crystal]).unwrap();
    let token = forest.atom_via(ItemId(400), and).unwrap();
    let root = forest.atom_via(ItemId(300), token).unwrap();

    let occurrences = forest.occurrences(root).unwrap();
    assert_eq!(occurrences.get(ItemId(400)).unwrap().min_depth, 1);
    assert_eq!(occurrences.get(ItemId(500)).unwrap().min_depth, 2);

    forest.collect(ore).unwrap();
    let occurrences = forest.occurrences(root).unwrap();
    assert!(!occurrences.contains(ItemId(500)));
    assert_eq!(forest.remaining_count(root).unwrap(), 2);
}

#[test]
fn test_fulfilled_subtree_contributes_nothing() {
    let mut t = item_300();
    t.forest.collect(t.token).unwrap();
    assert!(t.forest.remaining_demand(t.root).unwrap().is_empty());
}

#[test]
fn test_inactive_branch_is_ignored() {
    let mut forest = ProcurementForest::new();
    let token = forest.atom(ItemId(400));
    let ore = forest.atom(ItemId(500));
    let or = forest.or(vec![token, ore]).unwrap();
    let root = forest.atom_via(ItemId(300), or).unwrap();

    forest.set_active(or, 0, false).unwrap();
    let occurrences = forest.occurrences(root).unwrap();
    assert!(!occurrences.contains(ItemId(400)));
    assert!(occurrences.contains(ItemId(500)));

    forest.collect(token).unwrap();
    assert!(!forest.is_fulfilled(root).unwrap());
}

#[test]
fn test_set_active_on_non_or_fails() {
    let mut forest = ProcurementForest::new();
    let a = forest.atom(ItemId(1));
    assert!(matches!(
        forest.set_active(a, 0, false),
        Err(LoadoutError::InvalidState(_))
    ));
}

#[test]
fn test_would_fulfill() {
    let t = item_300();
    assert!(t.forest.would_fulfill(t.root, t.token).unwrap());
    assert!(!t.forest.would_fulfill(t.root, t.ores[0]).unwrap());
    assert!(!t.forest.is_fulfilled(t.root).unwrap());
}

#[test]
fn test_reset_skips_locked_atoms() {
    let mut t = item_300();
    t.forest.collect(t.ores[0]).unwrap();
    t.forest.collect_manually(t.ores[1]).unwrap();

    t.forest.reset(t.root).unwrap();

    assert!(!t.forest.is_collected(t.ores[0]).unwrap());
    assert!(t.forest.is_collected(t.ores[1]).unwrap());
}

#[test]
fn test_cascade_skips_locked_descendants() {
    let mut forest = ProcurementForest::new();
    let leaf = forest.atom(ItemId(1));
    let sibling = forest.atom(ItemId(3));
    let and = forest.and(vec![leaf, sibling]).unwrap();
    let parent = forest.atom_via(ItemId(2), and).unwrap();

    forest.lock(leaf).unwrap();
    let changed = forest.collect(parent).unwrap();

    assert!(!changed.contains(&leaf));
    assert!(!forest.is_collected(leaf).unwrap());
    assert!(forest.is_collected(sibling).unwrap());

    forest.unlock(leaf).unwrap();
    forest.collect(parent).unwrap();
    // Already collected parent: nothing new except the released leaf.
    assert!(forest.is_collected(leaf).unwrap());
}

#[test]
fn test_unlock_returns_to_uncollected() {
    let mut forest = ProcurementForest::new();
    let leaf = forest.atom(ItemId(1));
    forest.collect_manually(leaf).unwrap();
    assert!(forest.atom_node(leaf).unwrap().locked_manually);

    forest.unlock(leaf).unwrap();
    let atom = forest.atom_node(leaf).unwrap();
    assert!(!atom.locked_manually);
    assert!(!atom.collected);
}

#[test]
fn test_locked_atoms_are_not_demanded() {
    let mut forest = ProcurementForest::new();
    let ore = forest.atom(ItemId(500));
    let crystal = forest.atom(ItemId(600));
    let and = forest.and(vec![ore, crystal]).unwrap();
    let root = forest.atom_via(ItemId(300), and).unwrap();

    forest.collect_manually(ore).unwrap();
    let occurrences = forest.occurrences(root).unwrap();
    assert!(!occurrences.contains(ItemId(500)));
    assert!(occurrences.contains(ItemId(600)));
}

#[test]
fn test_descendant_atoms_skip_composites() {
    let t = item_300();
    let atoms = t.forest.descendant_atoms(t.root).unwrap();
    assert_eq!(atoms.len(), 4);
    assert!(!atoms.contains(&t.and));
    assert!(!atoms.contains(&t.root));
}

#[test]
fn test_occurrence_merge() {
    let mut a = OccurrenceMap::new();
    a.record(ItemId(1), 3);
    let mut b = OccurrenceMap::new();
    b.record(ItemId(1), 1);
    b.record(ItemId(2), 2);

    a.merge(&b);
    assert_eq!(
        a.get(ItemId(1)),
        Some(Occurrence {
            min_depth: 1,
            count: 2
        })
    );
    assert_eq!(a.len(), 2);
}
