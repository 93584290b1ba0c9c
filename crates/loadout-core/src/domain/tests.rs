//! Tests for domain types.

use super::*;

fn configurations() -> Vec<Configuration> {
    vec![
        Configuration::new(ConfigurationId(1))
            .with_entry(DemandEntry::new(ItemId(100)).with_required([ItemId(5)]))
            .with_entry(DemandEntry::new(ItemId(200)).with_priority(3)),
        Configuration::new(ConfigurationId(2)).with_entry(
            DemandEntry::new(ItemId(100))
                .with_required([ItemId(5), ItemId(7), ItemId(5)])
                .with_priority(1),
        ),
    ]
}

#[test]
fn test_entry_owner_follows_holding_configuration() {
    let mut configs = configurations();
    configs.push(Configuration {
        id: ConfigurationId(7),
        entries: vec![DemandEntry::new(ItemId(200))],
    });
    assert_eq!(EntryRef::new(0, 1).owner(&configs), Some(ConfigurationId(1)));
    assert_eq!(EntryRef::new(1, 0).owner(&configs), Some(ConfigurationId(2)));
    assert_eq!(EntryRef::new(2, 0).owner(&configs), Some(ConfigurationId(7)));
    assert_eq!(EntryRef::new(3, 0).owner(&configs), None);
}

#[test]
fn test_required_sub_components_raise_capacity() {
    let entry = DemandEntry::new(ItemId(100)).with_required([ItemId(5), ItemId(5)]);
    assert_eq!(entry.sub_component_capacity, 2);

    let wide = DemandEntry::new(ItemId(100))
        .with_capacity(4)
        .with_required([ItemId(5)]);
    assert_eq!(wide.sub_component_capacity, 4);

    let narrowed = DemandEntry::new(ItemId(100))
        .with_required([ItemId(5), ItemId(5)])
        .with_capacity(1);
    assert_eq!(narrowed.sub_component_capacity, 1);
}

#[test]
fn test_entry_ref_all_in_declaration_order() {
    let configs = configurations();
    let refs: Vec<EntryRef> = EntryRef::all(&configs).collect();
    assert_eq!(
        refs,
        vec![EntryRef::new(0, 0), EntryRef::new(0, 1), EntryRef::new(1, 0)]
    );
    assert!(EntryRef::new(2, 0).resolve(&configs).is_none());
}

#[test]
fn test_group_keeps_larger_signature_sorted_descending() {
    let configs = configurations();
    let first = EntryRef::new(0, 0);
    let second = EntryRef::new(1, 0);

    let mut group = DemandGroup::seed(first, first.resolve(&configs).unwrap());
    group.absorb(second, second.resolve(&configs).unwrap());

    assert_eq!(group.signature.as_slice(), &[ItemId(7), ItemId(5), ItemId(5)]);
    assert_eq!(group.min_origin_priority, 0);
    assert_eq!(group.member_count(), 2);
    assert!(group.has_member_from(1));
    assert!(!group.is_dummy());
}

#[test]
fn test_group_remove_recomputes() {
    let configs = configurations();
    let first = EntryRef::new(0, 0);
    let second = EntryRef::new(1, 0);

    let mut group = DemandGroup::seed(first, first.resolve(&configs).unwrap());
    group.absorb(second, second.resolve(&configs).unwrap());

    assert!(group.remove(second, &configs).unwrap());
    assert_eq!(group.signature.as_slice(), &[ItemId(5)]);
    assert!(!group.remove(second, &configs).unwrap());
}

#[test]
fn test_dummy_group() {
    let group = DemandGroup::dummy(ItemId(9));
    assert!(group.is_dummy());
    assert_eq!(group.member_count(), 0);
}

#[test]
fn test_prerequisite_group_aggregates_member_trees() {
    let mut forest = ProcurementForest::new();
    let mut roots = Vec::new();
    for _ in 0..2 {
        let ore = forest.atom(ItemId(500));
        let token = forest.atom_via(ItemId(400), ore).unwrap();
        roots.push(forest.atom_via(ItemId(300), token).unwrap());
    }
    let configs = vec![
        Configuration::new(ConfigurationId(1))
            .with_entry(DemandEntry::new(ItemId(300)).with_procurement(roots[0])),
        Configuration::new(ConfigurationId(2))
            .with_entry(DemandEntry::new(ItemId(300)).with_procurement(roots[1])),
    ];

    let a = EntryRef::new(0, 0);
    let b = EntryRef::new(1, 0);
    let mut group = DemandGroup::seed(a, a.resolve(&configs).unwrap());
    group.absorb(b, b.resolve(&configs).unwrap());

    let prerequisite = PrerequisiteDemandGroup::build(group, &configs, &forest).unwrap();
    let ore = prerequisite.occurrences.get(ItemId(500)).unwrap();
    assert_eq!(ore.count, 2);
    assert_eq!(ore.min_depth, 2);
    assert!(prerequisite.wants(ItemId(400)));
    assert!(!prerequisite.wants(ItemId(300)));
}

#[test]
fn test_entry_mark_collected_and_uncollected() {
    let mut entry = DemandEntry::new(ItemId(1)).with_capacity(2);
    entry.mark_collected([ItemId(5)].into_iter().collect());
    assert!(entry.collected);
    assert_eq!(entry.attached.len(), 1);

    entry.mark_uncollected();
    assert!(!entry.collected);
    assert!(entry.attached.is_empty());
}

#[test]
fn test_assignment_satisfied_members() {
    let members = vec![EntryRef::new(0, 0)];
    let unresolved = Assignment::unresolved(members.clone());
    assert!(unresolved.satisfied_members().is_empty());

    let resolved = Assignment::resolved(InventoryItem::new(ItemId(1)), members);
    assert_eq!(resolved.satisfied_members().len(), 1);
}
