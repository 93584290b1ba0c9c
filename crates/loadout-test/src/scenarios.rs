//! Canned inputs for end-to-end solver tests.
//!
//! Every scenario owns its configurations, forest and inventory so a test can
//! hand them straight to the solver and inspect the mutated state afterwards.

use loadout_core::{Configuration, ConfigurationId, InventoryItem, ItemId, NodeId, ProcurementForest};

use crate::fixtures::{configuration, entry, subs, unit};

/// Solver input plus the handles a test needs to inspect the result.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub configurations: Vec<Configuration>,
    pub forest: ProcurementForest,
    pub inventory: Vec<InventoryItem>,
}

impl Scenario {
    /// Ids of every configuration, for solving all of them.
    pub fn all_ids(&self) -> Vec<ConfigurationId> {
        self.configurations.iter().map(|c| c.id).collect()
    }
}

/// One configuration wants item 100 melded `[5, 5]`; the inventory holds a
/// `[5, 0]` copy (first) and a `[5, 5]` copy (second).
pub fn melded_pair() -> Scenario {
    let wanted = entry(100).with_required(subs(&[5, 5])).with_capacity(2);
    Scenario {
        configurations: vec![configuration(0, vec![wanted])],
        forest: ProcurementForest::new(),
        inventory: vec![unit(100, &[5, 0]), unit(100, &[5, 5])],
    }
}

/// Two configurations want item 200 unmelded and one unit exists.
///
/// Configuration 1 declared its entry earlier (origin priority 0).
pub fn one_unit_two_configurations() -> Scenario {
    Scenario {
        configurations: vec![
            configuration(0, vec![entry(200).with_priority(3)]),
            configuration(1, vec![entry(200).with_priority(0)]),
        ],
        forest: ProcurementForest::new(),
        inventory: vec![unit(200, &[])],
    }
}

/// Handles into `Atom(300) <- Or[ Atom(400), And[Atom(500), Atom(500), Atom(600)] ]`.
#[derive(Clone, Copy, Debug)]
pub struct Item300Tree {
    pub root: NodeId,
    pub or: NodeId,
    pub token: NodeId,
    pub and: NodeId,
    pub ores: [NodeId; 2],
    pub crystal: NodeId,
}

pub fn item_300_tree(forest: &mut ProcurementForest) -> Item300Tree {
    let token = forest.atom(ItemId(400));
    let ore_a = forest.atom(ItemId(500));
    let ore_b = forest.atom(ItemId(500));
    let crystal = forest.atom(ItemId(600));
    let and = forest
        .and(vec![ore_a, ore_b, crystal])
        .expect("fresh children exist");
    let or = forest.or(vec![token, and]).expect("fresh children exist");
    let root = forest.atom_via(ItemId(300), or).expect("fresh child exists");
    Item300Tree {
        root,
        or,
        token,
        and,
        ores: [ore_a, ore_b],
        crystal,
    }
}

/// A configuration wants item 300 with the [`item_300_tree`]; the inventory holds one 400.
pub fn token_or_ores() -> (Scenario, Item300Tree) {
    let mut forest = ProcurementForest::new();
    let tree = item_300_tree(&mut forest);
    let scenario = Scenario {
        configurations: vec![configuration(0, vec![entry(300).with_procurement(tree.root)])],
        forest,
        inventory: vec![unit(400, &[])],
    };
    (scenario, tree)
}

/// Handles for [`shadowing`].
#[derive(Clone, Copy, Debug)]
pub struct ShadowHandles {
    /// `Atom(300) <- Atom(400) <- And[Atom(500), Atom(600)]`, configuration 0.
    pub first_root: NodeId,
    pub first_token: NodeId,
    pub first_ore: NodeId,
    pub first_crystal: NodeId,
    /// `Atom(700) <- Atom(900) <- And[Atom(500), Atom(950)]`, configuration 1.
    pub second_root: NodeId,
    pub second_ore: NodeId,
}

/// Two procurement trees compete for one 500.
///
/// The 500 is processed first and goes deep into the first tree (equal depth
/// and remaining count, earlier origin priority). The 400 processed next
/// completes the first tree through a shallower atom, shadowing that 500,
/// which must then be requeued into the second tree.
pub fn shadowing() -> (Scenario, ShadowHandles) {
    let mut forest = ProcurementForest::new();

    let first_ore = forest.atom(ItemId(500));
    let first_crystal = forest.atom(ItemId(600));
    let first_and = forest
        .and(vec![first_ore, first_crystal])
        .expect("fresh children exist");
    let first_token = forest.atom_via(ItemId(400), first_and).expect("fresh child exists");
    let first_root = forest.atom_via(ItemId(300), first_token).expect("fresh child exists");

    let second_ore = forest.atom(ItemId(500));
    let second_gem = forest.atom(ItemId(950));
    let second_and = forest
        .and(vec![second_ore, second_gem])
        .expect("fresh children exist");
    let second_mid = forest.atom_via(ItemId(900), second_and).expect("fresh child exists");
    let second_root = forest.atom_via(ItemId(700), second_mid).expect("fresh child exists");

    let scenario = Scenario {
        configurations: vec![
            configuration(0, vec![entry(300).with_priority(0).with_procurement(first_root)]),
            configuration(1, vec![entry(700).with_priority(1).with_procurement(second_root)]),
        ],
        forest,
        inventory: vec![unit(500, &[]), unit(400, &[])],
    };
    let handles = ShadowHandles {
        first_root,
        first_token,
        first_ore,
        first_crystal,
        second_root,
        second_ore,
    };
    (scenario, handles)
}
