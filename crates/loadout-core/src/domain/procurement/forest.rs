//! Arena storage and operations for procurement trees.

use crate::domain::ItemId;
use crate::error::{LoadoutError, Result};

use super::{AtomNode, NodeId, OccurrenceMap, OrBranch, ProcurementNode};

/// An atom that still has to be obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Demand {
    pub node: NodeId,
    pub item_id: ItemId,
    pub depth: u32,
}

/// Arena holding every procurement node.
///
/// Nodes are created bottom-up, so a child always exists before its parent and
/// the structure cannot contain cycles.
///
/// # Examples
///
/// ```
/// use loadout_core::{ItemId, ProcurementForest};
///
/// let mut forest = ProcurementForest::new();
/// let token = forest.atom(ItemId(400));
/// let ore = forest.atom(ItemId(500));
/// let or = forest.or(vec![token, ore]).unwrap();
/// let root = forest.atom_via(ItemId(300), or).unwrap();
///
/// forest.collect(token).unwrap();
/// assert!(forest.is_fulfilled(root).unwrap());
/// // Fulfilment is never written back upward.
/// assert!(!forest.is_collected(root).unwrap());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProcurementForest {
    nodes: Vec<ProcurementNode>,
}

impl ProcurementForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: ProcurementNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn check_exists(&self, ids: &[NodeId]) -> Result<()> {
        match ids.iter().find(|id| id.0 >= self.nodes.len()) {
            Some(missing) => Err(LoadoutError::UnknownNode(*missing)),
            None => Ok(()),
        }
    }

    /// Adds a raw atom (bought or dropped directly).
    pub fn atom(&mut self, item_id: ItemId) -> NodeId {
        self.push(ProcurementNode::Atom(AtomNode::new(item_id, Vec::new())))
    }

    /// Adds an atom obtained through the given subtree.
    pub fn atom_via(&mut self, item_id: ItemId, via: NodeId) -> Result<NodeId> {
        self.atom_with_alternatives(item_id, vec![via])
    }

    /// Adds an atom exactly as an upstream tree builder described it.
    ///
    /// More than one alternative is accepted here but rejected by every
    /// operation that later needs the atom's nested node.
    pub fn atom_with_alternatives(
        &mut self,
        item_id: ItemId,
        alternatives: Vec<NodeId>,
    ) -> Result<NodeId> {
        self.check_exists(&alternatives)?;
        Ok(self.push(ProcurementNode::Atom(AtomNode::new(item_id, alternatives))))
    }

    /// Adds an And node; it must have at least one child.
    pub fn and(&mut self, children: Vec<NodeId>) -> Result<NodeId> {
        if children.is_empty() {
            return Err(LoadoutError::DomainModel(
                "And node needs at least one child".to_string(),
            ));
        }
        self.check_exists(&children)?;
        Ok(self.push(ProcurementNode::And { children }))
    }

    /// Adds an Or node with every branch active; it must have at least one child.
    pub fn or(&mut self, children: Vec<NodeId>) -> Result<NodeId> {
        if children.is_empty() {
            return Err(LoadoutError::DomainModel(
                "Or node needs at least one branch".to_string(),
            ));
        }
        self.check_exists(&children)?;
        let branches = children
            .into_iter()
            .map(|node| OrBranch { node, active: true })
            .collect();
        Ok(self.push(ProcurementNode::Or { branches }))
    }

    /// Toggles one branch of an Or node.
    pub fn set_active(&mut self, or: NodeId, branch: usize, active: bool) -> Result<()> {
        match self.node_mut(or)? {
            ProcurementNode::Or { branches } => match branches.get_mut(branch) {
                Some(b) => {
                    b.active = active;
                    Ok(())
                }
                None => Err(LoadoutError::InvalidState(format!(
                    "Or node {} has no branch {}",
                    or, branch
                ))),
            },
            other => Err(LoadoutError::InvalidState(format!(
                "{} is an {} node, not Or",
                or,
                other.kind_name()
            ))),
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&ProcurementNode> {
        self.nodes.get(id.0).ok_or(LoadoutError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut ProcurementNode> {
        self.nodes.get_mut(id.0).ok_or(LoadoutError::UnknownNode(id))
    }

    pub fn atom_node(&self, id: NodeId) -> Result<&AtomNode> {
        let node = self.node(id)?;
        node.as_atom().ok_or_else(|| {
            LoadoutError::InvalidState(format!("{} is an {} node, not Atom", id, node.kind_name()))
        })
    }

    fn atom_node_mut(&mut self, id: NodeId) -> Result<&mut AtomNode> {
        let node = self.node_mut(id)?;
        let kind = node.kind_name();
        node.as_atom_mut().ok_or_else(|| {
            LoadoutError::InvalidState(format!("{} is an {} node, not Atom", id, kind))
        })
    }

    /// The node describing how to obtain an atom, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LoadoutError::ProcurementInvariant`] if the atom carries more
    /// than one alternative.
    pub fn nested(&self, id: NodeId) -> Result<Option<NodeId>> {
        let atom = self.atom_node(id)?;
        match atom.obtained_via.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => Err(LoadoutError::ProcurementInvariant {
                node: id,
                alternatives: many.len(),
            }),
        }
    }

    pub fn is_collected(&self, id: NodeId) -> Result<bool> {
        Ok(self.atom_node(id)?.collected)
    }

    fn children(&self, id: NodeId) -> Result<Vec<NodeId>> {
        match self.node(id)? {
            ProcurementNode::And { children } => Ok(children.clone()),
            ProcurementNode::Or { branches } => Ok(branches.iter().map(|b| b.node).collect()),
            ProcurementNode::Atom(_) => Ok(self.nested(id)?.into_iter().collect()),
        }
    }

    /// Checks the structural invariants of the tree under `root`.
    pub fn validate(&self, root: NodeId) -> Result<()> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            match self.node(id)? {
                ProcurementNode::And { children } if children.is_empty() => {
                    return Err(LoadoutError::DomainModel(format!("And node {} is a leaf", id)));
                }
                ProcurementNode::Or { branches } if branches.is_empty() => {
                    return Err(LoadoutError::DomainModel(format!("Or node {} is a leaf", id)));
                }
                _ => {}
            }
            let children = self.children(id)?;
            self.check_exists(&children)?;
            stack.extend(children);
        }
        Ok(())
    }

    /// Every atom strictly below `id`, in depth-first order.
    pub fn descendant_atoms(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack = self.children(id)?;
        stack.reverse();
        while let Some(next) = stack.pop() {
            if self.node(next)?.as_atom().is_some() {
                out.push(next);
            }
            let mut children = self.children(next)?;
            children.reverse();
            stack.extend(children);
        }
        Ok(out)
    }

    /// Marks an atom collected and cascades to every unlocked descendant atom.
    ///
    /// Returns the atoms whose state changed, `id` first. Ancestors are never touched.
    pub fn collect(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let descendants = self.descendant_atoms(id)?;
        let mut changed = Vec::new();

        let atom = self.atom_node_mut(id)?;
        if !atom.collected {
            atom.collected = true;
            changed.push(id);
        }

        for d in descendants {
            let atom = self.atom_node_mut(d)?;
            if !atom.locked_manually && !atom.collected {
                atom.collected = true;
                changed.push(d);
            }
        }
        Ok(changed)
    }

    /// User action: collect an atom and pin it so solving leaves it alone.
    pub fn collect_manually(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let changed = self.collect(id)?;
        self.atom_node_mut(id)?.locked_manually = true;
        Ok(changed)
    }

    /// User action: pin an atom in its current state.
    pub fn lock(&mut self, id: NodeId) -> Result<()> {
        self.atom_node_mut(id)?.locked_manually = true;
        Ok(())
    }

    /// User action: release a pinned atom back to Uncollected.
    pub fn unlock(&mut self, id: NodeId) -> Result<()> {
        let atom = self.atom_node_mut(id)?;
        atom.locked_manually = false;
        atom.collected = false;
        Ok(())
    }

    /// Returns every unlocked atom under and including `root` to Uncollected.
    pub fn reset(&mut self, root: NodeId) -> Result<()> {
        let mut atoms = self.descendant_atoms(root)?;
        if self.node(root)?.as_atom().is_some() {
            atoms.push(root);
        }
        for id in atoms {
            let atom = self.atom_node_mut(id)?;
            if !atom.locked_manually {
                atom.collected = false;
            }
        }
        Ok(())
    }

    /// Whether the requirement represented by `id` is met, by collection or by its children.
    pub fn is_fulfilled(&self, id: NodeId) -> Result<bool> {
        self.fulfilled(id, None)
    }

    /// Whether `root` would be fulfilled if `assumed` were collected.
    pub fn would_fulfill(&self, root: NodeId, assumed: NodeId) -> Result<bool> {
        self.fulfilled(root, Some(assumed))
    }

    fn fulfilled(&self, id: NodeId, assumed: Option<NodeId>) -> Result<bool> {
        match self.node(id)? {
            ProcurementNode::Atom(atom) => {
                if atom.collected || assumed == Some(id) {
                    return Ok(true);
                }
                match self.nested(id)? {
                    Some(nested) => self.fulfilled(nested, assumed),
                    None => Ok(false),
                }
            }
            ProcurementNode::And { children } => {
                for child in children {
                    if !self.fulfilled(*child, assumed)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            ProcurementNode::Or { branches } => {
                for branch in branches.iter().filter(|b| b.active) {
                    if self.fulfilled(branch.node, assumed)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Atoms under `root` that still have to be obtained.
    ///
    /// The root atom itself is excluded; its direct procurement children sit at
    /// depth 1. Fulfilled subtrees, inactive Or branches and locked atoms
    /// contribute nothing.
    pub fn remaining_demand(&self, root: NodeId) -> Result<Vec<Demand>> {
        let mut out = Vec::new();
        if self.is_fulfilled(root)? {
            return Ok(out);
        }
        match self.node(root)? {
            ProcurementNode::Atom(_) => {
                if let Some(nested) = self.nested(root)? {
                    self.walk_demand(nested, 1, &mut out)?;
                }
            }
            _ => self.walk_demand(root, 1, &mut out)?,
        }
        Ok(out)
    }

    fn walk_demand(&self, id: NodeId, depth: u32, out: &mut Vec<Demand>) -> Result<()> {
        if self.is_fulfilled(id)? {
            return Ok(());
        }
        match self.node(id)? {
            ProcurementNode::Atom(atom) => {
                if !atom.locked_manually {
                    out.push(Demand {
                        node: id,
                        item_id: atom.item_id,
                        depth,
                    });
                }
                if let Some(nested) = self.nested(id)? {
                    self.walk_demand(nested, depth + 1, out)?;
                }
            }
            ProcurementNode::And { children } => {
                for child in children {
                    self.walk_demand(*child, depth, out)?;
                }
            }
            ProcurementNode::Or { branches } => {
                for branch in branches.iter().filter(|b| b.active) {
                    self.walk_demand(branch.node, depth, out)?;
                }
            }
        }
        Ok(())
    }

    /// Number of atoms under `root` still to be obtained.
    pub fn remaining_count(&self, root: NodeId) -> Result<usize> {
        Ok(self.remaining_demand(root)?.len())
    }

    /// Aggregated `item -> (min depth, count)` over the remaining demand of `root`.
    pub fn occurrences(&self, root: NodeId) -> Result<OccurrenceMap> {
        let mut map = OccurrenceMap::new();
        for demand in self.remaining_demand(root)? {
            map.record(demand.item_id, demand.depth);
        }
        Ok(map)
    }
}
