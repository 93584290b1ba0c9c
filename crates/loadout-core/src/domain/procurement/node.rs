//! Procurement node types.

use std::fmt;

use crate::domain::ItemId;

/// Handle of a node inside a [`ProcurementForest`](super::ProcurementForest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One node of a procurement tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcurementNode {
    /// Every child is required.
    And { children: Vec<NodeId> },
    /// Any one active branch is enough.
    Or { branches: Vec<OrBranch> },
    /// A concrete item.
    Atom(AtomNode),
}

impl ProcurementNode {
    pub fn as_atom(&self) -> Option<&AtomNode> {
        match self {
            ProcurementNode::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_atom_mut(&mut self) -> Option<&mut AtomNode> {
        match self {
            ProcurementNode::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ProcurementNode::And { .. } => "And",
            ProcurementNode::Or { .. } => "Or",
            ProcurementNode::Atom(_) => "Atom",
        }
    }
}

/// A branch of an Or node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrBranch {
    pub node: NodeId,
    /// Inactive branches are ignored when computing demand and fulfilment.
    pub active: bool,
}

/// A concrete item inside a procurement tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomNode {
    pub item_id: ItemId,
    pub collected: bool,
    /// Locked atoms keep their state across resets and are never bound by the solver.
    pub locked_manually: bool,
    /// How to obtain this atom when it is not bought raw. At most one entry is valid.
    pub(crate) obtained_via: Vec<NodeId>,
}

impl AtomNode {
    pub(crate) fn new(item_id: ItemId, obtained_via: Vec<NodeId>) -> Self {
        Self {
            item_id,
            collected: false,
            locked_manually: false,
            obtained_via,
        }
    }

    pub fn is_raw(&self) -> bool {
        self.obtained_via.is_empty()
    }
}
