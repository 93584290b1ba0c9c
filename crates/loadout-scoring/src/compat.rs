//! Sub-component compatibility.
//!
//! Candidate sub-components are consumed one at a time against the required
//! list. Duplicates count: two required copies of an augment need two copies
//! on the unit.

use loadout_core::{ItemId, SubComponents};

/// Outcome of consuming a candidate's sub-components against a requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Consumption {
    /// Candidate sub-components that matched a required one, in candidate order.
    pub matched: SubComponents,
    /// Every required sub-component was consumed (always true for an empty requirement).
    pub satisfied: bool,
}

impl Consumption {
    pub fn common_count(&self) -> usize {
        self.matched.len()
    }
}

/// Greedily consumes `candidate` against `required`.
///
/// # Examples
///
/// ```
/// use loadout_core::ItemId;
/// use loadout_scoring::consume;
///
/// let a = ItemId(1);
/// let b = ItemId(2);
/// let c = consume(&[a, b], &[a, a, b]);
/// assert_eq!(c.common_count(), 2);
/// assert!(!c.satisfied);
/// ```
pub fn consume(candidate: &[ItemId], required: &[ItemId]) -> Consumption {
    let mut remaining: SubComponents = required.iter().copied().collect();
    let mut matched = SubComponents::new();
    for sub in candidate {
        if let Some(pos) = remaining.iter().position(|r| r == sub) {
            remaining.swap_remove(pos);
            matched.push(*sub);
        }
    }
    Consumption {
        matched,
        satisfied: remaining.is_empty(),
    }
}

/// Returns true if `candidate` covers every element of `required`, counting duplicates.
pub fn can_satisfy(candidate: &[ItemId], required: &[ItemId]) -> bool {
    consume(candidate, required).satisfied
}
