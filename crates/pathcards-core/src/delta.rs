//! # State Differencing
//!
//! Compares a "before" and an "after" state of one molecule: gained and
//! lost modifications, the activity transition encoded by the reserved
//! active/inactive pseudo-terms, and the change of cellular location.
//!
//! All sets are `BTreeSet` so the order of emitted modifications and
//! locations is stable.

use crate::primitives::{ACTIVE_TERM, INACTIVE_TERM, MODIFICATION_VOCABULARY};
use crate::{EntityFeature, Node};
use std::collections::BTreeSet;

// =============================================================================
// MODIFICATIONS
// =============================================================================

/// A modification term with its printable position, if known.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Modification {
    pub term: String,
    pub position: Option<String>,
}

impl Modification {
    #[must_use]
    pub fn new(term: impl Into<String>, position: Option<String>) -> Self {
        Self {
            term: term.into(),
            position,
        }
    }

    fn is_pseudo(&self, pseudo: &str) -> bool {
        self.term == pseudo
    }
}

/// Modification set of one or more entities describing the same state
/// (a simple entity and the complex that wraps it).
#[must_use]
pub fn modifications<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> BTreeSet<Modification> {
    nodes
        .into_iter()
        .flat_map(|node| node.features.iter())
        .filter_map(|feature| match feature {
            EntityFeature::Modification { term, location } => Some(Modification::new(
                term.clone(),
                location.and_then(|loc| loc.position()),
            )),
            EntityFeature::Binding { .. } => None,
        })
        .collect()
}

/// Difference between two modification sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModificationDelta {
    /// `after - before`, pseudo-terms removed.
    pub gained: BTreeSet<Modification>,
    /// `before - after`, pseudo-terms removed.
    pub lost: BTreeSet<Modification>,
    /// Activity transition: +1, -1 or 0.
    pub activity: i8,
}

impl ModificationDelta {
    /// Compute the delta between two states.
    ///
    /// The activity sign is resolved in fixed order: gained-active (+1),
    /// gained-inactive (-1), lost-inactive (+1), lost-active (-1).
    #[must_use]
    pub fn between(before: &BTreeSet<Modification>, after: &BTreeSet<Modification>) -> Self {
        // activity is read from term names alone, whatever their position
        let has = |set: &BTreeSet<Modification>, term: &str| set.iter().any(|m| m.is_pseudo(term));
        let gained_active = has(after, ACTIVE_TERM) && !has(before, ACTIVE_TERM);
        let gained_inactive = has(after, INACTIVE_TERM) && !has(before, INACTIVE_TERM);
        let lost_active = has(before, ACTIVE_TERM) && !has(after, ACTIVE_TERM);
        let lost_inactive = has(before, INACTIVE_TERM) && !has(after, INACTIVE_TERM);

        let real = |m: &&Modification| !m.is_pseudo(ACTIVE_TERM) && !m.is_pseudo(INACTIVE_TERM);
        let gained = after.difference(before).filter(real).cloned().collect();
        let lost = before.difference(after).filter(real).cloned().collect();

        let activity = if gained_active {
            1
        } else if gained_inactive {
            -1
        } else if lost_inactive {
            1
        } else if lost_active {
            -1
        } else {
            0
        };

        Self {
            gained,
            lost,
            activity,
        }
    }

    /// Exchange the gained and lost sets.
    ///
    /// Used when the controller inhibits the observed conversion.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            gained: self.lost,
            lost: self.gained,
            activity: self.activity,
        }
    }

    /// True if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gained.is_empty() && self.lost.is_empty() && self.activity == 0
    }
}

/// Activity transition between two entities, from their own features.
#[must_use]
pub fn differential_activity(before: &Node, after: &Node) -> i8 {
    ModificationDelta::between(&modifications([before]), &modifications([after])).activity
}

/// Normalize a modification term through the fixed vocabulary table.
#[must_use]
pub fn map_modification_term(term: &str) -> String {
    let lower = term.to_lowercase();
    MODIFICATION_VOCABULARY
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, mapped)| (*mapped).to_string())
        .unwrap_or_else(|| format!("Unrecognized: {}", lower))
}

// =============================================================================
// LOCATIONS
// =============================================================================

/// Change of cellular location between two states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDelta {
    /// Locations only the "before" state has.
    pub from: BTreeSet<String>,
    /// Locations only the "after" state has.
    pub to: BTreeSet<String>,
}

impl LocationDelta {
    /// Compare the locations of two states, each given as the simple entity
    /// plus any entity wrapping it.
    #[must_use]
    pub fn between<'a>(
        before: impl IntoIterator<Item = &'a Node>,
        after: impl IntoIterator<Item = &'a Node>,
    ) -> Self {
        let before = locations(before);
        let after = locations(after);
        Self {
            from: before.difference(&after).cloned().collect(),
            to: after.difference(&before).cloned().collect(),
        }
    }

    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }
}

fn locations<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> BTreeSet<String> {
    nodes
        .into_iter()
        .filter_map(|node| node.cellular_location.clone())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
