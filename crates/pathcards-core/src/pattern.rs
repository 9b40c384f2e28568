//! # Patterns and Matches
//!
//! A pattern is an ordered list of constraint steps over named labels. The
//! first label is fixed by a node type; every later step either tests labels
//! that earlier steps introduced, or introduces exactly one new label as the
//! last argument of a generative constraint.
//!
//! Label discipline is checked by [`Pattern::add`], so a malformed pattern
//! fails while it is built and never reaches the searcher.

use crate::{Constraint, NodeId, NodeType, PathcardsError};
use std::fmt;

/// One step of a pattern: a constraint and the label slots it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub constraint: Constraint,
    /// Label indexes, in the constraint's argument order.
    pub labels: Vec<usize>,
}

/// A named, validated sequence of constraint steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    start_type: NodeType,
    labels: Vec<String>,
    steps: Vec<Step>,
}

impl Pattern {
    /// Start a pattern whose first label ranges over nodes of `start_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, start_type: NodeType, start_label: &str) -> Self {
        Self {
            name: name.into(),
            start_type,
            labels: vec![start_label.to_string()],
            steps: Vec::new(),
        }
    }

    /// Append a step.
    ///
    /// # Errors
    ///
    /// - `ArityMismatch` if the number of labels differs from the
    ///   constraint's arity.
    /// - `LabelNotBound` if the step reads a label no earlier step
    ///   introduced. Only the last label of a generative constraint may be
    ///   new.
    pub fn add(&mut self, constraint: Constraint, labels: &[&str]) -> Result<&mut Self, PathcardsError> {
        if labels.len() != constraint.arity() {
            return Err(PathcardsError::ArityMismatch {
                pattern: self.name.clone(),
                constraint: constraint.name().to_string(),
                expected: constraint.arity(),
                got: labels.len(),
            });
        }

        let mut indexes = Vec::with_capacity(labels.len());
        let mut introduced = None;
        for (position, label) in labels.iter().enumerate() {
            let is_last = position + 1 == labels.len();
            match self.position(label) {
                Some(index) => indexes.push(index),
                None if is_last && constraint.is_generative() => {
                    introduced = Some((*label).to_string());
                    indexes.push(self.labels.len());
                }
                None => {
                    return Err(PathcardsError::LabelNotBound {
                        pattern: self.name.clone(),
                        label: (*label).to_string(),
                    });
                }
            }
        }

        if let Some(label) = introduced {
            self.labels.push(label);
        }
        self.steps.push(Step {
            constraint,
            labels: indexes,
        });
        Ok(self)
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Slot of a label.
    pub fn index_of(&self, label: &str) -> Result<usize, PathcardsError> {
        self.position(label)
            .ok_or_else(|| PathcardsError::UnknownLabel {
                pattern: self.name.clone(),
                label: label.to_string(),
            })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn start_type(&self) -> NodeType {
        self.start_type
    }

    /// Labels in introduction order; slot 0 is the start label.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Human-readable rendering of one step, e.g.
    /// `Equal(false) [input PE, output PE]`.
    #[must_use]
    pub fn describe_step(&self, step: &Step) -> String {
        let names: Vec<&str> = step
            .labels
            .iter()
            .filter_map(|&i| self.labels.get(i).map(String::as_str))
            .collect();
        format!("{} [{}]", ConstraintSummary(&step.constraint), names.join(", "))
    }
}

/// Compact display of a constraint's parameters.
struct ConstraintSummary<'a>(&'a Constraint);

impl fmt::Display for ConstraintSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Constraint::Type(t) => write!(f, "Type({:?})", t),
            Constraint::Relation(traversal) => {
                write!(f, "Relation({:?} {:?}", traversal.relations, traversal.direction)?;
                if traversal.max_depth > 1 {
                    write!(f, " *")?;
                }
                if let Some(target) = traversal.target {
                    write!(f, " -> {:?}", target)?;
                }
                write!(f, ")")
            }
            Constraint::ConversionSide(side) => write!(f, "ConversionSide({:?})", side),
            Constraint::Equal(expected) => write!(f, "Equal({})", expected),
            Constraint::Not(inner) => write!(f, "Not({})", ConstraintSummary(inner)),
            Constraint::LinkToSpecific(Some(t)) => write!(f, "LinkToSpecific({:?})", t),
            Constraint::LinkToGeneric(Some(t)) => write!(f, "LinkToGeneric({:?})", t),
            Constraint::ContainsNamedComponent(name) => {
                write!(f, "ContainsNamedComponent({})", name)
            }
            Constraint::HasName(name) => write!(f, "HasName({})", name),
            Constraint::Chain(links) => {
                let parts: Vec<String> = links
                    .iter()
                    .map(|l| ConstraintSummary(l).to_string())
                    .collect();
                write!(f, "Chain({})", parts.join(" -> "))
            }
            other => write!(f, "{}", other.name()),
        }
    }
}

// =============================================================================
// MATCH
// =============================================================================

/// A complete binding of every label of a pattern, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    bindings: Vec<NodeId>,
}

impl Match {
    pub(crate) fn new(bindings: Vec<NodeId>) -> Self {
        Self { bindings }
    }

    /// Node bound to `label`.
    pub fn get(&self, pattern: &Pattern, label: &str) -> Result<NodeId, PathcardsError> {
        let index = pattern.index_of(label)?;
        self.bindings
            .get(index)
            .copied()
            .ok_or_else(|| PathcardsError::LabelNotBound {
                pattern: pattern.name().to_string(),
                label: label.to_string(),
            })
    }

    /// Nodes bound to several labels, in the given order.
    pub fn get_all(&self, pattern: &Pattern, labels: &[&str]) -> Result<Vec<NodeId>, PathcardsError> {
        labels.iter().map(|label| self.get(pattern, label)).collect()
    }

    /// All bindings in slot order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.bindings
    }
}

// =============================================================================
// TESTS
// =============================================================================
