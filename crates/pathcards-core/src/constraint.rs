//! # Constraint Library
//!
//! Atomic predicates and expanders that a [`crate::Pattern`] is composed of.
//!
//! Every constraint reads a fixed number of labels (its arity). A *filter*
//! tests labels that are already bound. A *generative* constraint reads all
//! but its last label and proposes candidates for the last one; when the last
//! label is already bound it degrades to a membership test.
//!
//! ## Failure model
//!
//! Evaluation never returns an error. A missing node, a wrong node kind or an
//! absent edge simply makes the constraint unsatisfied, so one broken edge in
//! the model prunes one branch and never aborts a search.

use crate::delta::differential_activity;
use crate::primitives::MAX_TRAVERSAL_DEPTH;
use crate::{
    Blacklist, Direction, EntityKind, GraphModel, NodeId, NodeKind, NodeType, PathcardsError,
    Relation,
};
use std::collections::BTreeSet;

// =============================================================================
// EVALUATION
// =============================================================================

/// Read-only state a constraint is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub model: &'a GraphModel,
    pub blacklist: &'a Blacklist,
}

/// Outcome of evaluating one constraint against the current bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// All labels bound and the constraint holds.
    Pass,
    /// The branch must be pruned.
    Fail,
    /// Candidates for the constraint's last label, sorted by id.
    Expand(Vec<NodeId>),
}

// =============================================================================
// CONSTRAINT VARIANTS
// =============================================================================

/// Which face of a conversion a [`Constraint::ConversionSide`] yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Co-participants on the anchor's face, excluding the anchor.
    SameSide,
    /// Participants on the opposite face.
    OtherSide,
}

/// Relation walk used by [`Constraint::Relation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub relations: Vec<Relation>,
    pub direction: Direction,
    pub max_depth: usize,
    pub include_start: bool,
    /// Drop candidates listed in the blacklist.
    pub skip_ubiquitous: bool,
    /// Keep only candidates of this type.
    pub target: Option<NodeType>,
}

impl Traversal {
    /// A single hop over `relation`.
    #[must_use]
    pub fn new(relation: Relation, direction: Direction) -> Self {
        Self {
            relations: vec![relation],
            direction,
            max_depth: 1,
            include_start: false,
            skip_ubiquitous: false,
            target: None,
        }
    }

    /// Follow the relation zero-or-more times instead of once.
    #[must_use]
    pub fn closure(mut self) -> Self {
        self.max_depth = MAX_TRAVERSAL_DEPTH;
        self
    }

    /// Also traverse `relation` in the same direction.
    #[must_use]
    pub fn also(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    #[must_use]
    pub fn including_start(mut self) -> Self {
        self.include_start = true;
        self
    }

    #[must_use]
    pub fn skipping_ubiquitous(mut self) -> Self {
        self.skip_ubiquitous = true;
        self
    }

    #[must_use]
    pub fn to(mut self, target: NodeType) -> Self {
        self.target = Some(target);
        self
    }

    fn walk(&self, ctx: EvalContext<'_>, start: NodeId) -> Vec<NodeId> {
        ctx.model
            .reachable(
                start,
                &self.relations,
                self.direction,
                self.max_depth,
                self.include_start,
            )
            .into_iter()
            .filter(|&id| self.admits(ctx, id))
            .collect()
    }

    fn admits(&self, ctx: EvalContext<'_>, id: NodeId) -> bool {
        let typed = self.target.is_none_or(|t| is_a(ctx.model, id, t));
        typed && !(self.skip_ubiquitous && ctx.blacklist.is_ubiquitous(ctx.model, id))
    }
}

/// A constraint over an ordered tuple of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Filter: the node is assignable to the type.
    Type(NodeType),
    /// Generative: neighbours of the first label.
    Relation(Traversal),
    /// Generative over (anchor, conversion, new).
    ConversionSide(Side),
    /// Filter: the two labels are (or are not) the same node.
    Equal(bool),
    /// Filter: the inner constraint does not hold for the same labels.
    Not(Box<Constraint>),
    /// Filter: `id(a) < id(b)`, picks one ordering of a symmetric pair.
    CanonicalOrder,
    /// Generative: the node and everything below it over member and
    /// component edges, optionally typed.
    LinkToSpecific(Option<NodeType>),
    /// Generative: the node and everything above it over member and
    /// component edges, optionally typed.
    LinkToGeneric(Option<NodeType>),
    /// Filter: the complex nests a small molecule with this name.
    ContainsNamedComponent(String),
    /// Filter: one of the node's names equals this one.
    HasName(String),
    /// Filter: activity transition between two entities is non-zero, or
    /// equals the desired sign.
    DifferentialActivityLabel(Option<i8>),
    /// Generative: the first link's candidates mapped through each later
    /// binary link. Build with [`Constraint::chain`].
    Chain(Vec<Constraint>),
}

impl Constraint {
    /// Shorthand for `Constraint::Not`.
    #[must_use]
    pub fn not(inner: Constraint) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Compose a chain. The first link must be generative; every later link
    /// must be a generative constraint of arity 2.
    pub fn chain(links: Vec<Constraint>) -> Result<Self, PathcardsError> {
        let Some(first) = links.first() else {
            return Err(PathcardsError::InvalidChain("empty chain".to_string()));
        };
        if !first.is_generative() {
            return Err(PathcardsError::InvalidChain(format!(
                "first link {} is not generative",
                first.name()
            )));
        }
        if let Some(bad) = links
            .iter()
            .skip(1)
            .find(|link| !link.is_generative() || link.arity() != 2)
        {
            return Err(PathcardsError::InvalidChain(format!(
                "{} cannot follow another link",
                bad.name()
            )));
        }
        Ok(Self::Chain(links))
    }

    /// Short name used in error messages and listings.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Type(_) => "Type",
            Self::Relation(_) => "Relation",
            Self::ConversionSide(_) => "ConversionSide",
            Self::Equal(_) => "Equal",
            Self::Not(_) => "Not",
            Self::CanonicalOrder => "CanonicalOrder",
            Self::LinkToSpecific(_) => "LinkToSpecific",
            Self::LinkToGeneric(_) => "LinkToGeneric",
            Self::ContainsNamedComponent(_) => "ContainsNamedComponent",
            Self::HasName(_) => "HasName",
            Self::DifferentialActivityLabel(_) => "DifferentialActivityLabel",
            Self::Chain(_) => "Chain",
        }
    }

    /// Number of labels the constraint reads.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Type(_)
            | Self::ContainsNamedComponent(_)
            | Self::HasName(_) => 1,
            Self::Relation(_)
            | Self::Equal(_)
            | Self::CanonicalOrder
            | Self::LinkToSpecific(_)
            | Self::LinkToGeneric(_)
            | Self::DifferentialActivityLabel(_) => 2,
            Self::ConversionSide(_) => 3,
            Self::Not(inner) => inner.arity(),
            Self::Chain(links) => links.first().map_or(0, Constraint::arity),
        }
    }

    /// True if the constraint proposes candidates for its last label.
    #[must_use]
    pub fn is_generative(&self) -> bool {
        matches!(
            self,
            Self::Relation(_)
                | Self::ConversionSide(_)
                | Self::LinkToSpecific(_)
                | Self::LinkToGeneric(_)
                | Self::Chain(_)
        )
    }

    /// Evaluate against the labels' current bindings (`None` = unbound).
    ///
    /// A generative constraint needs every label but the last bound; a
    /// filter needs all of them. Anything else fails.
    #[must_use]
    pub fn evaluate(&self, ctx: EvalContext<'_>, args: &[Option<NodeId>]) -> Evaluation {
        if args.len() != self.arity() {
            return Evaluation::Fail;
        }

        if self.is_generative() {
            let Some((last, inputs)) = args.split_last() else {
                return Evaluation::Fail;
            };
            let Some(inputs) = bound(inputs) else {
                return Evaluation::Fail;
            };
            let candidates = self.candidates(ctx, &inputs);
            return match last {
                Some(node) if candidates.contains(node) => Evaluation::Pass,
                Some(_) => Evaluation::Fail,
                None => Evaluation::Expand(candidates),
            };
        }

        match bound(args) {
            Some(nodes) if self.holds(ctx, &nodes) => Evaluation::Pass,
            _ => Evaluation::Fail,
        }
    }

    /// True if the constraint is satisfied with every label bound.
    fn satisfied(&self, ctx: EvalContext<'_>, nodes: &[NodeId]) -> bool {
        let args: Vec<Option<NodeId>> = nodes.iter().copied().map(Some).collect();
        self.evaluate(ctx, &args) == Evaluation::Pass
    }

    /// Candidates of a generative constraint, sorted by id.
    fn candidates(&self, ctx: EvalContext<'_>, inputs: &[NodeId]) -> Vec<NodeId> {
        match (self, inputs) {
            (Self::Relation(traversal), [start]) => traversal.walk(ctx, *start),
            (Self::ConversionSide(side), [anchor, conversion]) => {
                conversion_side(ctx.model, *side, *anchor, *conversion)
            }
            (Self::LinkToSpecific(target), [start]) => {
                linked(ctx.model, *start, Direction::Forward, *target)
            }
            (Self::LinkToGeneric(target), [start]) => {
                linked(ctx.model, *start, Direction::Backward, *target)
            }
            (Self::Chain(links), _) => {
                let Some((first, rest)) = links.split_first() else {
                    return Vec::new();
                };
                let mut current: BTreeSet<NodeId> =
                    first.candidates(ctx, inputs).into_iter().collect();
                for link in rest {
                    current = current
                        .iter()
                        .flat_map(|&node| link.candidates(ctx, &[node]))
                        .collect();
                }
                current.into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Truth value of a filter with every label bound.
    fn holds(&self, ctx: EvalContext<'_>, nodes: &[NodeId]) -> bool {
        let model = ctx.model;
        match (self, nodes) {
            (Self::Type(node_type), [node]) => is_a(model, *node, *node_type),
            (Self::Equal(expected), [a, b]) => (a == b) == *expected,
            (Self::Not(inner), _) => !inner.satisfied(ctx, nodes),
            (Self::CanonicalOrder, [a, b]) => a < b,
            (Self::ContainsNamedComponent(name), [complex]) => {
                contains_named_component(model, *complex, name)
            }
            (Self::HasName(name), [node]) => model.get(*node).is_some_and(|n| n.has_name(name)),
            (Self::DifferentialActivityLabel(desired), [before, after]) => {
                match (model.get(*before), model.get(*after)) {
                    (Some(before), Some(after)) => {
                        let sign = differential_activity(before, after);
                        desired.map_or(sign != 0, |d| d == sign)
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// All labels bound, or `None`.
fn bound(args: &[Option<NodeId>]) -> Option<Vec<NodeId>> {
    args.iter().copied().collect()
}

// =============================================================================
// CONSTRAINT HELPERS
// =============================================================================

fn conversion_side(
    model: &GraphModel,
    side: Side,
    anchor: NodeId,
    conversion: NodeId,
) -> Vec<NodeId> {
    if !is_a(model, conversion, NodeType::Conversion) {
        return Vec::new();
    }
    let face = if model.has_edge(conversion, Relation::Input, anchor) {
        Relation::Input
    } else if model.has_edge(conversion, Relation::Output, anchor) {
        Relation::Output
    } else {
        return Vec::new();
    };
    match side {
        Side::SameSide => {
            let mut peers = model.direct(conversion, face, Direction::Forward);
            peers.retain(|&p| p != anchor);
            peers
        }
        Side::OtherSide => {
            let opposite = if face == Relation::Input {
                Relation::Output
            } else {
                Relation::Input
            };
            model.direct(conversion, opposite, Direction::Forward)
        }
    }
}

fn linked(
    model: &GraphModel,
    start: NodeId,
    direction: Direction,
    target: Option<NodeType>,
) -> Vec<NodeId> {
    model
        .reachable(
            start,
            &[Relation::Member, Relation::Component],
            direction,
            MAX_TRAVERSAL_DEPTH,
            true,
        )
        .into_iter()
        .filter(|&id| target.is_none_or(|t| is_a(model, id, t)))
        .collect()
}

fn contains_named_component(model: &GraphModel, complex: NodeId, name: &str) -> bool {
    if model.kind(complex) != Some(NodeKind::Entity(EntityKind::Complex)) {
        return false;
    }
    model
        .reachable(
            complex,
            &[Relation::Component],
            Direction::Forward,
            MAX_TRAVERSAL_DEPTH,
            false,
        )
        .into_iter()
        .filter(|&id| model.kind(id) == Some(NodeKind::Entity(EntityKind::SmallMolecule)))
        .any(|molecule| {
            let named = |id: NodeId| model.get(id).is_some_and(|n| n.has_name(name));
            named(molecule) || model.entity_reference(molecule).is_some_and(named)
        })
}

/// True if the node exists and is assignable to `node_type`.
fn is_a(model: &GraphModel, node: NodeId, node_type: NodeType) -> bool {
    model.kind(node).is_some_and(|k| node_type.admits(k))
}

// =============================================================================
// TESTS
// =============================================================================
