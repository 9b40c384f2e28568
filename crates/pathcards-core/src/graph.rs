//! # Graph Model
//!
//! The read-only typed multigraph the searcher runs on.
//!
//! A model is assembled as a [`ModelDocument`] (serializable, built by an
//! external loader or by hand in tests) and frozen into a [`GraphModel`].
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic ordering,
//! and node ids are assigned in URI order, so every query answers in the same
//! order for the same document.

use crate::primitives::MAX_TRAVERSAL_DEPTH;
use crate::{EntityFeature, NodeId, NodeKind, NodeType, PathcardsError, Xref};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// RELATIONS
// =============================================================================

/// Edge kinds, stored directed `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Complex -> component entity.
    Component,
    /// Generic -> specific member, for entities and for references.
    Member,
    /// Interaction -> input participant.
    Input,
    /// Interaction -> output participant.
    Output,
    /// Control -> controlling entity.
    Controller,
    /// Control -> controlled interaction.
    Controlled,
    /// Template reaction -> product.
    Product,
    /// Entity -> canonical entity reference.
    EntityReference,
    /// Query alias for `Input` or `Output`. Never stored.
    Participant,
}

impl Relation {
    /// The stored relations a query over `self` reads.
    #[must_use]
    pub const fn stored(self) -> &'static [Relation] {
        match self {
            Self::Component => &[Self::Component],
            Self::Member => &[Self::Member],
            Self::Input => &[Self::Input],
            Self::Output => &[Self::Output],
            Self::Controller => &[Self::Controller],
            Self::Controlled => &[Self::Controlled],
            Self::Product => &[Self::Product],
            Self::EntityReference => &[Self::EntityReference],
            Self::Participant => &[Self::Input, Self::Output],
        }
    }
}

/// Traversal direction relative to the stored edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow edges `from -> to`.
    Forward,
    /// Follow edges `to -> from`.
    Backward,
}

// =============================================================================
// MODEL DOCUMENT
// =============================================================================

/// A node as it appears in a model document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable unique identifier (the model's resource URI).
    pub uri: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<Xref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<EntityFeature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_features: Vec<EntityFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular_location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl Node {
    /// Create a node with no attributes.
    #[must_use]
    pub fn new(uri: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            uri: uri.into(),
            kind,
            display_name: None,
            standard_name: None,
            names: Vec::new(),
            xrefs: Vec::new(),
            features: Vec::new(),
            not_features: Vec::new(),
            cellular_location: None,
            comments: Vec::new(),
        }
    }

    pub fn with_display_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_standard_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.standard_name = Some(name.into());
        self
    }

    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.names.push(name.into());
        self
    }

    pub fn with_xref(&mut self, db: impl Into<String>, id: impl Into<String>) -> &mut Self {
        self.xrefs.push(Xref::new(db, id));
        self
    }

    pub fn with_feature(&mut self, feature: EntityFeature) -> &mut Self {
        self.features.push(feature);
        self
    }

    pub fn with_not_feature(&mut self, feature: EntityFeature) -> &mut Self {
        self.not_features.push(feature);
        self
    }

    pub fn with_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.cellular_location = Some(location.into());
        self
    }

    pub fn with_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comments.push(comment.into());
        self
    }

    /// True if any of the node's names (display, standard or alias) equals `name`.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.display_name.as_deref() == Some(name)
            || self.standard_name.as_deref() == Some(name)
            || self.names.iter().any(|n| n == name)
    }
}

/// An edge as it appears in a model document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub relation: Relation,
    pub to: String,
}

/// Serializable representation of a model, produced by an external loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl ModelDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return it for attribute setting.
    pub fn add_node(&mut self, uri: impl Into<String>, kind: NodeKind) -> &mut Node {
        let index = self.nodes.len();
        self.nodes.push(Node::new(uri, kind));
        &mut self.nodes[index]
    }

    /// Append an edge `from -> to`.
    pub fn add_edge(&mut self, from: &str, relation: Relation, to: &str) {
        self.edges.push(EdgeRecord {
            from: from.to_string(),
            relation,
            to: to.to_string(),
        });
    }
}

// =============================================================================
// GRAPH MODEL
// =============================================================================

/// Summary counts of a built model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub entities: usize,
    pub references: usize,
    pub interactions: usize,
    pub edges: usize,
    /// Edges naming an unknown URI, or storing the `Participant` alias.
    pub dropped_edges: usize,
    /// Nodes whose URI was already taken by an earlier node.
    pub duplicate_nodes: usize,
}

/// The immutable graph.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// Node table indexed by `NodeId`, sorted by URI.
    nodes: Vec<Node>,

    /// Reverse lookup: URI -> NodeId
    uri_index: BTreeMap<String, NodeId>,

    /// Forward adjacency: (from, relation) -> targets
    outgoing: BTreeMap<(NodeId, Relation), BTreeSet<NodeId>>,

    /// Backward adjacency: (to, relation) -> sources
    incoming: BTreeMap<(NodeId, Relation), BTreeSet<NodeId>>,

    stats: ModelStats,
}

impl From<ModelDocument> for GraphModel {
    fn from(doc: ModelDocument) -> Self {
        let mut by_uri: BTreeMap<String, Node> = BTreeMap::new();
        let mut duplicate_nodes = 0usize;
        for node in doc.nodes {
            if by_uri.contains_key(&node.uri) {
                duplicate_nodes = duplicate_nodes.saturating_add(1);
                continue;
            }
            by_uri.insert(node.uri.clone(), node);
        }

        let mut model = Self::default();
        for (index, (uri, node)) in by_uri.into_iter().enumerate() {
            model.uri_index.insert(uri, NodeId(index as u32));
            model.nodes.push(node);
        }

        let mut dropped_edges = 0usize;
        for edge in doc.edges {
            let endpoints = (
                model.uri_index.get(&edge.from).copied(),
                model.uri_index.get(&edge.to).copied(),
            );
            match endpoints {
                (Some(from), Some(to)) if edge.relation != Relation::Participant => {
                    model
                        .outgoing
                        .entry((from, edge.relation))
                        .or_default()
                        .insert(to);
                    model
                        .incoming
                        .entry((to, edge.relation))
                        .or_default()
                        .insert(from);
                }
                _ => dropped_edges = dropped_edges.saturating_add(1),
            }
        }

        model.stats = ModelStats {
            entities: model.nodes.iter().filter(|n| n.kind.is_entity()).count(),
            references: model.nodes.iter().filter(|n| n.kind.is_reference()).count(),
            interactions: model
                .nodes
                .iter()
                .filter(|n| n.kind.is_interaction())
                .count(),
            edges: model.outgoing.values().map(BTreeSet::len).sum(),
            dropped_edges,
            duplicate_nodes,
        };
        model
    }
}

impl GraphModel {
    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the model has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Summary counts collected while building.
    #[must_use]
    pub fn stats(&self) -> ModelStats {
        self.stats
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Result<&Node, PathcardsError> {
        self.nodes
            .get(id.index())
            .ok_or(PathcardsError::NodeNotFound(id))
    }

    /// Get a node by id, `None` when absent.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Kind of a node, `None` when absent.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    /// Resolve a URI to its node id.
    #[must_use]
    pub fn lookup_uri(&self, uri: &str) -> Option<NodeId> {
        self.uri_index.get(uri).copied()
    }

    /// URI of a node.
    pub fn uri(&self, id: NodeId) -> Result<&str, PathcardsError> {
        self.node(id).map(|n| n.uri.as_str())
    }

    /// Iterate all nodes with their ids, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    /// All nodes assignable to `node_type`, sorted by id.
    #[must_use]
    pub fn nodes_of_type(&self, node_type: NodeType) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node_type.admits(node.kind))
            .map(|(id, _)| id)
            .collect()
    }

    /// Direct adjacency over one stored relation.
    fn adjacent(
        &self,
        node: NodeId,
        relation: Relation,
        direction: Direction,
    ) -> impl Iterator<Item = NodeId> + '_ {
        let table = match direction {
            Direction::Forward => &self.outgoing,
            Direction::Backward => &self.incoming,
        };
        table
            .get(&(node, relation))
            .into_iter()
            .flat_map(|targets| targets.iter().copied())
    }

    /// Neighbours of `node` over `relation` up to `max_depth` hops.
    ///
    /// `max_depth = 1` returns direct neighbours; larger depths return the
    /// bounded transitive closure. The start node is not included. Results
    /// are sorted by id. Depths above `MAX_TRAVERSAL_DEPTH` are clamped, so
    /// nodes further away are omitted without an error.
    pub fn neighbors(
        &self,
        node: NodeId,
        relation: Relation,
        direction: Direction,
        max_depth: usize,
    ) -> Result<Vec<NodeId>, PathcardsError> {
        self.node(node)?;
        Ok(self.reachable(node, relation.stored(), direction, max_depth, false))
    }

    /// Breadth-first closure over several relations at once.
    ///
    /// Cycle safe: every node is visited at most once. Unknown start nodes
    /// yield nothing.
    ///
    /// The closure stops after `MAX_TRAVERSAL_DEPTH` levels whatever
    /// `max_depth` asks for. Nodes beyond that level are silently left out
    /// of the result; callers cannot tell a truncated closure from a
    /// complete one.
    #[must_use]
    pub fn reachable(
        &self,
        start: NodeId,
        relations: &[Relation],
        direction: Direction,
        max_depth: usize,
        include_start: bool,
    ) -> Vec<NodeId> {
        if self.get(start).is_none() {
            return Vec::new();
        }
        let max_depth = max_depth.min(MAX_TRAVERSAL_DEPTH);

        let mut visited = BTreeSet::from([start]);
        let mut frontier = vec![start];
        let mut depth = 0usize;

        while !frontier.is_empty() && depth < max_depth {
            let mut next = BTreeSet::new();
            for &current in &frontier {
                for &relation in relations {
                    for &stored in relation.stored() {
                        for neighbor in self.adjacent(current, stored, direction) {
                            if visited.insert(neighbor) {
                                next.insert(neighbor);
                            }
                        }
                    }
                }
            }
            frontier = next.into_iter().collect();
            depth = depth.saturating_add(1);
        }

        if !include_start {
            visited.remove(&start);
        }
        visited.into_iter().collect()
    }

    /// Direct neighbours without the existence check, for hot paths.
    #[must_use]
    pub fn direct(&self, node: NodeId, relation: Relation, direction: Direction) -> Vec<NodeId> {
        self.reachable(node, &[relation], direction, 1, false)
    }

    /// True if the stored edge `from -relation-> to` exists.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, relation: Relation, to: NodeId) -> bool {
        relation.stored().iter().any(|&stored| {
            self.outgoing
                .get(&(from, stored))
                .is_some_and(|targets| targets.contains(&to))
        })
    }

    /// The canonical entity reference of an entity.
    #[must_use]
    pub fn entity_reference(&self, entity: NodeId) -> Option<NodeId> {
        self.adjacent(entity, Relation::EntityReference, Direction::Forward)
            .next()
    }

    /// True if the node has member edges, i.e. is a generic family.
    #[must_use]
    pub fn is_generic(&self, id: NodeId) -> bool {
        self.adjacent(id, Relation::Member, Direction::Forward)
            .next()
            .is_some()
    }

    /// Cross-reference ids of `node` in `database` (case-insensitive).
    pub fn cross_references(
        &self,
        node: NodeId,
        database: &str,
    ) -> Result<BTreeSet<String>, PathcardsError> {
        let node = self.node(node)?;
        Ok(node
            .xrefs
            .iter()
            .filter(|x| x.db.eq_ignore_ascii_case(database))
            .map(|x| x.id.clone())
            .collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
