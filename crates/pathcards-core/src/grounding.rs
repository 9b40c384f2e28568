//! # Grounding Module
//!
//! Resolves entities to stable external identifiers and builds the recursive
//! participant descriptions cards carry.
//!
//! Resolution order for one node:
//! - Protein-like: UniProt accession from the reference URI
//! - Small-molecule-like: PubChem compound cross reference
//! - Otherwise, and as the fallback of both: HGNC symbol cross reference
//!
//! A node that resolves to nothing is still described, by name only. Missing
//! cross references never abort extraction.

use crate::card::{EntityDescription, EntityType, FeatureRecord, Participant};
use crate::delta::map_modification_term;
use crate::primitives::{
    HGNC_SYMBOL_DB, MAX_TRAVERSAL_DEPTH, NULL_NAME, PUBCHEM_COMPOUND_DB, UNIPROT_URI_MARKER,
};
use crate::{
    Direction, EntityFeature, EntityKind, GraphModel, NodeId, NodeKind, NodeType, ReferenceKind,
    Relation,
};
use std::collections::BTreeSet;

/// Identifier resolution and participant descriptions over one model.
#[derive(Debug, Clone, Copy)]
pub struct Grounder<'a> {
    model: &'a GraphModel,
}

impl<'a> Grounder<'a> {
    #[must_use]
    pub fn new(model: &'a GraphModel) -> Self {
        Self { model }
    }

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================

    /// Grounding id of a node, e.g. `Uniprot:P04637`, `PubChem:2244` or
    /// `HGNC:TP53`.
    #[must_use]
    pub fn grounding_id(&self, node: NodeId) -> Option<String> {
        let kind = self.model.kind(node)?;
        let specific = if kind.is_protein_like() {
            self.uniprot_id(node)
        } else if kind.is_small_molecule_like() {
            self.pubchem_id(node)
        } else {
            None
        };
        specific.or_else(|| self.hgnc_symbol(node))
    }

    /// Grounding id, or a name when nothing resolves.
    #[must_use]
    pub fn grounding_id_or_name(&self, node: NodeId) -> String {
        self.grounding_id(node)
            .unwrap_or_else(|| self.pick_name(node))
    }

    /// Display name, else standard name, else first alias, else `"null"`.
    #[must_use]
    pub fn pick_name(&self, node: NodeId) -> String {
        let Some(node) = self.model.get(node) else {
            return NULL_NAME.to_string();
        };
        [node.display_name.as_deref(), node.standard_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .or_else(|| node.names.first().map(String::as_str))
            .unwrap_or(NULL_NAME)
            .to_string()
    }

    /// `Uniprot:<accession>` from the URI of the protein reference.
    fn uniprot_id(&self, node: NodeId) -> Option<String> {
        let reference = match self.model.kind(node)? {
            NodeKind::Entity(_) => self.model.entity_reference(node)?,
            _ => node,
        };
        let uri = self.model.uri(reference).ok()?;
        if !uri.contains(UNIPROT_URI_MARKER) {
            return None;
        }
        let accession = uri.rsplit('/').next()?;
        Some(format!("Uniprot:{}", accession))
    }

    fn pubchem_id(&self, node: NodeId) -> Option<String> {
        self.xref_id(node, PUBCHEM_COMPOUND_DB)
            .map(|id| format!("PubChem:{}", id))
    }

    fn hgnc_symbol(&self, node: NodeId) -> Option<String> {
        self.xref_id(node, HGNC_SYMBOL_DB)
            .map(|id| format!("HGNC:{}", id))
    }

    /// First cross reference id in `database`; simple entities fall back to
    /// their entity reference.
    fn xref_id(&self, node: NodeId, database: &str) -> Option<String> {
        let own = self
            .model
            .cross_references(node, database)
            .ok()
            .and_then(|ids| ids.into_iter().next());
        if own.is_some() {
            return own;
        }
        let kind = self.model.kind(node)?;
        if !NodeType::SimplePhysicalEntity.admits(kind) {
            return None;
        }
        let reference = self.model.entity_reference(node)?;
        self.model
            .cross_references(reference, database)
            .ok()
            .and_then(|ids| ids.into_iter().next())
    }

    // =========================================================================
    // DESCRIPTIONS
    // =========================================================================

    /// Participant description of an entity or an entity reference.
    #[must_use]
    pub fn describe(&self, node: NodeId) -> Participant {
        self.describe_at(node, 0)
    }

    fn describe_at(&self, node: NodeId, depth: usize) -> Participant {
        // malformed models may nest (or cycle) without end
        if depth >= MAX_TRAVERSAL_DEPTH {
            return Participant::Entity(EntityDescription::family(self.pick_name(node), None));
        }

        if self.model.is_generic(node) {
            let described = self
                .model
                .direct(node, Relation::Member, Direction::Forward)
                .into_iter()
                .map(|m| self.describe_at(m, depth + 1))
                .collect();
            return Participant::Entity(EntityDescription::family(
                self.pick_name(node),
                Some(described),
            ));
        }

        match self.model.kind(node) {
            Some(NodeKind::Entity(EntityKind::Complex)) => {
                let components =
                    self.model
                        .direct(node, Relation::Component, Direction::Forward);
                if components.is_empty() {
                    Participant::Entity(EntityDescription::family(self.pick_name(node), None))
                } else {
                    Participant::Complex(
                        components
                            .into_iter()
                            .map(|c| self.describe_at(c, depth + 1))
                            .collect(),
                    )
                }
            }
            Some(NodeKind::Entity(kind)) => Participant::Entity(self.describe_simple(node, kind)),
            Some(NodeKind::Reference(kind)) => {
                Participant::Entity(self.describe_reference(node, kind))
            }
            _ => Participant::Entity(EntityDescription {
                entity_type: EntityType::Unclassified,
                entity_text: self.pick_name(node),
                identifier: None,
                features: None,
                not_features: None,
                family_members: None,
            }),
        }
    }

    fn describe_simple(&self, node: NodeId, kind: EntityKind) -> EntityDescription {
        let entity_type = match kind {
            EntityKind::Protein => EntityType::Protein,
            EntityKind::SmallMolecule => EntityType::Chemical,
            EntityKind::Rna => EntityType::Rna,
            EntityKind::Dna => EntityType::Dna,
            EntityKind::Complex | EntityKind::PhysicalEntity => EntityType::Unclassified,
        };
        let (features, not_features) = match self.model.get(node) {
            Some(n) => (
                self.feature_records(&n.features),
                self.feature_records(&n.not_features),
            ),
            None => (Vec::new(), Vec::new()),
        };
        EntityDescription {
            entity_type,
            entity_text: self.pick_name(node),
            identifier: self.grounding_id(node),
            features: (!features.is_empty()).then_some(features),
            not_features: (!not_features.is_empty()).then_some(not_features),
            family_members: None,
        }
    }

    fn describe_reference(&self, node: NodeId, kind: ReferenceKind) -> EntityDescription {
        let entity_type = match kind {
            ReferenceKind::Protein => EntityType::Protein,
            ReferenceKind::SmallMolecule => EntityType::Chemical,
            ReferenceKind::Rna => EntityType::Rna,
            ReferenceKind::Dna => EntityType::Dna,
            ReferenceKind::Other => EntityType::Unclassified,
        };
        EntityDescription {
            entity_type,
            entity_text: self.pick_name(node),
            identifier: self.grounding_id(node),
            features: None,
            not_features: None,
            family_members: None,
        }
    }

    fn feature_records(&self, features: &[EntityFeature]) -> Vec<FeatureRecord> {
        features
            .iter()
            .filter_map(|feature| match feature {
                EntityFeature::Modification { term, location } => {
                    Some(FeatureRecord::Modification {
                        modification_type: map_modification_term(term),
                        position: location.and_then(|loc| loc.position()),
                    })
                }
                EntityFeature::Binding { bound_to } => {
                    let partner = self.model.lookup_uri(bound_to.as_deref()?)?;
                    Some(FeatureRecord::Binding {
                        bound_to: self.grounding_id_or_name(partner),
                    })
                }
            })
            .collect()
    }

    // =========================================================================
    // GENE-LEVEL NAMES
    // =========================================================================

    /// Gene-level names of the specific molecules behind a node, used by the
    /// SIF export: HGNC symbol when known, otherwise the picked name.
    #[must_use]
    pub fn sif_names(&self, node: NodeId) -> BTreeSet<String> {
        self.model
            .reachable(
                node,
                &[Relation::Member, Relation::Component],
                Direction::Forward,
                MAX_TRAVERSAL_DEPTH,
                true,
            )
            .into_iter()
            .filter(|&n| self.is_leaf(n))
            .map(|n| {
                self.xref_id(n, HGNC_SYMBOL_DB)
                    .unwrap_or_else(|| self.pick_name(n))
            })
            .filter(|name| name != NULL_NAME)
            .collect()
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.model
            .direct(node, Relation::Member, Direction::Forward)
            .is_empty()
            && self
                .model
                .direct(node, Relation::Component, Direction::Forward)
                .is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
