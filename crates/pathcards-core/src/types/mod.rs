//! # Core Type Definitions
//!
//! This module contains the core types of the pathway model:
//! - Node identifiers (`NodeId`)
//! - The closed node variant (`NodeKind` and its entity, reference and
//!   interaction kinds)
//! - Node attributes (`Xref`, `EntityFeature`, `SequenceLocation`)
//! - Error types (`PathcardsError`)
//!
//! ## Determinism Guarantees
//!
//! All identifiers implement `Ord` so they can key `BTreeMap`/`BTreeSet`.
//! `NodeId`s are assigned in URI order when a model is built, so comparing
//! two ids is the same as comparing the URIs they stand for.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// NODE IDENTIFIER
// =============================================================================

/// Dense identifier of a node inside a built [`crate::GraphModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of the node in the model's node table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// NODE KINDS
// =============================================================================

/// Physical entity kinds.
///
/// Whether an entity is a generic family is not a kind of its own: any entity
/// with outgoing member edges is generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Protein,
    SmallMolecule,
    Rna,
    Dna,
    Complex,
    /// Untyped physical entity (neither sequence, molecule nor complex).
    PhysicalEntity,
}

/// Canonical identity kinds shared by all state variants of a molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Protein,
    SmallMolecule,
    Rna,
    Dna,
    Other,
}

/// Polarity of a control interaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ControlType {
    Activation,
    Inhibition,
    #[default]
    Unspecified,
}

impl ControlType {
    /// Sign contributed to a control path: inhibition flips it.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Inhibition => -1,
            Self::Activation | Self::Unspecified => 1,
        }
    }
}

/// Interaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// A state-transforming reaction with input and output participants.
    Conversion,
    /// A regulatory relation over another interaction.
    Control(ControlType),
    /// A production reaction (transcription, translation).
    TemplateReaction,
}

/// The closed node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Entity(EntityKind),
    Reference(ReferenceKind),
    Interaction(InteractionKind),
}

impl NodeKind {
    /// True for physical entities.
    #[must_use]
    pub const fn is_entity(self) -> bool {
        matches!(self, Self::Entity(_))
    }

    /// True for entity references.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// True for any interaction.
    #[must_use]
    pub const fn is_interaction(self) -> bool {
        matches!(self, Self::Interaction(_))
    }

    /// Control polarity, if this is a control node.
    #[must_use]
    pub const fn control_type(self) -> Option<ControlType> {
        match self {
            Self::Interaction(InteractionKind::Control(ct)) => Some(ct),
            _ => None,
        }
    }

    /// Protein entities and protein references.
    #[must_use]
    pub const fn is_protein_like(self) -> bool {
        matches!(
            self,
            Self::Entity(EntityKind::Protein) | Self::Reference(ReferenceKind::Protein)
        )
    }

    /// Small molecule entities and small molecule references.
    #[must_use]
    pub const fn is_small_molecule_like(self) -> bool {
        matches!(
            self,
            Self::Entity(EntityKind::SmallMolecule) | Self::Reference(ReferenceKind::SmallMolecule)
        )
    }
}

// =============================================================================
// NODE TYPE HIERARCHY
// =============================================================================

/// Type filter over node kinds, mirroring the class hierarchy of the
/// pathway model (a Protein is a SequenceEntity is a PhysicalEntity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    PhysicalEntity,
    /// Any entity that is neither a complex nor untyped.
    SimplePhysicalEntity,
    SequenceEntity,
    Protein,
    SmallMolecule,
    Complex,
    EntityReference,
    SequenceEntityReference,
    Interaction,
    Conversion,
    Control,
    TemplateReaction,
}

impl NodeType {
    /// True if a node of `kind` is assignable to this type.
    #[must_use]
    pub const fn admits(self, kind: NodeKind) -> bool {
        use EntityKind as E;
        use InteractionKind as I;
        use ReferenceKind as R;

        match self {
            Self::PhysicalEntity => matches!(kind, NodeKind::Entity(_)),
            Self::SimplePhysicalEntity => matches!(
                kind,
                NodeKind::Entity(E::Protein | E::SmallMolecule | E::Rna | E::Dna)
            ),
            Self::SequenceEntity => {
                matches!(kind, NodeKind::Entity(E::Protein | E::Rna | E::Dna))
            }
            Self::Protein => matches!(kind, NodeKind::Entity(E::Protein)),
            Self::SmallMolecule => matches!(kind, NodeKind::Entity(E::SmallMolecule)),
            Self::Complex => matches!(kind, NodeKind::Entity(E::Complex)),
            Self::EntityReference => matches!(kind, NodeKind::Reference(_)),
            Self::SequenceEntityReference => {
                matches!(kind, NodeKind::Reference(R::Protein | R::Rna | R::Dna))
            }
            Self::Interaction => matches!(kind, NodeKind::Interaction(_)),
            Self::Conversion => matches!(kind, NodeKind::Interaction(I::Conversion)),
            Self::Control => matches!(kind, NodeKind::Interaction(I::Control(_))),
            Self::TemplateReaction => matches!(kind, NodeKind::Interaction(I::TemplateReaction)),
        }
    }
}

// =============================================================================
// NODE ATTRIBUTES
// =============================================================================

/// Cross reference to an external database.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Xref {
    pub db: String,
    pub id: String,
}

impl Xref {
    #[must_use]
    pub fn new(db: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            id: id.into(),
        }
    }
}

/// Location of a modification on a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceLocation {
    Site(i32),
    Interval(i32, i32),
}

impl SequenceLocation {
    /// Printable position; `None` for unknown (non-positive) coordinates.
    #[must_use]
    pub fn position(self) -> Option<String> {
        match self {
            Self::Site(pos) if pos > 0 => Some(pos.to_string()),
            Self::Interval(begin, end) if begin > 0 && end > 0 => {
                Some(format!("{}-{}", begin, end))
            }
            _ => None,
        }
    }
}

/// A feature annotated on a physical entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityFeature {
    /// A chemical modification, optionally at a sequence location.
    Modification {
        term: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<SequenceLocation>,
    },
    /// A binding site; `bound_to` is the URI of the partner's entity reference.
    Binding {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bound_to: Option<String>,
    },
}

impl EntityFeature {
    /// Convenience constructor for a modification without location.
    #[must_use]
    pub fn modification(term: impl Into<String>) -> Self {
        Self::Modification {
            term: term.into(),
            location: None,
        }
    }

    /// Convenience constructor for a modification at a single site.
    #[must_use]
    pub fn modification_at(term: impl Into<String>, site: i32) -> Self {
        Self::Modification {
            term: term.into(),
            location: Some(SequenceLocation::Site(site)),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in pathcards.
///
/// - Constraint evaluation never returns an error; a broken edge simply does
///   not satisfy the constraint
/// - Pattern errors are programmer errors, raised when the pattern is built
/// - I/O and serialization errors propagate unchanged to the caller
#[derive(Debug, Error)]
pub enum PathcardsError {
    /// The requested node id is not part of the model.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A pattern step or a match lookup names a label the pattern does not have.
    #[error("Pattern '{pattern}' has no label '{label}'")]
    UnknownLabel { pattern: String, label: String },

    /// A pattern step reads a label before any earlier step introduced it.
    #[error("Pattern '{pattern}': label '{label}' used before it is introduced")]
    LabelNotBound { pattern: String, label: String },

    /// A constraint was given the wrong number of labels.
    #[error("Pattern '{pattern}': {constraint} takes {expected} labels, got {got}")]
    ArityMismatch {
        pattern: String,
        constraint: String,
        expected: usize,
        got: usize,
    },

    /// A constraint chain contains a link that cannot be chained.
    #[error("Invalid constraint chain: {0}")]
    InvalidChain(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
