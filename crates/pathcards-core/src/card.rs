//! # Cards
//!
//! The structured, evidence-backed assertion emitted per match, and the
//! grounded participant descriptions it carries.
//!
//! Field order of every struct is the serialized key order, which downstream
//! consumers rely on: `model_elements`, `extracted_information`, `evidence`,
//! `card_id`.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

// =============================================================================
// PARTICIPANTS
// =============================================================================

/// Entity type strings of a participant description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EntityType {
    #[serde(rename = "protein")]
    Protein,
    #[serde(rename = "chemical")]
    Chemical,
    #[serde(rename = "RNA")]
    Rna,
    #[serde(rename = "DNA")]
    Dna,
    #[serde(rename = "Unclassified")]
    Unclassified,
    #[serde(rename = "protein_family")]
    ProteinFamily,
}

/// A feature of a described entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "feature_type", rename_all = "snake_case")]
pub enum FeatureRecord {
    Modification {
        modification_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<String>,
    },
    Binding {
        /// Grounding id, or name, of the partner.
        bound_to: String,
    },
}

/// Description of a simple entity, or of a family when `family_members`
/// is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescription {
    pub entity_type: EntityType,
    pub entity_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_features: Option<Vec<FeatureRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_members: Option<Vec<Participant>>,
}

impl EntityDescription {
    /// A family record; `members` is omitted from output when `None`.
    #[must_use]
    pub fn family(entity_text: String, members: Option<Vec<Participant>>) -> Self {
        Self {
            entity_type: EntityType::ProteinFamily,
            entity_text,
            identifier: None,
            features: None,
            not_features: None,
            family_members: members,
        }
    }
}

/// A card participant: one entity or family, or the ordered components of a
/// complex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Participant {
    Entity(EntityDescription),
    Complex(Vec<Participant>),
}

impl Participant {
    /// Grounded if it resolved to an identifier. Families and complexes are
    /// grounded when they have members and every member is grounded.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        match self {
            Self::Entity(entity) => match &entity.family_members {
                Some(members) => !members.is_empty() && members.iter().all(Self::is_grounded),
                None => entity.entity_type != EntityType::ProteinFamily && entity.identifier.is_some(),
            },
            Self::Complex(members) => !members.is_empty() && members.iter().all(Self::is_grounded),
        }
    }

    /// Leaf entity descriptions, depth first.
    #[must_use]
    pub fn leaves(&self) -> Vec<&EntityDescription> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a EntityDescription>) {
        match self {
            Self::Entity(entity) => match &entity.family_members {
                Some(members) if !members.is_empty() => {
                    for member in members {
                        member.collect_leaves(out);
                    }
                }
                _ => out.push(entity),
            },
            Self::Complex(members) => {
                for member in members {
                    member.collect_leaves(out);
                }
            }
        }
    }
}

// =============================================================================
// CARD
// =============================================================================

/// Kind of mechanism a card asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    IncreasesActivity,
    DecreasesActivity,
    AddsModification,
    RemovesModification,
    Translocation,
    Binds,
    Increases,
    Decreases,
}

impl InteractionType {
    /// Activity wording for a non-zero sign.
    #[must_use]
    pub const fn activity(sign: i8) -> Self {
        if sign < 0 {
            Self::DecreasesActivity
        } else {
            Self::IncreasesActivity
        }
    }

    /// Expression wording for a control sign.
    #[must_use]
    pub const fn expression(sign: i8) -> Self {
        if sign < 0 {
            Self::Decreases
        } else {
            Self::Increases
        }
    }
}

/// A modification listed on a modification card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModificationRecord {
    pub modification_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// A single location, or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Locations {
    One(String),
    Many(Vec<String>),
}

impl Locations {
    /// `None` for an empty set, a plain string for one element.
    #[must_use]
    pub fn from_set(set: &BTreeSet<String>) -> Option<Self> {
        let mut iter = set.iter();
        match (iter.next(), iter.next()) {
            (None, _) => None,
            (Some(one), None) => Some(Self::One(one.clone())),
            _ => Some(Self::Many(set.iter().cloned().collect())),
        }
    }
}

/// The mechanism fields of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedInformation {
    pub participant_a: Participant,
    pub participant_b: Participant,
    pub interaction_type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifications: Option<Vec<ModificationRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_location: Option<Locations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_location: Option<Locations>,
}

impl ExtractedInformation {
    #[must_use]
    pub fn new(
        participant_a: Participant,
        participant_b: Participant,
        interaction_type: InteractionType,
    ) -> Self {
        Self {
            participant_a,
            participant_b,
            interaction_type,
            modifications: None,
            from_location: None,
            to_location: None,
        }
    }
}

/// Sequential card id, serialized as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

impl Serialize for CardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// One extracted mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// URIs of the interactions that justify the card.
    pub model_elements: Vec<String>,
    pub extracted_information: ExtractedInformation,
    pub evidence: Vec<String>,
    /// Assigned by the [`crate::CardStore`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<CardId>,
}

impl Card {
    /// True if both participants are grounded.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.extracted_information.participant_a.is_grounded()
            && self.extracted_information.participant_b.is_grounded()
    }
}

// =============================================================================
// TESTS
// =============================================================================
