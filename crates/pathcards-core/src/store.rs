//! # Card Store
//!
//! Append-only accumulation of cards across every archetype of one run.
//! Ids are assigned on push, so card ids follow emission order.

use crate::card::{Card, CardId};
use crate::PathcardsError;
use serde::Serialize;
use std::collections::BTreeSet;

/// Grounding coverage of the stored cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroundingStats {
    pub cards: usize,
    /// Cards with at least one participant not fully grounded.
    pub ungrounded_cards: usize,
    /// Distinct leaf entities that resolved to an identifier.
    pub grounded_entities: usize,
    /// Distinct leaf entities known only by name.
    pub ungrounded_entities: usize,
}

/// Ordered cards of one extraction run.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card, assigning the next id (starting at 1).
    pub fn push(&mut self, mut card: Card) -> CardId {
        let id = CardId((self.cards.len() as u32).saturating_add(1));
        card.card_id = Some(id);
        self.cards.push(card);
        id
    }

    /// Append several cards in order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.push(card);
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count grounded and ungrounded cards and leaf entities.
    #[must_use]
    pub fn grounding_stats(&self) -> GroundingStats {
        let mut grounded = BTreeSet::new();
        let mut ungrounded = BTreeSet::new();
        for card in &self.cards {
            let info = &card.extracted_information;
            for participant in [&info.participant_a, &info.participant_b] {
                for leaf in participant.leaves() {
                    match &leaf.identifier {
                        Some(id) => grounded.insert(id.clone()),
                        None => ungrounded.insert(leaf.entity_text.clone()),
                    };
                }
            }
        }

        GroundingStats {
            cards: self.cards.len(),
            ungrounded_cards: self.cards.iter().filter(|c| !c.is_grounded()).count(),
            grounded_entities: grounded.len(),
            ungrounded_entities: ungrounded.len(),
        }
    }

    /// Pretty JSON array of the cards.
    pub fn to_json(&self) -> Result<String, PathcardsError> {
        serde_json::to_string_pretty(&self.cards)
            .map_err(|e| PathcardsError::SerializationError(e.to_string()))
    }

    /// Compact JSON array of the cards.
    pub fn to_json_compact(&self) -> Result<String, PathcardsError> {
        serde_json::to_string(&self.cards)
            .map_err(|e| PathcardsError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{EntityDescription, EntityType, ExtractedInformation, InteractionType, Participant};

    fn entity(name: &str, id: Option<&str>) -> Participant {
        Participant::Entity(EntityDescription {
            entity_type: EntityType::Protein,
            entity_text: name.to_string(),
            identifier: id.map(str::to_string),
            features: None,
            not_features: None,
            family_members: None,
        })
    }

    fn card(a: Participant, b: Participant) -> Card {
        Card {
            model_elements: Vec::new(),
            extracted_information: ExtractedInformation::new(a, b, InteractionType::Binds),
            evidence: Vec::new(),
            card_id: None,
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut store = CardStore::new();
        let first = store.push(card(entity("A", None), entity("B", None)));
        store.extend([
            card(entity("A", None), entity("C", None)),
            card(entity("B", None), entity("C", None)),
        ]);

        assert_eq!(first, CardId(1));
        let ids: Vec<Option<CardId>> = store.cards().iter().map(|c| c.card_id).collect();
        assert_eq!(ids, vec![Some(CardId(1)), Some(CardId(2)), Some(CardId(3))]);
    }

    #[test]
    fn grounding_requires_both_participants() {
        let mut store = CardStore::new();
        store.push(card(
            entity("TP53", Some("Uniprot:P04637")),
            entity("MDM2", Some("Uniprot:Q00987")),
        ));
        store.push(card(entity("TP53", Some("Uniprot:P04637")), entity("X", None)));

        let stats = store.grounding_stats();
        assert_eq!(stats.cards, 2);
        assert_eq!(stats.ungrounded_cards, 1);
        assert_eq!(stats.grounded_entities, 2);
        assert_eq!(stats.ungrounded_entities, 1);
    }

    #[test]
    fn json_is_an_array_with_string_ids() {
        let mut store = CardStore::new();
        store.push(card(entity("A", None), entity("B", None)));
        let value: serde_json::Value =
            serde_json::from_str(&store.to_json().expect("json")).expect("parse");
        assert_eq!(value[0]["card_id"], "1");
        assert_eq!(value[0]["extracted_information"]["interaction_type"], "binds");
        assert!(CardStore::new().to_json_compact().expect("json") == "[]");
    }
}
