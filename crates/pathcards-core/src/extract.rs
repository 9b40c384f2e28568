//! # Card Extraction
//!
//! Turns one archetype match into zero or more cards.
//!
//! State-change matches are differenced: the "before" state is the input
//! simple entity together with the input wrapper it was found in, the
//! "after" state likewise on the output side. One match yields, in order:
//! - an activity card, if the signed activity transition is non-zero
//! - an `adds_modification` card, if modifications were gained
//! - a `removes_modification` card, if modifications were lost
//! - a `translocation` card, if the cellular location changed
//!
//! Binding and expression matches yield exactly one card without
//! differencing. The exchange archetypes yield one activity card each.

use crate::archetype::state_labels;
use crate::card::{Card, ExtractedInformation, InteractionType, Locations, ModificationRecord};
use crate::delta::{
    LocationDelta, Modification, ModificationDelta, differential_activity, map_modification_term,
    modifications,
};
use crate::primitives::{LAYOUT_MARKER, REPLACED_MARKER};
use crate::{Archetype, CardShape, GraphModel, Grounder, Match, Node, NodeId, PathcardsError, Pattern};
use std::collections::BTreeSet;

/// True if a comment is usable as evidence text.
#[must_use]
pub fn is_evidence(comment: &str) -> bool {
    !comment.starts_with(REPLACED_MARKER) && !comment.contains(LAYOUT_MARKER)
}

/// Builds cards from matches over one model.
#[derive(Debug, Clone, Copy)]
pub struct CardExtractor<'a> {
    model: &'a GraphModel,
    grounder: Grounder<'a>,
}

/// The labels of a match resolved once for all cards of the match.
struct Roles {
    source: NodeId,
    target: NodeId,
    mediators: Vec<NodeId>,
    control_sign: i8,
}

impl<'a> CardExtractor<'a> {
    #[must_use]
    pub fn new(model: &'a GraphModel) -> Self {
        Self {
            model,
            grounder: Grounder::new(model),
        }
    }

    /// Cards for one match of `archetype`.
    ///
    /// # Errors
    ///
    /// `UnknownLabel` if `pattern` was not built for `archetype`.
    pub fn extract(
        &self,
        archetype: Archetype,
        pattern: &Pattern,
        m: &Match,
    ) -> Result<Vec<Card>, PathcardsError> {
        let roles = Roles {
            source: m.get(pattern, archetype.source_label())?,
            target: m.get(pattern, archetype.target_label())?,
            mediators: m.get_all(pattern, archetype.mediator_labels())?,
            control_sign: self.control_sign(&m.get_all(pattern, archetype.control_labels())?),
        };

        let cards = match archetype.shape() {
            CardShape::StateChange => self.state_change_cards(pattern, m, &roles)?,
            CardShape::Binding => vec![self.card(&roles, InteractionType::Binds)],
            CardShape::Expression => {
                vec![self.card(&roles, InteractionType::expression(roles.control_sign))]
            }
            CardShape::Exchange => {
                vec![self.card(&roles, InteractionType::activity(roles.control_sign))]
            }
            CardShape::Transfer => vec![self.card(&roles, InteractionType::IncreasesActivity)],
            CardShape::Activation => {
                let before = self.model.node(m.get(pattern, "input SPE")?)?;
                let after = self.model.node(m.get(pattern, "output SPE")?)?;
                let sign = differential_activity(before, after).saturating_mul(roles.control_sign);
                if sign == 0 {
                    Vec::new()
                } else {
                    vec![self.card(&roles, InteractionType::activity(sign))]
                }
            }
        };
        Ok(cards)
    }

    /// Product of the polarities of the given control nodes.
    #[must_use]
    pub fn control_sign(&self, controls: &[NodeId]) -> i8 {
        controls
            .iter()
            .filter_map(|&c| self.model.kind(c).and_then(|k| k.control_type()))
            .fold(1i8, |sign, control| sign.saturating_mul(control.sign()))
    }

    /// Comments of the mediator interactions usable as evidence.
    #[must_use]
    pub fn evidence(&self, mediators: &[NodeId]) -> Vec<String> {
        mediators
            .iter()
            .filter_map(|&m| self.model.get(m))
            .filter(|node| node.kind.is_interaction())
            .flat_map(|node| node.comments.iter())
            .filter(|comment| is_evidence(comment))
            .cloned()
            .collect()
    }

    fn state_change_cards(
        &self,
        pattern: &Pattern,
        m: &Match,
        roles: &Roles,
    ) -> Result<Vec<Card>, PathcardsError> {
        let before = self.state(pattern, m, state_labels::INPUT_SIMPLE, state_labels::INPUT_WRAPPER)?;
        let after = self.state(pattern, m, state_labels::OUTPUT_SIMPLE, state_labels::OUTPUT_WRAPPER)?;

        let mut delta = ModificationDelta::between(
            &modifications(before.iter().copied()),
            &modifications(after.iter().copied()),
        );
        let mut locations = LocationDelta::between(before.iter().copied(), after.iter().copied());

        let activity = delta.activity.saturating_mul(roles.control_sign);
        // an inhibiting controller opposes the observed change
        if roles.control_sign < 0 {
            delta = delta.swapped();
            locations = locations.swapped();
        }

        let mut cards = Vec::new();
        if activity != 0 {
            cards.push(self.card(roles, InteractionType::activity(activity)));
        }
        if !delta.gained.is_empty() {
            let mut card = self.card(roles, InteractionType::AddsModification);
            card.extracted_information.modifications = Some(records(&delta.gained));
            cards.push(card);
        }
        if !delta.lost.is_empty() {
            let mut card = self.card(roles, InteractionType::RemovesModification);
            card.extracted_information.modifications = Some(records(&delta.lost));
            cards.push(card);
        }
        if !locations.is_empty() {
            let mut card = self.card(roles, InteractionType::Translocation);
            card.extracted_information.from_location = Locations::from_set(&locations.from);
            card.extracted_information.to_location = Locations::from_set(&locations.to);
            cards.push(card);
        }
        Ok(cards)
    }

    /// The simple entity and its wrapper, once each.
    fn state(
        &self,
        pattern: &Pattern,
        m: &Match,
        simple: &str,
        wrapper: &str,
    ) -> Result<Vec<&'a Node>, PathcardsError> {
        let ids: BTreeSet<NodeId> = [m.get(pattern, simple)?, m.get(pattern, wrapper)?]
            .into_iter()
            .collect();
        ids.into_iter().map(|id| self.model.node(id)).collect()
    }

    fn card(&self, roles: &Roles, interaction_type: InteractionType) -> Card {
        Card {
            model_elements: roles
                .mediators
                .iter()
                .filter_map(|&m| self.model.get(m))
                .map(|node| node.uri.clone())
                .collect(),
            extracted_information: ExtractedInformation::new(
                self.grounder.describe(roles.source),
                self.grounder.describe(roles.target),
                interaction_type,
            ),
            evidence: self.evidence(&roles.mediators),
            card_id: None,
        }
    }
}

fn records(set: &BTreeSet<Modification>) -> Vec<ModificationRecord> {
    set.iter()
        .map(|m| ModificationRecord {
            modification_type: map_modification_term(&m.term),
            position: m.position.clone(),
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidence_markers() {
        assert!(is_evidence("Ref: PMID:12345"));
        assert!(!is_evidence("REPLACED: old text"));
        assert!(!is_evidence("drawn by @Layout@ tool"));
        // the replacement marker only counts at the start
        assert!(is_evidence("Text REPLACED later"));
    }

    #[test]
    fn records_map_vocabulary_and_keep_position() {
        let set = BTreeSet::from([
            Modification::new("O-phospho-L-serine", Some("15".to_string())),
            Modification::new("N6-acetyllysine", None),
        ]);
        let records = records(&set);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].modification_type, "Acetylation");
        assert_eq!(records[0].position, None);
        assert_eq!(records[1].modification_type, "Phosphorylation");
        assert_eq!(records[1].position.as_deref(), Some("15"));
    }
}
