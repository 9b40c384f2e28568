//! # SIF Export
//!
//! Flat subject-relation-object triples projected from the same matches the
//! cards come from. Names are gene-level (see [`Grounder::sif_names`]);
//! triples are kept sorted and de-duplicated.

use crate::card::{Card, InteractionType};
use crate::{Archetype, CardShape, GraphModel, Grounder, NodeId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Relation types of the triple export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SifRelation {
    ControlsStateChangeOf,
    ControlsTransportOf,
    ControlsExpressionOf,
    InComplexWith,
}

impl SifRelation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ControlsStateChangeOf => "controls-state-change-of",
            Self::ControlsTransportOf => "controls-transport-of",
            Self::ControlsExpressionOf => "controls-expression-of",
            Self::InComplexWith => "in-complex-with",
        }
    }

    /// Undirected relations store their endpoints in sorted order.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::InComplexWith)
    }
}

impl fmt::Display for SifRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SifTriple {
    pub source: String,
    pub relation: SifRelation,
    pub target: String,
}

/// The sorted, de-duplicated triple set.
#[derive(Debug, Clone, Default)]
pub struct SifNetwork {
    triples: BTreeSet<SifTriple>,
}

impl SifNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple; self loops are dropped and symmetric relations are
    /// normalized.
    pub fn insert(&mut self, source: String, relation: SifRelation, target: String) -> bool {
        if source == target {
            return false;
        }
        let (source, target) = if relation.is_symmetric() && target < source {
            (target, source)
        } else {
            (source, target)
        };
        self.triples.insert(SifTriple {
            source,
            relation,
            target,
        })
    }

    /// Project one match, given the cards it produced.
    ///
    /// State-change style matches contribute a transport triple when a
    /// translocation card was emitted and a state-change triple for any
    /// other card. Matches that produced no card contribute nothing.
    pub fn record(
        &mut self,
        model: &GraphModel,
        archetype: Archetype,
        source: NodeId,
        target: NodeId,
        cards: &[Card],
    ) {
        let mut relations = BTreeSet::new();
        for card in cards {
            let relation = match (archetype.shape(), card.extracted_information.interaction_type) {
                (CardShape::Binding, _) => SifRelation::InComplexWith,
                (CardShape::Expression, _) => SifRelation::ControlsExpressionOf,
                (_, InteractionType::Translocation) => SifRelation::ControlsTransportOf,
                _ => SifRelation::ControlsStateChangeOf,
            };
            relations.insert(relation);
        }
        if relations.is_empty() {
            return;
        }

        let grounder = Grounder::new(model);
        let sources = grounder.sif_names(source);
        let targets = grounder.sif_names(target);
        for relation in relations {
            for s in &sources {
                for t in &targets {
                    self.insert(s.clone(), relation, t.clone());
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> impl Iterator<Item = &SifTriple> {
        self.triples.iter()
    }

    /// Tab-separated text, one triple per line.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            out.push_str(&format!(
                "{}\t{}\t{}\n",
                triple.source, triple.relation, triple.target
            ));
        }
        out
    }
}
