//! # Card Miner
//!
//! Runs the selected archetypes in their fixed order, extracts cards from
//! every match and threads the [`CardStore`] (and optionally a
//! [`SifNetwork`]) through the pipeline.
//!
//! The miner does no logging of its own; it returns a [`MiningReport`] the
//! caller can log or print.

use crate::{
    Archetype, Blacklist, CardExtractor, CardStore, GraphModel, PathcardsError, PatternBuilder,
    Searcher, SifNetwork,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Counts for one archetype run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchetypeReport {
    pub archetype: &'static str,
    pub matches: usize,
    pub cards: usize,
}

/// Counts for a whole run, archetypes in mining order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MiningReport {
    pub archetypes: Vec<ArchetypeReport>,
    pub matches: usize,
    pub cards: usize,
}

/// One extraction run over a model.
#[derive(Debug, Clone)]
pub struct CardMiner<'a> {
    model: &'a GraphModel,
    blacklist: &'a Blacklist,
    builder: PatternBuilder,
    selected: BTreeSet<Archetype>,
}

impl<'a> CardMiner<'a> {
    /// A miner running every archetype with the default exchange molecules.
    #[must_use]
    pub fn new(model: &'a GraphModel, blacklist: &'a Blacklist) -> Self {
        Self {
            model,
            blacklist,
            builder: PatternBuilder::default(),
            selected: Archetype::ALL.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_builder(mut self, builder: PatternBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Restrict the run to these archetypes. They still run in mining
    /// order; an empty selection keeps all of them.
    #[must_use]
    pub fn with_archetypes(mut self, archetypes: impl IntoIterator<Item = Archetype>) -> Self {
        let selected: BTreeSet<Archetype> = archetypes.into_iter().collect();
        if !selected.is_empty() {
            self.selected = selected;
        }
        self
    }

    /// Archetypes this miner will run, in order.
    #[must_use]
    pub fn archetypes(&self) -> Vec<Archetype> {
        Archetype::ALL
            .into_iter()
            .filter(|a| self.selected.contains(a))
            .collect()
    }

    /// Search, extract and collect.
    ///
    /// # Errors
    ///
    /// Pattern construction errors, which abort the run before any search.
    pub fn mine(
        &self,
        store: &mut CardStore,
        mut sif: Option<&mut SifNetwork>,
    ) -> Result<MiningReport, PathcardsError> {
        let patterns = self
            .archetypes()
            .into_iter()
            .map(|a| self.builder.build(a).map(|p| (a, p)))
            .collect::<Result<Vec<_>, _>>()?;

        let searcher = Searcher::new(self.model, self.blacklist);
        let extractor = CardExtractor::new(self.model);
        let mut report = MiningReport::default();

        for (archetype, pattern) in &patterns {
            let matches = searcher.search(pattern);
            let mut emitted = 0usize;
            for m in &matches {
                let cards = extractor.extract(*archetype, pattern, m)?;
                if let Some(network) = sif.as_deref_mut() {
                    network.record(
                        self.model,
                        *archetype,
                        m.get(pattern, archetype.source_label())?,
                        m.get(pattern, archetype.target_label())?,
                        &cards,
                    );
                }
                emitted = emitted.saturating_add(cards.len());
                store.extend(cards);
            }

            report.matches = report.matches.saturating_add(matches.len());
            report.cards = report.cards.saturating_add(emitted);
            report.archetypes.push(ArchetypeReport {
                archetype: archetype.name(),
                matches: matches.len(),
                cards: emitted,
            });
        }
        Ok(report)
    }
}
