//! # Blacklist
//!
//! Structurally ubiquitous small molecules (ATP, water, protons) that are
//! excluded from acting as relay molecules between two reactions.
//!
//! The set is loaded once by the caller and passed explicitly to the
//! [`crate::Searcher`]; there is no process-wide instance.

use crate::{GraphModel, NodeId};
use std::collections::BTreeSet;

/// A set of ubiquitous node URIs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    uris: BTreeSet<String>,
}

impl Blacklist {
    /// An empty blacklist; nothing is considered ubiquitous.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text format: one entry per line, the first tab-separated
    /// column is the URI. Blank lines and `#` comments are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let uris = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split('\t').next())
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
            .collect();
        Self { uris }
    }

    /// Add a URI.
    pub fn insert(&mut self, uri: impl Into<String>) -> bool {
        self.uris.insert(uri.into())
    }

    /// True if `uri` is listed.
    #[must_use]
    pub fn contains_uri(&self, uri: &str) -> bool {
        self.uris.contains(uri)
    }

    /// True if the node is listed, either itself or through its entity
    /// reference (so every state variant of ATP is covered by one entry).
    #[must_use]
    pub fn is_ubiquitous(&self, model: &GraphModel, node: NodeId) -> bool {
        if self.uris.is_empty() {
            return false;
        }
        let listed = |id: NodeId| model.get(id).is_some_and(|n| self.uris.contains(&n.uri));
        listed(node) || model.entity_reference(node).is_some_and(listed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            uris: iter.into_iter().map(Into::into).collect(),
        }
    }
}
