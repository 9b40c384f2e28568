//! # Searcher
//!
//! Depth-first backtracking join of a [`Pattern`] against a [`GraphModel`].
//!
//! ## Guarantees
//!
//! - Termination: every expansion follows a bounded set of existing edges and
//!   the search tree is as deep as the pattern is long.
//! - Determinism: start candidates and expansion candidates are both visited
//!   in id order, so matches come out in the same order on every run.
//! - Completeness: every binding that satisfies all steps is emitted. The
//!   searcher never deduplicates; symmetric patterns carry an explicit
//!   `CanonicalOrder` step instead.

use crate::{Blacklist, EvalContext, Evaluation, GraphModel, Match, NodeId, Pattern};

/// Runs patterns against one model and one blacklist.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    ctx: EvalContext<'a>,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(model: &'a GraphModel, blacklist: &'a Blacklist) -> Self {
        Self {
            ctx: EvalContext { model, blacklist },
        }
    }

    /// All matches of `pattern`, start nodes visited in id order.
    #[must_use]
    pub fn search(&self, pattern: &Pattern) -> Vec<Match> {
        let mut matches = Vec::new();
        for start in self.ctx.model.nodes_of_type(pattern.start_type()) {
            self.collect_from(pattern, start, &mut matches);
        }
        matches
    }

    /// All matches of `pattern` whose start label is bound to `start`.
    ///
    /// Empty if `start` is not assignable to the pattern's start type.
    #[must_use]
    pub fn search_from(&self, pattern: &Pattern, start: NodeId) -> Vec<Match> {
        let mut matches = Vec::new();
        let admitted = self
            .ctx
            .model
            .kind(start)
            .is_some_and(|kind| pattern.start_type().admits(kind));
        if admitted {
            self.collect_from(pattern, start, &mut matches);
        }
        matches
    }

    fn collect_from(&self, pattern: &Pattern, start: NodeId, out: &mut Vec<Match>) {
        let mut bindings = vec![None; pattern.labels().len()];
        if let Some(slot) = bindings.first_mut() {
            *slot = Some(start);
        }
        self.extend(pattern, 0, &mut bindings, out);
    }

    /// Satisfy `pattern.steps()[step..]` under the current bindings.
    fn extend(
        &self,
        pattern: &Pattern,
        step: usize,
        bindings: &mut [Option<NodeId>],
        out: &mut Vec<Match>,
    ) {
        let Some(current) = pattern.steps().get(step) else {
            // every step satisfied; a well-formed pattern has bound every label
            if let Some(nodes) = bindings.iter().copied().collect::<Option<Vec<_>>>() {
                out.push(Match::new(nodes));
            }
            return;
        };

        let args: Vec<Option<NodeId>> = current
            .labels
            .iter()
            .map(|&slot| bindings.get(slot).copied().flatten())
            .collect();

        match current.constraint.evaluate(self.ctx, &args) {
            Evaluation::Pass => self.extend(pattern, step + 1, bindings, out),
            Evaluation::Fail => {}
            Evaluation::Expand(candidates) => {
                let Some(&slot) = current.labels.last() else {
                    return;
                };
                for candidate in candidates {
                    if let Some(binding) = bindings.get_mut(slot) {
                        *binding = Some(candidate);
                    }
                    self.extend(pattern, step + 1, bindings, out);
                }
                if let Some(binding) = bindings.get_mut(slot) {
                    *binding = None;
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
