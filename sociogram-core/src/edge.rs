//! Probability-annotated edges produced by the scoring pass.

use std::sync::Arc;

/// Strategy sub-scores recorded when a strategy combines independent causes
/// (currently only `celebrity-union`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeComponents {
    /// Faction-affinity contribution, after any intra-faction scaling.
    pub faction: f64,
    /// Weighted popularity contribution, independent of affinity gating.
    pub celebrity: f64,
}

/// One ordered persona pair with its derived following probability.
///
/// Edges are recomputed fresh on every configuration change; the collection
/// is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEdge {
    source: Arc<str>,
    target: Arc<str>,
    probability: f64,
    components: Option<EdgeComponents>,
}

impl ScoredEdge {
    pub(crate) fn new(
        source: Arc<str>,
        target: Arc<str>,
        probability: f64,
        components: Option<EdgeComponents>,
    ) -> Self {
        Self {
            source,
            target,
            probability,
            components,
        }
    }

    /// Handle of the persona doing the following.
    #[must_use]
    pub fn source(&self) -> &Arc<str> {
        &self.source
    }

    /// Handle of the persona being followed.
    #[must_use]
    pub fn target(&self) -> &Arc<str> {
        &self.target
    }

    /// Derived probability that the edge exists. Always in [0, 1].
    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Strategy sub-scores, where the strategy computes them.
    #[must_use]
    pub const fn components(&self) -> Option<EdgeComponents> {
        self.components
    }
}
