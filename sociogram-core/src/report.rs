//! Aggregated run output handed to presentation and export layers.

use crate::{
    degree::DegreeEntry,
    edge::ScoredEdge,
    realize::RealizedNetwork,
};

/// Degree ranking carried by a [`NetworkReport`]: expected in-degree for
/// probability-only runs, actual in-degree for realized runs.
#[derive(Debug, Clone, PartialEq)]
pub enum DegreeReport {
    /// Summed inbound probability mass per persona, ranked descending.
    Expected(Vec<DegreeEntry<f64>>),
    /// Realized inbound edge counts per persona, ranked descending.
    Actual(Vec<DegreeEntry<u64>>),
}

/// Complete output of one pipeline run.
#[derive(Debug, Clone)]
pub struct NetworkReport {
    edges: Vec<ScoredEdge>,
    realized: Option<RealizedNetwork>,
    degrees: DegreeReport,
    persona_count: usize,
}

impl NetworkReport {
    pub(crate) const fn new(
        edges: Vec<ScoredEdge>,
        realized: Option<RealizedNetwork>,
        degrees: DegreeReport,
        persona_count: usize,
    ) -> Self {
        Self {
            edges,
            realized,
            degrees,
            persona_count,
        }
    }

    /// The empty-population outcome: no edges, no realization, an empty
    /// expected ranking.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            edges: Vec::new(),
            realized: None,
            degrees: DegreeReport::Expected(Vec::new()),
            persona_count: 0,
        }
    }

    /// The full probability-annotated edge list, zero-probability edges
    /// included.
    #[must_use]
    pub fn edges(&self) -> &[ScoredEdge] {
        &self.edges
    }

    /// The realized network, when realization was requested.
    #[must_use]
    pub const fn realized(&self) -> Option<&RealizedNetwork> {
        self.realized.as_ref()
    }

    /// The degree ranking matching the run mode.
    #[must_use]
    pub const fn degrees(&self) -> &DegreeReport {
        &self.degrees
    }

    /// Number of personas included after faction filtering.
    #[must_use]
    pub const fn persona_count(&self) -> usize {
        self.persona_count
    }

    /// Whether filtering left no usable population. A normal outcome, not an
    /// error.
    #[must_use]
    pub const fn is_empty_population(&self) -> bool {
        self.persona_count == 0
    }
}
