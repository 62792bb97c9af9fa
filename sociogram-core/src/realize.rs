//! Bernoulli realization and the no-one-left-behind repair pass.
//!
//! Realization runs as two explicit phases over immutable snapshots: Phase 1
//! draws every edge independently and freezes the realized set and in-degree
//! counts; Phase 2 reads those counts and only appends, so no iteration-order
//! dependent mutation can occur.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{edge::ScoredEdge, persona::PersonaCatalog};

/// A concrete edge drawn from the probability matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealizedEdge {
    source: Arc<str>,
    target: Arc<str>,
    forced: bool,
}

impl RealizedEdge {
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

    /// Whether the repair pass added this edge rather than the random draw.
    #[must_use]
    pub const fn forced(&self) -> bool {
        self.forced
    }
}

/// One random sampling of the probability matrix into a concrete graph.
#[derive(Debug, Clone, Default)]
pub struct RealizedNetwork {
    edges: Vec<RealizedEdge>,
    in_degrees: HashMap<Arc<str>, u64>,
}

impl RealizedNetwork {
    /// Returns the realized edges, forced ones included.
    #[must_use]
    pub fn edges(&self) -> &[RealizedEdge] {
        &self.edges
    }

    /// Actual in-degree of a persona; zero for handles without inbound edges.
    #[must_use]
    pub fn in_degree(&self, handle: &str) -> u64 {
        self.in_degrees.get(handle).copied().unwrap_or(0)
    }

    /// Number of edges added by the repair pass.
    #[must_use]
    pub fn forced_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.forced()).count()
    }
}

/// Draws a concrete edge set from scored probabilities and repairs starved
/// personas.
///
/// Phase 1 performs an independent Bernoulli draw per edge: the edge exists
/// iff a uniform draw in [0, 1) lands strictly below its probability.
/// Zero-probability edges are skipped without consuming a draw. Phase 2 then
/// forces one inbound edge for every persona that drew none but has at least
/// one positive-probability inbound candidate, choosing that candidate
/// uniformly at random and marking it `forced`. Personas with no candidates
/// stay at in-degree zero; that is a normal outcome, not an error.
///
/// The repair never removes edges, never duplicates a (source, target) pair,
/// and forces at most one edge per starved persona.
#[instrument(
    name = "core.realize",
    skip_all,
    fields(scored = scored.len(), personas = catalog.len()),
)]
pub fn realize<R: Rng>(
    scored: &[ScoredEdge],
    catalog: &PersonaCatalog,
    rng: &mut R,
) -> RealizedNetwork {
    // Candidate inbound edges per target, snapshotted before any draw so the
    // repair pass reads the full model rather than the realized subset.
    let mut candidates: HashMap<&str, Vec<&ScoredEdge>> = HashMap::new();
    for edge in scored {
        if edge.probability() > 0.0 {
            candidates.entry(edge.target().as_ref()).or_default().push(edge);
        }
    }

    let mut in_degrees: HashMap<Arc<str>, u64> = catalog
        .personas()
        .iter()
        .map(|persona| (persona.handle().clone(), 0))
        .collect();
    let mut present: HashSet<(Arc<str>, Arc<str>)> = HashSet::new();
    let mut edges = Vec::new();

    for edge in scored {
        let probability = edge.probability();
        if probability <= 0.0 {
            continue;
        }
        if rng.r#gen::<f64>() < probability {
            if let Some(count) = in_degrees.get_mut(edge.target().as_ref()) {
                *count += 1;
            }
            present.insert((edge.source().clone(), edge.target().clone()));
            edges.push(RealizedEdge {
                source: edge.source().clone(),
                target: edge.target().clone(),
                forced: false,
            });
        }
    }
    let drawn = edges.len();

    for persona in catalog.personas() {
        if in_degrees.get(persona.handle().as_ref()).copied() != Some(0) {
            continue;
        }
        let Some(pool) = candidates.get(persona.handle().as_ref()) else {
            continue;
        };
        let Some(chosen) = pool.choose(rng) else {
            continue;
        };
        let pair = (chosen.source().clone(), chosen.target().clone());
        if present.contains(&pair) {
            continue;
        }
        present.insert(pair);
        if let Some(count) = in_degrees.get_mut(chosen.target().as_ref()) {
            *count += 1;
        }
        edges.push(RealizedEdge {
            source: chosen.source().clone(),
            target: chosen.target().clone(),
            forced: true,
        });
    }

    debug!(
        drawn,
        forced = edges.len() - drawn,
        "realized network from probability matrix"
    );
    RealizedNetwork { edges, in_degrees }
}
