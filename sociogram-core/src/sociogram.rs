//! Pipeline orchestration for the sociogram engine.
//!
//! Scores every ordered persona pair under the configured combination
//! strategy and assembles the reports handed to presentation layers.

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::{
    affinity::AffinityResolver,
    builder::CombinationStrategy,
    degree::{actual_in_degree, expected_in_degree},
    edge::{EdgeComponents, ScoredEdge},
    faction::FactionRegistry,
    persona::PersonaCatalog,
    realize::realize,
    report::{DegreeReport, NetworkReport},
};

/// Probabilistic OR of two independent causes.
fn union(a: f64, b: f64) -> f64 {
    1.0 - (1.0 - a) * (1.0 - b)
}

/// Clamps floating-point drift back into [0, 1] before any downstream use.
fn clamp_probability(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}

/// Entry point for scoring and realizing a following network.
///
/// Construct via [`crate::SociogramBuilder`]; the configuration is immutable
/// once built and a run either completes or is abandoned wholesale.
///
/// # Examples
/// ```
/// use sociogram_core::{
///     FactionRegistry, FactionRow, PersonaCatalog, PersonaRow, SociogramBuilder,
/// };
///
/// let registry = FactionRegistry::from_rows([FactionRow {
///     name: "Red".into(),
///     intra_label: "High".into(),
///     ..FactionRow::default()
/// }]);
/// let catalog = PersonaCatalog::build(
///     ["red1", "red2"].map(|handle| PersonaRow {
///         handle: handle.into(),
///         display_name: None,
///         faction: "Red".into(),
///         popularity: 0.0,
///     }),
///     &registry,
/// );
/// let engine = SociogramBuilder::new().build().expect("defaults are valid");
/// let edges = engine.score(&registry, &catalog);
/// assert_eq!(edges.len(), 2);
/// assert!(edges.iter().all(|e| (e.probability() - 0.9).abs() < 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct Sociogram {
    strategy: CombinationStrategy,
    intra_scaling_exponent: f64,
    popularity_offset: f64,
    celebrity_weight: f64,
}

impl Sociogram {
    pub(crate) const fn new(
        strategy: CombinationStrategy,
        intra_scaling_exponent: f64,
        popularity_offset: f64,
        celebrity_weight: f64,
    ) -> Self {
        Self {
            strategy,
            intra_scaling_exponent,
            popularity_offset,
            celebrity_weight,
        }
    }

    /// Returns the configured combination strategy.
    #[must_use]
    pub const fn strategy(&self) -> CombinationStrategy {
        self.strategy
    }

    /// Returns the configured intra-faction scaling exponent.
    #[must_use]
    pub const fn intra_scaling_exponent(&self) -> f64 {
        self.intra_scaling_exponent
    }

    /// Returns the configured offset-union popularity offset.
    #[must_use]
    pub const fn popularity_offset(&self) -> f64 {
        self.popularity_offset
    }

    /// Returns the configured celebrity weight.
    #[must_use]
    pub const fn celebrity_weight(&self) -> f64 {
        self.celebrity_weight
    }

    /// Computes the probability for every ordered pair of distinct personas.
    ///
    /// Quadratic in population size; every pair is potentially non-zero so no
    /// indexing shortcut exists. Zero-probability edges are kept so callers
    /// can filter on their own terms. The non-random path is deterministic:
    /// fixed configuration and input produce bit-identical probabilities.
    #[instrument(
        name = "core.score",
        skip(self, registry, catalog),
        fields(
            personas = catalog.len(),
            factions = registry.len(),
            strategy = ?self.strategy,
        ),
    )]
    pub fn score(&self, registry: &FactionRegistry, catalog: &PersonaCatalog) -> Vec<ScoredEdge> {
        let exponent = if self.strategy.honours_intra_scaling() {
            self.intra_scaling_exponent
        } else {
            0.0
        };
        let mut resolver = AffinityResolver::new(registry, catalog, exponent);
        let max_popularity = catalog.max_popularity();
        let population = catalog.len();
        let mut edges = Vec::with_capacity(population.saturating_mul(population.saturating_sub(1)));
        for source in catalog.personas() {
            for target in catalog.personas() {
                if source.handle() == target.handle() {
                    continue;
                }
                let affinity = resolver.base_affinity(source.faction(), target.faction());
                let ratio = target.popularity() / max_popularity;
                let (probability, components) = self.combine(affinity, ratio);
                edges.push(ScoredEdge::new(
                    source.handle().clone(),
                    target.handle().clone(),
                    clamp_probability(probability),
                    components,
                ));
            }
        }
        debug!(edges = edges.len(), "scored all ordered persona pairs");
        edges
    }

    /// Applies the configured combining formula to one pair's inputs.
    fn combine(&self, affinity: f64, ratio: f64) -> (f64, Option<EdgeComponents>) {
        match self.strategy {
            CombinationStrategy::UnionBaseline | CombinationStrategy::UnionScaledIntra => {
                if affinity == 0.0 {
                    // Affinity is a hard gate: popularity alone never creates
                    // an edge under the gated strategies.
                    (0.0, None)
                } else {
                    (union(affinity, ratio), None)
                }
            }
            CombinationStrategy::Multiplicative => (affinity * ratio, None),
            CombinationStrategy::OffsetUnion => {
                if affinity == 0.0 {
                    (0.0, None)
                } else {
                    ((affinity * (ratio + self.popularity_offset)).min(1.0), None)
                }
            }
            CombinationStrategy::CelebrityUnion => {
                let celebrity = self.celebrity_weight * ratio;
                let components = EdgeComponents {
                    faction: affinity,
                    celebrity,
                };
                (union(affinity, celebrity), Some(components))
            }
        }
    }

    /// Runs the non-random pipeline: scores all pairs and ranks personas by
    /// expected in-degree.
    ///
    /// An empty filtered population yields an empty report, not an error.
    #[must_use]
    pub fn report(&self, registry: &FactionRegistry, catalog: &PersonaCatalog) -> NetworkReport {
        if catalog.is_empty() {
            warn!("no personas after filtering; returning an empty report");
            return NetworkReport::empty();
        }
        let edges = self.score(registry, catalog);
        let ranking = expected_in_degree(&edges, catalog);
        NetworkReport::new(edges, None, DegreeReport::Expected(ranking), catalog.len())
    }

    /// Runs the full pipeline: scores all pairs, draws a concrete network
    /// from the probabilities, applies the no-one-left-behind repair, and
    /// ranks personas by actual in-degree.
    pub fn realize_report<R: Rng>(
        &self,
        registry: &FactionRegistry,
        catalog: &PersonaCatalog,
        rng: &mut R,
    ) -> NetworkReport {
        if catalog.is_empty() {
            warn!("no personas after filtering; returning an empty report");
            return NetworkReport::empty();
        }
        let edges = self.score(registry, catalog);
        let network = realize(&edges, catalog, rng);
        let ranking = actual_in_degree(&network, catalog);
        NetworkReport::new(
            edges,
            Some(network),
            DegreeReport::Actual(ranking),
            catalog.len(),
        )
    }
}
