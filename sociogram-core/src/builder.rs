//! Builder and strategy selection for the sociogram engine.
//!
//! Every tunable the model reads is an explicit field here with a documented
//! default and valid range; nothing is carried through ambient state.

use crate::{Result, error::SociogramError, sociogram::Sociogram};

/// Policy for combining faction affinity with target popularity into one
/// edge probability.
///
/// These are variants of a single engine, not separate systems: the
/// surrounding pipeline is identical and only the combining formula differs.
///
/// # Examples
/// ```
/// use sociogram_core::CombinationStrategy;
///
/// assert!(CombinationStrategy::UnionBaseline.gates_on_affinity());
/// assert!(!CombinationStrategy::CelebrityUnion.gates_on_affinity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinationStrategy {
    /// Probabilistic OR of affinity and popularity; zero affinity yields a
    /// zero edge. Intra-faction affinities are never size-scaled.
    UnionBaseline,
    /// Same union formula, but intra-faction affinities pass through the
    /// configured population-size scaling first.
    UnionScaledIntra,
    /// Product of affinity and popularity ratio; intentionally harsher, as
    /// zero-popularity targets receive no edges at all.
    Multiplicative,
    /// `min(1, affinity * (ratio + offset))`; a positive offset guarantees a
    /// baseline contribution from affinity alone so low-popularity targets
    /// with nonzero affinity are not starved.
    OffsetUnion,
    /// Union of a weighted popularity term with the faction affinity. The
    /// only strategy where popularity alone can produce an edge when
    /// affinity is exactly zero.
    CelebrityUnion,
}

impl CombinationStrategy {
    /// Whether zero base affinity forces the edge probability to exactly
    /// zero regardless of popularity.
    #[must_use]
    pub const fn gates_on_affinity(self) -> bool {
        !matches!(self, Self::CelebrityUnion)
    }

    /// Whether the configured intra-faction scaling exponent applies. The
    /// baseline union always uses the unscaled intra probability so the
    /// baseline/scaled pair differ only in the affinity input.
    #[must_use]
    pub const fn honours_intra_scaling(self) -> bool {
        !matches!(self, Self::UnionBaseline)
    }
}

/// Configures and constructs [`Sociogram`] instances.
///
/// # Examples
/// ```
/// use sociogram_core::{CombinationStrategy, SociogramBuilder};
///
/// let engine = SociogramBuilder::new()
///     .with_strategy(CombinationStrategy::OffsetUnion)
///     .with_popularity_offset(0.2)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(engine.strategy(), CombinationStrategy::OffsetUnion);
/// assert_eq!(engine.popularity_offset(), 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct SociogramBuilder {
    strategy: CombinationStrategy,
    intra_scaling_exponent: f64,
    popularity_offset: f64,
    celebrity_weight: f64,
}

impl Default for SociogramBuilder {
    fn default() -> Self {
        Self {
            strategy: CombinationStrategy::UnionBaseline,
            intra_scaling_exponent: 0.0,
            popularity_offset: 0.3,
            celebrity_weight: 0.5,
        }
    }
}

impl SociogramBuilder {
    /// Creates a builder populated with default parameters: the baseline
    /// union strategy, no intra-faction scaling, a 0.3 popularity offset,
    /// and a 0.5 celebrity weight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the combination strategy. Default: `UnionBaseline`.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: CombinationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured combination strategy.
    #[must_use]
    pub const fn strategy(&self) -> CombinationStrategy {
        self.strategy
    }

    /// Sets the intra-faction scaling exponent. Valid range `[0, ∞)`;
    /// default 0 (no correction). Around 0.5 gives roughly square-root
    /// correction.
    #[must_use]
    pub const fn with_intra_scaling_exponent(mut self, exponent: f64) -> Self {
        self.intra_scaling_exponent = exponent;
        self
    }

    /// Returns the configured intra-faction scaling exponent.
    #[must_use]
    pub const fn intra_scaling_exponent(&self) -> f64 {
        self.intra_scaling_exponent
    }

    /// Sets the offset-union popularity offset. Valid range `[0, 1]`;
    /// default 0.3.
    #[must_use]
    pub const fn with_popularity_offset(mut self, offset: f64) -> Self {
        self.popularity_offset = offset;
        self
    }

    /// Returns the configured popularity offset.
    #[must_use]
    pub const fn popularity_offset(&self) -> f64 {
        self.popularity_offset
    }

    /// Sets the celebrity weight applied to the popularity ratio under
    /// `CelebrityUnion`. Valid range `[0, 1]`; default 0.5.
    #[must_use]
    pub const fn with_celebrity_weight(mut self, weight: f64) -> Self {
        self.celebrity_weight = weight;
        self
    }

    /// Returns the configured celebrity weight.
    #[must_use]
    pub const fn celebrity_weight(&self) -> f64 {
        self.celebrity_weight
    }

    /// Validates the configuration and constructs a [`Sociogram`].
    ///
    /// # Errors
    /// Returns [`SociogramError::InvalidScalingExponent`] for a negative or
    /// non-finite exponent, and [`SociogramError::InvalidPopularityOffset`] /
    /// [`SociogramError::InvalidCelebrityWeight`] for parameters outside
    /// `[0, 1]`.
    pub fn build(self) -> Result<Sociogram> {
        if !self.intra_scaling_exponent.is_finite() || self.intra_scaling_exponent < 0.0 {
            return Err(SociogramError::InvalidScalingExponent {
                got: self.intra_scaling_exponent,
            });
        }
        if !self.popularity_offset.is_finite()
            || !(0.0..=1.0).contains(&self.popularity_offset)
        {
            return Err(SociogramError::InvalidPopularityOffset {
                got: self.popularity_offset,
            });
        }
        if !self.celebrity_weight.is_finite() || !(0.0..=1.0).contains(&self.celebrity_weight) {
            return Err(SociogramError::InvalidCelebrityWeight {
                got: self.celebrity_weight,
            });
        }
        Ok(Sociogram::new(
            self.strategy,
            self.intra_scaling_exponent,
            self.popularity_offset,
            self.celebrity_weight,
        ))
    }
}
