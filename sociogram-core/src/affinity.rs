//! Base affinity resolution for ordered faction pairs.
//!
//! The cross-faction rules live on the *target* faction's row: that row names
//! the factions whose members follow it. Precedence is never > high >
//! moderate > unlisted, so an explicit "never" overrides accidental
//! double-listing and silence in the source data yields no assumed affinity.

use std::collections::HashMap;

use crate::{
    faction::{AffinityLabel, FactionRegistry},
    persona::PersonaCatalog,
};

/// Resolves the base probability that a persona in one faction follows a
/// persona in another, independent of popularity.
///
/// The value for a fixed configuration depends only on the ordered faction
/// pair, so resolutions are cached at that granularity for the duration of
/// one scoring pass.
///
/// # Examples
/// ```
/// use sociogram_core::{
///     AffinityResolver, FactionRegistry, FactionRow, PersonaCatalog, PersonaRow,
/// };
///
/// let registry = FactionRegistry::from_rows([
///     FactionRow {
///         name: "Red".into(),
///         intra_label: "High".into(),
///         ..FactionRow::default()
///     },
///     FactionRow {
///         name: "Blue".into(),
///         high_followers: "Red".into(),
///         ..FactionRow::default()
///     },
/// ]);
/// let catalog = PersonaCatalog::build(
///     [PersonaRow {
///         handle: "red1".into(),
///         display_name: None,
///         faction: "Red".into(),
///         popularity: 0.0,
///     }],
///     &registry,
/// );
/// let mut resolver = AffinityResolver::new(&registry, &catalog, 0.0);
/// assert_eq!(resolver.base_affinity("Red", "Red"), 0.9);
/// assert_eq!(resolver.base_affinity("Red", "Blue"), 0.9);
/// assert_eq!(resolver.base_affinity("Blue", "Red"), 0.0);
/// ```
#[derive(Debug)]
pub struct AffinityResolver<'a> {
    registry: &'a FactionRegistry,
    sizes: HashMap<String, usize>,
    exponent: f64,
    cache: HashMap<String, HashMap<String, f64>>,
}

impl<'a> AffinityResolver<'a> {
    /// Creates a resolver over the given registry and catalogue.
    ///
    /// `exponent` controls intra-faction population scaling; zero disables
    /// it. Callers are expected to validate the exponent beforehand (the
    /// builder does), so a negative value is treated as zero here.
    #[must_use]
    pub fn new(registry: &'a FactionRegistry, catalog: &PersonaCatalog, exponent: f64) -> Self {
        let sizes = catalog
            .faction_sizes()
            .into_iter()
            .map(|(name, size)| (name.as_ref().to_owned(), size))
            .collect();
        Self {
            registry,
            sizes,
            exponent: if exponent.is_finite() && exponent > 0.0 {
                exponent
            } else {
                0.0
            },
            cache: HashMap::new(),
        }
    }

    /// Base probability that a member of `source` follows a member of
    /// `target`. Always in [0, 1].
    pub fn base_affinity(&mut self, source: &str, target: &str) -> f64 {
        if let Some(value) = self.cache.get(source).and_then(|row| row.get(target)) {
            return *value;
        }
        let value = if source == target {
            self.intra(source)
        } else {
            self.cross(source, target)
        };
        self.cache
            .entry(source.to_owned())
            .or_default()
            .insert(target.to_owned(), value);
        value
    }

    /// Intra-faction affinity with optional population-size scaling.
    ///
    /// A large faction's members cannot each keep the same marginal
    /// probability of following every other member or in-degree would grow
    /// linearly with faction size; dividing by `n^exponent` interpolates
    /// between no correction (0) and roughly square-root correction (0.5).
    /// A faction of size one is never scaled.
    fn intra(&self, faction: &str) -> f64 {
        let Some(record) = self.registry.lookup(faction) else {
            return 0.0;
        };
        let base = record.intra_probability();
        let size = self.sizes.get(faction).copied().unwrap_or(0);
        if self.exponent > 0.0 && size > 1 && base > 0.0 {
            base / (size as f64).powf(self.exponent)
        } else {
            base
        }
    }

    fn cross(&self, source: &str, target: &str) -> f64 {
        let Some(record) = self.registry.lookup(target) else {
            return 0.0;
        };
        if record.claims_never_follower(source) {
            0.0
        } else if record.claims_high_follower(source) {
            AffinityLabel::High.probability()
        } else if record.claims_moderate_follower(source) {
            AffinityLabel::Moderate.probability()
        } else {
            // Silence in the source data is ambiguous; it must not inflate
            // the graph, so unlisted factions resolve to zero.
            0.0
        }
    }
}
