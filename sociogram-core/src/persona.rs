//! Persona records and the filtered catalogue derived from input rows.

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::faction::FactionRegistry;

/// Raw persona row handed over by an ingestion layer.
#[derive(Debug, Clone)]
pub struct PersonaRow {
    /// Globally unique handle identifying the account.
    pub handle: String,
    /// Optional display name; falls back to the handle when absent.
    pub display_name: Option<String>,
    /// Name of the faction the persona belongs to.
    pub faction: String,
    /// Raw follower-count-like popularity metric.
    pub popularity: f64,
}

/// A simulated account included in the computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    handle: Arc<str>,
    display_name: Arc<str>,
    faction: Arc<str>,
    popularity: f64,
}

impl Persona {
    /// Returns the unique handle.
    #[must_use]
    pub fn handle(&self) -> &Arc<str> {
        &self.handle
    }

    /// Returns the display name (the handle when none was supplied).
    #[must_use]
    pub fn display_name(&self) -> &Arc<str> {
        &self.display_name
    }

    /// Returns the owning faction's name.
    #[must_use]
    pub fn faction(&self) -> &Arc<str> {
        &self.faction
    }

    /// Returns the popularity metric. Always finite and non-negative.
    #[must_use]
    pub const fn popularity(&self) -> f64 {
        self.popularity
    }
}

/// Ordered, faction-filtered persona population for one computation.
///
/// Personas whose faction is unknown or ignored are dropped silently during
/// [`PersonaCatalog::build`]; the surviving set is immutable and keeps the
/// input row order.
///
/// # Examples
/// ```
/// use sociogram_core::{FactionRegistry, FactionRow, PersonaCatalog, PersonaRow};
///
/// let registry = FactionRegistry::from_rows([FactionRow {
///     name: "Red".into(),
///     ..FactionRow::default()
/// }]);
/// let catalog = PersonaCatalog::build(
///     [
///         PersonaRow {
///             handle: "red1".into(),
///             display_name: None,
///             faction: "Red".into(),
///             popularity: 10.0,
///         },
///         PersonaRow {
///             handle: "ghost".into(),
///             display_name: None,
///             faction: "Unknown".into(),
///             popularity: 99.0,
///         },
///     ],
///     &registry,
/// );
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.max_popularity(), 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// Builds the catalogue by resolving each row's faction against the
    /// registry. Rows naming an unknown or ignored faction are dropped;
    /// negative or non-finite popularity values are floored to zero.
    #[must_use]
    pub fn build(rows: impl IntoIterator<Item = PersonaRow>, registry: &FactionRegistry) -> Self {
        let mut personas = Vec::new();
        for row in rows {
            let faction_name = row.faction.trim();
            match registry.lookup(faction_name) {
                Some(faction) if !faction.ignored() => {
                    let handle: Arc<str> = Arc::from(row.handle.trim());
                    let display_name: Arc<str> = match row.display_name {
                        Some(name) if !name.trim().is_empty() => Arc::from(name.trim()),
                        _ => Arc::clone(&handle),
                    };
                    let popularity = if row.popularity.is_finite() && row.popularity > 0.0 {
                        row.popularity
                    } else {
                        0.0
                    };
                    personas.push(Persona {
                        handle,
                        display_name,
                        faction: Arc::from(faction_name),
                        popularity,
                    });
                }
                Some(_) => {
                    debug!(handle = %row.handle, faction = faction_name, "dropping persona in ignored faction");
                }
                None => {
                    debug!(handle = %row.handle, faction = faction_name, "dropping persona in unknown faction");
                }
            }
        }
        Self { personas }
    }

    /// Returns the included personas in input order.
    #[must_use]
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    /// Number of included personas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Whether the filtered population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Maximum popularity over the included personas, floored to 1.0 when the
    /// true maximum is zero so normalised ratios collapse to 0 rather than
    /// dividing by zero.
    #[must_use]
    pub fn max_popularity(&self) -> f64 {
        let max = self
            .personas
            .iter()
            .map(Persona::popularity)
            .fold(0.0_f64, f64::max);
        if max > 0.0 { max } else { 1.0 }
    }

    /// Population size per faction name, counting included personas only.
    #[must_use]
    pub fn faction_sizes(&self) -> HashMap<Arc<str>, usize> {
        let mut sizes: HashMap<Arc<str>, usize> = HashMap::new();
        for persona in &self.personas {
            *sizes.entry(Arc::clone(persona.faction())).or_insert(0) += 1;
        }
        sizes
    }

    /// Groups included personas by faction, preserving input order within
    /// each group.
    #[must_use]
    pub fn by_faction(&self) -> HashMap<Arc<str>, Vec<&Persona>> {
        let mut groups: HashMap<Arc<str>, Vec<&Persona>> = HashMap::new();
        for persona in &self.personas {
            groups
                .entry(Arc::clone(persona.faction()))
                .or_default()
                .push(persona);
        }
        groups
    }
}
