//! Expected and actual in-degree rankings.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use crate::{
    edge::ScoredEdge,
    persona::{Persona, PersonaCatalog},
    realize::RealizedNetwork,
};

/// One persona's position in a degree ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeEntry<T> {
    handle: Arc<str>,
    display_name: Arc<str>,
    faction: Arc<str>,
    value: T,
}

impl<T: Copy> DegreeEntry<T> {
    /// Persona handle.
    #[must_use]
    pub fn handle(&self) -> &Arc<str> {
        &self.handle
    }

    /// Persona display name.
    #[must_use]
    pub fn display_name(&self) -> &Arc<str> {
        &self.display_name
    }

    /// Owning faction name.
    #[must_use]
    pub fn faction(&self) -> &Arc<str> {
        &self.faction
    }

    /// The degree value this entry is ranked by.
    #[must_use]
    pub const fn value(&self) -> T {
        self.value
    }
}

/// Sums inbound edge probabilities per persona and ranks descending.
///
/// Personas with no inbound probability mass appear with 0.0. Ties keep the
/// catalogue's input order (stable sort). The sum over all entries equals the
/// sum of probability over all edges, within floating-point tolerance.
#[must_use]
pub fn expected_in_degree(edges: &[ScoredEdge], catalog: &PersonaCatalog) -> Vec<DegreeEntry<f64>> {
    let mut mass: HashMap<&str, f64> = HashMap::with_capacity(catalog.len());
    for edge in edges {
        *mass.entry(edge.target().as_ref()).or_insert(0.0) += edge.probability();
    }
    rank(catalog, |persona| {
        mass.get(persona.handle().as_ref()).copied().unwrap_or(0.0)
    })
}

/// Counts realized inbound edges per persona and ranks descending.
///
/// Ties keep the catalogue's input order (stable sort).
#[must_use]
pub fn actual_in_degree(
    network: &RealizedNetwork,
    catalog: &PersonaCatalog,
) -> Vec<DegreeEntry<u64>> {
    rank(catalog, |persona| network.in_degree(persona.handle()))
}

fn rank<T, F>(catalog: &PersonaCatalog, value_of: F) -> Vec<DegreeEntry<T>>
where
    T: PartialOrd + Copy,
    F: Fn(&Persona) -> T,
{
    let mut entries: Vec<DegreeEntry<T>> = catalog
        .personas()
        .iter()
        .map(|persona| DegreeEntry {
            handle: persona.handle().clone(),
            display_name: persona.display_name().clone(),
            faction: persona.faction().clone(),
            value: value_of(persona),
        })
        .collect();
    // Descending; sort_by is stable so tied personas keep input order.
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    entries
}
