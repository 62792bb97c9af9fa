//! Sociogram core library.
//!
//! Computes a directed "who follows whom" probability matrix for a population
//! of personas grouped into factions, optionally realizes a concrete graph by
//! random sampling, and ranks personas by in-degree.
//!
//! The pipeline runs registry build, catalogue build, the O(n²) probability
//! matrix, optional realization, and degree aggregation to completion within
//! one invocation. The matrix is materialized in full, which bounds practical
//! population size to the low thousands; the intended populations are tens to
//! low hundreds of personas.

mod affinity;
mod builder;
mod degree;
mod edge;
mod error;
mod faction;
mod persona;
mod realize;
mod report;
mod sociogram;

pub use crate::{
    affinity::AffinityResolver,
    builder::{CombinationStrategy, SociogramBuilder},
    degree::{DegreeEntry, actual_in_degree, expected_in_degree},
    edge::{EdgeComponents, ScoredEdge},
    error::{Result, SociogramError},
    faction::{AffinityLabel, Faction, FactionRegistry, FactionRow, parse_faction_list},
    persona::{Persona, PersonaCatalog, PersonaRow},
    realize::{RealizedEdge, RealizedNetwork, realize},
    report::{DegreeReport, NetworkReport},
    sociogram::Sociogram,
};
