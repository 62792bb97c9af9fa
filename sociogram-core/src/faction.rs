//! Faction rules and the registry built from analyst-supplied rows.
//!
//! Each faction row names the factions whose members follow it at a high or
//! moderate rate, the factions that never follow it, and a qualitative label
//! for following within the faction itself. The registry is rebuilt wholesale
//! for every computation, so duplicate rows simply overwrite earlier ones.

use std::collections::{HashMap, HashSet};

/// Qualitative following-tendency label used by the analyst spreadsheets.
///
/// # Examples
/// ```
/// use sociogram_core::AffinityLabel;
///
/// assert_eq!(AffinityLabel::parse(" High "), AffinityLabel::High);
/// assert_eq!(AffinityLabel::parse("whatever"), AffinityLabel::None);
/// assert_eq!(AffinityLabel::High.probability(), 0.9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AffinityLabel {
    /// Members follow at a high rate.
    High,
    /// Members follow at a moderate rate.
    Moderate,
    /// Members follow at a low rate.
    Low,
    /// Members do not follow, or the source data said nothing usable.
    #[default]
    None,
}

impl AffinityLabel {
    /// Parses a spreadsheet label.
    ///
    /// Unrecognised or blank text maps to [`AffinityLabel::None`]; this is the
    /// intended degradation for malformed cells, not an error.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "High" => Self::High,
            "Moderate" => Self::Moderate,
            "Low" => Self::Low,
            _ => Self::None,
        }
    }

    /// Probability assigned to this label by the fixed mapping table.
    #[must_use]
    pub const fn probability(self) -> f64 {
        match self {
            Self::High => 0.9,
            Self::Moderate => 0.5,
            Self::Low => 0.3,
            Self::None => 0.0,
        }
    }
}

/// Splits a delimited free-text cell into trimmed, non-empty faction names.
///
/// # Examples
/// ```
/// use sociogram_core::parse_faction_list;
///
/// let names = parse_faction_list("Iraqi Public, Jordanian Public, ");
/// assert_eq!(names.len(), 2);
/// assert!(names.contains("Iraqi Public"));
/// assert!(parse_faction_list("   ").is_empty());
/// ```
#[must_use]
pub fn parse_faction_list(cell: &str) -> HashSet<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Raw faction row handed over by an ingestion layer.
///
/// The list-valued fields are delimited free text exactly as they appear in
/// the source spreadsheet; the registry parses them on registration.
#[derive(Debug, Clone, Default)]
pub struct FactionRow {
    /// Faction name; the unique registry key.
    pub name: String,
    /// Whether the faction and all its personas are excluded from the run.
    pub ignored: bool,
    /// Qualitative intra-faction following label ("High", "Moderate", ...).
    pub intra_label: String,
    /// Factions whose members follow this faction at a high rate.
    pub high_followers: String,
    /// Factions whose members may follow this faction at a moderate rate.
    pub moderate_followers: String,
    /// Factions whose members never follow this faction.
    pub never_followers: String,
}

/// One faction's resolved following rules.
#[derive(Debug, Clone)]
pub struct Faction {
    name: String,
    ignored: bool,
    intra_probability: f64,
    high: HashSet<String>,
    moderate: HashSet<String>,
    never: HashSet<String>,
}

impl Faction {
    /// Returns the faction name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether personas in this faction are excluded from the computation.
    #[must_use]
    pub const fn ignored(&self) -> bool {
        self.ignored
    }

    /// Base probability that members follow other members of the same
    /// faction, before any population-size scaling.
    #[must_use]
    pub const fn intra_probability(&self) -> f64 {
        self.intra_probability
    }

    /// Whether this faction's row claims `other`'s members as high-rate
    /// followers.
    #[must_use]
    pub fn claims_high_follower(&self, other: &str) -> bool {
        self.high.contains(other)
    }

    /// Whether this faction's row claims `other`'s members as moderate-rate
    /// followers.
    #[must_use]
    pub fn claims_moderate_follower(&self, other: &str) -> bool {
        self.moderate.contains(other)
    }

    /// Whether this faction's row states that `other`'s members never follow
    /// it. A "never" claim overrides any accidental double-listing.
    #[must_use]
    pub fn claims_never_follower(&self, other: &str) -> bool {
        self.never.contains(other)
    }
}

/// Registry of faction rules, rebuilt wholesale for every computation.
///
/// # Examples
/// ```
/// use sociogram_core::{FactionRegistry, FactionRow};
///
/// let registry = FactionRegistry::from_rows([FactionRow {
///     name: "Red".into(),
///     intra_label: "High".into(),
///     ..FactionRow::default()
/// }]);
/// let red = registry.lookup("Red").expect("Red was registered");
/// assert_eq!(red.intra_probability(), 0.9);
/// assert!(registry.lookup("Blue").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FactionRegistry {
    factions: HashMap<String, Faction>,
}

impl FactionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from ingestion rows.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = FactionRow>) -> Self {
        let mut registry = Self::new();
        for row in rows {
            registry.register(
                &row.name,
                row.ignored,
                &row.intra_label,
                &row.high_followers,
                &row.moderate_followers,
                &row.never_followers,
            );
        }
        registry
    }

    /// Registers one faction. Re-registering a name overwrites the previous
    /// record; the registry carries no history between runs so last write
    /// wins without an error.
    pub fn register(
        &mut self,
        name: &str,
        ignored: bool,
        intra_label: &str,
        high_followers: &str,
        moderate_followers: &str,
        never_followers: &str,
    ) {
        let name = name.trim().to_owned();
        let faction = Faction {
            name: name.clone(),
            ignored,
            intra_probability: AffinityLabel::parse(intra_label).probability(),
            high: parse_faction_list(high_followers),
            moderate: parse_faction_list(moderate_followers),
            never: parse_faction_list(never_followers),
        };
        self.factions.insert(name, faction);
    }

    /// Looks up a faction by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Faction> {
        self.factions.get(name)
    }

    /// Number of registered factions, ignored ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factions.len()
    }

    /// Whether the registry holds no factions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::high("High", 0.9)]
    #[case::moderate("Moderate", 0.5)]
    #[case::low("Low", 0.3)]
    #[case::none("None", 0.0)]
    #[case::padded("  High  ", 0.9)]
    #[case::unrecognised("Sometimes", 0.0)]
    #[case::wrong_case("high", 0.0)]
    #[case::blank("", 0.0)]
    fn label_parsing_maps_to_fixed_table(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(AffinityLabel::parse(raw).probability(), expected);
    }

    #[rstest]
    #[case::plain("Red, Blue", vec!["Red", "Blue"])]
    #[case::padding(" Red ,  Blue ", vec!["Red", "Blue"])]
    #[case::empty_segments("Red,,Blue,", vec!["Red", "Blue"])]
    #[case::blank("   ", vec![])]
    #[case::empty("", vec![])]
    fn faction_list_parsing_trims_and_drops_empties(
        #[case] cell: &str,
        #[case] expected: Vec<&str>,
    ) {
        let parsed = parse_faction_list(cell);
        assert_eq!(parsed.len(), expected.len());
        for name in expected {
            assert!(parsed.contains(name), "missing `{name}`");
        }
    }

    #[test]
    fn duplicate_registration_last_write_wins() {
        let mut registry = FactionRegistry::new();
        registry.register("Red", false, "High", "", "", "");
        registry.register("Red", true, "Low", "", "", "");
        let red = registry.lookup("Red").expect("Red must be registered");
        assert!(red.ignored());
        assert_eq!(red.intra_probability(), 0.3);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registered_names_are_trimmed() {
        let mut registry = FactionRegistry::new();
        registry.register("  Red  ", false, "None", "", "", "");
        assert!(registry.lookup("Red").is_some());
    }
}
