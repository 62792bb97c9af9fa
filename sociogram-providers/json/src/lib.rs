//! JSON ingestion provider for faction and persona rows.
//!
//! Maps analyst spreadsheets exported as JSON arrays onto the core's row
//! types. The field typing is deliberately tolerant of spreadsheet exports:
//! the ignore flag accepts booleans, numbers, and text, and every column
//! except the identifying name may be absent.

use std::io::Read;

use serde::Deserialize;
use sociogram_core::{FactionRow, PersonaRow};
use thiserror::Error;

/// Errors raised while reading JSON row documents.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum JsonProviderError {
    /// The document was not a valid JSON array of rows.
    #[error("failed to parse JSON rows: {source}")]
    Parse {
        /// Underlying serde failure (including I/O errors from the reader).
        #[from]
        source: serde_json::Error,
    },
}

/// Ignore-style flag as spreadsheets export it: a boolean, a number (non-zero
/// is truthy), or text ("1", "true", "yes" in any case).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Flag {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0,
            Self::Text(value) => {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes"
                )
            }
        }
    }
}

/// Faction row as exported from the analyst spreadsheet.
#[derive(Debug, Deserialize)]
struct RawFactionRow {
    faction: String,
    #[serde(default)]
    ignore: Option<Flag>,
    #[serde(default)]
    intra_faction_following: String,
    #[serde(default)]
    factions_following: String,
    #[serde(default)]
    factions_who_may_follow: String,
    #[serde(default)]
    factions_who_never_follow: String,
}

impl From<RawFactionRow> for FactionRow {
    fn from(raw: RawFactionRow) -> Self {
        Self {
            name: raw.faction,
            ignored: raw.ignore.is_some_and(|flag| flag.is_truthy()),
            intra_label: raw.intra_faction_following,
            high_followers: raw.factions_following,
            moderate_followers: raw.factions_who_may_follow,
            never_followers: raw.factions_who_never_follow,
        }
    }
}

/// Persona row as exported from the analyst spreadsheet.
#[derive(Debug, Deserialize)]
struct RawPersonaRow {
    handle: String,
    #[serde(default)]
    name: Option<String>,
    faction: String,
    #[serde(default)]
    followers: f64,
}

impl From<RawPersonaRow> for PersonaRow {
    fn from(raw: RawPersonaRow) -> Self {
        Self {
            handle: raw.handle,
            display_name: raw.name,
            faction: raw.faction,
            popularity: raw.followers,
        }
    }
}

/// Reads a JSON array of faction rows.
///
/// # Errors
/// Returns [`JsonProviderError::Parse`] when the document is not a JSON
/// array of faction rows.
///
/// # Examples
/// ```
/// use sociogram_providers_json::read_faction_rows;
///
/// let rows = read_faction_rows(
///     r#"[{"faction": "Red", "ignore": 1, "intra_faction_following": "High"}]"#.as_bytes(),
/// )
/// .expect("document is well formed");
/// assert_eq!(rows.len(), 1);
/// assert!(rows[0].ignored);
/// ```
pub fn read_faction_rows(reader: impl Read) -> Result<Vec<FactionRow>, JsonProviderError> {
    let raw: Vec<RawFactionRow> = serde_json::from_reader(reader)?;
    Ok(raw.into_iter().map(FactionRow::from).collect())
}

/// Reads a JSON array of persona rows.
///
/// # Errors
/// Returns [`JsonProviderError::Parse`] when the document is not a JSON
/// array of persona rows.
///
/// # Examples
/// ```
/// use sociogram_providers_json::read_persona_rows;
///
/// let rows = read_persona_rows(
///     r#"[{"handle": "red1", "faction": "Red", "followers": 120}]"#.as_bytes(),
/// )
/// .expect("document is well formed");
/// assert_eq!(rows[0].popularity, 120.0);
/// assert!(rows[0].display_name.is_none());
/// ```
pub fn read_persona_rows(reader: impl Read) -> Result<Vec<PersonaRow>, JsonProviderError> {
    let raw: Vec<RawPersonaRow> = serde_json::from_reader(reader)?;
    Ok(raw.into_iter().map(PersonaRow::from).collect())
}
