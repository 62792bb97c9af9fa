//! Shared fixtures for the integration suites.
#![allow(dead_code)] // not every suite uses every fixture

use sociogram_core::{FactionRegistry, FactionRow, PersonaCatalog, PersonaRow};

/// Installs a best-effort fmt subscriber so failing tests show engine logs.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Builds a faction row with empty rule lists.
pub fn faction(name: &str, intra_label: &str) -> FactionRow {
    FactionRow {
        name: name.to_owned(),
        intra_label: intra_label.to_owned(),
        ..FactionRow::default()
    }
}

/// Builds a persona row without a display name.
pub fn persona(handle: &str, faction: &str, popularity: f64) -> PersonaRow {
    PersonaRow {
        handle: handle.to_owned(),
        display_name: None,
        faction: faction.to_owned(),
        popularity,
    }
}

/// The worked two-faction scenario: Red (2 personas, intra "High", no
/// cross-faction rules) and Blue (1 persona, intra "None", Red in Blue's
/// never list). Popularities: red1=100, red2=0, blue1=50.
pub fn red_blue_scenario() -> (FactionRegistry, PersonaCatalog) {
    let mut blue = faction("Blue", "None");
    blue.never_followers = "Red".to_owned();
    let registry = FactionRegistry::from_rows([faction("Red", "High"), blue]);
    let catalog = PersonaCatalog::build(
        [
            persona("red1", "Red", 100.0),
            persona("red2", "Red", 0.0),
            persona("blue1", "Blue", 50.0),
        ],
        &registry,
    );
    (registry, catalog)
}
