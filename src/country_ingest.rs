use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::clean::clean_owned;
use crate::csv_rows::{CsvRow, CsvTable};
use crate::doc_store::DocumentStore;
use crate::lookups::{DisciplinaryLookup, HistoryLookup, PerformanceLookup};
use crate::model::{COUNTRIES_COLLECTION, CountryDoc, UNKNOWN_COUNTRY};
use crate::players::{PlayersByCountry, load_players};

#[derive(Debug, Clone)]
pub struct CountrySources {
    pub country: PathBuf,
    pub player: PathBuf,
    pub disciplinary: PathBuf,
    pub goal: PathBuf,
    pub winner: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CountryLoadSummary {
    pub countries_inserted: usize,
    pub players_embedded: usize,
    /// Player ids left out for an unparseable date of birth.
    pub players_skipped: Vec<String>,
}

/// Appends one document per country row to `countries`.
///
/// The collection is not cleared first: loading the same files twice stores
/// every country twice. Each country is inserted on its own.
pub fn load_countries(
    store: &mut DocumentStore,
    sources: &CountrySources,
) -> Result<CountryLoadSummary> {
    let disciplinary = DisciplinaryLookup::build(&sources.disciplinary)?;
    let performance = PerformanceLookup::build(&sources.goal)?;
    let players = load_players(&sources.player, &disciplinary, &performance)?;
    let history = HistoryLookup::build(&sources.winner)?;

    let table = CsvTable::read(&sources.country)?;
    let mut countries_inserted = 0usize;
    let mut players_embedded = 0usize;
    for row in table.rows() {
        let doc = build_country(&row, &players, &history)?;
        players_embedded += doc.players.len();
        store.insert_one(COUNTRIES_COLLECTION, &doc)?;
        countries_inserted += 1;
    }

    info!(
        countries_inserted,
        players_embedded,
        players_skipped = players.skipped.len(),
        "country data processed and inserted"
    );

    Ok(CountryLoadSummary {
        countries_inserted,
        players_embedded,
        players_skipped: players.skipped,
    })
}

fn build_country(
    row: &CsvRow<'_>,
    players: &PlayersByCountry,
    history: &HistoryLookup,
) -> Result<CountryDoc> {
    let name = clean_owned(row.get("country_name").unwrap_or(UNKNOWN_COUNTRY));
    Ok(CountryDoc {
        capital: clean_owned(row.get("capital").unwrap_or_default()),
        population: row.float_or_zero("population")?,
        manager: clean_owned(row.get("manager_name").unwrap_or_default()),
        players: players.players_for(&name),
        world_cup_history: history.lookup(&name)?,
        name,
    })
}
