use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::clean::clean_owned;
use crate::csv_rows::{CsvRow, CsvTable};
use crate::dates::{InvalidDatePolicy, StoreNull, parse_date};
use crate::doc_store::DocumentStore;
use crate::model::{MATCHES_COLLECTION, MatchDoc};

/// A match with an unparseable date is still stored, dated null.
type MatchDatePolicy = StoreNull;

#[derive(Debug, Clone)]
pub struct MatchLoadSummary {
    pub cleared: usize,
    pub inserted: usize,
    /// Matches stored with a null date.
    pub invalid_dates: usize,
}

/// Replaces the `matches` collection with one document per CSV row.
///
/// The collection is cleared before the file is read and the new documents go
/// in as one batch, so a failure in between leaves it empty. Any row with a
/// non-integer id or score fails the whole load.
pub fn load_matches(store: &mut DocumentStore, match_path: &Path) -> Result<MatchLoadSummary> {
    let cleared = store.delete_all(MATCHES_COLLECTION)?;

    let table = CsvTable::read(match_path)?;
    let mut docs = Vec::with_capacity(table.len());
    let mut invalid_dates = 0usize;
    for row in table.rows() {
        let doc = build_match(&row)?;
        if doc.date.is_none() {
            invalid_dates += 1;
        }
        docs.push(doc);
    }

    let inserted = store.insert_many(MATCHES_COLLECTION, &docs)?;
    info!(inserted, cleared, invalid_dates, "{inserted} matches inserted");

    Ok(MatchLoadSummary {
        cleared,
        inserted,
        invalid_dates,
    })
}

fn build_match(row: &CsvRow<'_>) -> Result<MatchDoc> {
    let match_id = row.required_int("match_id")?;
    let date = MatchDatePolicy::resolve(parse_date(row.required("date")?));
    Ok(MatchDoc {
        match_id,
        date,
        start_time: clean_owned(row.required("start_time")?),
        team1: clean_owned(row.required("team1")?),
        team2: clean_owned(row.required("team2 ")?),
        team1_score: row.required_int("team1_score")?,
        team2_score: row.required_int("team2_score")?,
        stadium: clean_owned(row.required("stadium")?),
        host_city: clean_owned(row.required("host_city")?),
    })
}
