use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;

use crate::clean::{clean_owned, clean_value};
use crate::csv_rows::{CsvRow, CsvTable};
use crate::dates::{DateOrSkip, InvalidDatePolicy, SkipRecord, try_parse_date};
use crate::lookups::{DisciplinaryLookup, PerformanceLookup};
use crate::model::{PlayerDoc, UNKNOWN_COUNTRY};

/// A player with an unparseable birth date is left out entirely.
type PlayerDatePolicy = SkipRecord;

#[derive(Debug, Clone, Default)]
pub struct PlayersByCountry {
    pub by_country: HashMap<String, Vec<PlayerDoc>>,
    /// Player ids dropped for an unparseable date of birth, in file order.
    pub skipped: Vec<String>,
}

impl PlayersByCountry {
    pub fn players_for(&self, country: &str) -> Vec<PlayerDoc> {
        self.by_country.get(country).cloned().unwrap_or_default()
    }
}

/// Reads the player file and groups joined players by cleaned country name.
pub fn load_players(
    player_path: &Path,
    disciplinary: &DisciplinaryLookup,
    performance: &PerformanceLookup,
) -> Result<PlayersByCountry> {
    let table = CsvTable::read(player_path)?;
    let mut out = PlayersByCountry::default();

    for row in table.rows() {
        let country = clean_owned(row.get("country").unwrap_or(UNKNOWN_COUNTRY));
        let player_id = clean_owned(row.required("player_id")?);

        let dob = clean_value(row.required("dob")?);
        let date_of_birth = match PlayerDatePolicy::resolve(try_parse_date(dob)) {
            DateOrSkip::Date(date) => date,
            DateOrSkip::Skip => {
                warn!(
                    player_id = %player_id,
                    dob,
                    "skipping player {player_id} due to invalid date: {dob}"
                );
                out.skipped.push(player_id);
                continue;
            }
        };

        let player = build_player(&row, player_id, date_of_birth, disciplinary, performance)?;
        out.by_country.entry(country).or_default().push(player);
    }

    Ok(out)
}

fn build_player(
    row: &CsvRow<'_>,
    player_id: String,
    date_of_birth: NaiveDate,
    disciplinary: &DisciplinaryLookup,
    performance: &PerformanceLookup,
) -> Result<PlayerDoc> {
    let disciplinary_record = disciplinary.lookup(&player_id)?;
    let performance_stats = performance.lookup(&player_id)?;
    Ok(PlayerDoc {
        full_name: clean_owned(row.required("full_name")?),
        first_name: clean_owned(row.required("fname")?),
        last_name: clean_owned(row.required("lname")?),
        height: row.float_or_zero("height")?,
        date_of_birth,
        is_captain: parse_captain_flag(row.required("is_captain")?),
        position: clean_owned(row.required("position")?),
        disciplinary_record,
        performance_stats,
        player_id,
    })
}

// Only trimmed and case-folded; quoted values such as `'true'` read as false.
fn parse_captain_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
