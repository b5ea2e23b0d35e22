//! Join indexes over the supporting CSV files.
//!
//! Each index is built once from a single read of its file. Only the key
//! column is interpreted up front; numeric columns are parsed when a row is
//! actually joined, so a malformed row that nothing references never fails
//! the run.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::clean::{clean_owned, clean_value};
use crate::csv_rows::CsvTable;
use crate::model::{DisciplinaryRecord, HistoryEntry, PerformanceStats};

/// Maps a cleaned key to the first row carrying it.
#[derive(Debug, Clone)]
struct FirstRowIndex {
    table: CsvTable,
    first_row: HashMap<String, usize>,
}

impl FirstRowIndex {
    fn build(path: &Path, key_column: &str) -> Result<Self> {
        let table = CsvTable::read(path)?;
        let mut first_row = HashMap::new();
        for row in table.rows() {
            let key = clean_owned(row.required(key_column)?);
            first_row.entry(key).or_insert(row.row_number() - 1);
        }
        debug!(
            path = %path.display(),
            rows = table.len(),
            keys = first_row.len(),
            "built join index"
        );
        Ok(Self { table, first_row })
    }
}

#[derive(Debug, Clone)]
pub struct DisciplinaryLookup {
    index: FirstRowIndex,
}

impl DisciplinaryLookup {
    pub fn build(path: &Path) -> Result<Self> {
        Ok(Self {
            index: FirstRowIndex::build(path, "player_id")?,
        })
    }

    /// Card totals for `player_id`; all zero when the player has no row.
    pub fn lookup(&self, player_id: &str) -> Result<DisciplinaryRecord> {
        let Some(row) = self
            .index
            .first_row
            .get(player_id)
            .and_then(|idx| self.index.table.row(*idx))
        else {
            return Ok(DisciplinaryRecord::default());
        };
        Ok(DisciplinaryRecord {
            yellow_cards: row.int_or_zero("no_of_yellow_cards")?,
            red_cards: row.int_or_zero("no_of_red_cards")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceLookup {
    index: FirstRowIndex,
}

impl PerformanceLookup {
    pub fn build(path: &Path) -> Result<Self> {
        Ok(Self {
            index: FirstRowIndex::build(path, "player_id")?,
        })
    }

    pub fn lookup(&self, player_id: &str) -> Result<PerformanceStats> {
        let Some(row) = self
            .index
            .first_row
            .get(player_id)
            .and_then(|idx| self.index.table.row(*idx))
        else {
            return Ok(PerformanceStats::default());
        };
        Ok(PerformanceStats {
            goals: row.int_or_zero("goals")?,
            assists: row.int_or_zero("assists")?,
            minutes_played: row.int_or_zero("minutes_played")?,
        })
    }
}

/// Tournament wins keyed by cleaned winner name, in file order.
#[derive(Debug, Clone)]
pub struct HistoryLookup {
    table: CsvTable,
    rows_by_winner: HashMap<String, Vec<usize>>,
}

impl HistoryLookup {
    pub fn build(path: &Path) -> Result<Self> {
        let table = CsvTable::read(path)?;
        let mut rows_by_winner: HashMap<String, Vec<usize>> = HashMap::new();
        for row in table.rows() {
            let winner = clean_owned(row.required("Winner")?);
            rows_by_winner
                .entry(winner)
                .or_default()
                .push(row.row_number() - 1);
        }
        debug!(
            path = %path.display(),
            rows = table.len(),
            winners = rows_by_winner.len(),
            "built history index"
        );
        Ok(Self {
            table,
            rows_by_winner,
        })
    }

    /// Every win recorded for `country`; empty, never absent, when none.
    pub fn lookup(&self, country: &str) -> Result<Vec<HistoryEntry>> {
        let Some(rows) = self.rows_by_winner.get(country) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(rows.len());
        for idx in rows {
            let Some(row) = self.table.row(*idx) else {
                continue;
            };
            out.push(HistoryEntry {
                year: row.required_int("Year")?,
                host: clean_value(row.required("Host")?).to_string(),
            });
        }
        Ok(out)
    }
}
