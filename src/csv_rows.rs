use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord};

/// A fully materialized CSV file with named-column access.
///
/// Rows shorter than the header are tolerated; their trailing columns read as
/// absent, the same as a column missing from the header.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open csv {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("read csv header {}", path.display()))?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("read {} row {}", path.display(), idx + 1))?;
            records.push(record);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<CsvRow<'_>> {
        self.records.get(idx).map(|record| CsvRow {
            table: self,
            record,
            idx,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| CsvRow {
                table: self,
                record,
                idx,
            })
    }

    // Exact header first; exports are inconsistent about trailing spaces
    // (MATCH.csv ships `team2 `), so fall back to a trimmed comparison.
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| self.headers.iter().position(|h| h.trim() == name.trim()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    table: &'a CsvTable,
    record: &'a StringRecord,
    idx: usize,
}

impl<'a> CsvRow<'a> {
    /// 1-based data row number (the header is not counted).
    pub fn row_number(&self) -> usize {
        self.idx + 1
    }

    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.record.get(idx)
    }

    pub fn required(&self, column: &str) -> Result<&'a str> {
        self.get(column).ok_or_else(|| {
            anyhow!(
                "{} row {}: missing column `{}`",
                self.table.path.display(),
                self.row_number(),
                column
            )
        })
    }

    pub fn required_int(&self, column: &str) -> Result<i64> {
        let raw = self.required(column)?;
        self.parse_int(column, raw)
    }

    /// Absent column reads as 0; a present value must still parse.
    pub fn int_or_zero(&self, column: &str) -> Result<i64> {
        match self.get(column) {
            Some(raw) => self.parse_int(column, raw),
            None => Ok(0),
        }
    }

    /// Absent column reads as 0.0; a present value must still parse.
    pub fn float_or_zero(&self, column: &str) -> Result<f64> {
        let Some(raw) = self.get(column) else {
            return Ok(0.0);
        };
        raw.trim().parse::<f64>().with_context(|| {
            format!(
                "{} row {}: column `{}` is not a number: {:?}",
                self.table.path.display(),
                self.row_number(),
                column,
                raw
            )
        })
    }

    fn parse_int(&self, column: &str, raw: &str) -> Result<i64> {
        raw.trim().parse::<i64>().with_context(|| {
            format!(
                "{} row {}: column `{}` is not an integer: {:?}",
                self.table.path.display(),
                self.row_number(),
                column,
                raw
            )
        })
    }
}
