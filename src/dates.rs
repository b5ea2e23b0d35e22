use chrono::NaiveDate;
use tracing::warn;

use crate::clean::clean_value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a loader does with a row whose date does not parse.
///
/// Matches keep the row with a null date; players drop the row. The two are
/// kept apart on purpose: unifying them changes how many documents land.
pub trait InvalidDatePolicy {
    type Resolved;

    /// Applies the policy to an already parsed value; emits no diagnostic.
    fn resolve(parsed: Option<NaiveDate>) -> Self::Resolved;
}

/// Keeps the row; the date is stored as null.
#[derive(Debug, Clone, Copy)]
pub struct StoreNull;

/// Drops the row.
#[derive(Debug, Clone, Copy)]
pub struct SkipRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrSkip {
    Date(NaiveDate),
    Skip,
}

impl InvalidDatePolicy for StoreNull {
    type Resolved = Option<NaiveDate>;

    fn resolve(parsed: Option<NaiveDate>) -> Option<NaiveDate> {
        parsed
    }
}

impl InvalidDatePolicy for SkipRecord {
    type Resolved = DateOrSkip;

    fn resolve(parsed: Option<NaiveDate>) -> DateOrSkip {
        match parsed {
            Some(date) => DateOrSkip::Date(date),
            None => DateOrSkip::Skip,
        }
    }
}

/// Cleans and parses a `YYYY-MM-DD` date, logging once on failure.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = clean_value(raw);
    let parsed = try_parse_date(cleaned);
    if parsed.is_none() {
        warn!(input = cleaned, "invalid date format: {cleaned}");
    }
    parsed
}

/// Parses an already cleaned date without emitting a diagnostic.
pub fn try_parse_date(cleaned: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cleaned, DATE_FORMAT).ok()
}
