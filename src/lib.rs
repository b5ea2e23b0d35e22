pub mod clean;
pub mod config;
pub mod country_ingest;
pub mod csv_rows;
pub mod dates;
pub mod doc_store;
pub mod logging;
pub mod lookups;
pub mod match_ingest;
pub mod model;
pub mod players;

#[cfg(test)]
mod test_log;
