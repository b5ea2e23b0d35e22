use anyhow::Result;

use fifa_loader::config::LoaderConfig;
use fifa_loader::doc_store::DocumentStore;
use fifa_loader::{logging, match_ingest};

fn main() -> Result<()> {
    let config = LoaderConfig::from_process()?;
    logging::init();

    let mut store = DocumentStore::open(&config.db_path)?;
    let summary = match_ingest::load_matches(&mut store, &config.match_csv)?;

    println!("{} matches inserted successfully!", summary.inserted);
    println!("DB: {}", config.db_path.display());
    println!("Source: {}", config.match_csv.display());
    println!("Previous documents cleared: {}", summary.cleared);
    if summary.invalid_dates > 0 {
        println!("Matches stored without a date: {}", summary.invalid_dates);
    }

    Ok(())
}
