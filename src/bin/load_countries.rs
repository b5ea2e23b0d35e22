use anyhow::Result;

use fifa_loader::config::LoaderConfig;
use fifa_loader::doc_store::DocumentStore;
use fifa_loader::{country_ingest, logging};

fn main() -> Result<()> {
    let config = LoaderConfig::from_process()?;
    logging::init();

    let mut store = DocumentStore::open(&config.db_path)?;
    let summary = country_ingest::load_countries(&mut store, &config.country_sources())?;

    println!("Country data processed and inserted successfully!");
    println!("DB: {}", config.db_path.display());
    println!("Countries inserted: {}", summary.countries_inserted);
    println!("Players embedded: {}", summary.players_embedded);
    if !summary.players_skipped.is_empty() {
        println!(
            "Players skipped for invalid birth dates: {}",
            summary.players_skipped.len()
        );
        for id in summary.players_skipped.iter().take(8) {
            println!(" - {id}");
        }
    }

    Ok(())
}
