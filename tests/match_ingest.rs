use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use fifa_loader::doc_store::DocumentStore;
use fifa_loader::match_ingest::load_matches;
use fifa_loader::model::{MATCHES_COLLECTION, MatchDoc};

const HEADER: &str =
    "match_id,date,start_time,team1,team2 ,team1_score,team2_score,stadium,host_city\n";

fn write_matches(dir: &tempfile::TempDir, rows: &str) -> PathBuf {
    let path = dir.path().join("MATCH.csv");
    fs::write(&path, format!("{HEADER}{rows}")).expect("write MATCH.csv");
    path
}

#[test]
fn single_row_becomes_one_match_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matches(
        &dir,
        "1,2022-11-20,'19:00','Qatar','Ecuador ',0,2,'Al Bayt Stadium',Al Khor\n",
    );
    let mut store = DocumentStore::open_in_memory().unwrap();

    let summary = load_matches(&mut store, &path).unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.invalid_dates, 0);

    let docs: Vec<MatchDoc> = store.find_all(MATCHES_COLLECTION).unwrap();
    assert_eq!(
        docs,
        vec![MatchDoc {
            match_id: 1,
            date: NaiveDate::from_ymd_opt(2022, 11, 20),
            start_time: "19:00".to_string(),
            team1: "Qatar".to_string(),
            team2: "Ecuador".to_string(),
            team1_score: 0,
            team2_score: 2,
            stadium: "Al Bayt Stadium".to_string(),
            host_city: "Al Khor".to_string(),
        }]
    );
}

#[test]
fn invalid_date_is_stored_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matches(
        &dir,
        "1,2022-11-20,19:00,Qatar,Ecuador,0,2,Al Bayt,Al Khor\n\
         2,TBD,16:00,England,Iran,6,2,Khalifa,Doha\n",
    );
    let mut store = DocumentStore::open_in_memory().unwrap();

    let summary = load_matches(&mut store, &path).unwrap();
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.invalid_dates, 1);

    let raw: Vec<serde_json::Value> = store.find_all(MATCHES_COLLECTION).unwrap();
    assert_eq!(raw[0]["Date"], "2022-11-20");
    assert!(raw[1]["Date"].is_null());
    assert_eq!(raw[1]["Team1Score"], 6);
}

#[test]
fn reloading_replaces_previous_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matches(
        &dir,
        "1,2022-11-20,19:00,Qatar,Ecuador,0,2,Al Bayt,Al Khor\n\
         3,2022-11-21,19:00,Senegal,Netherlands,0,2,Al Thumama,Doha\n",
    );
    let mut store = DocumentStore::open_in_memory().unwrap();

    load_matches(&mut store, &path).unwrap();
    let second = load_matches(&mut store, &path).unwrap();
    assert_eq!(second.cleared, 2);
    assert_eq!(store.count(MATCHES_COLLECTION).unwrap(), 2);
}

#[test]
fn non_numeric_score_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matches(
        &dir,
        "1,2022-11-20,19:00,Qatar,Ecuador,0,2,Al Bayt,Al Khor\n\
         2,2022-11-21,16:00,England,Iran,six,2,Khalifa,Doha\n",
    );
    let mut store = DocumentStore::open_in_memory().unwrap();
    store
        .insert_one(MATCHES_COLLECTION, &serde_json::json!({"MatchID": 99}))
        .unwrap();

    let err = load_matches(&mut store, &path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("row 2"), "{msg}");
    assert!(msg.contains("team1_score"), "{msg}");
    // The clear already ran; nothing from the failed file was inserted.
    assert_eq!(store.count(MATCHES_COLLECTION).unwrap(), 0);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DocumentStore::open_in_memory().unwrap();
    assert!(load_matches(&mut store, &dir.path().join("MATCH.csv")).is_err());
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matches(&dir, "1,2022-11-20,19:00,Qatar,Ecuador,0,2,Al Bayt,Al Khor\n");
    let db_path = dir.path().join("db").join("FIFA_DB.sqlite");
    {
        let mut store = DocumentStore::open(&db_path).unwrap();
        load_matches(&mut store, &path).unwrap();
    }
    let store = DocumentStore::open(&db_path).unwrap();
    assert_eq!(store.count(MATCHES_COLLECTION).unwrap(), 1);
    assert_eq!(store.location(), Some(db_path.as_path()));
}
