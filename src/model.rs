use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MATCHES_COLLECTION: &str = "matches";
pub const COUNTRIES_COLLECTION: &str = "countries";

/// Stand-in for a country column missing from the header.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchDoc {
    #[serde(rename = "MatchID")]
    pub match_id: i64,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub team1: String,
    pub team2: String,
    pub team1_score: i64,
    pub team2_score: i64,
    pub stadium: String,
    pub host_city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryDoc {
    pub name: String,
    pub capital: String,
    pub population: f64,
    pub manager: String,
    pub players: Vec<PlayerDoc>,
    pub world_cup_history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerDoc {
    #[serde(rename = "PlayerID")]
    pub player_id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub height: f64,
    // Never null: players with an unparseable birth date are not stored.
    pub date_of_birth: NaiveDate,
    pub is_captain: bool,
    pub position: String,
    pub disciplinary_record: DisciplinaryRecord,
    pub performance_stats: PerformanceStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisciplinaryRecord {
    pub yellow_cards: i64,
    pub red_cards: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PerformanceStats {
    pub goals: i64,
    pub assists: i64,
    pub minutes_played: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryEntry {
    pub year: i64,
    pub host: String,
}
