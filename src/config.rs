use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

use crate::country_ingest::CountrySources;
use crate::doc_store::DATABASE_NAME;

const APP_DIR: &str = "fifa_loader";
const DEFAULT_DATA_DIR: &str = "data";

pub const MATCH_FILE: &str = "MATCH.csv";
pub const COUNTRY_FILE: &str = "COUNTRY.csv";
pub const PLAYER_FILE: &str = "PLAYER.csv";
pub const DISCIPLINARY_FILE: &str = "DISCIPLINARY_RECORD.csv";
pub const GOAL_FILE: &str = "GOAL_SCORER.csv";
pub const WINNER_FILE: &str = "WORLD_CUP_WINNER.csv";

/// Where the loaders read from and write to.
///
/// Resolved once at startup and handed to each loader; nothing else reads
/// the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
    pub match_csv: PathBuf,
    pub country_csv: PathBuf,
    pub player_csv: PathBuf,
    pub disciplinary_csv: PathBuf,
    pub goal_csv: PathBuf,
    pub winner_csv: PathBuf,
}

impl LoaderConfig {
    /// Loads `.env.local` / `.env`, then resolves from the process args and
    /// environment.
    pub fn from_process() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    /// Flag beats environment beats default, per setting.
    pub fn resolve(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_path = |key: &str| {
            env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        let db_path = parse_path_arg(args, "--db")
            .or_else(|| env_path("FIFA_DB_PATH"))
            .or_else(|| {
                app_data_dir(&env).map(|dir| dir.join(format!("{DATABASE_NAME}.sqlite")))
            })
            .ok_or_else(|| anyhow!("unable to resolve document store path"))?;
        let data_dir = parse_path_arg(args, "--data-dir")
            .or_else(|| env_path("FIFA_DATA_DIR"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let file = |key: &str, name: &str| env_path(key).unwrap_or_else(|| data_dir.join(name));
        Ok(Self {
            match_csv: file("FIFA_MATCH_CSV", MATCH_FILE),
            country_csv: file("FIFA_COUNTRY_CSV", COUNTRY_FILE),
            player_csv: file("FIFA_PLAYER_CSV", PLAYER_FILE),
            disciplinary_csv: file("FIFA_DISCIPLINARY_CSV", DISCIPLINARY_FILE),
            goal_csv: file("FIFA_GOAL_CSV", GOAL_FILE),
            winner_csv: file("FIFA_WINNER_CSV", WINNER_FILE),
            db_path,
            data_dir,
        })
    }

    pub fn country_sources(&self) -> CountrySources {
        CountrySources {
            country: self.country_csv.clone(),
            player: self.player_csv.clone(),
            disciplinary: self.disciplinary_csv.clone(),
            goal: self.goal_csv.clone(),
            winner: self.winner_csv.clone(),
        }
    }

    pub fn with_data_dir(data_dir: &Path, db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
            data_dir: data_dir.to_path_buf(),
            match_csv: data_dir.join(MATCH_FILE),
            country_csv: data_dir.join(COUNTRY_FILE),
            player_csv: data_dir.join(PLAYER_FILE),
            disciplinary_csv: data_dir.join(DISCIPLINARY_FILE),
            goal_csv: data_dir.join(GOAL_FILE),
            winner_csv: data_dir.join(WINNER_FILE),
        }
    }
}

fn app_data_dir(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(base) = env("XDG_DATA_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = env("HOME")?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR),
    )
}

fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::LoaderConfig;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_follow_home_and_data_dir() {
        let cfg = LoaderConfig::resolve(&[], env(&[("HOME", "/home/fan")])).unwrap();
        assert_eq!(
            cfg.db_path,
            PathBuf::from("/home/fan/.local/share/fifa_loader/FIFA_DB.sqlite")
        );
        assert_eq!(cfg.match_csv, PathBuf::from("data/MATCH.csv"));
        assert_eq!(cfg.winner_csv, PathBuf::from("data/WORLD_CUP_WINNER.csv"));
    }

    #[test]
    fn flags_beat_environment() {
        let cfg = LoaderConfig::resolve(
            &args(&["--db", "/tmp/a.sqlite", "--data-dir=/srv/wc"]),
            env(&[("FIFA_DB_PATH", "/tmp/b.sqlite"), ("FIFA_DATA_DIR", "/x")]),
        )
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/a.sqlite"));
        assert_eq!(cfg.player_csv, PathBuf::from("/srv/wc/PLAYER.csv"));
    }

    #[test]
    fn per_file_overrides_and_missing_home() {
        let cfg = LoaderConfig::resolve(
            &[],
            env(&[
                ("FIFA_DB_PATH", "/tmp/b.sqlite"),
                ("FIFA_GOAL_CSV", "/elsewhere/goals.csv"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.goal_csv, PathBuf::from("/elsewhere/goals.csv"));
        assert_eq!(cfg.country_csv, PathBuf::from("data/COUNTRY.csv"));

        assert!(LoaderConfig::resolve(&[], env(&[])).is_err());
    }
}
