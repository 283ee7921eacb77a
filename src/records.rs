use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::game::FinalReport;

pub const RECORDS_FILE_NAME: &str = "records.json";
pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("records file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("records file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub player: String,
    pub age: u32,
    pub won: bool,
    pub level: usize,
    pub lives: u8,
    pub date_label: String,
}

impl SessionRecord {
    pub fn from_report(report: &FinalReport, age: u32, date_label: String) -> Self {
        SessionRecord {
            player: report.player.clone(),
            age,
            won: report.won,
            level: report.level,
            lives: report.lives,
            date_label,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

impl Records {
    /// Appends and drops the oldest entries beyond [`HISTORY_LIMIT`].
    pub fn push(&mut self, record: SessionRecord) {
        self.sessions.push(record);
        let overflow = self.sessions.len().saturating_sub(HISTORY_LIMIT);
        if overflow > 0 {
            self.sessions.drain(0..overflow);
        }
    }

    /// Wins first, then highest level, then most lives left. Ties go to the
    /// earlier session.
    pub fn best(&self) -> Option<&SessionRecord> {
        self.sessions.iter().reduce(|best, candidate| {
            let better = (candidate.won, candidate.level, candidate.lives)
                > (best.won, best.level, best.lives);
            if better { candidate } else { best }
        })
    }

    pub fn recent(&self, limit: usize) -> Vec<SessionRecord> {
        self.sessions.iter().rev().take(limit).cloned().collect()
    }
}

pub fn now_date_label() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

pub fn load_records(path: &Path) -> Result<Records, RecordsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Records::default()),
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Like [`load_records`], but a broken file only costs the history.
pub fn load_records_or_default(path: &Path) -> Records {
    load_records(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), "starting with empty records: {err}");
        Records::default()
    })
}

pub fn save_records(path: &Path, records: &Records) -> Result<(), RecordsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(records)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn record(player: &str, won: bool, level: usize, lives: u8) -> SessionRecord {
        SessionRecord {
            player: player.into(),
            age: 30,
            won,
            level,
            lives,
            date_label: "2026-10-18 12:00".into(),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tile-recall-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn history_is_capped() {
        let mut records = Records::default();
        for level in 0..HISTORY_LIMIT + 5 {
            records.push(record("a", false, level, 0));
        }
        assert_eq!(records.sessions.len(), HISTORY_LIMIT);
        assert_eq!(records.sessions[0].level, 5);
        assert_eq!(records.recent(1)[0].level, HISTORY_LIMIT + 4);
    }

    #[test]
    fn best_prefers_wins_then_level_then_lives() {
        let mut records = Records::default();
        assert!(records.best().is_none());
        records.push(record("a", false, 9, 0));
        records.push(record("b", true, 10, 1));
        records.push(record("c", true, 10, 3));
        records.push(record("d", true, 10, 3));
        assert_eq!(records.best().map(|r| r.player.as_str()), Some("c"));
    }

    #[test]
    fn from_report_copies_outcome() {
        let report = FinalReport {
            won: false,
            level: 4,
            lives: 0,
            player: "Ada".into(),
        };
        let rec = SessionRecord::from_report(&report, 36, "today".into());
        assert_eq!(rec.player, "Ada");
        assert_eq!(rec.age, 36);
        assert!(!rec.won);
        assert_eq!(rec.level, 4);
    }

    #[test]
    fn save_then_load() {
        let dir = scratch_dir("save");
        let path = dir.join(RECORDS_FILE_NAME);
        assert_eq!(load_records(&path).unwrap(), Records::default());

        let mut records = Records::default();
        records.push(record("Ada", true, 10, 2));
        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap(), records);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_falls_back_to_empty() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(RECORDS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_records(&path), Err(RecordsError::Json(_))));
        assert_eq!(load_records_or_default(&path), Records::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
