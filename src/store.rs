use crate::error::NbResult;
use crate::scoring::PerformanceTier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Stored user preferences. Defaults mirror the documented fallback
/// values used when the store is missing or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub lag: usize,
    pub session_secs: u64,
    pub round_secs: f64,
    pub daily_reminder: bool,
    pub adaptive_level: bool,
    pub haptics: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            lag: 2,
            session_secs: 60,
            round_secs: 2.0,
            daily_reminder: true,
            adaptive_level: true,
            haptics: false,
        }
    }
}

/// One calendar day of training history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub sessions_completed: u32,
    pub goal: u32,
    pub best_tier: Option<PerformanceTier>,
}

pub const DEFAULT_DAILY_GOAL: u32 = 5;

/// Everything persisted between runs: preferences plus the dated
/// progress list, ordered by date ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredData {
    pub prefs: Preferences,
    pub history: Vec<DailyRecord>,
}

impl StoredData {
    /// Records a finished session for `date`, creating the day's
    /// entry if needed and keeping the best tier seen that day.
    pub fn record_session(&mut self, date: NaiveDate, tier: PerformanceTier) {
        match self.history.iter_mut().find(|r| r.date == date) {
            Some(entry) => {
                entry.sessions_completed += 1;
                entry.best_tier = match entry.best_tier {
                    Some(prev) => Some(prev.min(tier)),
                    None => Some(tier),
                };
            }
            None => {
                self.history.push(DailyRecord {
                    date,
                    sessions_completed: 1,
                    goal: DEFAULT_DAILY_GOAL,
                    best_tier: Some(tier),
                });
                self.history.sort_by_key(|r| r.date);
            }
        }
    }

    pub fn today(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.history.iter().find(|r| r.date == date)
    }
}

/// JSON-file persistence. Reads fall back to defaults rather than
/// blocking session start; only writes report errors.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> StoredData {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(data) => data,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "corrupt store, using defaults");
                    StoredData::default()
                }
            },
            Err(_) => StoredData::default(),
        }
    }

    pub fn save(&self, data: &StoredData) -> NbResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
