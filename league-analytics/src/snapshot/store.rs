// On-disk persistence of week snapshots as immutable per-week JSON files.
//
// Layout matches the analytics export the frontend consumes: one
// `week{N}.json` document per matchup period. Historical files are written
// once and never rewritten; only the current week's file may be replaced
// while that week is still in progress.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::snapshot::history::SeasonHistory;
use crate::snapshot::week::LeagueWeekSnapshot;

/// One persisted week document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekDocument {
    pub exported_at: DateTime<Utc>,
    pub snapshot: LeagueWeekSnapshot,
}

/// Per-week JSON snapshot store rooted at a data directory.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create snapshot dir {}", dir.display()))?;
        Ok(SnapshotStore { dir })
    }

    /// Open a store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "league-analytics")
            .context("could not determine a platform data directory")?;
        Self::open(dirs.data_dir().join("weeks"))
    }

    /// Open the store named by the config's data section, falling back to
    /// the platform default when no override is set.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        match &config.data.dir {
            Some(dir) => Self::open(dir),
            None => Self::open_default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn week_path(&self, week: u32) -> PathBuf {
        self.dir.join(format!("week{week}.json"))
    }

    /// Persist a concluded week. Refuses to overwrite an existing file:
    /// historical snapshots are immutable once written.
    pub fn save_completed(&self, snapshot: &LeagueWeekSnapshot) -> Result<PathBuf> {
        let path = self.week_path(snapshot.week);
        if path.exists() {
            bail!(
                "week {} snapshot already exists at {} and historical weeks are immutable",
                snapshot.week,
                path.display()
            );
        }
        self.write_document(&path, snapshot)?;
        debug!(week = snapshot.week, path = %path.display(), "saved completed week snapshot");
        Ok(path)
    }

    /// Persist (or replace) the in-progress week's snapshot. The whole file
    /// is rewritten from the new immutable value.
    pub fn save_current(&self, snapshot: &LeagueWeekSnapshot) -> Result<PathBuf> {
        let path = self.week_path(snapshot.week);
        self.write_document(&path, snapshot)?;
        debug!(week = snapshot.week, path = %path.display(), "saved current week snapshot");
        Ok(path)
    }

    fn write_document(&self, path: &Path, snapshot: &LeagueWeekSnapshot) -> Result<()> {
        let document = WeekDocument {
            exported_at: Utc::now(),
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&document)
            .context("failed to serialize week snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot file {}", path.display()))?;
        Ok(())
    }

    /// Load one week's document.
    pub fn load_week(&self, week: u32) -> Result<WeekDocument> {
        let path = self.week_path(week);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("no snapshot file for week {week} at {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("malformed snapshot file {}", path.display()))
    }

    /// Week indices with a stored snapshot, ascending.
    pub fn available_weeks(&self) -> Result<Vec<u32>> {
        let mut weeks = Vec::new();
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list snapshot dir {}", self.dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_prefix("week").and_then(|s| s.strip_suffix(".json"))
            else {
                continue;
            };
            match stem.parse::<u32>() {
                Ok(week) => weeks.push(week),
                Err(_) => warn!(file = name, "ignoring unparseable snapshot filename"),
            }
        }
        weeks.sort_unstable();
        Ok(weeks)
    }

    /// Load every stored week, in order, into a season history. When
    /// `live_week` names the final stored week it is installed as the
    /// replaceable current week instead of a concluded one.
    pub fn load_history(&self, live_week: Option<u32>) -> Result<SeasonHistory> {
        let mut history = SeasonHistory::new();
        for week in self.available_weeks()? {
            let document = self.load_week(week)?;
            if Some(week) == live_week {
                history
                    .set_current(std::sync::Arc::new(document.snapshot))
                    .with_context(|| format!("week {week} out of order in store"))?;
            } else {
                history
                    .push_completed(document.snapshot)
                    .with_context(|| format!("week {week} out of order in store"))?;
            }
        }
        Ok(history)
    }
}
