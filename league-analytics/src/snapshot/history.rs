// Append-only season history with a single replaceable live week.

use std::sync::Arc;

use thiserror::Error;

use crate::snapshot::week::LeagueWeekSnapshot;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("week {week} is not after the last recorded week {last}")]
    OutOfOrder { week: u32, last: u32 },

    #[error("cannot append a completed week while week {week} is still live")]
    LiveWeekOpen { week: u32 },

    #[error("{required} completed weeks required, only {available} available")]
    InsufficientHistory { required: usize, available: usize },
}

// ---------------------------------------------------------------------------
// Season history
// ---------------------------------------------------------------------------

/// The ordered sequence of week snapshots for a season.
///
/// Concluded weeks are append-only and never mutate. At most one trailing
/// live week exists; refreshing it replaces the whole snapshot (an atomic
/// swap of an immutable `Arc` value), so concurrent readers holding the old
/// `Arc` never observe a partially updated week.
#[derive(Debug, Clone, Default)]
pub struct SeasonHistory {
    weeks: Vec<Arc<LeagueWeekSnapshot>>,
    live_week: Option<u32>,
}

impl SeasonHistory {
    pub fn new() -> Self {
        SeasonHistory::default()
    }

    /// Append a concluded week. Weeks must arrive in strictly increasing
    /// order, and a live week must be finalized first.
    pub fn push_completed(&mut self, snapshot: LeagueWeekSnapshot) -> Result<(), HistoryError> {
        if let Some(week) = self.live_week {
            return Err(HistoryError::LiveWeekOpen { week });
        }
        if let Some(last) = self.last_week() {
            if snapshot.week <= last {
                return Err(HistoryError::OutOfOrder {
                    week: snapshot.week,
                    last,
                });
            }
        }
        self.weeks.push(Arc::new(snapshot));
        Ok(())
    }

    /// Install or replace the trailing live week.
    ///
    /// The new snapshot must come after every concluded week. When a live
    /// week is already present it is replaced wholesale, even if the week
    /// index moved forward (the old live week was never concluded).
    pub fn set_current(&mut self, snapshot: Arc<LeagueWeekSnapshot>) -> Result<(), HistoryError> {
        let last_completed = if self.live_week.is_some() {
            self.weeks[..self.weeks.len() - 1].last().map(|s| s.week)
        } else {
            self.last_week()
        };
        if let Some(last) = last_completed {
            if snapshot.week <= last {
                return Err(HistoryError::OutOfOrder {
                    week: snapshot.week,
                    last,
                });
            }
        }

        if self.live_week.is_some() {
            let idx = self.weeks.len() - 1;
            self.live_week = Some(snapshot.week);
            self.weeks[idx] = snapshot;
        } else {
            self.live_week = Some(snapshot.week);
            self.weeks.push(snapshot);
        }
        Ok(())
    }

    /// Conclude the live week, freezing it into history. No-op when no week
    /// is live.
    pub fn finalize_current(&mut self) {
        self.live_week = None;
    }

    /// All weeks including the live one, in order.
    pub fn all_weeks(&self) -> &[Arc<LeagueWeekSnapshot>] {
        &self.weeks
    }

    /// Concluded weeks only, excluding any live week.
    pub fn completed_weeks(&self) -> &[Arc<LeagueWeekSnapshot>] {
        if self.live_week.is_some() {
            &self.weeks[..self.weeks.len() - 1]
        } else {
            &self.weeks
        }
    }

    /// The live snapshot, if a week is currently in progress.
    pub fn current(&self) -> Option<&Arc<LeagueWeekSnapshot>> {
        self.live_week.and_then(|_| self.weeks.last())
    }

    /// Look up a snapshot by week index.
    pub fn week(&self, week: u32) -> Option<&Arc<LeagueWeekSnapshot>> {
        self.weeks.iter().find(|s| s.week == week)
    }

    /// The highest recorded week index (live or concluded).
    pub fn last_week(&self) -> Option<u32> {
        self.weeks.last().map(|s| s.week)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}
