// Seam to the upstream league-data collaborator, plus the short-TTL cache
// used by the live refresh path.
//
// The core never fetches: callers hand it a source implementation and a
// cache, and every computation runs against pre-built immutable snapshots.
// When the source cannot supply fresh data the caller is told so and may
// fall back to the last good cached snapshot instead of silently
// substituting zeros.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::projection::roster::TeamRoster;
use crate::projection::schedule::WeekSchedule;
use crate::snapshot::builder::{build_week_snapshot, RawTeamWeek, SnapshotError};
use crate::snapshot::history::{HistoryError, SeasonHistory};
use crate::snapshot::week::LeagueWeekSnapshot;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// The upstream collaborator could not supply current data. Callers must
/// treat held data as stale rather than substitute zeros.
#[derive(Debug, Clone, Error)]
#[error("upstream league data unavailable: {reason}")]
pub struct UpstreamError {
    pub reason: String,
}

impl UpstreamError {
    pub fn new(reason: impl Into<String>) -> Self {
        UpstreamError {
            reason: reason.into(),
        }
    }
}

/// A live refresh can fail at the upstream read, while normalizing the
/// payload, or when the refreshed week conflicts with recorded history.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

// ---------------------------------------------------------------------------
// Data source seam
// ---------------------------------------------------------------------------

/// The upstream league-data collaborator. Implementations own all network
/// and timeout concerns; every method is a plain synchronous read.
pub trait LeagueDataSource {
    /// Raw per-team totals for one week.
    fn week_totals(&self, week: u32) -> Result<Vec<RawTeamWeek>, UpstreamError>;

    /// Every team's roster with season per-game averages and availability.
    fn rosters(&self) -> Result<Vec<TeamRoster>, UpstreamError>;

    /// The week's scheduled pairs and remaining scoring periods.
    fn week_schedule(&self, week: u32) -> Result<WeekSchedule, UpstreamError>;
}

// ---------------------------------------------------------------------------
// Snapshot cache
// ---------------------------------------------------------------------------

struct CacheEntry {
    fetched_at: DateTime<Utc>,
    snapshot: Arc<LeagueWeekSnapshot>,
}

/// Short-TTL cache of built week snapshots, passed explicitly to the
/// refresh path. Entries are immutable `Arc` values; replacing one is an
/// atomic swap and readers holding the old value are unaffected.
pub struct SnapshotCache {
    ttl: Duration,
    entries: HashMap<u32, CacheEntry>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        SnapshotCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn with_ttl_seconds(seconds: i64) -> Self {
        Self::new(Duration::seconds(seconds))
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::with_ttl_seconds(config.cache.ttl_seconds)
    }

    /// A cached snapshot no older than the TTL.
    pub fn get_fresh(&self, week: u32, now: DateTime<Utc>) -> Option<Arc<LeagueWeekSnapshot>> {
        let entry = self.entries.get(&week)?;
        if now.signed_duration_since(entry.fetched_at) <= self.ttl {
            Some(Arc::clone(&entry.snapshot))
        } else {
            None
        }
    }

    /// The last good snapshot for a week regardless of age. This is the
    /// degradation path when the upstream is unavailable.
    pub fn get_stale(&self, week: u32) -> Option<Arc<LeagueWeekSnapshot>> {
        self.entries.get(&week).map(|e| Arc::clone(&e.snapshot))
    }

    pub fn insert(&mut self, snapshot: Arc<LeagueWeekSnapshot>, now: DateTime<Utc>) {
        self.entries.insert(
            snapshot.week,
            CacheEntry {
                fetched_at: now,
                snapshot,
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Live refresh
// ---------------------------------------------------------------------------

/// Refresh the in-progress week's snapshot.
///
/// A fresh cache entry short-circuits the upstream read. Otherwise the raw
/// totals are fetched, normalized into a new immutable snapshot, cached,
/// and swapped into the history as the current week. On upstream failure
/// the history is left untouched; the caller may consult
/// `SnapshotCache::get_stale` for the last good value.
pub fn refresh_current_week(
    history: &mut SeasonHistory,
    source: &dyn LeagueDataSource,
    cache: &mut SnapshotCache,
    week: u32,
    now: DateTime<Utc>,
) -> Result<Arc<LeagueWeekSnapshot>, RefreshError> {
    if let Some(snapshot) = cache.get_fresh(week, now) {
        debug!(week, "serving current week from cache");
        history.set_current(Arc::clone(&snapshot))?;
        return Ok(snapshot);
    }

    let rows = source.week_totals(week).map_err(|err| {
        warn!(week, %err, "live refresh failed; current snapshot is stale");
        err
    })?;
    let snapshot = Arc::new(build_week_snapshot(week, rows)?);
    cache.insert(Arc::clone(&snapshot), now);
    history.set_current(Arc::clone(&snapshot))?;
    debug!(week, teams = snapshot.records.len(), "refreshed current week");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn raw(team: &str, opponent: &str, points: f64) -> RawTeamWeek {
        RawTeamWeek {
            team: team.to_string(),
            opponent: opponent.to_string(),
            minutes: 600.0,
            points,
            rebounds: 80.0,
            assists: 40.0,
            steals: 8.0,
            blocks: 6.0,
            threes_made: 15.0,
            turnovers: 25.0,
            fg_made: 100.0,
            fg_attempted: 220.0,
            ft_made: 40.0,
            ft_attempted: 60.0,
        }
    }

    /// A scripted source: counts fetches and can be switched to fail.
    struct FakeSource {
        fetches: Cell<usize>,
        fail: Cell<bool>,
        points_a: Cell<f64>,
    }

    impl FakeSource {
        fn new() -> Self {
            FakeSource {
                fetches: Cell::new(0),
                fail: Cell::new(false),
                points_a: Cell::new(300.0),
            }
        }
    }

    impl LeagueDataSource for FakeSource {
        fn week_totals(&self, _week: u32) -> Result<Vec<RawTeamWeek>, UpstreamError> {
            if self.fail.get() {
                return Err(UpstreamError::new("scripted outage"));
            }
            self.fetches.set(self.fetches.get() + 1);
            Ok(vec![
                raw("Team A", "Team B", self.points_a.get()),
                raw("Team B", "Team A", 310.0),
            ])
        }

        fn rosters(&self) -> Result<Vec<TeamRoster>, UpstreamError> {
            Ok(Vec::new())
        }

        fn week_schedule(&self, week: u32) -> Result<WeekSchedule, UpstreamError> {
            Ok(WeekSchedule {
                week,
                remaining_periods: Vec::new(),
                matchups: Vec::new(),
            })
        }
    }

    #[test]
    fn fresh_cache_short_circuits_the_upstream() {
        let source = FakeSource::new();
        let mut cache = SnapshotCache::with_ttl_seconds(60);
        let mut history = SeasonHistory::new();
        let now = Utc::now();

        refresh_current_week(&mut history, &source, &mut cache, 5, now).unwrap();
        assert_eq!(source.fetches.get(), 1);

        // Within the TTL the source is not consulted again.
        let later = now + Duration::seconds(30);
        refresh_current_week(&mut history, &source, &mut cache, 5, later).unwrap();
        assert_eq!(source.fetches.get(), 1);

        // Past the TTL the snapshot is rebuilt.
        let much_later = now + Duration::seconds(120);
        refresh_current_week(&mut history, &source, &mut cache, 5, much_later).unwrap();
        assert_eq!(source.fetches.get(), 2);
    }

    #[test]
    fn refresh_swaps_the_live_snapshot_wholesale() {
        let source = FakeSource::new();
        let mut cache = SnapshotCache::with_ttl_seconds(0);
        let mut history = SeasonHistory::new();
        let now = Utc::now();

        let first = refresh_current_week(&mut history, &source, &mut cache, 5, now).unwrap();

        source.points_a.set(420.0);
        let second = refresh_current_week(
            &mut history,
            &source,
            &mut cache,
            5,
            now + Duration::seconds(10),
        )
        .unwrap();

        let points = |s: &LeagueWeekSnapshot| {
            s.record_for("Team A")
                .unwrap()
                .stats
                .value(crate::category::Category::Points)
                .unwrap()
        };
        // The first Arc still holds the old immutable value.
        assert_eq!(points(&first), 300.0);
        assert_eq!(points(&second), 420.0);
        assert_eq!(points(history.current().unwrap()), 420.0);
    }

    #[test]
    fn outage_reports_staleness_and_leaves_history_untouched() {
        let source = FakeSource::new();
        let mut cache = SnapshotCache::with_ttl_seconds(0);
        let mut history = SeasonHistory::new();
        let now = Utc::now();

        refresh_current_week(&mut history, &source, &mut cache, 5, now).unwrap();

        source.fail.set(true);
        let err = refresh_current_week(
            &mut history,
            &source,
            &mut cache,
            5,
            now + Duration::seconds(10),
        )
        .unwrap_err();
        assert!(matches!(err, RefreshError::Upstream(_)));

        // The last good snapshot is still available for degraded serving.
        assert!(cache.get_stale(5).is_some());
        assert_eq!(history.current().unwrap().week, 5);
    }

    #[test]
    fn empty_upstream_payload_is_a_missing_week() {
        struct EmptySource;
        impl LeagueDataSource for EmptySource {
            fn week_totals(&self, _week: u32) -> Result<Vec<RawTeamWeek>, UpstreamError> {
                Ok(Vec::new())
            }
            fn rosters(&self) -> Result<Vec<TeamRoster>, UpstreamError> {
                Ok(Vec::new())
            }
            fn week_schedule(&self, week: u32) -> Result<WeekSchedule, UpstreamError> {
                Ok(WeekSchedule {
                    week,
                    remaining_periods: Vec::new(),
                    matchups: Vec::new(),
                })
            }
        }

        let mut cache = SnapshotCache::with_ttl_seconds(60);
        let mut history = SeasonHistory::new();
        let err =
            refresh_current_week(&mut history, &EmptySource, &mut cache, 9, Utc::now())
                .unwrap_err();
        assert!(matches!(
            err,
            RefreshError::Snapshot(SnapshotError::MissingWeek { week: 9 })
        ));
    }
}
