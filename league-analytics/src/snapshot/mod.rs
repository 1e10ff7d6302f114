// Weekly snapshots: normalization of raw box-score totals into typed,
// immutable per-week records, the append-only season history, and the
// on-disk per-week JSON store.

pub mod builder;
pub mod history;
pub mod store;
pub mod week;

pub use builder::{build_week_snapshot, RawTeamWeek, SnapshotError};
pub use history::{HistoryError, SeasonHistory};
pub use store::SnapshotStore;
pub use week::{LeagueWeekSnapshot, TeamWeekRecord};
