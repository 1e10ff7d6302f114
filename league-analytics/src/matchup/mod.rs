// Week-level matchup scoring: per-category comparison of two teams, the
// all-pairs sweep powering the teams-beaten signal, and exact resolution of
// a caller-supplied team-name pair against the week's schedule.

pub mod evaluator;
pub mod matcher;

pub use evaluator::{
    all_pairs, compare_category, compare_stat_lines, evaluate, CategoryOutcome, MatchupResult,
    BEATEN_THRESHOLD,
};
pub use matcher::{resolve_matchup, MatchupError, ScheduledMatchup};
