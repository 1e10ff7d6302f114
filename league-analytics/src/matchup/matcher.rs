// Resolution of a caller-supplied team-name pair to one scheduled matchup.
//
// Resolution is exact two-element set equality (case insensitive, order
// independent). Checking each name's membership separately, or substring
// matching against team names, has produced false matches before: a pair
// like ("Team A", "Team C") must not resolve just because both names appear
// somewhere in the schedule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchupError {
    #[error("no scheduled matchup between `{name_a}` and `{name_b}` in week {week}")]
    NoSuchMatchup {
        week: u32,
        name_a: String,
        name_b: String,
    },

    #[error(
        "week {week} schedule lists the `{name_a}` vs `{name_b}` matchup {count} times"
    )]
    AmbiguousMatchup {
        week: u32,
        name_a: String,
        name_b: String,
        count: usize,
    },
}

// ---------------------------------------------------------------------------
// Scheduled matchups
// ---------------------------------------------------------------------------

/// One scheduled pairing for a week. `home`/`away` reflect the feed's
/// designation; matching treats the pair as unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatchup {
    pub home: String,
    pub away: String,
}

impl ScheduledMatchup {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        ScheduledMatchup {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Whether this matchup's participants are exactly `{a, b}`.
    fn is_pair(&self, a: &str, b: &str) -> bool {
        (self.home.eq_ignore_ascii_case(a) && self.away.eq_ignore_ascii_case(b))
            || (self.home.eq_ignore_ascii_case(b) && self.away.eq_ignore_ascii_case(a))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a name pair to the single scheduled matchup whose two
/// participants are exactly `{name_a, name_b}`.
///
/// Names are trimmed and compared case-insensitively. A schedule that lists
/// the same pair more than once is malformed and reported as ambiguous.
pub fn resolve_matchup<'a>(
    name_a: &str,
    name_b: &str,
    week: u32,
    schedule: &'a [ScheduledMatchup],
) -> Result<&'a ScheduledMatchup, MatchupError> {
    let a = name_a.trim();
    let b = name_b.trim();

    let matches: Vec<&ScheduledMatchup> =
        schedule.iter().filter(|m| m.is_pair(a, b)).collect();

    match matches.len() {
        0 => Err(MatchupError::NoSuchMatchup {
            week,
            name_a: a.to_string(),
            name_b: b.to_string(),
        }),
        1 => Ok(matches[0]),
        count => Err(MatchupError::AmbiguousMatchup {
            week,
            name_a: a.to_string(),
            name_b: b.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Vec<ScheduledMatchup> {
        vec![
            ScheduledMatchup::new("Team A", "Team B"),
            ScheduledMatchup::new("Team C", "Team D"),
        ]
    }

    #[test]
    fn resolves_exact_pair_in_either_order() {
        let schedule = schedule();
        let m = resolve_matchup("Team A", "Team B", 5, &schedule).unwrap();
        assert_eq!(m.home, "Team A");
        let m = resolve_matchup("team b", "TEAM A", 5, &schedule).unwrap();
        assert_eq!(m.home, "Team A");
    }

    #[test]
    fn individually_present_names_do_not_match() {
        // "Team A" and "Team C" each appear in the schedule, but never as
        // one matchup's pair.
        let schedule = schedule();
        let err = resolve_matchup("Team A", "Team C", 5, &schedule).unwrap_err();
        assert!(matches!(err, MatchupError::NoSuchMatchup { .. }));
    }

    #[test]
    fn substring_names_do_not_match() {
        let schedule = vec![ScheduledMatchup::new("Team Alpha", "Team Beta")];
        let err = resolve_matchup("Team", "Team Beta", 1, &schedule).unwrap_err();
        assert!(matches!(err, MatchupError::NoSuchMatchup { .. }));
    }

    #[test]
    fn duplicate_schedule_entries_are_ambiguous() {
        let mut schedule = schedule();
        schedule.push(ScheduledMatchup::new("Team B", "Team A"));
        let err = resolve_matchup("Team A", "Team B", 5, &schedule).unwrap_err();
        assert_eq!(
            err,
            MatchupError::AmbiguousMatchup {
                week: 5,
                name_a: "Team A".to_string(),
                name_b: "Team B".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let schedule = schedule();
        assert!(resolve_matchup("  Team C ", "Team D", 5, &schedule).is_ok());
    }
}
