// Week-over-week form built on the all-pairs teams-beaten signal:
// consistency (variance), hot/cold windows, and most-improved.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::snapshot::history::HistoryError;
use crate::snapshot::week::LeagueWeekSnapshot;
use crate::stats::streaks::team_names;

/// Completed weeks required before most-improved is meaningful.
pub const MOST_IMPROVED_MIN_WEEKS: usize = 8;

/// Width of the early and recent windows compared by most-improved.
pub const IMPROVEMENT_WINDOW: usize = 4;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Mean and spread of a team's weekly teams-beaten counts. Lower variance
/// means more consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyEntry {
    pub team: String,
    pub mean: f64,
    pub variance: f64,
}

/// Mean teams-beaten over a trailing window of completed weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormEntry {
    pub team: String,
    /// Number of weeks actually averaged (the window shrinks when fewer
    /// completed weeks exist).
    pub window: usize,
    pub mean: f64,
}

/// Early-season vs recent-form comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementEntry {
    pub team: String,
    pub early_mean: f64,
    pub recent_mean: f64,
    pub improvement: f64,
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

/// Weekly teams-beaten counts for one team, in week order. Weeks where the
/// team did not appear count as zero.
pub fn teams_beaten_series(weeks: &[Arc<LeagueWeekSnapshot>], team: &str) -> Vec<f64> {
    weeks
        .iter()
        .map(|week| week.teams_beaten(team) as f64)
        .collect()
}

/// Mean and population variance of a series. The series is the full
/// population of completed weeks, not a sample, so the N denominator is
/// used. Returns (0.0, 0.0) for an empty series.
fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Consistency for every team across the given completed weeks, most
/// consistent (lowest variance) first.
pub fn consistency(weeks: &[Arc<LeagueWeekSnapshot>]) -> Vec<ConsistencyEntry> {
    let mut entries: Vec<ConsistencyEntry> = team_names(weeks)
        .into_iter()
        .map(|team| {
            let series = teams_beaten_series(weeks, &team);
            let (mean, variance) = mean_and_variance(&series);
            ConsistencyEntry {
                team,
                mean,
                variance,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.variance
            .total_cmp(&b.variance)
            .then(a.team.cmp(&b.team))
    });
    entries
}

fn form_entries(weeks: &[Arc<LeagueWeekSnapshot>], window: usize) -> Vec<FormEntry> {
    let window = window.min(weeks.len());
    let recent = &weeks[weeks.len() - window..];
    team_names(weeks)
        .into_iter()
        .map(|team| {
            let series = teams_beaten_series(recent, &team);
            FormEntry {
                mean: mean(&series),
                window,
                team,
            }
        })
        .collect()
}

/// Teams ranked hottest first: highest mean teams-beaten over the trailing
/// window of completed weeks.
pub fn hot_teams(weeks: &[Arc<LeagueWeekSnapshot>], window: usize) -> Vec<FormEntry> {
    let mut entries = form_entries(weeks, window);
    entries.sort_by(|a, b| b.mean.total_cmp(&a.mean).then(a.team.cmp(&b.team)));
    entries
}

/// Teams ranked coldest first: lowest mean teams-beaten over the trailing
/// window of completed weeks.
pub fn cold_teams(weeks: &[Arc<LeagueWeekSnapshot>], window: usize) -> Vec<FormEntry> {
    let mut entries = form_entries(weeks, window);
    entries.sort_by(|a, b| a.mean.total_cmp(&b.mean).then(a.team.cmp(&b.team)));
    entries
}

/// Most-improved teams: the gain from the mean teams-beaten of the first
/// four completed weeks to the mean of the most recent four. Only positive
/// improvements are reported, largest first.
///
/// Requires at least eight completed weeks.
pub fn most_improved(
    weeks: &[Arc<LeagueWeekSnapshot>],
) -> Result<Vec<ImprovementEntry>, HistoryError> {
    if weeks.len() < MOST_IMPROVED_MIN_WEEKS {
        return Err(HistoryError::InsufficientHistory {
            required: MOST_IMPROVED_MIN_WEEKS,
            available: weeks.len(),
        });
    }

    let early = &weeks[..IMPROVEMENT_WINDOW];
    let recent = &weeks[weeks.len() - IMPROVEMENT_WINDOW..];

    let mut entries: Vec<ImprovementEntry> = team_names(weeks)
        .into_iter()
        .filter_map(|team| {
            let early_mean = mean(&teams_beaten_series(early, &team));
            let recent_mean = mean(&teams_beaten_series(recent, &team));
            let improvement = recent_mean - early_mean;
            if improvement > 0.0 {
                Some(ImprovementEntry {
                    team,
                    early_mean,
                    recent_mean,
                    improvement,
                })
            } else {
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.improvement
            .total_cmp(&a.improvement)
            .then(a.team.cmp(&b.team))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::builder::{build_week_snapshot, RawTeamWeek};
    use approx::assert_relative_eq;

    /// Four-team league where `dominant` beats the given number of teams by
    /// scaling its counting stats; the other three stay symmetric enough to
    /// keep the fixture simple.
    fn week(index: u32, a_beats: usize) -> Arc<LeagueWeekSnapshot> {
        // Team A's totals scale with how many teams it should beat; the
        // remaining teams are staggered so each comparison is decisive.
        let strength = |team: &str| -> f64 {
            match team {
                "Team A" => match a_beats {
                    0 => 1.0,
                    1 => 2.5,
                    2 => 3.5,
                    _ => 5.0,
                },
                "Team B" => 2.0,
                "Team C" => 3.0,
                _ => 4.0,
            }
        };
        let raw = |team: &str, opponent: &str| {
            let s = strength(team);
            RawTeamWeek {
                team: team.to_string(),
                opponent: opponent.to_string(),
                minutes: 900.0,
                points: 100.0 * s,
                rebounds: 40.0 * s,
                assists: 20.0 * s,
                steals: 5.0 * s,
                blocks: 4.0 * s,
                threes_made: 10.0 * s,
                turnovers: 50.0 - 5.0 * s,
                fg_made: 40.0 * s,
                fg_attempted: 100.0,
                ft_made: 20.0 * s,
                ft_attempted: 100.0,
            }
        };
        Arc::new(
            build_week_snapshot(
                index,
                vec![
                    raw("Team A", "Team B"),
                    raw("Team B", "Team A"),
                    raw("Team C", "Team D"),
                    raw("Team D", "Team C"),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn constant_series_has_zero_variance() {
        let weeks: Vec<_> = (1..=5).map(|i| week(i, 2)).collect();
        let entries = consistency(&weeks);
        let a = entries.iter().find(|e| e.team == "Team A").unwrap();
        assert_relative_eq!(a.variance, 0.0);
        assert_relative_eq!(a.mean, 2.0);
    }

    #[test]
    fn variance_orders_most_consistent_first() {
        let weeks = vec![week(1, 0), week(2, 3), week(3, 0), week(4, 3)];
        let entries = consistency(&weeks);
        // Team A swings between 0 and 3 while the others drift by at most
        // one, so Team A ranks least consistent.
        assert_eq!(entries.last().unwrap().team, "Team A");
        assert!(entries.last().unwrap().variance > 0.0);
    }

    #[test]
    fn hot_window_uses_most_recent_weeks_only() {
        // Cold early, hot late.
        let weeks = vec![
            week(1, 0),
            week(2, 0),
            week(3, 0),
            week(4, 3),
            week(5, 3),
            week(6, 3),
            week(7, 3),
        ];
        let hot = hot_teams(&weeks, 4);
        let a = hot.iter().find(|e| e.team == "Team A").unwrap();
        assert_relative_eq!(a.mean, 3.0);
        assert_eq!(a.window, 4);
        assert_eq!(hot.first().unwrap().team, "Team A");
    }

    #[test]
    fn window_shrinks_with_short_history() {
        let weeks = vec![week(1, 3), week(2, 3)];
        let hot = hot_teams(&weeks, 4);
        assert_eq!(hot[0].window, 2);
    }

    #[test]
    fn most_improved_requires_eight_weeks() {
        let weeks: Vec<_> = (1..=7).map(|i| week(i, 1)).collect();
        let err = most_improved(&weeks).unwrap_err();
        assert_eq!(
            err,
            HistoryError::InsufficientHistory {
                required: 8,
                available: 7
            }
        );
    }

    #[test]
    fn improvement_is_recent_minus_early_mean() {
        // Early four weeks: Team A beats 2 teams each week (mean 2.0).
        // Recent four weeks: 3 each week (mean 3.0). Improvement = 1.0.
        let weeks = vec![
            week(1, 2),
            week(2, 2),
            week(3, 2),
            week(4, 2),
            week(5, 3),
            week(6, 3),
            week(7, 3),
            week(8, 3),
        ];
        let improved = most_improved(&weeks).unwrap();
        let a = improved.iter().find(|e| e.team == "Team A").unwrap();
        assert_relative_eq!(a.early_mean, 2.0);
        assert_relative_eq!(a.recent_mean, 3.0);
        assert_relative_eq!(a.improvement, 1.0);
    }

    #[test]
    fn declining_teams_are_not_reported() {
        let weeks = vec![
            week(1, 3),
            week(2, 3),
            week(3, 3),
            week(4, 3),
            week(5, 0),
            week(6, 0),
            week(7, 0),
            week(8, 0),
        ];
        let improved = most_improved(&weeks).unwrap();
        assert!(improved.iter().all(|e| e.team != "Team A"));
        assert!(improved.iter().all(|e| e.improvement > 0.0));
    }
}
