// Scheduled-opponent win streaks.
//
// Streaks are built from the real scheduled matchup each week, not the
// all-pairs power-ranking signal: a week counts toward a streak only when
// the team's beaten flag against its scheduled opponent was true.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::snapshot::week::LeagueWeekSnapshot;

/// Longest and current runs of consecutive scheduled-matchup wins.
///
/// The current run never includes an in-progress week; callers pass
/// completed weeks only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStreaks {
    pub team: String,
    pub longest: usize,
    pub current: usize,
}

/// All team names appearing anywhere in the given weeks, sorted.
pub fn team_names(weeks: &[Arc<LeagueWeekSnapshot>]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for week in weeks {
        for record in &week.records {
            names.insert(record.team.clone());
        }
    }
    names.into_iter().collect()
}

/// Per-week scheduled-win series for one team, in week order. A week where
/// the team has no scheduled result counts as a non-win and breaks a run.
pub fn scheduled_win_series(weeks: &[Arc<LeagueWeekSnapshot>], team: &str) -> Vec<bool> {
    weeks
        .iter()
        .map(|week| {
            week.scheduled_result(team)
                .and_then(|result| result.beaten_by(team))
                .unwrap_or(false)
        })
        .collect()
}

/// Compute longest and current win streaks for every team, sorted by
/// current run descending, then longest, then name.
pub fn compute_streaks(weeks: &[Arc<LeagueWeekSnapshot>]) -> Vec<TeamStreaks> {
    let mut entries: Vec<TeamStreaks> = team_names(weeks)
        .into_iter()
        .map(|team| {
            let series = scheduled_win_series(weeks, &team);
            let mut longest = 0;
            let mut run = 0;
            for won in &series {
                if *won {
                    run += 1;
                    longest = longest.max(run);
                } else {
                    run = 0;
                }
            }
            TeamStreaks {
                team,
                longest,
                current: run,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.current
            .cmp(&a.current)
            .then(b.longest.cmp(&a.longest))
            .then(a.team.cmp(&b.team))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::builder::{build_week_snapshot, RawTeamWeek};

    /// Two-team league where `a_wins` decides each week's scheduled result.
    fn weeks_from(a_wins: &[bool]) -> Vec<Arc<LeagueWeekSnapshot>> {
        a_wins
            .iter()
            .enumerate()
            .map(|(i, a_won)| {
                let (pts_a, pts_b) = if *a_won { (450.0, 350.0) } else { (350.0, 450.0) };
                let raw = |team: &str, opponent: &str, points: f64, to: f64| RawTeamWeek {
                    team: team.to_string(),
                    opponent: opponent.to_string(),
                    minutes: 900.0,
                    points,
                    rebounds: points / 4.0,
                    assists: points / 8.0,
                    steals: points / 40.0,
                    blocks: points / 50.0,
                    threes_made: points / 20.0,
                    turnovers: to,
                    fg_made: points / 2.5,
                    fg_attempted: points / 1.2,
                    ft_made: 60.0,
                    ft_attempted: 80.0,
                };
                let (to_a, to_b) = if *a_won { (25.0, 35.0) } else { (35.0, 25.0) };
                Arc::new(
                    build_week_snapshot(
                        (i + 1) as u32,
                        vec![
                            raw("Team A", "Team B", pts_a, to_a),
                            raw("Team B", "Team A", pts_b, to_b),
                        ],
                    )
                    .unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn longest_and_current_runs() {
        let weeks = weeks_from(&[true, true, true, false, true, true]);
        let streaks = compute_streaks(&weeks);
        let a = streaks.iter().find(|s| s.team == "Team A").unwrap();
        assert_eq!(a.longest, 3);
        assert_eq!(a.current, 2);

        let b = streaks.iter().find(|s| s.team == "Team B").unwrap();
        assert_eq!(b.longest, 1);
        assert_eq!(b.current, 0);
    }

    #[test]
    fn empty_history_yields_no_streaks() {
        assert!(compute_streaks(&[]).is_empty());
    }

    #[test]
    fn current_run_is_zero_after_a_loss() {
        let weeks = weeks_from(&[true, true, false]);
        let streaks = compute_streaks(&weeks);
        let a = streaks.iter().find(|s| s.team == "Team A").unwrap();
        assert_eq!(a.longest, 2);
        assert_eq!(a.current, 0);
    }
}
