// Season standings from scheduled matchup results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::snapshot::week::LeagueWeekSnapshot;
use crate::stats::streaks::team_names;

/// One team's scheduled-matchup record across the season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub rank: usize,
    pub team: String,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub win_pct: f64,
}

impl StandingsEntry {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.ties
    }
}

/// Rank every team by scheduled wins (then fewest losses, then name).
/// A team with no scheduled results has a 0.0 win percentage and sorts
/// last.
pub fn standings(weeks: &[Arc<LeagueWeekSnapshot>]) -> Vec<StandingsEntry> {
    let mut entries: Vec<StandingsEntry> = team_names(weeks)
        .into_iter()
        .map(|team| {
            let mut wins = 0;
            let mut losses = 0;
            let mut ties = 0;
            for week in weeks {
                let Some(result) = week.scheduled_result(&team) else {
                    continue;
                };
                let won = result.beaten_by(&team).unwrap_or(false);
                let record = week.record_for(&team);
                let lost = record
                    .and_then(|r| result.beaten_by(&r.opponent))
                    .unwrap_or(false);
                if won {
                    wins += 1;
                } else if lost {
                    losses += 1;
                } else {
                    ties += 1;
                }
            }
            let games = wins + losses + ties;
            StandingsEntry {
                rank: 0,
                team,
                wins,
                losses,
                ties,
                win_pct: if games > 0 {
                    wins as f64 / games as f64
                } else {
                    0.0
                },
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then(a.team.cmp(&b.team))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}
