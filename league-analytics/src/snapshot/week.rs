// Typed per-week records and the finished week snapshot.

use serde::{Deserialize, Serialize};

use crate::category::StatLine;
use crate::matchup::MatchupResult;

// ---------------------------------------------------------------------------
// Team week record
// ---------------------------------------------------------------------------

/// One team's accumulated totals for one week.
///
/// Owned by the week's snapshot and immutable once the week is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeekRecord {
    pub team: String,
    pub week: u32,
    pub stats: StatLine,
    /// Total minutes played by the team's lineup this week.
    pub minutes: f64,
    /// The scheduled opponent for this week.
    pub opponent: String,
}

// ---------------------------------------------------------------------------
// League week snapshot
// ---------------------------------------------------------------------------

/// All teams' records for one week plus the all-pairs matchup results and
/// the week's cross-team average minutes.
///
/// The all-pairs results compare every team against every other team, not
/// only its scheduled opponent; this powers the "teams beaten" power-ranking
/// signal, which is distinct from the real scheduled win/loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueWeekSnapshot {
    pub week: u32,
    pub records: Vec<TeamWeekRecord>,
    pub results: Vec<MatchupResult>,
    pub average_minutes: f64,
}

impl LeagueWeekSnapshot {
    /// Team names in payload order.
    pub fn team_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.team.as_str()).collect()
    }

    /// The record for a team (case-insensitive name match).
    pub fn record_for(&self, team: &str) -> Option<&TeamWeekRecord> {
        self.records
            .iter()
            .find(|r| r.team.eq_ignore_ascii_case(team))
    }

    /// The all-pairs result between two specific teams, if both played.
    pub fn result_between(&self, a: &str, b: &str) -> Option<&MatchupResult> {
        self.results.iter().find(|r| {
            (r.team_a.eq_ignore_ascii_case(a) && r.team_b.eq_ignore_ascii_case(b))
                || (r.team_a.eq_ignore_ascii_case(b) && r.team_b.eq_ignore_ascii_case(a))
        })
    }

    /// The result against the team's scheduled opponent for this week.
    pub fn scheduled_result(&self, team: &str) -> Option<&MatchupResult> {
        let record = self.record_for(team)?;
        self.result_between(&record.team, &record.opponent)
    }

    /// How many other teams this team beat (>= 5 of 9 categories) across
    /// the whole league this week.
    pub fn teams_beaten(&self, team: &str) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.beaten_by(team))
            .filter(|beaten| *beaten)
            .count()
    }

    /// Minutes delta vs the week's league average.
    pub fn minutes_vs_league(&self, team: &str) -> Option<f64> {
        Some(self.record_for(team)?.minutes - self.average_minutes)
    }

    /// Minutes delta vs the team's scheduled opponent.
    pub fn minutes_vs_opponent(&self, team: &str) -> Option<f64> {
        let record = self.record_for(team)?;
        let opponent = self.record_for(&record.opponent)?;
        Some(record.minutes - opponent.minutes)
    }
}
