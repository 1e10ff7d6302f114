// Normalization of one week's raw per-team totals into a typed snapshot.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::category::{Category, RatioPair, StatLine};
use crate::matchup::all_pairs;
use crate::snapshot::week::{LeagueWeekSnapshot, TeamWeekRecord};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no box-score data available for week {week}")]
    MissingWeek { week: u32 },

    #[error("week {week} payload lists team `{team}` more than once")]
    DuplicateTeam { week: u32, team: String },

    #[error("week {week}: team `{team}` names unknown opponent `{opponent}`")]
    UnknownOpponent {
        week: u32,
        team: String,
        opponent: String,
    },
}

// ---------------------------------------------------------------------------
// Raw upstream payload
// ---------------------------------------------------------------------------

/// One team's raw weekly totals as supplied by the upstream league data
/// collaborator. Ratio categories arrive as made/attempted pairs; the
/// denominator is retained even when zero so a no-attempt week renders as
/// "no data" rather than 0%.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeamWeek {
    pub team: String,
    pub opponent: String,
    #[serde(default)]
    pub minutes: f64,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub threes_made: f64,
    pub turnovers: f64,
    pub fg_made: f64,
    pub fg_attempted: f64,
    pub ft_made: f64,
    pub ft_attempted: f64,
}

impl RawTeamWeek {
    fn stat_line(&self) -> StatLine {
        let mut line = StatLine::new();
        line.set_count(Category::Points, self.points);
        line.set_count(Category::Rebounds, self.rebounds);
        line.set_count(Category::Assists, self.assists);
        line.set_count(Category::Steals, self.steals);
        line.set_count(Category::Blocks, self.blocks);
        line.set_count(Category::ThreesMade, self.threes_made);
        line.set_count(Category::Turnovers, self.turnovers);
        line.field_goals = RatioPair::new(self.fg_made, self.fg_attempted);
        line.free_throws = RatioPair::new(self.ft_made, self.ft_attempted);
        line
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Build a week snapshot from raw per-team totals.
///
/// Validates team uniqueness and opponent references, converts each row into
/// a typed record, computes the cross-team average minutes as the simple
/// mean of team minute totals, and scores every unordered team pair.
pub fn build_week_snapshot(
    week: u32,
    rows: Vec<RawTeamWeek>,
) -> Result<LeagueWeekSnapshot, SnapshotError> {
    if rows.is_empty() {
        return Err(SnapshotError::MissingWeek { week });
    }

    for (i, row) in rows.iter().enumerate() {
        if rows[..i]
            .iter()
            .any(|other| other.team.eq_ignore_ascii_case(&row.team))
        {
            return Err(SnapshotError::DuplicateTeam {
                week,
                team: row.team.clone(),
            });
        }
    }

    for row in &rows {
        let known = rows
            .iter()
            .any(|other| other.team.eq_ignore_ascii_case(&row.opponent));
        if !known {
            return Err(SnapshotError::UnknownOpponent {
                week,
                team: row.team.clone(),
                opponent: row.opponent.clone(),
            });
        }
        if row.team.eq_ignore_ascii_case(&row.opponent) {
            warn!(
                week,
                team = %row.team,
                "team is scheduled against itself; scheduled-result queries will be empty"
            );
        }
    }

    let records: Vec<TeamWeekRecord> = rows
        .into_iter()
        .map(|row| {
            let stats = row.stat_line();
            TeamWeekRecord {
                team: row.team,
                week,
                stats,
                minutes: row.minutes,
                opponent: row.opponent,
            }
        })
        .collect();

    let average_minutes =
        records.iter().map(|r| r.minutes).sum::<f64>() / records.len() as f64;

    let results = all_pairs(&records);

    Ok(LeagueWeekSnapshot {
        week,
        records,
        results,
        average_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn raw(team: &str, opponent: &str, minutes: f64, points: f64) -> RawTeamWeek {
        RawTeamWeek {
            team: team.to_string(),
            opponent: opponent.to_string(),
            minutes,
            points,
            rebounds: 100.0,
            assists: 50.0,
            steals: 10.0,
            blocks: 8.0,
            threes_made: 20.0,
            turnovers: 30.0,
            fg_made: 150.0,
            fg_attempted: 300.0,
            ft_made: 60.0,
            ft_attempted: 80.0,
        }
    }

    #[test]
    fn builds_records_results_and_average_minutes() {
        let rows = vec![
            raw("Team A", "Team B", 900.0, 400.0),
            raw("Team B", "Team A", 800.0, 380.0),
            raw("Team C", "Team D", 1000.0, 420.0),
            raw("Team D", "Team C", 700.0, 360.0),
        ];
        let snapshot = build_week_snapshot(4, rows).unwrap();

        assert_eq!(snapshot.records.len(), 4);
        assert_eq!(snapshot.results.len(), 6);
        assert_relative_eq!(snapshot.average_minutes, 850.0);
        assert_relative_eq!(snapshot.minutes_vs_league("Team A").unwrap(), 50.0);
        assert_relative_eq!(snapshot.minutes_vs_opponent("Team A").unwrap(), 100.0);
    }

    #[test]
    fn empty_payload_is_missing_week() {
        let err = build_week_snapshot(7, Vec::new()).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingWeek { week: 7 }));
    }

    #[test]
    fn duplicate_team_is_rejected() {
        let rows = vec![
            raw("Team A", "Team B", 900.0, 400.0),
            raw("team a", "Team B", 800.0, 380.0),
            raw("Team B", "Team A", 800.0, 380.0),
        ];
        let err = build_week_snapshot(4, rows).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateTeam { .. }));
    }

    #[test]
    fn unknown_opponent_is_rejected() {
        let rows = vec![
            raw("Team A", "Team B", 900.0, 400.0),
            raw("Team B", "Ghost Team", 800.0, 380.0),
        ];
        let err = build_week_snapshot(4, rows).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownOpponent { .. }));
    }

    #[test]
    fn zero_attempt_ratio_survives_normalization_as_no_data() {
        let mut row_a = raw("Team A", "Team B", 900.0, 400.0);
        row_a.ft_made = 0.0;
        row_a.ft_attempted = 0.0;
        let rows = vec![row_a, raw("Team B", "Team A", 800.0, 380.0)];

        let snapshot = build_week_snapshot(4, rows).unwrap();
        let record = snapshot.record_for("Team A").unwrap();
        assert_eq!(record.stats.value(Category::FreeThrowPct), None);
        // The pair itself is retained, not discarded.
        assert_eq!(record.stats.free_throws.attempted, 0.0);
    }

    #[test]
    fn teams_beaten_counts_majority_wins_across_league() {
        // Team C dominates everyone; Team D loses to everyone.
        let rows = vec![
            raw("Team A", "Team B", 900.0, 400.0),
            raw("Team B", "Team A", 800.0, 380.0),
            {
                let mut r = raw("Team C", "Team D", 1000.0, 500.0);
                r.rebounds = 130.0;
                r.assists = 70.0;
                r.steals = 15.0;
                r.blocks = 12.0;
                r.turnovers = 20.0;
                r
            },
            {
                let mut r = raw("Team D", "Team C", 700.0, 300.0);
                r.rebounds = 80.0;
                r.assists = 40.0;
                r.steals = 5.0;
                r.blocks = 4.0;
                r.turnovers = 40.0;
                r
            },
        ];
        let snapshot = build_week_snapshot(4, rows).unwrap();
        assert_eq!(snapshot.teams_beaten("Team C"), 3);
        assert_eq!(snapshot.teams_beaten("Team D"), 0);

        // Cross-check against the definition: count of >= 5 category wins.
        for team in snapshot.team_names() {
            let by_definition = snapshot
                .results
                .iter()
                .filter(|r| r.involves(team))
                .filter(|r| r.wins_for(team).unwrap() >= 5)
                .count();
            assert_eq!(snapshot.teams_beaten(team), by_definition);
        }
    }
}
