// Team rosters with season per-game rates and availability status.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::StatLine;

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// A player's current availability. Healthy and day-to-day players are
/// expected to play; players ruled out contribute nothing to projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    #[serde(rename = "HEALTHY", alias = "ACTIVE")]
    Healthy,
    #[serde(rename = "DAY_TO_DAY")]
    DayToDay,
    #[serde(rename = "OUT")]
    Out,
}

impl AvailabilityStatus {
    /// Whether the player is expected to suit up at all.
    pub fn expected_to_play(&self) -> bool {
        !matches!(self, AvailabilityStatus::Out)
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// One rostered player's season profile.
///
/// `per_game` holds season per-game averages; its ratio pairs are the
/// player's average made/attempted per game, so remaining-game
/// contributions accumulate as numerator/denominator rather than as a
/// percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonAverages {
    pub name: String,
    pub per_game: StatLine,
    /// Season games played, used to rebuild season totals from the
    /// per-game line.
    pub games_played: u32,
    pub status: AvailabilityStatus,
    /// Scoring periods in which the player's pro team has a game this week.
    #[serde(default)]
    pub scheduled_periods: BTreeSet<u32>,
}

impl PlayerSeasonAverages {
    /// Whether this player is expected to contribute in the given scoring
    /// period: available, and their pro team plays that day.
    pub fn plays_in(&self, period: u32) -> bool {
        self.status.expected_to_play() && self.scheduled_periods.contains(&period)
    }

    /// The player's season totals (per-game line times games played).
    pub fn season_totals(&self) -> StatLine {
        self.per_game.scaled(self.games_played as f64)
    }
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// A fantasy team's full roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub team: String,
    pub players: Vec<PlayerSeasonAverages>,
}

impl TeamRoster {
    /// Season-long category totals across the whole roster. This is the
    /// roster-based signal used for archetype detection, distinct from the
    /// team's weekly box totals.
    pub fn season_totals(&self) -> StatLine {
        let mut totals = StatLine::new();
        for player in &self.players {
            totals.merge(&player.season_totals());
        }
        totals
    }
}

/// Find a roster by team name (case insensitive).
pub fn roster_for<'a>(rosters: &'a [TeamRoster], team: &str) -> Option<&'a TeamRoster> {
    rosters.iter().find(|r| r.team.eq_ignore_ascii_case(team))
}
