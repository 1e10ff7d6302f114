// Live-week matchup projection.
//
// Projected totals start from what each side has already banked this week
// and add, for every remaining scoring period, the season per-game line of
// each rostered player expected to take the floor that day. Ratio
// categories accumulate made/attempted contributions and are only resolved
// back to a percentage at the end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::category::{Category, StatLine, CATEGORY_COUNT};
use crate::matchup::{compare_category, resolve_matchup, CategoryOutcome};
use crate::projection::roster::{roster_for, TeamRoster};
use crate::projection::schedule::WeekSchedule;
use crate::snapshot::week::LeagueWeekSnapshot;

/// Confidence reported when a projection carries no forward-looking signal
/// (no remaining periods, or a dead-even category split).
pub const CONFIDENCE_FLOOR: f64 = 0.50;

/// Upper bound on reported confidence.
pub const CONFIDENCE_CEILING: f64 = 0.95;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("cannot project `{name_a}` vs `{name_b}`: {reason}")]
    NoPredictionData {
        name_a: String,
        name_b: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A completed projection for one live weekly matchup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedMatchup {
    pub week: u32,
    pub live: bool,
    pub team_a: String,
    pub team_b: String,
    pub remaining_periods: Vec<u32>,
    pub accumulated_a: StatLine,
    pub accumulated_b: StatLine,
    pub projected_a: StatLine,
    pub projected_b: StatLine,
    pub outcomes: BTreeMap<Category, CategoryOutcome>,
    /// Projected category split, e.g. "5-3" or "5-3-1" with ties.
    pub projected_score: String,
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Projects a live matchup from accumulated totals, the week schedule, and
/// roster season rates.
pub struct ProjectionEngine<'a> {
    schedule: &'a WeekSchedule,
    rosters: &'a [TeamRoster],
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(schedule: &'a WeekSchedule, rosters: &'a [TeamRoster]) -> Self {
        ProjectionEngine { schedule, rosters }
    }

    /// Project the matchup between two named teams.
    ///
    /// `current` is the live snapshot holding each team's already
    /// accumulated totals for the week (pre-fetched by the caller; this
    /// engine performs no upstream reads).
    pub fn project(
        &self,
        name_a: &str,
        name_b: &str,
        current: &LeagueWeekSnapshot,
        live: bool,
    ) -> Result<ProjectedMatchup, ProjectionError> {
        let matchup = resolve_matchup(
            name_a,
            name_b,
            self.schedule.week,
            &self.schedule.matchups,
        )
        .map_err(|err| ProjectionError::NoPredictionData {
            name_a: name_a.to_string(),
            name_b: name_b.to_string(),
            reason: err.to_string(),
        })?;

        // Canonical names come from the schedule, not the caller's input.
        let team_a = matchup.home.clone();
        let team_b = matchup.away.clone();

        let accumulated_a = self.accumulated(current, &team_a);
        let accumulated_b = self.accumulated(current, &team_b);

        if live && self.schedule.remaining_periods.is_empty() {
            // The upstream schedule says the week is over while the caller
            // says it is live. Flag it rather than inventing a fallback
            // window; the projection degenerates to accumulated totals.
            warn!(
                week = self.schedule.week,
                "live projection requested but the schedule reports no remaining periods"
            );
        }

        let contributions_a = self.remaining_contribution(&team_a);
        let contributions_b = self.remaining_contribution(&team_b);

        if accumulated_a.is_empty()
            && accumulated_b.is_empty()
            && contributions_a.is_none()
            && contributions_b.is_none()
        {
            return Err(ProjectionError::NoPredictionData {
                name_a: team_a,
                name_b: team_b,
                reason: "no accumulated totals and no eligible remaining-period contributions"
                    .to_string(),
            });
        }

        let mut projected_a = accumulated_a.clone();
        if let Some(extra) = &contributions_a {
            projected_a.merge(extra);
        }
        let mut projected_b = accumulated_b.clone();
        if let Some(extra) = &contributions_b {
            projected_b.merge(extra);
        }

        let mut outcomes = BTreeMap::new();
        let mut wins_a = 0usize;
        let mut wins_b = 0usize;
        let mut ties = 0usize;
        for category in Category::ALL {
            let outcome = compare_category(
                category,
                projected_a.value(category),
                projected_b.value(category),
            );
            match outcome {
                CategoryOutcome::TeamA => wins_a += 1,
                CategoryOutcome::TeamB => wins_b += 1,
                CategoryOutcome::Tie => ties += 1,
            }
            outcomes.insert(category, outcome);
        }

        let projected_score = if ties > 0 {
            format!("{wins_a}-{wins_b}-{ties}")
        } else {
            format!("{wins_a}-{wins_b}")
        };

        let confidence = if self.schedule.remaining_periods.is_empty() {
            CONFIDENCE_FLOOR
        } else {
            confidence_from_spread(wins_a.abs_diff(wins_b))
        };

        Ok(ProjectedMatchup {
            week: self.schedule.week,
            live,
            team_a,
            team_b,
            remaining_periods: self.schedule.remaining_periods.clone(),
            accumulated_a,
            accumulated_b,
            projected_a,
            projected_b,
            outcomes,
            projected_score,
            confidence,
        })
    }

    /// Already-banked totals for a team; an empty line when the snapshot
    /// has no record for it yet.
    fn accumulated(&self, current: &LeagueWeekSnapshot, team: &str) -> StatLine {
        match current.record_for(team) {
            Some(record) => record.stats.clone(),
            None => {
                warn!(team, week = current.week, "no accumulated record for team");
                StatLine::new()
            }
        }
    }

    /// Sum of per-game lines over every (remaining period, eligible player)
    /// combination. `None` when no eligible contribution exists, including
    /// when the team has no roster at all.
    fn remaining_contribution(&self, team: &str) -> Option<StatLine> {
        let roster = roster_for(self.rosters, team)?;
        let mut total = StatLine::new();
        let mut games = 0usize;
        for period in &self.schedule.remaining_periods {
            for player in &roster.players {
                if player.plays_in(*period) {
                    total.merge(&player.per_game);
                    games += 1;
                }
            }
        }
        if games == 0 {
            None
        } else {
            Some(total)
        }
    }
}

/// Map the projected category-win spread onto the bounded confidence range.
/// A dead heat sits at the floor; a sweep approaches the ceiling.
fn confidence_from_spread(spread: usize) -> f64 {
    let fraction = spread as f64 / CATEGORY_COUNT as f64;
    (CONFIDENCE_FLOOR + fraction * (CONFIDENCE_CEILING - CONFIDENCE_FLOOR))
        .clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}
