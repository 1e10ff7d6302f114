// Category-by-category scoring of one team's week against another's.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::{Category, StatLine, CATEGORY_COUNT};
use crate::snapshot::week::TeamWeekRecord;

/// Category wins required to count as having beaten the other team.
/// Ties count for neither side, so 5 of 9 is a strict majority.
pub const BEATEN_THRESHOLD: usize = 5;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Winner of a single category between two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryOutcome {
    TeamA,
    TeamB,
    Tie,
}

impl CategoryOutcome {
    /// The same outcome seen from the other side of the matchup.
    pub fn flipped(&self) -> CategoryOutcome {
        match self {
            CategoryOutcome::TeamA => CategoryOutcome::TeamB,
            CategoryOutcome::TeamB => CategoryOutcome::TeamA,
            CategoryOutcome::Tie => CategoryOutcome::Tie,
        }
    }
}

/// Result of comparing two teams' weekly stat lines across all categories.
///
/// `won`/`lost`/`tied` are counted from team A's perspective; the two beaten
/// flags cover both directions so the result can be read symmetrically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupResult {
    pub week: u32,
    pub team_a: String,
    pub team_b: String,
    pub outcomes: BTreeMap<Category, CategoryOutcome>,
    pub won: usize,
    pub lost: usize,
    pub tied: usize,
    pub a_beats_b: bool,
    pub b_beats_a: bool,
}

impl MatchupResult {
    /// Whether the given team appears on either side of this result.
    pub fn involves(&self, team: &str) -> bool {
        self.team_a.eq_ignore_ascii_case(team) || self.team_b.eq_ignore_ascii_case(team)
    }

    /// Whether the given team beat the other side (>= 5 category wins).
    /// Returns `None` when the team is not part of this result.
    pub fn beaten_by(&self, team: &str) -> Option<bool> {
        if self.team_a.eq_ignore_ascii_case(team) {
            Some(self.a_beats_b)
        } else if self.team_b.eq_ignore_ascii_case(team) {
            Some(self.b_beats_a)
        } else {
            None
        }
    }

    /// Category wins for the given team. `None` when the team is not part
    /// of this result.
    pub fn wins_for(&self, team: &str) -> Option<usize> {
        if self.team_a.eq_ignore_ascii_case(team) {
            Some(self.won)
        } else if self.team_b.eq_ignore_ascii_case(team) {
            Some(self.lost)
        } else {
            None
        }
    }

    /// Outcome of one category from the given team's perspective.
    pub fn outcome_for(&self, team: &str, category: Category) -> Option<CategoryOutcome> {
        let outcome = *self.outcomes.get(&category)?;
        if self.team_a.eq_ignore_ascii_case(team) {
            Some(outcome)
        } else if self.team_b.eq_ignore_ascii_case(team) {
            Some(outcome.flipped())
        } else {
            None
        }
    }

    /// Categories won by team A, in scoring order.
    pub fn won_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.outcomes.get(c) == Some(&CategoryOutcome::TeamA))
            .collect()
    }

    /// `"5-3"` from team A's perspective, with a trailing tie count
    /// (`"5-3-1"`) when any category tied.
    pub fn score_string(&self) -> String {
        if self.tied > 0 {
            format!("{}-{}-{}", self.won, self.lost, self.tied)
        } else {
            format!("{}-{}", self.won, self.lost)
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare one category honoring its better-direction flag.
///
/// A resolved value always beats an unresolved ratio (a team with zero
/// attempts cannot win a rate category); two unresolved ratios tie.
pub fn compare_category(
    category: Category,
    a: Option<f64>,
    b: Option<f64>,
) -> CategoryOutcome {
    match (a, b) {
        (None, None) => CategoryOutcome::Tie,
        (Some(_), None) => CategoryOutcome::TeamA,
        (None, Some(_)) => CategoryOutcome::TeamB,
        (Some(x), Some(y)) => {
            if x == y {
                CategoryOutcome::Tie
            } else if (x > y) == category.higher_is_better() {
                CategoryOutcome::TeamA
            } else {
                CategoryOutcome::TeamB
            }
        }
    }
}

/// Score two stat lines against each other across all nine categories.
pub fn compare_stat_lines(
    week: u32,
    team_a: &str,
    line_a: &StatLine,
    team_b: &str,
    line_b: &StatLine,
) -> MatchupResult {
    let mut outcomes = BTreeMap::new();
    let mut won = 0;
    let mut lost = 0;
    let mut tied = 0;

    for category in Category::ALL {
        let outcome = compare_category(category, line_a.value(category), line_b.value(category));
        match outcome {
            CategoryOutcome::TeamA => won += 1,
            CategoryOutcome::TeamB => lost += 1,
            CategoryOutcome::Tie => tied += 1,
        }
        outcomes.insert(category, outcome);
    }

    debug_assert_eq!(won + lost + tied, CATEGORY_COUNT);

    MatchupResult {
        week,
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        outcomes,
        won,
        lost,
        tied,
        a_beats_b: won >= BEATEN_THRESHOLD,
        b_beats_a: lost >= BEATEN_THRESHOLD,
    }
}

/// Score two team-week records from the same week.
pub fn evaluate(a: &TeamWeekRecord, b: &TeamWeekRecord) -> MatchupResult {
    debug_assert_eq!(a.week, b.week);
    compare_stat_lines(a.week, &a.team, &a.stats, &b.team, &b.stats)
}

/// Score every unordered pair of teams in a week. This powers the
/// teams-beaten power-ranking signal, which deliberately compares each team
/// against the whole league rather than only its scheduled opponent.
pub fn all_pairs(records: &[TeamWeekRecord]) -> Vec<MatchupResult> {
    let mut results = Vec::with_capacity(records.len().saturating_sub(1) * records.len() / 2);
    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            results.push(evaluate(&records[i], &records[j]));
        }
    }
    results
}
