// Per-category specialists: the team with the best rate of winning each
// category across the season's all-pairs comparisons.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::matchup::CategoryOutcome;
use crate::snapshot::week::LeagueWeekSnapshot;

/// The league's strongest team in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpecialist {
    pub category: Category,
    pub team: String,
    pub wins: usize,
    /// Total all-pairs comparisons the team appeared in for this category,
    /// ties included.
    pub comparisons: usize,
    pub rate: f64,
}

#[derive(Default, Clone, Copy)]
struct Tally {
    wins: usize,
    comparisons: usize,
}

/// Compute the specialist for each category, in category order. Categories
/// with no comparisons at all are omitted (empty history).
pub fn category_specialists(weeks: &[Arc<LeagueWeekSnapshot>]) -> Vec<CategorySpecialist> {
    // (category -> team -> tally), accumulated over every all-pairs result.
    let mut tallies: BTreeMap<Category, BTreeMap<String, Tally>> = BTreeMap::new();

    for week in weeks {
        for result in &week.results {
            for (category, outcome) in &result.outcomes {
                let per_team = tallies.entry(*category).or_default();
                for (team, won) in [
                    (&result.team_a, *outcome == CategoryOutcome::TeamA),
                    (&result.team_b, *outcome == CategoryOutcome::TeamB),
                ] {
                    let tally = per_team.entry(team.clone()).or_default();
                    tally.comparisons += 1;
                    if won {
                        tally.wins += 1;
                    }
                }
            }
        }
    }

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let per_team = tallies.get(&category)?;
            // Highest rate wins; equal rates break by team name so output
            // is deterministic.
            let (team, tally) = per_team
                .iter()
                .max_by(|(name_a, a), (name_b, b)| {
                    let rate_a = a.wins as f64 / a.comparisons as f64;
                    let rate_b = b.wins as f64 / b.comparisons as f64;
                    rate_a.total_cmp(&rate_b).then(name_b.cmp(name_a))
                })?;
            Some(CategorySpecialist {
                category,
                team: team.clone(),
                wins: tally.wins,
                comparisons: tally.comparisons,
                rate: tally.wins as f64 / tally.comparisons as f64,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::builder::{build_week_snapshot, RawTeamWeek};

    fn week(index: u32) -> Arc<LeagueWeekSnapshot> {
        // Team A leads points, Team B leads assists, Team C leads with the
        // fewest turnovers; everything else is identical across teams.
        let raw = |team: &str, opponent: &str, points: f64, assists: f64, to: f64| RawTeamWeek {
            team: team.to_string(),
            opponent: opponent.to_string(),
            minutes: 900.0,
            points,
            rebounds: 100.0,
            assists,
            steals: 10.0,
            blocks: 8.0,
            threes_made: 20.0,
            turnovers: to,
            fg_made: 150.0,
            fg_attempted: 300.0,
            ft_made: 60.0,
            ft_attempted: 80.0,
        };
        Arc::new(
            build_week_snapshot(
                index,
                vec![
                    raw("Team A", "Team B", 500.0, 40.0, 30.0),
                    raw("Team B", "Team A", 400.0, 60.0, 30.0),
                    raw("Team C", "Team D", 400.0, 40.0, 20.0),
                    raw("Team D", "Team C", 400.0, 40.0, 30.0),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn specialists_track_per_category_leaders() {
        let weeks = vec![week(1), week(2)];
        let specialists = category_specialists(&weeks);

        let by_category = |c: Category| {
            specialists
                .iter()
                .find(|s| s.category == c)
                .unwrap()
                .team
                .clone()
        };
        assert_eq!(by_category(Category::Points), "Team A");
        assert_eq!(by_category(Category::Assists), "Team B");
        assert_eq!(by_category(Category::Turnovers), "Team C");
    }

    #[test]
    fn rates_are_wins_over_all_comparisons() {
        let weeks = vec![week(1)];
        let specialists = category_specialists(&weeks);
        let points = specialists
            .iter()
            .find(|s| s.category == Category::Points)
            .unwrap();
        // Team A out-scores all three opponents in its three comparisons.
        assert_eq!(points.wins, 3);
        assert_eq!(points.comparisons, 3);
        assert_eq!(points.rate, 1.0);
    }

    #[test]
    fn empty_history_has_no_specialists() {
        assert!(category_specialists(&[]).is_empty());
    }
}
