// Season-wide aggregation: bundles every historical metric into one
// serializable report for the serving layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::matchup::ScheduledMatchup;
use crate::projection::roster::TeamRoster;
use crate::snapshot::history::SeasonHistory;
use crate::snapshot::week::LeagueWeekSnapshot;
use crate::stats::archetype::{archetypes, TeamArchetype};
use crate::stats::form::{
    cold_teams, consistency, hot_teams, most_improved, ConsistencyEntry, FormEntry,
    ImprovementEntry,
};
use crate::stats::head_to_head::{best_matchups, rates, worst_matchups, HeadToHeadRate};
use crate::stats::preview::{preview_matchups, MatchupPreview};
use crate::stats::schedule_strength::{schedule_difficulty, ScheduleDifficulty};
use crate::stats::specialists::{category_specialists, CategorySpecialist};
use crate::stats::standings::{standings, StandingsEntry};
use crate::stats::streaks::{compute_streaks, TeamStreaks};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tunables for season aggregation.
///
/// `include_current_week` folds the in-progress week into cross-team
/// metrics (standings, head-to-head, specialists). Streaks, consistency,
/// hot/cold, and most-improved are defined over completed weeks and always
/// exclude a live week.
#[derive(Debug, Clone, Copy)]
pub struct AggregationOptions {
    pub include_current_week: bool,
    pub hot_cold_window: usize,
    pub weak_category_quantile: f64,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        AggregationOptions {
            include_current_week: false,
            hot_cold_window: 4,
            weak_category_quantile: 0.25,
        }
    }
}

impl From<&Config> for AggregationOptions {
    fn from(config: &Config) -> Self {
        AggregationOptions {
            include_current_week: config.analytics.include_current_week,
            hot_cold_window: config.analytics.hot_cold_window,
            weak_category_quantile: config.analytics.weak_category_quantile,
        }
    }
}

// ---------------------------------------------------------------------------
// Season report
// ---------------------------------------------------------------------------

/// The full season-aggregate bundle exposed to the serving layer.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub completed_weeks: usize,
    pub standings: Vec<StandingsEntry>,
    pub streaks: Vec<TeamStreaks>,
    pub consistency: Vec<ConsistencyEntry>,
    pub hot: Vec<FormEntry>,
    pub cold: Vec<FormEntry>,
    pub head_to_head: Vec<HeadToHeadRate>,
    pub best_matchups: Vec<HeadToHeadRate>,
    pub worst_matchups: Vec<HeadToHeadRate>,
    pub specialists: Vec<CategorySpecialist>,
    pub most_improved: Vec<ImprovementEntry>,
    pub archetypes: Vec<TeamArchetype>,
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Season-level aggregation over a snapshot history.
pub struct LeagueStatsAggregator<'a> {
    history: &'a SeasonHistory,
    options: AggregationOptions,
}

impl<'a> LeagueStatsAggregator<'a> {
    pub fn new(history: &'a SeasonHistory) -> Self {
        LeagueStatsAggregator {
            history,
            options: AggregationOptions::default(),
        }
    }

    pub fn with_options(history: &'a SeasonHistory, options: AggregationOptions) -> Self {
        LeagueStatsAggregator { history, options }
    }

    /// Weeks participating in cross-team metrics, honoring the
    /// include-current-week flag.
    fn scoring_weeks(&self) -> &[Arc<LeagueWeekSnapshot>] {
        if self.options.include_current_week {
            self.history.all_weeks()
        } else {
            self.history.completed_weeks()
        }
    }

    /// Build the full season report. Metrics that lack the history they
    /// need degrade to empty sections; one team's bad data never aborts
    /// the rest of the league.
    pub fn report(&self, rosters: &[TeamRoster]) -> SeasonReport {
        let scoring = self.scoring_weeks();
        let completed = self.history.completed_weeks();

        let all_rates = rates(scoring);
        let most_improved = match most_improved(completed) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(%err, "most-improved omitted from report");
                Vec::new()
            }
        };

        SeasonReport {
            completed_weeks: completed.len(),
            standings: standings(scoring),
            streaks: compute_streaks(completed),
            consistency: consistency(completed),
            hot: hot_teams(completed, self.options.hot_cold_window),
            cold: cold_teams(completed, self.options.hot_cold_window),
            best_matchups: best_matchups(&all_rates),
            worst_matchups: worst_matchups(&all_rates),
            head_to_head: all_rates,
            specialists: category_specialists(scoring),
            most_improved,
            archetypes: archetypes(rosters, self.options.weak_category_quantile),
        }
    }

    /// Remaining-schedule difficulty given each team's upcoming opponents.
    pub fn schedule_difficulty(
        &self,
        remaining_opponents: &BTreeMap<String, Vec<String>>,
    ) -> Vec<ScheduleDifficulty> {
        schedule_difficulty(self.scoring_weeks(), remaining_opponents)
    }

    /// Recent-form previews for an upcoming week's scheduled pairs.
    pub fn previews(
        &self,
        upcoming_week: u32,
        pairs: &[ScheduledMatchup],
    ) -> Vec<MatchupPreview> {
        preview_matchups(
            self.history.completed_weeks(),
            upcoming_week,
            pairs,
            self.options.hot_cold_window,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::builder::{build_week_snapshot, RawTeamWeek};

    fn week(index: u32, a_wins: bool) -> LeagueWeekSnapshot {
        let (sa, sb) = if a_wins { (2.0, 1.0) } else { (1.0, 2.0) };
        let raw = |team: &str, opponent: &str, s: f64| RawTeamWeek {
            team: team.to_string(),
            opponent: opponent.to_string(),
            minutes: 900.0,
            points: 100.0 * s,
            rebounds: 40.0 * s,
            assists: 20.0 * s,
            steals: 5.0 * s,
            blocks: 4.0 * s,
            threes_made: 10.0 * s,
            turnovers: 40.0 - 5.0 * s,
            fg_made: 40.0 * s,
            fg_attempted: 100.0,
            ft_made: 20.0 * s,
            ft_attempted: 100.0,
        };
        build_week_snapshot(
            index,
            vec![raw("Team A", "Team B", sa), raw("Team B", "Team A", sb)],
        )
        .unwrap()
    }

    fn history(wins: &[bool], live: Option<bool>) -> SeasonHistory {
        let mut history = SeasonHistory::new();
        for (i, a_wins) in wins.iter().enumerate() {
            history.push_completed(week((i + 1) as u32, *a_wins)).unwrap();
        }
        if let Some(a_wins) = live {
            let next = wins.len() as u32 + 1;
            history
                .set_current(Arc::new(week(next, a_wins)))
                .unwrap();
        }
        history
    }

    #[test]
    fn report_degrades_most_improved_below_eight_weeks() {
        let history = history(&[true, true, false], None);
        let report = LeagueStatsAggregator::new(&history).report(&[]);
        assert_eq!(report.completed_weeks, 3);
        assert!(report.most_improved.is_empty());
        assert!(!report.standings.is_empty());
    }

    #[test]
    fn live_week_is_excluded_by_default() {
        let history = history(&[true, true], Some(false));
        let report = LeagueStatsAggregator::new(&history).report(&[]);
        // Two completed A wins; the live B win is not counted.
        let a = report.standings.iter().find(|e| e.team == "Team A").unwrap();
        assert_eq!(a.wins, 2);
        assert_eq!(a.losses, 0);
    }

    #[test]
    fn live_week_is_included_when_flagged() {
        let history = history(&[true, true], Some(false));
        let options = AggregationOptions {
            include_current_week: true,
            ..AggregationOptions::default()
        };
        let report = LeagueStatsAggregator::with_options(&history, options).report(&[]);
        let a = report.standings.iter().find(|e| e.team == "Team A").unwrap();
        assert_eq!((a.wins, a.losses), (2, 1));
        // Streaks still exclude the live week.
        let a_streak = report.streaks.iter().find(|s| s.team == "Team A").unwrap();
        assert_eq!(a_streak.current, 2);
    }

    #[test]
    fn options_follow_config() {
        let config = Config::default();
        let options = AggregationOptions::from(&config);
        assert!(!options.include_current_week);
        assert_eq!(options.hot_cold_window, 4);
        assert_eq!(options.weak_category_quantile, 0.25);
    }

    #[test]
    fn eight_weeks_unlock_most_improved() {
        // Team A loses the first four, wins the last four.
        let history = history(
            &[false, false, false, false, true, true, true, true],
            None,
        );
        let report = LeagueStatsAggregator::new(&history).report(&[]);
        let a = report
            .most_improved
            .iter()
            .find(|e| e.team == "Team A")
            .unwrap();
        assert_eq!(a.improvement, 1.0);
        // Team B declined and must not appear.
        assert!(report.most_improved.iter().all(|e| e.team != "Team B"));
    }
}
