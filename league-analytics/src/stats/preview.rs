// Recent-form previews of upcoming scheduled matchups.
//
// Each team's recent window is reduced to a per-week mean stat line:
// counting categories average directly, while ratio categories recombine
// the window's aggregated made/attempted pairs (a mean of weekly
// percentages would misweight uneven attempt volumes).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::category::{Category, StatLine};
use crate::matchup::{compare_stat_lines, CategoryOutcome, ScheduledMatchup};
use crate::snapshot::week::LeagueWeekSnapshot;

/// Predicted category winners for one upcoming scheduled matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupPreview {
    pub week: u32,
    pub team_a: String,
    pub team_b: String,
    /// Weeks of history behind each side's form line.
    pub window: usize,
    pub outcomes: std::collections::BTreeMap<Category, CategoryOutcome>,
    pub predicted_score: String,
}

/// A team's mean weekly stat line over the trailing window. `None` when the
/// team appears in none of the window's weeks.
pub fn window_form_line(
    weeks: &[Arc<LeagueWeekSnapshot>],
    team: &str,
    window: usize,
) -> Option<StatLine> {
    let window = window.min(weeks.len());
    let recent = &weeks[weeks.len() - window..];

    let mut sum = StatLine::new();
    let mut appearances = 0;
    for week in recent {
        if let Some(record) = week.record_for(team) {
            sum.merge(&record.stats);
            appearances += 1;
        }
    }
    if appearances == 0 {
        return None;
    }
    // Scaling divides counts into per-week means; the ratio pairs scale
    // too, which leaves their percentages untouched.
    Some(sum.scaled(1.0 / appearances as f64))
}

/// Preview each upcoming pairing from both teams' recent form. Pairings
/// where either side has no history are skipped.
pub fn preview_matchups(
    weeks: &[Arc<LeagueWeekSnapshot>],
    upcoming_week: u32,
    pairs: &[ScheduledMatchup],
    window: usize,
) -> Vec<MatchupPreview> {
    pairs
        .iter()
        .filter_map(|pair| {
            let Some(line_a) = window_form_line(weeks, &pair.home, window) else {
                warn!(team = %pair.home, "skipping preview: no history for team");
                return None;
            };
            let Some(line_b) = window_form_line(weeks, &pair.away, window) else {
                warn!(team = %pair.away, "skipping preview: no history for team");
                return None;
            };
            let result =
                compare_stat_lines(upcoming_week, &pair.home, &line_a, &pair.away, &line_b);
            Some(MatchupPreview {
                week: upcoming_week,
                team_a: result.team_a.clone(),
                team_b: result.team_b.clone(),
                window: window.min(weeks.len()),
                predicted_score: result.score_string(),
                outcomes: result.outcomes,
            })
        })
        .collect()
}
