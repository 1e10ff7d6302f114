// Remaining-schedule difficulty from opponent strength.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::snapshot::week::LeagueWeekSnapshot;
use crate::stats::standings::standings;

/// A neutral strength assumed for teams with no scheduled results yet.
const NEUTRAL_STRENGTH: f64 = 0.5;

/// Difficulty tiers by mean opponent win percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
        }
    }

    fn from_strength(strength: f64) -> Self {
        if strength > 0.6 {
            DifficultyTier::Hard
        } else if strength > 0.45 {
            DifficultyTier::Medium
        } else {
            DifficultyTier::Easy
        }
    }
}

/// One team's remaining-schedule difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDifficulty {
    pub team: String,
    pub avg_opponent_win_pct: f64,
    pub tier: DifficultyTier,
}

/// Score each team's remaining schedule by the mean season win percentage
/// of its listed upcoming opponents, hardest first. Opponents without any
/// scheduled results count at neutral strength.
pub fn schedule_difficulty(
    weeks: &[Arc<LeagueWeekSnapshot>],
    remaining_opponents: &BTreeMap<String, Vec<String>>,
) -> Vec<ScheduleDifficulty> {
    let strength: BTreeMap<String, f64> = standings(weeks)
        .into_iter()
        .filter(|entry| entry.games() > 0)
        .map(|entry| (entry.team.to_lowercase(), entry.win_pct))
        .collect();

    let mut entries: Vec<ScheduleDifficulty> = remaining_opponents
        .iter()
        .map(|(team, opponents)| {
            let avg = if opponents.is_empty() {
                NEUTRAL_STRENGTH
            } else {
                opponents
                    .iter()
                    .map(|o| {
                        strength
                            .get(&o.to_lowercase())
                            .copied()
                            .unwrap_or(NEUTRAL_STRENGTH)
                    })
                    .sum::<f64>()
                    / opponents.len() as f64
            };
            ScheduleDifficulty {
                team: team.clone(),
                avg_opponent_win_pct: avg,
                tier: DifficultyTier::from_strength(avg),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.avg_opponent_win_pct
            .total_cmp(&a.avg_opponent_win_pct)
            .then(a.team.cmp(&b.team))
    });
    entries
}
