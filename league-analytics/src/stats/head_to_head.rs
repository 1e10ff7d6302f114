// Head-to-head records and win rates over scheduled matchups.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::snapshot::history::HistoryError;
use crate::snapshot::week::LeagueWeekSnapshot;

/// Meetings required before a head-to-head rate is reported.
pub const MIN_MEETINGS: usize = 2;

/// Win-rate threshold at or above which a pairing counts as a best matchup.
pub const BEST_MATCHUP_RATE: f64 = 0.8;

/// Win-rate threshold at or below which a pairing counts as a worst matchup.
pub const WORST_MATCHUP_RATE: f64 = 0.2;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// W-L-T between one ordered team pair across the season. A win is a week
/// where the team's beaten flag against its scheduled opponent was true; a
/// week where neither side reached five categories is a tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
}

impl MeetingRecord {
    pub fn meetings(&self) -> usize {
        self.wins + self.losses + self.ties
    }
}

/// A reported head-to-head win rate for an ordered pair. Ties count as
/// meetings but not as wins, so a 1-0-1 record rates 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadRate {
    pub team: String,
    pub opponent: String,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub rate: f64,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Accumulate every ordered pair's meeting record from scheduled results.
pub fn meeting_records(
    weeks: &[Arc<LeagueWeekSnapshot>],
) -> BTreeMap<(String, String), MeetingRecord> {
    let mut records: BTreeMap<(String, String), MeetingRecord> = BTreeMap::new();
    for week in weeks {
        for record in &week.records {
            let Some(result) = week.scheduled_result(&record.team) else {
                continue;
            };
            let won = result.beaten_by(&record.team).unwrap_or(false);
            let lost = result.beaten_by(&record.opponent).unwrap_or(false);
            let entry = records
                .entry((record.team.clone(), record.opponent.clone()))
                .or_default();
            if won {
                entry.wins += 1;
            } else if lost {
                entry.losses += 1;
            } else {
                entry.ties += 1;
            }
        }
    }
    records
}

fn to_rate(pair: (String, String), record: MeetingRecord) -> HeadToHeadRate {
    HeadToHeadRate {
        team: pair.0,
        opponent: pair.1,
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        rate: record.wins as f64 / record.meetings() as f64,
    }
}

/// Win rates for every ordered pair with enough meetings, best rate first.
pub fn rates(weeks: &[Arc<LeagueWeekSnapshot>]) -> Vec<HeadToHeadRate> {
    let mut out: Vec<HeadToHeadRate> = meeting_records(weeks)
        .into_iter()
        .filter(|(_, record)| record.meetings() >= MIN_MEETINGS)
        .map(|(pair, record)| to_rate(pair, record))
        .collect();
    out.sort_by(|a, b| {
        b.rate
            .total_cmp(&a.rate)
            .then(a.team.cmp(&b.team))
            .then(a.opponent.cmp(&b.opponent))
    });
    out
}

/// The win rate for one ordered pair. Errors when the two teams have met
/// fewer than `MIN_MEETINGS` times.
pub fn rate_between(
    weeks: &[Arc<LeagueWeekSnapshot>],
    team: &str,
    opponent: &str,
) -> Result<HeadToHeadRate, HistoryError> {
    let records = meeting_records(weeks);
    let found = records
        .into_iter()
        .find(|((a, b), _)| a.eq_ignore_ascii_case(team) && b.eq_ignore_ascii_case(opponent));
    match found {
        Some((pair, record)) if record.meetings() >= MIN_MEETINGS => Ok(to_rate(pair, record)),
        Some((_, record)) => Err(HistoryError::InsufficientHistory {
            required: MIN_MEETINGS,
            available: record.meetings(),
        }),
        None => Err(HistoryError::InsufficientHistory {
            required: MIN_MEETINGS,
            available: 0,
        }),
    }
}

/// Pairings a team dominates (rate at or above the best threshold).
pub fn best_matchups(rates: &[HeadToHeadRate]) -> Vec<HeadToHeadRate> {
    rates
        .iter()
        .filter(|r| r.rate >= BEST_MATCHUP_RATE)
        .cloned()
        .collect()
}

/// Pairings a team struggles in (rate at or below the worst threshold).
pub fn worst_matchups(rates: &[HeadToHeadRate]) -> Vec<HeadToHeadRate> {
    rates
        .iter()
        .filter(|r| r.rate <= WORST_MATCHUP_RATE)
        .cloned()
        .collect()
}
