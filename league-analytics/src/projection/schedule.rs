// The week's schedule: matchup pairs and remaining scoring periods.

use serde::{Deserialize, Serialize};

use crate::matchup::ScheduledMatchup;

/// One week's schedule as supplied by the upstream collaborator.
///
/// `remaining_periods` lists the scoring periods (days) of the week that
/// have not yet been played. The upstream schedule is authoritative: when
/// it reports no remaining periods the projection layer treats the week as
/// fully played rather than guessing a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week: u32,
    #[serde(default)]
    pub remaining_periods: Vec<u32>,
    pub matchups: Vec<ScheduledMatchup>,
}

impl WeekSchedule {
    /// Whether every scoring period of the week has been played.
    pub fn is_complete(&self) -> bool {
        self.remaining_periods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_follows_remaining_periods() {
        let schedule = WeekSchedule {
            week: 10,
            remaining_periods: vec![68, 69],
            matchups: vec![ScheduledMatchup::new("Team A", "Team B")],
        };
        assert!(!schedule.is_complete());

        let done = WeekSchedule {
            remaining_periods: Vec::new(),
            ..schedule
        };
        assert!(done.is_complete());
    }

    #[test]
    fn deserializes_with_missing_remaining_periods() {
        let schedule: WeekSchedule = serde_json::from_str(
            r#"{"week": 3, "matchups": [{"home": "Team A", "away": "Team B"}]}"#,
        )
        .unwrap();
        assert!(schedule.is_complete());
        assert_eq!(schedule.matchups.len(), 1);
    }
}
