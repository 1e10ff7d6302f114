// Season-long aggregation over the week-snapshot history: streaks, form,
// head-to-head rates, specialists, archetypes, standings, and the bundled
// season report.

pub mod aggregator;
pub mod archetype;
pub mod form;
pub mod head_to_head;
pub mod preview;
pub mod schedule_strength;
pub mod specialists;
pub mod standings;
pub mod streaks;

pub use aggregator::{AggregationOptions, LeagueStatsAggregator, SeasonReport};
