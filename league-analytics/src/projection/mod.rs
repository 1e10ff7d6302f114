// Live-week projection: roster season rates and availability, the week
// schedule, and the projection engine that merges accumulated totals with
// estimated remaining contributions.

pub mod engine;
pub mod roster;
pub mod schedule;

pub use engine::{ProjectedMatchup, ProjectionEngine, ProjectionError};
pub use roster::{AvailabilityStatus, PlayerSeasonAverages, TeamRoster};
pub use schedule::WeekSchedule;
