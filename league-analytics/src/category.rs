// The fixed nine-category set and the typed per-week stat line.
//
// Ratio categories (FG% and FT%) are never stored as standalone values.
// They carry a made/attempted pair and are recomputed on read, so aggregate
// percentages can never be produced by averaging per-game percentages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Number of scored categories in a head-to-head week.
pub const CATEGORY_COUNT: usize = 9;

// ---------------------------------------------------------------------------
// Category enum
// ---------------------------------------------------------------------------

/// One of the nine statistical categories compared between two teams.
///
/// Serialized with the stable short codes used by the league data feed
/// (`PTS`, `REB`, `AST`, `STL`, `BLK`, `FG%`, `FT%`, `3PM`, `TO`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    Assists,
    #[serde(rename = "STL")]
    Steals,
    #[serde(rename = "BLK")]
    Blocks,
    #[serde(rename = "FG%")]
    FieldGoalPct,
    #[serde(rename = "FT%")]
    FreeThrowPct,
    #[serde(rename = "3PM")]
    ThreesMade,
    #[serde(rename = "TO")]
    Turnovers,
}

impl Category {
    /// All categories in their fixed scoring order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Points,
        Category::Rebounds,
        Category::Assists,
        Category::Steals,
        Category::Blocks,
        Category::FieldGoalPct,
        Category::FreeThrowPct,
        Category::ThreesMade,
        Category::Turnovers,
    ];

    /// Stable short code for this category.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Points => "PTS",
            Category::Rebounds => "REB",
            Category::Assists => "AST",
            Category::Steals => "STL",
            Category::Blocks => "BLK",
            Category::FieldGoalPct => "FG%",
            Category::FreeThrowPct => "FT%",
            Category::ThreesMade => "3PM",
            Category::Turnovers => "TO",
        }
    }

    /// Parse a short code into a Category.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PTS" => Some(Category::Points),
            "REB" => Some(Category::Rebounds),
            "AST" => Some(Category::Assists),
            "STL" => Some(Category::Steals),
            "BLK" => Some(Category::Blocks),
            "FG%" => Some(Category::FieldGoalPct),
            "FT%" => Some(Category::FreeThrowPct),
            "3PM" => Some(Category::ThreesMade),
            "TO" => Some(Category::Turnovers),
            _ => None,
        }
    }

    /// Whether a larger value wins this category. Turnovers is the only
    /// category where fewer is better.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Category::Turnovers)
    }

    /// Whether this category is a rate backed by a made/attempted pair.
    pub fn is_ratio(&self) -> bool {
        matches!(self, Category::FieldGoalPct | Category::FreeThrowPct)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Ratio pairs
// ---------------------------------------------------------------------------

/// A ratio category has zero attempts, so its percentage is undefined.
/// Surfaced to callers as "no data", never as 0% or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no attempts recorded for {category}")]
pub struct UndefinedRatioError {
    pub category: Category,
}

/// Numerator/denominator pair backing a ratio category.
///
/// Pairs are summed across games, weeks, and players; the percentage is only
/// ever derived from the aggregated pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioPair {
    pub made: f64,
    pub attempted: f64,
}

impl RatioPair {
    pub fn new(made: f64, attempted: f64) -> Self {
        RatioPair { made, attempted }
    }

    /// Accumulate another pair into this one.
    pub fn add(&mut self, other: RatioPair) {
        self.made += other.made;
        self.attempted += other.attempted;
    }

    /// `made / attempted`, or `None` when no attempts were recorded.
    pub fn percentage(&self) -> Option<f64> {
        if self.attempted > 0.0 {
            Some(self.made / self.attempted)
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        self.made == 0.0 && self.attempted == 0.0
    }
}

// ---------------------------------------------------------------------------
// Stat line
// ---------------------------------------------------------------------------

/// A full per-category record: counting values for the seven counting
/// categories plus the two made/attempted pairs backing FG% and FT%.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    counts: BTreeMap<Category, f64>,
    pub field_goals: RatioPair,
    pub free_throws: RatioPair,
}

impl StatLine {
    pub fn new() -> Self {
        StatLine::default()
    }

    /// Current value of a counting category (0.0 when never set).
    ///
    /// Ratio categories have no stored count; use `value()` for those.
    pub fn count(&self, category: Category) -> f64 {
        debug_assert!(!category.is_ratio());
        self.counts.get(&category).copied().unwrap_or(0.0)
    }

    /// Set a counting category. Ratio categories are carried by their pairs
    /// and are not writable here.
    pub fn set_count(&mut self, category: Category, value: f64) {
        if category.is_ratio() {
            debug_assert!(false, "ratio categories are set via their pairs");
            return;
        }
        self.counts.insert(category, value);
    }

    /// Add to a counting category.
    pub fn add_count(&mut self, category: Category, delta: f64) {
        if category.is_ratio() {
            debug_assert!(false, "ratio categories are added via their pairs");
            return;
        }
        *self.counts.entry(category).or_insert(0.0) += delta;
    }

    /// The comparable value of a category.
    ///
    /// Counting categories always resolve. Ratio categories resolve from
    /// their aggregated pair and return `None` when the pair has zero
    /// attempts.
    pub fn value(&self, category: Category) -> Option<f64> {
        match category {
            Category::FieldGoalPct => self.field_goals.percentage(),
            Category::FreeThrowPct => self.free_throws.percentage(),
            other => Some(self.count(other)),
        }
    }

    /// Like `value()`, but reports the undefined-ratio case as a typed error
    /// for callers that must surface "no data" explicitly.
    pub fn try_value(&self, category: Category) -> Result<f64, UndefinedRatioError> {
        self.value(category)
            .ok_or(UndefinedRatioError { category })
    }

    /// Accumulate another stat line into this one. Counts add; ratio pairs
    /// add numerator and denominator separately.
    pub fn merge(&mut self, other: &StatLine) {
        for (category, value) in &other.counts {
            *self.counts.entry(*category).or_insert(0.0) += value;
        }
        self.field_goals.add(other.field_goals);
        self.free_throws.add(other.free_throws);
    }

    /// Multiply every count and both pairs by a scalar. Used to turn
    /// per-game rates into multi-game totals and window sums into means.
    pub fn scaled(&self, factor: f64) -> StatLine {
        let mut out = self.clone();
        for value in out.counts.values_mut() {
            *value *= factor;
        }
        out.field_goals.made *= factor;
        out.field_goals.attempted *= factor;
        out.free_throws.made *= factor;
        out.free_throws.attempted *= factor;
        out
    }

    /// True when no category has any recorded data at all.
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|v| *v == 0.0)
            && self.field_goals.is_zero()
            && self.free_throws.is_zero()
    }
}
