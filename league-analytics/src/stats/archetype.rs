// Team archetypes from season-long roster category totals.
//
// A team is weak in a category when its roster's season total sits in the
// league-wide bottom quantile for that category, honoring the category's
// better-direction flag (for turnovers, "bottom" means the most committed).
// The weak-category set drives a human-readable archetype label.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{Category, StatLine};
use crate::projection::roster::TeamRoster;

/// A team's derived archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamArchetype {
    pub team: String,
    pub weak_categories: Vec<Category>,
    pub label: String,
}

fn theme(category: Category) -> &'static str {
    match category {
        Category::Points | Category::FieldGoalPct | Category::ThreesMade => "scoring",
        Category::Assists => "playmaking",
        Category::Rebounds => "rebounding",
        Category::Steals | Category::Blocks => "defense",
        Category::FreeThrowPct => "free throws",
        Category::Turnovers => "ball security",
    }
}

/// Label a weak-category set, e.g. a team weak in assists and turnovers
/// becomes "Punts playmaking + ball security".
pub fn archetype_label(weak: &[Category]) -> String {
    if weak.is_empty() {
        return "Balanced".to_string();
    }
    let mut themes: Vec<&str> = Vec::new();
    for category in weak {
        let t = theme(*category);
        if !themes.contains(&t) {
            themes.push(t);
        }
    }
    format!("Punts {}", themes.join(" + "))
}

/// Teams flagged weak per category: the bottom `quantile` share of the
/// league (at least one team) when ranked worst-first by roster season
/// total.
pub fn weak_category_sets(
    totals: &[(String, StatLine)],
    quantile: f64,
) -> BTreeMap<String, Vec<Category>> {
    let mut weak: BTreeMap<String, Vec<Category>> = totals
        .iter()
        .map(|(team, _)| (team.clone(), Vec::new()))
        .collect();
    if totals.is_empty() {
        return weak;
    }

    let cutoff = ((totals.len() as f64 * quantile).floor() as usize).max(1);

    for category in Category::ALL {
        let mut ranked: Vec<(&String, Option<f64>)> = totals
            .iter()
            .map(|(team, line)| (team, line.value(category)))
            .collect();
        // Worst first. An unresolved ratio (no attempts all season) is the
        // weakest possible showing.
        ranked.sort_by(|(team_a, a), (team_b, b)| {
            let ord = match (a, b) {
                (None, None) => std::cmp::Ordering::Equal,
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (Some(x), Some(y)) => {
                    if category.higher_is_better() {
                        x.total_cmp(y)
                    } else {
                        y.total_cmp(x)
                    }
                }
            };
            ord.then(team_a.cmp(team_b))
        });
        for (team, _) in ranked.into_iter().take(cutoff) {
            if let Some(flags) = weak.get_mut(team) {
                flags.push(category);
            }
        }
    }
    weak
}

/// Derive every team's archetype from its roster's season totals, sorted
/// by team name.
pub fn archetypes(rosters: &[TeamRoster], quantile: f64) -> Vec<TeamArchetype> {
    let totals: Vec<(String, StatLine)> = rosters
        .iter()
        .map(|roster| (roster.team.clone(), roster.season_totals()))
        .collect();

    weak_category_sets(&totals, quantile)
        .into_iter()
        .map(|(team, weak_categories)| TeamArchetype {
            label: archetype_label(&weak_categories),
            team,
            weak_categories,
        })
        .collect()
}
