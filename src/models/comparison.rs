//! Comparison results between the two entities held in comparison slots.
//!
//! Results are recomputed on demand and never persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Stat;

/// Which side won a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    First,
    Second,
    Tie,
}

impl Winner {
    /// Higher value wins; equal values tie.
    pub fn by_higher<T: PartialOrd>(first: T, second: T) -> Self {
        if first > second {
            Winner::First
        } else if second > first {
            Winner::Second
        } else {
            Winner::Tie
        }
    }

    /// Name of the winner, or "tie".
    pub fn label<'a>(&self, first: &'a str, second: &'a str) -> &'a str {
        match self {
            Winner::First => first,
            Winner::Second => second,
            Winner::Tie => "tie",
        }
    }
}

/// One side of a stat comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub id: u32,
    pub name: String,
    pub total: u32,
    pub stats: BTreeMap<Stat, u16>,
}

/// Difference on a single stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatDifference {
    /// First minus second.
    pub difference: i32,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsComparison {
    pub first: StatLine,
    pub second: StatLine,
    pub differences: BTreeMap<Stat, StatDifference>,
    /// Winner by stat total.
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypesComparison {
    pub first: Vec<String>,
    pub second: Vec<String>,
    pub shared: Vec<String>,
    pub unique_first: Vec<String>,
    pub unique_second: Vec<String>,
}

/// Ability summary for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilitySide {
    pub abilities: Vec<super::Ability>,
    pub count: usize,
    pub hidden_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilitiesComparison {
    pub first: AbilitySide,
    pub second: AbilitySide,
    pub shared: Vec<String>,
    pub unique_first: Vec<String>,
    pub unique_second: Vec<String>,
}

/// Summed type-effectiveness of each side attacking the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeAdvantage {
    pub first: f64,
    pub second: f64,
    pub winner: Winner,
}

/// Everything the comparison view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub stats: StatsComparison,
    pub types: TypesComparison,
    pub abilities: AbilitiesComparison,
    pub type_advantage: TypeAdvantage,
    /// Side with more abilities; the second side wins ties.
    pub ability_advantage: Winner,
}
