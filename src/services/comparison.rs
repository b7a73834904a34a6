//! Side-by-side comparison of two already-fetched entities.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::error::AppError;
use crate::models::{
    AbilitiesComparison, AbilitySide, ComparisonSummary, Entity, Stat, StatDifference, StatLine,
    StatsComparison, TypeAdvantage, TypesComparison, Winner,
};

/// Partial attack effectiveness table: attacker → defender → multiplier.
///
/// Pairs not listed count as zero.
static TYPE_EFFECTIVENESS: Lazy<HashMap<&'static str, HashMap<&'static str, f64>>> =
    Lazy::new(|| {
        let table: &[(&str, &[(&str, f64)])] = &[
            ("fire", &[("grass", 2.0), ("water", 0.5), ("fire", 0.5)]),
            ("water", &[("fire", 2.0), ("grass", 0.5), ("water", 0.5)]),
            ("grass", &[("water", 2.0), ("fire", 0.5), ("grass", 0.5)]),
            ("electric", &[("water", 2.0), ("grass", 0.5), ("electric", 0.5)]),
            ("ice", &[("grass", 2.0), ("fire", 0.5), ("ice", 0.5)]),
            (
                "fighting",
                &[("normal", 2.0), ("ice", 2.0), ("rock", 2.0), ("steel", 2.0), ("dark", 2.0)],
            ),
            (
                "poison",
                &[("grass", 2.0), ("poison", 0.5), ("ground", 0.5), ("rock", 0.5), ("ghost", 0.5)],
            ),
            (
                "ground",
                &[
                    ("fire", 2.0),
                    ("electric", 2.0),
                    ("grass", 0.5),
                    ("poison", 2.0),
                    ("rock", 2.0),
                    ("bug", 0.5),
                ],
            ),
            (
                "flying",
                &[
                    ("grass", 2.0),
                    ("fighting", 2.0),
                    ("bug", 2.0),
                    ("electric", 0.5),
                    ("rock", 0.5),
                    ("steel", 0.5),
                ],
            ),
            (
                "psychic",
                &[("fighting", 2.0), ("poison", 2.0), ("dark", 0.5), ("steel", 0.5)],
            ),
            (
                "bug",
                &[
                    ("grass", 2.0),
                    ("poison", 0.5),
                    ("fire", 0.5),
                    ("fighting", 0.5),
                    ("flying", 0.5),
                    ("ghost", 0.5),
                    ("steel", 0.5),
                    ("fairy", 0.5),
                ],
            ),
            (
                "rock",
                &[
                    ("fire", 2.0),
                    ("ice", 2.0),
                    ("fighting", 0.5),
                    ("ground", 0.5),
                    ("flying", 2.0),
                    ("bug", 2.0),
                    ("steel", 0.5),
                ],
            ),
            (
                "ghost",
                &[("normal", 0.0), ("psychic", 2.0), ("ghost", 2.0), ("dark", 0.5)],
            ),
            (
                "steel",
                &[
                    ("ice", 2.0),
                    ("rock", 2.0),
                    ("steel", 0.5),
                    ("fire", 0.5),
                    ("water", 0.5),
                    ("electric", 0.5),
                ],
            ),
            ("dragon", &[("dragon", 2.0), ("steel", 0.5), ("fairy", 0.0)]),
            (
                "dark",
                &[("psychic", 2.0), ("ghost", 2.0), ("fighting", 0.5), ("dark", 0.5), ("fairy", 0.5)],
            ),
            (
                "fairy",
                &[("fighting", 2.0), ("poison", 0.5), ("dragon", 2.0), ("dark", 2.0), ("steel", 0.5)],
            ),
        ];

        table
            .iter()
            .map(|(attacker, row)| (*attacker, row.iter().copied().collect()))
            .collect()
    });

/// Multiplier of `attacker` hitting `defender`, zero when unlisted.
pub fn effectiveness(attacker: &str, defender: &str) -> f64 {
    TYPE_EFFECTIVENESS
        .get(attacker)
        .and_then(|row| row.get(defender))
        .copied()
        .unwrap_or(0.0)
}

/// Two comparison slots.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSlots {
    first: Option<Entity>,
    second: Option<Entity>,
}

impl ComparisonSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `entity` into the first empty slot and return its number (1 or 2).
    pub fn add(&mut self, entity: Entity) -> Result<u8, AppError> {
        if self.slots().any(|e| e.id == entity.id) {
            return Err(AppError::Duplicate(format!(
                "{} is already in the comparison",
                entity.display_name()
            )));
        }

        match (&self.first, &self.second) {
            (None, _) => {
                self.first = Some(entity);
                Ok(1)
            }
            (Some(_), None) => {
                self.second = Some(entity);
                Ok(2)
            }
            (Some(_), Some(_)) => Err(AppError::Capacity(
                "Only two Pokémon can be compared at once".to_string(),
            )),
        }
    }

    /// Empty slot 1 or 2. Returns whether anything was removed.
    pub fn remove(&mut self, slot: u8) -> bool {
        let target = match slot {
            1 => &mut self.first,
            2 => &mut self.second,
            _ => return false,
        };
        target.take().is_some()
    }

    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }

    /// Exchange the two entities. Does nothing unless both slots are full.
    pub fn swap(&mut self) {
        if self.is_complete() {
            std::mem::swap(&mut self.first, &mut self.second);
        }
    }

    pub fn count(&self) -> usize {
        self.slots().count()
    }

    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// Occupied slots in slot order.
    pub fn slots(&self) -> impl Iterator<Item = &Entity> {
        self.first.iter().chain(self.second.iter())
    }

    fn pair(&self) -> Result<(&Entity, &Entity), AppError> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(AppError::Validation(
                "Two Pokémon are needed for a comparison".to_string(),
            )),
        }
    }

    pub fn compare_stats(&self) -> Result<StatsComparison, AppError> {
        let (a, b) = self.pair()?;
        Ok(compare_stats(a, b))
    }

    pub fn compare_types(&self) -> Result<TypesComparison, AppError> {
        let (a, b) = self.pair()?;
        Ok(compare_types(a, b))
    }

    pub fn compare_abilities(&self) -> Result<AbilitiesComparison, AppError> {
        let (a, b) = self.pair()?;
        Ok(compare_abilities(a, b))
    }

    pub fn type_advantage(&self) -> Result<TypeAdvantage, AppError> {
        let (a, b) = self.pair()?;
        Ok(type_advantage(a, b))
    }

    pub fn summary(&self) -> Result<ComparisonSummary, AppError> {
        let (a, b) = self.pair()?;
        let abilities = compare_abilities(a, b);
        // The second side wins equal ability counts.
        let ability_advantage = if abilities.first.count > abilities.second.count {
            Winner::First
        } else {
            Winner::Second
        };

        Ok(ComparisonSummary {
            stats: compare_stats(a, b),
            types: compare_types(a, b),
            abilities,
            type_advantage: type_advantage(a, b),
            ability_advantage,
        })
    }
}

fn stat_line(entity: &Entity) -> StatLine {
    StatLine {
        id: entity.id,
        name: entity.name.clone(),
        total: entity.stat_total(),
        stats: Stat::all().iter().map(|s| (*s, entity.stat(*s))).collect(),
    }
}

fn compare_stats(a: &Entity, b: &Entity) -> StatsComparison {
    let differences: BTreeMap<Stat, StatDifference> = Stat::all()
        .iter()
        .map(|stat| {
            let (x, y) = (a.stat(*stat), b.stat(*stat));
            let difference = StatDifference {
                difference: i32::from(x) - i32::from(y),
                winner: Winner::by_higher(x, y),
            };
            (*stat, difference)
        })
        .collect();

    let first = stat_line(a);
    let second = stat_line(b);
    let winner = Winner::by_higher(first.total, second.total);

    StatsComparison {
        first,
        second,
        differences,
        winner,
    }
}

/// Shared names in `a` order, then the leftovers of each side.
fn partition(a: &[String], b: &[String]) -> (Vec<String>, Vec<String>, Vec<String>) {
    let shared = a.iter().filter(|x| b.contains(x)).cloned().collect();
    let only_a = a.iter().filter(|x| !b.contains(x)).cloned().collect();
    let only_b = b.iter().filter(|x| !a.contains(x)).cloned().collect();
    (shared, only_a, only_b)
}

fn compare_types(a: &Entity, b: &Entity) -> TypesComparison {
    let (shared, unique_first, unique_second) = partition(&a.types, &b.types);
    TypesComparison {
        first: a.types.clone(),
        second: b.types.clone(),
        shared,
        unique_first,
        unique_second,
    }
}

fn ability_side(entity: &Entity) -> AbilitySide {
    AbilitySide {
        abilities: entity.abilities.clone(),
        count: entity.abilities.len(),
        hidden_count: entity.abilities.iter().filter(|a| a.is_hidden).count(),
    }
}

fn compare_abilities(a: &Entity, b: &Entity) -> AbilitiesComparison {
    let names = |e: &Entity| e.abilities.iter().map(|x| x.name.clone()).collect::<Vec<_>>();
    let (shared, unique_first, unique_second) = partition(&names(a), &names(b));
    AbilitiesComparison {
        first: ability_side(a),
        second: ability_side(b),
        shared,
        unique_first,
        unique_second,
    }
}

fn attack_score(attacker: &Entity, defender: &Entity) -> f64 {
    attacker
        .types
        .iter()
        .flat_map(|at| defender.types.iter().map(move |dt| effectiveness(at, dt)))
        .sum()
}

fn type_advantage(a: &Entity, b: &Entity) -> TypeAdvantage {
    let first = attack_score(a, b);
    let second = attack_score(b, a);
    TypeAdvantage {
        first,
        second,
        winner: Winner::by_higher(first, second),
    }
}
