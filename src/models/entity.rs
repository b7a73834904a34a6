//! Entity model: a single catalog record as fetched from the API.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalog record (a single Pokémon).
///
/// Entities are immutable once fetched; the core only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// National catalog number.
    pub id: u32,
    /// Unique lowercase API name (e.g. "mr-mime").
    pub name: String,
    /// Type tags in slot order (one or two).
    pub types: Vec<String>,
    /// Abilities in slot order.
    pub abilities: Vec<Ability>,
    /// Base stats keyed by stat.
    pub base_stats: BTreeMap<Stat, u16>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Best available artwork URL.
    pub image_url: String,
    /// URL of the species record (used to reach the evolution chain).
    pub species_url: String,
}

/// An ability slot on an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

impl Entity {
    /// Base value of a stat, 0 when the record lacks it.
    pub fn stat(&self, stat: Stat) -> u16 {
        self.base_stats.get(&stat).copied().unwrap_or(0)
    }

    /// Sum of the six base stats.
    pub fn stat_total(&self) -> u32 {
        Stat::all().iter().map(|&s| u32::from(self.stat(s))).sum()
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_name))
    }

    /// Name with the first letter capitalized ("bulbasaur" → "Bulbasaur").
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Catalog number padded to three digits ("#007").
    pub fn number(&self) -> String {
        format!("#{:03}", self.id)
    }

    /// Height formatted in metres ("0.7 m").
    pub fn height_display(&self) -> String {
        format!("{:.1} m", f64::from(self.height) / 10.0)
    }

    /// Weight formatted in kilograms ("6.9 kg").
    pub fn weight_display(&self) -> String {
        format!("{:.1} kg", f64::from(self.weight) / 10.0)
    }

    /// Species URL, or the entity name when the record carries none.
    pub fn species_ref(&self) -> &str {
        if self.species_url.is_empty() {
            &self.name
        } else {
            &self.species_url
        }
    }
}

/// The six base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    /// All stats in display order.
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Hp,
            Stat::Attack,
            Stat::Defense,
            Stat::SpecialAttack,
            Stat::SpecialDefense,
            Stat::Speed,
        ]
    }

    /// Name used by the API ("special-attack").
    pub fn api_name(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::SpecialAttack => "special-attack",
            Stat::SpecialDefense => "special-defense",
            Stat::Speed => "speed",
        }
    }

    /// Short human label.
    pub fn label(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "Sp. Atk",
            Stat::SpecialDefense => "Sp. Def",
            Stat::Speed => "Speed",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.api_name() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid stat '{}'. Valid values: hp, attack, defense, special-attack, special-defense, speed",
                    s
                )
            })
    }
}

/// Capitalize the first character of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn an API resource name into display text: the first `-` becomes a
/// space and the first letter is capitalized ("fire-stone" → "Fire stone").
pub fn humanize(name: &str) -> String {
    capitalize(&name.replacen('-', " ", 1))
}
