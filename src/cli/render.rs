//! Plain-text rendering of entities, evolution trees, comparisons and
//! favorites for terminal output.

use std::fmt::Write;

use crate::models::{
    humanize, ComparisonSummary, Entity, EvolutionNode, FavoriteRecord, FavoritesStats,
    SearchOutcome, SpeciesDetail, Stat, Winner,
};

/// Width of a full stat bar.
const BAR_WIDTH: usize = 30;

/// Highest possible base stat, drawn as a full bar.
const STAT_MAX: u16 = 255;

fn stat_bar(value: u16) -> String {
    let filled = usize::from(value.min(STAT_MAX)) * BAR_WIDTH / usize::from(STAT_MAX);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// One-line label: "Bulbasaur #001 [grass/poison]".
pub fn entity_line(entity: &Entity) -> String {
    format!(
        "{} {} [{}]",
        entity.display_name(),
        entity.number(),
        entity.types.join("/")
    )
}

pub fn entity_card(entity: &Entity, species: Option<&SpeciesDetail>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", entity_line(entity));

    if let Some(species) = species {
        if let Some(genus) = &species.genus {
            let _ = writeln!(out, "  {}", genus);
        }
        let mut tags = Vec::new();
        if species.is_legendary {
            tags.push("legendary");
        }
        if species.is_mythical {
            tags.push("mythical");
        }
        if !tags.is_empty() {
            let _ = writeln!(out, "  ({})", tags.join(", "));
        }
    }

    let _ = writeln!(
        out,
        "  Height: {}   Weight: {}",
        entity.height_display(),
        entity.weight_display()
    );

    let abilities: Vec<String> = entity
        .abilities
        .iter()
        .map(|a| {
            if a.is_hidden {
                format!("{} (hidden)", humanize(&a.name))
            } else {
                humanize(&a.name)
            }
        })
        .collect();
    let _ = writeln!(out, "  Abilities: {}", abilities.join(", "));

    let _ = writeln!(out, "  Base stats:");
    for stat in Stat::all() {
        let value = entity.stat(*stat);
        let _ = writeln!(out, "    {:<8} {:>3} {}", stat.label(), value, stat_bar(value));
    }
    let _ = writeln!(out, "    {:<8} {:>3}", "Total", entity.stat_total());

    if let Some(text) = species.and_then(|s| s.flavor_text.as_ref()) {
        let _ = writeln!(out, "\n  {}", text);
    }
    out
}

/// Evolution tree with box-drawing connectors and requirement text.
///
/// ```text
/// Oddish #043 [grass/poison]
/// └─ Gloom #044 [grass/poison] (Level 21)
///    ├─ Vileplume #045 [grass/poison] (Use Leaf stone)
///    └─ Bellossom #182 [grass] (Use Sun stone)
/// ```
pub fn evolution_tree(root: &EvolutionNode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", entity_line(&root.entity));
    write_children(&mut out, &root.children, "");
    out
}

fn write_children(out: &mut String, children: &[EvolutionNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let connector = if last { "└─ " } else { "├─ " };
        let _ = writeln!(
            out,
            "{}{}{} ({})",
            prefix,
            connector,
            entity_line(&child.entity),
            child.requirement_text()
        );
        let next_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
        write_children(out, &child.children, &next_prefix);
    }
}

pub fn search_outcome(outcome: &SearchOutcome) -> String {
    let mut out = entity_card(&outcome.entity, outcome.species.as_ref());
    out.push_str("\nEvolution chain:\n");
    match &outcome.evolution {
        Some(chain) => {
            for line in evolution_tree(chain).lines() {
                let _ = writeln!(out, "  {}", line);
            }
        }
        None => out.push_str("  No evolution data available\n"),
    }
    out
}

pub fn comparison(summary: &ComparisonSummary) -> String {
    let stats = &summary.stats;
    let (a, b) = (stats.first.name.as_str(), stats.second.name.as_str());
    let mut out = String::new();

    let _ = writeln!(out, "{:<10} {:>10} {:>10} {:>6}", "", a, b, "diff");
    for (stat, diff) in &stats.differences {
        let _ = writeln!(
            out,
            "{:<10} {:>10} {:>10} {:>+6}",
            stat.label(),
            stats.first.stats.get(stat).copied().unwrap_or(0),
            stats.second.stats.get(stat).copied().unwrap_or(0),
            diff.difference
        );
    }
    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>+6}",
        "Total",
        stats.first.total,
        stats.second.total,
        i64::from(stats.first.total) - i64::from(stats.second.total)
    );
    let _ = writeln!(out, "Stats winner: {}", stats.winner.label(a, b));

    let types = &summary.types;
    let _ = writeln!(out, "\nShared types: {}", list_or_none(&types.shared));
    let _ = writeln!(out, "Only {}: {}", a, list_or_none(&types.unique_first));
    let _ = writeln!(out, "Only {}: {}", b, list_or_none(&types.unique_second));

    let advantage = &summary.type_advantage;
    let _ = writeln!(
        out,
        "Type advantage: {} {} vs {} {} -> {}",
        a,
        advantage.first,
        b,
        advantage.second,
        advantage.winner.label(a, b)
    );

    let abilities = &summary.abilities;
    let _ = writeln!(
        out,
        "\nAbilities: {} has {} ({} hidden), {} has {} ({} hidden)",
        a,
        abilities.first.count,
        abilities.first.hidden_count,
        b,
        abilities.second.count,
        abilities.second.hidden_count
    );
    let _ = writeln!(out, "Shared abilities: {}", list_or_none(&abilities.shared));
    let ability_winner = match summary.ability_advantage {
        Winner::First => a,
        _ => b,
    };
    let _ = writeln!(out, "Ability advantage: {}", ability_winner);
    out
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.iter().map(|i| humanize(i)).collect::<Vec<_>>().join(", ")
    }
}

pub fn favorites(records: &[FavoriteRecord]) -> String {
    if records.is_empty() {
        return "No favorites yet\n".to_string();
    }
    let mut out = String::new();
    for f in records {
        let _ = writeln!(
            out,
            "#{:03} {:<14} [{}] added {}",
            f.id,
            humanize(&f.name),
            f.types.join("/"),
            f.added_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

pub fn favorites_stats(stats: &FavoritesStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total: {}", stats.total);
    let _ = writeln!(out, "Added in the last 7 days: {}", stats.recent);
    for (type_name, count) in &stats.types {
        let _ = writeln!(out, "  {:<10} {}", type_name, count);
    }
    out
}
