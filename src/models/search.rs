//! Search results.

use serde::Serialize;

use super::{Entity, EvolutionNode, SpeciesDetail};

/// Everything shown for one searched entity.
///
/// `evolution` and `species` are secondary data; `None` means the data was
/// unavailable, not that the search failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub entity: Entity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution: Option<EvolutionNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<SpeciesDetail>,
}

/// An autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: u32,
    pub display_name: String,
}
