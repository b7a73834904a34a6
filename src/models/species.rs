//! Species detail and the raw evolution graph as supplied by the API.

use serde::{Deserialize, Serialize};

/// A `{name, url}` pointer to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id parsed from the trailing path segment of the URL.
    ///
    /// `https://pokeapi.co/api/v2/pokemon/25/` → `Some(25)`.
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// Secondary species data shown beside an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    pub id: u32,
    pub name: String,
    /// URL of the evolution chain this species belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution_chain_url: Option<String>,
    /// English genus ("Seed Pokémon").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    /// English flavor text with whitespace normalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub capture_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_happiness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
}

/// Raw evolution chain document (`/evolution-chain/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvolutionChain {
    pub id: u32,
    pub chain: RawChainLink,
}

/// One node of the raw evolution graph.
///
/// `evolution_details` describes how this node is reached from its parent
/// and is empty for the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<RawEvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<RawChainLink>,
}

impl RawChainLink {
    /// Total number of species nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.evolves_to.iter().map(RawChainLink::node_count).sum::<usize>()
    }
}

/// One trigger-condition record of an evolution transition.
///
/// All fields are optional; the API uses `null` for absent values and an
/// empty string for an unrestricted `time_of_day`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEvolutionDetail {
    pub trigger: Option<NamedResource>,
    pub min_level: Option<u32>,
    pub item: Option<NamedResource>,
    pub time_of_day: Option<String>,
    pub gender: Option<u8>,
    pub known_move: Option<NamedResource>,
    pub known_move_type: Option<NamedResource>,
    pub location: Option<NamedResource>,
    pub min_happiness: Option<u32>,
    pub min_beauty: Option<u32>,
    pub min_affection: Option<u32>,
    pub party_species: Option<NamedResource>,
    pub party_type: Option<NamedResource>,
    pub relative_physical_stats: Option<i8>,
}
