//! JSON documents returned by the API and their conversion into models.

use serde::Deserialize;

use crate::models::{Ability, Entity, NamedResource, SpeciesDetail, Stat};

/// Image used when a record has no sprite at all.
pub const PLACEHOLDER_IMAGE: &str = "/assets/images/pokemon-placeholder.png";

/// `/pokemon/{id or name}`
#[derive(Debug, Deserialize)]
pub struct PokemonDocument {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    pub species: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<SpriteSet>,
    pub home: Option<SpriteSet>,
    pub dream_world: Option<SpriteSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpriteSet {
    pub front_default: Option<String>,
}

impl Sprites {
    /// Best available image: official artwork, home, dream world, front
    /// default, front shiny, then the placeholder.
    pub fn best_image(&self) -> String {
        let other = self.other.as_ref();
        let front = |set: Option<&SpriteSet>| set.and_then(|s| s.front_default.clone());

        [
            other.and_then(|o| front(o.official_artwork.as_ref())),
            other.and_then(|o| front(o.home.as_ref())),
            other.and_then(|o| front(o.dream_world.as_ref())),
            self.front_default.clone(),
            self.front_shiny.clone(),
        ]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }
}

impl From<PokemonDocument> for Entity {
    fn from(doc: PokemonDocument) -> Self {
        let mut types = doc.types;
        types.sort_by_key(|t| t.slot);

        let base_stats = doc
            .stats
            .iter()
            .filter_map(|s| match s.stat.name.parse::<Stat>() {
                Ok(stat) => Some((stat, s.base_stat)),
                Err(_) => {
                    tracing::debug!(stat = %s.stat.name, "Ignoring unknown stat");
                    None
                }
            })
            .collect();

        Entity {
            id: doc.id,
            name: doc.name,
            types: types.into_iter().map(|t| t.type_.name).collect(),
            abilities: doc
                .abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                })
                .collect(),
            base_stats,
            height: doc.height,
            weight: doc.weight,
            image_url: doc.sprites.best_image(),
            species_url: doc.species.url,
        }
    }
}

/// `/pokemon-species/{id or name}`
#[derive(Debug, Deserialize)]
pub struct SpeciesDocument {
    pub id: u32,
    pub name: String,
    pub evolution_chain: Option<UrlRef>,
    #[serde(default)]
    pub genera: Vec<Genus>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub capture_rate: u32,
    pub base_happiness: Option<u32>,
    pub generation: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

const LANGUAGE: &str = "en";

impl From<SpeciesDocument> for SpeciesDetail {
    fn from(doc: SpeciesDocument) -> Self {
        let genus = doc
            .genera
            .into_iter()
            .find(|g| g.language.name == LANGUAGE)
            .map(|g| g.genus);

        // Flavor text carries form feeds and hard line breaks from the games.
        let flavor_text = doc
            .flavor_text_entries
            .into_iter()
            .find(|f| f.language.name == LANGUAGE)
            .map(|f| f.flavor_text.split_whitespace().collect::<Vec<_>>().join(" "));

        SpeciesDetail {
            id: doc.id,
            name: doc.name,
            evolution_chain_url: doc.evolution_chain.map(|c| c.url),
            genus,
            flavor_text,
            is_legendary: doc.is_legendary,
            is_mythical: doc.is_mythical,
            capture_rate: doc.capture_rate,
            base_happiness: doc.base_happiness,
            generation: doc.generation.map(|g| g.name),
        }
    }
}

/// `/pokemon?limit=&offset=`
#[derive(Debug, Deserialize)]
pub struct ListDocument {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `/type/{name}`
#[derive(Debug, Deserialize)]
pub struct TypeDocument {
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
pub struct TypeMember {
    pub pokemon: NamedResource,
}
