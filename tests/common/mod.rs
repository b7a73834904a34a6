//! In-memory record fetcher and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pokedex::api::RecordFetcher;
use pokedex::config::Config;
use pokedex::context::Context;
use pokedex::error::AppError;
use pokedex::models::{
    Ability, Entity, NamedResource, RawChainLink, RawEvolutionChain, RawEvolutionDetail,
    SpeciesDetail, Stat,
};

const BASE: &str = "https://pokeapi.co/api/v2";

pub fn species_url(id: u32) -> String {
    format!("{BASE}/pokemon-species/{id}/")
}

pub fn chain_url(id: u32) -> String {
    format!("{BASE}/evolution-chain/{id}/")
}

pub fn entity(id: u32, name: &str, types: &[&str]) -> Entity {
    Entity {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        abilities: vec![Ability {
            name: "run-away".to_string(),
            is_hidden: false,
        }],
        base_stats: Stat::all().iter().map(|s| (*s, 50)).collect(),
        height: 10,
        weight: 100,
        image_url: format!("https://img.example/{id}.png"),
        species_url: species_url(id),
    }
}

pub fn resource(kind: &str, id: u32, name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: format!("{BASE}/{kind}/{id}/"),
    }
}

pub fn level(min_level: u32) -> Vec<RawEvolutionDetail> {
    vec![RawEvolutionDetail {
        trigger: Some(resource("evolution-trigger", 1, "level-up")),
        min_level: Some(min_level),
        ..Default::default()
    }]
}

pub fn item(name: &str) -> Vec<RawEvolutionDetail> {
    vec![RawEvolutionDetail {
        trigger: Some(resource("evolution-trigger", 3, "use-item")),
        item: Some(resource("item", 1, name)),
        ..Default::default()
    }]
}

pub fn link(
    id: u32,
    name: &str,
    details: Vec<RawEvolutionDetail>,
    evolves_to: Vec<RawChainLink>,
) -> RawChainLink {
    RawChainLink {
        species: resource("pokemon-species", id, name),
        evolution_details: details,
        evolves_to,
    }
}

/// oddish → gloom → (vileplume | bellossom)
pub fn oddish_chain() -> RawChainLink {
    link(
        43,
        "oddish",
        vec![],
        vec![link(
            44,
            "gloom",
            level(21),
            vec![
                link(45, "vileplume", item("leaf-stone"), vec![]),
                link(182, "bellossom", item("sun-stone"), vec![]),
            ],
        )],
    )
}

pub fn oddish_entities() -> Vec<Entity> {
    vec![
        entity(43, "oddish", &["grass", "poison"]),
        entity(44, "gloom", &["grass", "poison"]),
        entity(45, "vileplume", &["grass", "poison"]),
        entity(182, "bellossom", &["grass"]),
    ]
}

/// Record fetcher backed by maps, with injectable failures and delays.
#[derive(Default)]
pub struct StubFetcher {
    entities: HashMap<String, Entity>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    graphs: HashMap<String, RawEvolutionChain>,
    chains: HashMap<String, RawEvolutionChain>,
    species: HashMap<String, SpeciesDetail>,
    catalog: Vec<NamedResource>,
    types: HashMap<String, Vec<NamedResource>>,
    catalog_down: bool,
    pub entity_calls: AtomicUsize,
    pub graph_calls: AtomicUsize,
    pub species_calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register entities, reachable by name or id, and list them in the catalog.
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        for e in entities {
            self.catalog.push(resource("pokemon", e.id, &e.name));
            self.entities.insert(e.id.to_string(), e.clone());
            self.entities.insert(e.name.clone(), e);
        }
        self
    }

    pub fn failing(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    pub fn delayed(mut self, identifier: &str, delay: Duration) -> Self {
        self.delays.insert(identifier.to_string(), delay);
        self
    }

    /// Make `chain` the evolution graph of every species it contains.
    pub fn with_graph(mut self, id: u32, chain: RawChainLink) -> Self {
        let graph = RawEvolutionChain { id, chain };
        let mut stack = vec![&graph.chain];
        let mut urls = Vec::new();
        while let Some(node) = stack.pop() {
            urls.push(node.species.url.clone());
            stack.extend(node.evolves_to.iter());
        }
        for url in urls {
            self.graphs.insert(url, graph.clone());
        }
        self.chains.insert(chain_url(id), graph);
        self
    }

    pub fn with_species(mut self, detail: SpeciesDetail) -> Self {
        self.species.insert(species_url(detail.id), detail);
        self
    }

    pub fn with_type(mut self, type_name: &str, members: Vec<NamedResource>) -> Self {
        self.types.insert(type_name.to_string(), members);
        self
    }

    pub fn catalog_down(mut self) -> Self {
        self.catalog_down = true;
        self
    }

    pub fn entity_calls(&self) -> usize {
        self.entity_calls.load(Ordering::SeqCst)
    }

    pub fn graph_calls(&self) -> usize {
        self.graph_calls.load(Ordering::SeqCst)
    }

    pub fn species_calls(&self) -> usize {
        self.species_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordFetcher for StubFetcher {
    async fn fetch_entity(&self, identifier: &str) -> Result<Entity, AppError> {
        self.entity_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(identifier) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(identifier) {
            return Err(AppError::Network(format!("{identifier}: connection reset")));
        }
        self.entities
            .get(identifier)
            .cloned()
            .ok_or_else(|| AppError::NotFound(identifier.to_string()))
    }

    async fn fetch_species_detail(&self, species_ref: &str) -> Option<SpeciesDetail> {
        self.species_calls.fetch_add(1, Ordering::SeqCst);
        self.species.get(species_ref).cloned()
    }

    async fn fetch_evolution_graph(&self, species_ref: &str) -> Option<RawEvolutionChain> {
        self.graph_calls.fetch_add(1, Ordering::SeqCst);
        self.graphs.get(species_ref).cloned()
    }

    async fn fetch_evolution_chain(&self, chain_url: &str) -> Option<RawEvolutionChain> {
        self.graph_calls.fetch_add(1, Ordering::SeqCst);
        self.chains.get(chain_url).cloned()
    }

    async fn fetch_catalog(&self, limit: u32, offset: u32) -> Result<Vec<NamedResource>, AppError> {
        if self.catalog_down {
            return Err(AppError::Timeout("catalog".to_string()));
        }
        Ok(self
            .catalog
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<NamedResource>, AppError> {
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(type_name.to_string()))
    }
}

/// Context over `fetcher` with storage in a fresh temporary directory.
pub fn context(
    fetcher: Arc<StubFetcher>,
    tweak: impl FnOnce(&mut Config),
) -> (Context, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::default();
    config.storage.dir = dir.path().to_path_buf();
    tweak(&mut config);
    (Context::with_fetcher(config, fetcher), dir)
}
