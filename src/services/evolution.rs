//! Evolution chain construction.
//!
//! A raw evolution graph names species only. Building a chain walks that
//! graph, fetches the full entity for every node, parses the requirement of
//! each transition and returns an owned, depth-annotated tree.
//!
//! A failed fetch prunes only the subtree rooted at that node; siblings and
//! the rest of the chain are still built.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::config::Config;
use crate::context::{AppFetcher, Context};
use crate::di::FromContext;
use crate::models::{
    EvolutionNode, RawChainLink, RawEvolutionChain, RawEvolutionDetail, Requirement,
};

/// Complete built chains keyed by species URL, shared for the lifetime of
/// the process.
#[derive(Debug, Clone, Default)]
pub struct ChainCache(Arc<Mutex<HashMap<String, EvolutionNode>>>);

impl ChainCache {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, EvolutionNode>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn get(&self, key: &str) -> Option<EvolutionNode> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, chain: EvolutionNode) {
        self.lock().insert(key.into(), chain);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Service that turns raw evolution graphs into [`EvolutionNode`] trees.
#[derive(FromContext, Clone)]
pub struct EvolutionService {
    fetcher: AppFetcher,
    config: Arc<Config>,
    cache: ChainCache,
}

impl EvolutionService {
    /// Fetch and build the evolution chain a species belongs to.
    ///
    /// Returns `None` when the graph is unavailable or its root cannot be
    /// fetched. Failures are logged, never raised.
    pub async fn get_evolution_chain(&self, species_ref: &str) -> Option<EvolutionNode> {
        if let Some(chain) = self.cached(species_ref) {
            return Some(chain);
        }
        let graph = self.fetcher.fetch_evolution_graph(species_ref).await?;
        self.build_graph(species_ref, &graph).await
    }

    /// Like [`get_evolution_chain`](Self::get_evolution_chain), for callers
    /// that already hold the species detail and its chain URL.
    pub async fn get_evolution_chain_at(
        &self,
        species_ref: &str,
        chain_url: &str,
    ) -> Option<EvolutionNode> {
        if let Some(chain) = self.cached(species_ref) {
            return Some(chain);
        }
        let graph = self.fetcher.fetch_evolution_chain(chain_url).await?;
        self.build_graph(species_ref, &graph).await
    }

    fn cached(&self, species_ref: &str) -> Option<EvolutionNode> {
        if !self.config.evolution.cache {
            return None;
        }
        let chain = self.cache.get(species_ref)?;
        tracing::debug!(species = %species_ref, "Evolution chain cache hit");
        Some(chain)
    }

    /// Build `graph` and cache the result when every node made it in.
    async fn build_graph(
        &self,
        species_ref: &str,
        graph: &RawEvolutionChain,
    ) -> Option<EvolutionNode> {
        let expected = graph.chain.node_count();
        tracing::debug!(chain_id = graph.id, nodes = expected, "Building evolution chain");

        let Some(root) = self.build_chain(&graph.chain).await else {
            tracing::warn!(
                species = %species_ref,
                chain_id = graph.id,
                "Evolution chain root unavailable"
            );
            return None;
        };

        if self.config.evolution.cache {
            let built = root.flatten().len();
            if built == expected {
                self.cache.insert(species_ref, root.clone());
            } else {
                tracing::info!(
                    species = %species_ref,
                    chain_id = graph.id,
                    built,
                    expected,
                    "Evolution chain incomplete, not cached"
                );
            }
        }
        Some(root)
    }

    /// Build a tree from a raw graph node treated as the root.
    ///
    /// The root never carries a requirement.
    pub async fn build_chain(&self, root: &RawChainLink) -> Option<EvolutionNode> {
        self.build_link(root, 0).await
    }

    /// Drop all cached chains.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn build_link<'a>(
        &'a self,
        link: &'a RawChainLink,
        depth: usize,
    ) -> BoxFuture<'a, Option<EvolutionNode>> {
        async move {
            let max_depth = self.config.evolution.max_depth;
            if depth > max_depth {
                tracing::warn!(
                    species = %link.species.name,
                    depth,
                    max_depth,
                    "Evolution chain exceeds depth cap, pruning"
                );
                return None;
            }

            let entity = match self.fetcher.fetch_entity(&link.species.name).await {
                Ok(entity) => entity,
                Err(e) => {
                    tracing::warn!(
                        species = %link.species.name,
                        depth,
                        error = %e,
                        "Failed to fetch evolution stage, pruning branch"
                    );
                    return None;
                }
            };

            let requirement = if depth == 0 {
                None
            } else {
                parse_requirement(&link.evolution_details)
            };

            let children = self.build_children(&link.evolves_to, depth + 1).await;

            Some(EvolutionNode {
                entity,
                requirement,
                depth,
                children,
            })
        }
        .boxed()
    }

    /// Build sibling subtrees. Concurrent builds resolve into per-index
    /// slots, so output order always matches input order.
    async fn build_children(&self, links: &[RawChainLink], depth: usize) -> Vec<EvolutionNode> {
        if self.config.evolution.concurrent {
            join_all(links.iter().map(|link| self.build_link(link, depth)))
                .await
                .into_iter()
                .flatten()
                .collect()
        } else {
            let mut children = Vec::with_capacity(links.len());
            for link in links {
                if let Some(child) = self.build_link(link, depth).await {
                    children.push(child);
                }
            }
            children
        }
    }
}

/// Parse the requirement of one transition.
///
/// Only the first detail record is consulted, even when a transition lists
/// alternatives. Returns `None` for an empty list.
pub fn parse_requirement(details: &[RawEvolutionDetail]) -> Option<Requirement> {
    let detail = details.first()?;
    let name = |r: &Option<crate::models::NamedResource>| r.as_ref().map(|r| r.name.clone());

    Some(Requirement {
        trigger: name(&detail.trigger),
        min_level: detail.min_level,
        item: name(&detail.item),
        time_of_day: detail.time_of_day.clone().filter(|t| !t.is_empty()),
        gender: detail.gender,
        known_move: name(&detail.known_move),
        known_move_type: name(&detail.known_move_type),
        location: name(&detail.location),
        min_happiness: detail.min_happiness,
        min_beauty: detail.min_beauty,
        min_affection: detail.min_affection,
        party_species: name(&detail.party_species),
        party_type: name(&detail.party_type),
        // Zero is meaningful here (attack equals defense).
        relative_physical_stats: detail.relative_physical_stats,
    })
}
