//! Search orchestration: query validation, the primary lookup and its
//! secondary data, random picks, listing-based lookups and suggestions.

use std::sync::Arc;

use futures::future::try_join_all;
use rand::Rng;

use crate::config::Config;
use crate::context::{AppFetcher, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{capitalize, Entity, NamedResource, SearchOutcome, Suggestion};
use crate::repositories::HistoryRepository;
use crate::services::EvolutionService;
use crate::session::Session;

// ============================================================================
// Limits
// ============================================================================

/// Maximum results of a name search.
pub const NAME_RESULTS: usize = 10;

/// Maximum results of a type search.
pub const TYPE_RESULTS: usize = 20;

/// Maximum autocomplete suggestions.
pub const SUGGESTION_RESULTS: usize = 5;

/// Fragments shorter than this produce no suggestions.
pub const MIN_SUGGESTION_LEN: usize = 2;

// ============================================================================
// Service
// ============================================================================

/// Service running searches against the catalog.
#[derive(FromContext, Clone)]
pub struct SearchService {
    fetcher: AppFetcher,
    config: Arc<Config>,
    history: HistoryRepository,
    evolution: EvolutionService,
    session: Session,
}

impl SearchService {
    /// Normalize a raw query (trimmed, lowercased) and reject unusable ones.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for an empty query or a number outside the
    /// catalog range.
    pub fn validate_query(&self, raw: &str) -> Result<String, AppError> {
        let query = raw.trim().to_lowercase();
        if query.is_empty() {
            return Err(AppError::Validation(
                "Enter a Pokémon name or number".to_string(),
            ));
        }

        if query.chars().all(|c| c.is_ascii_digit()) {
            let size = self.config.catalog.size;
            let in_range = query
                .parse::<u32>()
                .map(|n| (1..=size).contains(&n))
                .unwrap_or(false);
            if !in_range {
                return Err(AppError::Validation(format!(
                    "Pokémon numbers go from 1 to {}",
                    size
                )));
            }
        }

        Ok(query)
    }

    /// Look up one entity and gather its evolution chain and species detail.
    ///
    /// The species record is fetched once and its chain URL reused for the
    /// evolution graph. The primary lookup's errors propagate. Secondary data
    /// degrades to `None`. The outcome becomes the session's current result
    /// unless a newer search started in the meantime.
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome, AppError> {
        let query = self.validate_query(raw)?;
        let ticket = self.session.begin();
        tracing::debug!(query = %query, ticket = ticket.sequence(), "Search started");

        let entity = self.fetcher.fetch_entity(&query).await?;

        if let Err(e) = self.history.add(&query) {
            tracing::warn!(query = %query, error = %e, "Failed to record search history");
        }

        let species_ref = entity.species_ref();
        let species = self.fetcher.fetch_species_detail(species_ref).await;
        let evolution = match &species {
            Some(detail) => match &detail.evolution_chain_url {
                Some(url) => self.evolution.get_evolution_chain_at(species_ref, url).await,
                None => None,
            },
            None => self.evolution.get_evolution_chain(species_ref).await,
        };

        let outcome = SearchOutcome {
            entity,
            evolution,
            species,
        };
        self.session.commit(ticket, outcome.clone());

        tracing::info!(
            id = outcome.entity.id,
            name = %outcome.entity.name,
            has_evolution = outcome.evolution.is_some(),
            has_species = outcome.species.is_some(),
            "Search finished"
        );
        Ok(outcome)
    }

    /// Search a uniformly random catalog entry.
    pub async fn search_random(&self) -> Result<SearchOutcome, AppError> {
        let id = rand::thread_rng().gen_range(1..=self.config.catalog.size.max(1));
        tracing::debug!(id, "Random search");
        self.search(&id.to_string()).await
    }

    /// Entities whose name contains `fragment`, in catalog order.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Entity>, AppError> {
        let fragment = fragment.trim().to_lowercase();
        let catalog = self.fetcher.fetch_catalog(self.config.catalog.size, 0).await?;

        let matches: Vec<&NamedResource> = catalog
            .iter()
            .filter(|r| r.name.contains(&fragment))
            .take(NAME_RESULTS)
            .collect();

        self.fetch_all(matches).await
    }

    /// Entities carrying `type_name` that fall inside the catalog range.
    pub async fn search_by_type(&self, type_name: &str) -> Result<Vec<Entity>, AppError> {
        let type_name = type_name.trim().to_lowercase();
        let members = self.fetcher.fetch_type_members(&type_name).await?;
        let size = self.config.catalog.size;

        let matches: Vec<&NamedResource> = members
            .iter()
            .filter(|r| r.id().is_some_and(|id| id <= size))
            .take(TYPE_RESULTS)
            .collect();

        self.fetch_all(matches).await
    }

    /// Autocomplete candidates for a partial name. Never fails.
    pub async fn suggestions(&self, fragment: &str) -> Vec<Suggestion> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.chars().count() < MIN_SUGGESTION_LEN {
            return Vec::new();
        }

        let catalog = match self.fetcher.fetch_catalog(self.config.catalog.size, 0).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(fragment = %fragment, error = %e, "Suggestions unavailable");
                return Vec::new();
            }
        };

        catalog
            .iter()
            .filter(|r| r.name.contains(&fragment))
            .filter_map(|r| {
                Some(Suggestion {
                    id: r.id()?,
                    display_name: capitalize(&r.name),
                })
            })
            .take(SUGGESTION_RESULTS)
            .collect()
    }

    /// Fetch every listed entity concurrently. Any failure fails the batch.
    async fn fetch_all(&self, resources: Vec<&NamedResource>) -> Result<Vec<Entity>, AppError> {
        let identifiers: Vec<String> = resources
            .iter()
            .map(|r| r.id().map(|id| id.to_string()).unwrap_or_else(|| r.name.clone()))
            .collect();

        tracing::debug!(count = identifiers.len(), "Fetching entities");
        try_join_all(identifiers.iter().map(|id| self.fetcher.fetch_entity(id))).await
    }
}
