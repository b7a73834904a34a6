//! The record-fetching seam between services and the upstream API.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Entity, NamedResource, RawEvolutionChain, SpeciesDetail};

/// Retrieves catalog records from the upstream API.
///
/// Primary lookups ([`fetch_entity`](RecordFetcher::fetch_entity)) return
/// classified errors. Secondary lookups (species detail, evolution graph)
/// return `None` on any failure so callers can degrade to "no data".
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetches a single entity by name or numeric id.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] on 404, [`AppError::Api`] on other non-2xx
    /// statuses, [`AppError::Timeout`] when the request exceeds the configured
    /// bound, [`AppError::Network`] on transport failure and
    /// [`AppError::Decode`] on an unexpected body.
    async fn fetch_entity(&self, identifier: &str) -> Result<Entity, AppError>;

    /// Fetches the species record.
    ///
    /// `species_ref` is either an absolute species URL or a species name/id.
    async fn fetch_species_detail(&self, species_ref: &str) -> Option<SpeciesDetail>;

    /// Fetches the raw evolution graph the species belongs to.
    async fn fetch_evolution_graph(&self, species_ref: &str) -> Option<RawEvolutionChain>;

    /// Fetches a raw evolution graph directly from its URL, as found in
    /// [`SpeciesDetail::evolution_chain_url`].
    async fn fetch_evolution_chain(&self, chain_url: &str) -> Option<RawEvolutionChain>;

    /// Lists catalog entries.
    async fn fetch_catalog(&self, limit: u32, offset: u32)
        -> Result<Vec<NamedResource>, AppError>;

    /// Lists every entity carrying a type, in API order.
    async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<NamedResource>, AppError>;
}
