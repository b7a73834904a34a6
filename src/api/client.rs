//! PokéAPI client over reqwest.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::api::wire::{ListDocument, PokemonDocument, SpeciesDocument, TypeDocument};
use crate::api::RecordFetcher;
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::{Entity, NamedResource, RawEvolutionChain, SpeciesDetail};

/// PokéAPI client.
///
/// Every request is bounded by the configured timeout; an expired request
/// surfaces as [`AppError::Timeout`].
#[derive(Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a species reference: absolute URLs pass through, names and ids
    /// are placed under `/pokemon-species/`.
    pub fn species_url(&self, species_ref: &str) -> String {
        if species_ref.starts_with("http://") || species_ref.starts_with("https://") {
            species_ref.to_string()
        } else {
            format!(
                "{}/pokemon-species/{}",
                self.base_url,
                species_ref.trim().to_lowercase()
            )
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, url, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| classify_transport(&e, url))
    }

    async fn species_document(&self, species_ref: &str) -> Result<SpeciesDocument, AppError> {
        self.get_json(&self.species_url(species_ref)).await
    }

    async fn evolution_graph(&self, species_ref: &str) -> Result<RawEvolutionChain, AppError> {
        let species = self.species_document(species_ref).await?;
        let chain_url = species.evolution_chain.map(|c| c.url).ok_or_else(|| {
            AppError::NotFound(format!("No evolution chain for species {}", species.name))
        })?;
        self.get_json(&chain_url).await
    }
}

/// Map a non-success status to an error.
fn classify_status(status: StatusCode, url: &str, body: String) -> AppError {
    if status == StatusCode::NOT_FOUND {
        AppError::NotFound(url.to_string())
    } else {
        AppError::Api {
            status: status.as_u16(),
            message: if body.is_empty() {
                url.to_string()
            } else {
                body
            },
        }
    }
}

/// Map a reqwest failure (send or body decode) to an error.
fn classify_transport(err: &reqwest::Error, url: &str) -> AppError {
    if err.is_timeout() {
        AppError::Timeout(url.to_string())
    } else if err.is_decode() {
        AppError::Decode(format!("{url}: {err}"))
    } else {
        AppError::Network(format!("{url}: {err}"))
    }
}

#[async_trait]
impl RecordFetcher for PokeApiClient {
    async fn fetch_entity(&self, identifier: &str) -> Result<Entity, AppError> {
        let url = format!(
            "{}/pokemon/{}",
            self.base_url,
            identifier.trim().to_lowercase()
        );
        let doc: PokemonDocument = self.get_json(&url).await?;
        Ok(doc.into())
    }

    async fn fetch_species_detail(&self, species_ref: &str) -> Option<SpeciesDetail> {
        match self.species_document(species_ref).await {
            Ok(doc) => Some(doc.into()),
            Err(e) => {
                tracing::warn!(species = %species_ref, error = %e, "Failed to fetch species detail");
                None
            }
        }
    }

    async fn fetch_evolution_graph(&self, species_ref: &str) -> Option<RawEvolutionChain> {
        match self.evolution_graph(species_ref).await {
            Ok(chain) => Some(chain),
            Err(e) => {
                tracing::warn!(species = %species_ref, error = %e, "Failed to fetch evolution chain");
                None
            }
        }
    }

    async fn fetch_evolution_chain(&self, chain_url: &str) -> Option<RawEvolutionChain> {
        match self.get_json(chain_url).await {
            Ok(chain) => Some(chain),
            Err(e) => {
                tracing::warn!(url = %chain_url, error = %e, "Failed to fetch evolution chain");
                None
            }
        }
    }

    async fn fetch_catalog(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<NamedResource>, AppError> {
        let url = format!(
            "{}/pokemon?limit={}&offset={}",
            self.base_url, limit, offset
        );
        let doc: ListDocument = self.get_json(&url).await?;
        Ok(doc.results)
    }

    async fn fetch_type_members(&self, type_name: &str) -> Result<Vec<NamedResource>, AppError> {
        let url = format!(
            "{}/type/{}",
            self.base_url,
            type_name.trim().to_lowercase()
        );
        let doc: TypeDocument = self.get_json(&url).await?;
        Ok(doc.pokemon.into_iter().map(|m| m.pokemon).collect())
    }
}
