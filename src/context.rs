//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::api::{PokeApiClient, RecordFetcher};
use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::services::ChainCache;
use crate::session::Session;
use crate::storage::Storage;

/// Shared record fetcher.
pub type AppFetcher = Arc<dyn RecordFetcher>;

/// Shared local store.
pub type AppStorage = Arc<Storage>;

/// Root application context for dependency injection.
///
/// Created once at startup and torn down at exit. `#[derive(Context)]`
/// generates a `FromRef` implementation for each field, so services and
/// repositories resolve their dependencies at compile time.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Upstream API access.
    pub fetcher: AppFetcher,
    /// Favorites and history store.
    pub storage: AppStorage,
    /// Built evolution chains keyed by species URL.
    pub chain_cache: ChainCache,
    /// Current search session.
    pub session: Session,
}

impl Context {
    /// Build a context talking to the real API.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = PokeApiClient::new(&config.api)?;
        tracing::debug!(base_url = %client.base_url(), "API client ready");
        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    /// Build a context around an arbitrary fetcher.
    pub fn with_fetcher(config: Config, fetcher: AppFetcher) -> Self {
        let storage = Storage::new(config.storage.dir.clone());
        Self {
            config: Arc::new(config),
            fetcher,
            storage: Arc::new(storage),
            chain_cache: ChainCache::default(),
            session: Session::default(),
        }
    }
}
