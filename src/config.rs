//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/pokedex/config.toml` (XDG) or platform config dir
//! 2. Project config: `.pokedex.toml`
//! 3. Environment variables: `POKEDEX_*`, sections split on `__`
//!    (e.g. `POKEDEX_API__TIMEOUT_MS=5000`)
//!
//! Every field has a default, so running without any config file is valid.
//!
//! ```toml
//! [api]
//! base_url = "https://pokeapi.co/api/v2"
//! timeout_ms = 10000
//!
//! [catalog]
//! size = 151
//!
//! [storage]
//! dir = "/home/ash/.local/share/pokedex"
//! max_favorites = 50
//! max_history = 10
//!
//! [evolution]
//! max_depth = 16
//! concurrent = true
//! cache = true
//! ```

use std::ops::Deref;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
}

/// Upstream REST API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Catalog bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Highest valid numeric id; numeric queries outside `1..=size` are rejected.
    #[serde(default = "default_catalog_size")]
    pub size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            size: default_catalog_size(),
        }
    }
}

/// Local persistence for favorites and search history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON store files.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_max_favorites")]
    pub max_favorites: usize,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            max_favorites: default_max_favorites(),
            max_history: default_max_history(),
        }
    }
}

/// Evolution chain construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Links deeper than this are pruned. Real chains are at most three stages.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Fetch sibling branches concurrently.
    #[serde(default = "default_true")]
    pub concurrent: bool,
    /// Keep built chains keyed by species URL for the lifetime of the process.
    #[serde(default = "default_true")]
    pub cache: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            concurrent: true,
            cache: true,
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_catalog_size() -> u32 {
    151
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("pokedex"))
        .unwrap_or_else(|| PathBuf::from(".pokedex"))
}

fn default_max_favorites() -> usize {
    50
}

fn default_max_history() -> usize {
    10
}

fn default_max_depth() -> usize {
    16
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered provider chain, exposed for tests.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(".pokedex.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("POKEDEX_").split("__"))
    }

    /// User config path: ~/.config/pokedex/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("pokedex").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("pokedex").join("config.toml"))
            .unwrap_or_default()
    }
}
