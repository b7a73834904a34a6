//! Pokédex - a catalog viewer for PokéAPI.
//!
//! Fetches Pokémon records, builds their evolution chains, compares pairs
//! side by side and keeps favorites and search history on disk.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;
pub mod storage;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
