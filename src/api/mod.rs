//! Record fetching from the upstream REST API.
//!
//! Services depend on the [`RecordFetcher`] trait; [`PokeApiClient`] is the
//! HTTP implementation. Tests substitute an in-memory fetcher.

mod client;
mod traits;
pub mod wire;

pub use client::PokeApiClient;
pub use traits::RecordFetcher;
