//! Local persistence for favorites and search history.
//!
//! Repositories sit on top of [`Storage`](crate::storage::Storage) and use
//! the `FromContext` derive macro for dependency injection.

mod favorites;
mod history;

pub use favorites::{FavoritesRepository, MAX_FAVORITES_RANGE};
pub use history::HistoryRepository;
