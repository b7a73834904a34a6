//! Business logic services for the catalog.
//!
//! Services orchestrate the fetcher and repositories and handle business
//! rules, using the `FromContext` derive macro for dependency injection.

mod comparison;
mod evolution;
mod search;

pub use comparison::{effectiveness, ComparisonSlots};
pub use evolution::{parse_requirement, ChainCache, EvolutionService};
pub use search::{
    SearchService, MIN_SUGGESTION_LEN, NAME_RESULTS, SUGGESTION_RESULTS, TYPE_RESULTS,
};
