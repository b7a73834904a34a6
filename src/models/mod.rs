//! Domain models for the catalog.

mod comparison;
mod entity;
mod evolution;
mod favorite;
mod search;
mod species;

pub use comparison::{
    AbilitiesComparison, AbilitySide, ComparisonSummary, StatDifference, StatLine,
    StatsComparison, TypeAdvantage, TypesComparison, Winner,
};
pub use entity::{capitalize, humanize, Ability, Entity, Stat};
pub use evolution::{requirement_text, EvolutionNode, Requirement, NATURAL_EVOLUTION};
pub use favorite::{
    FavoriteRecord, FavoriteSort, FavoritesExport, FavoritesStats, SortOrder, EXPORT_VERSION,
};
pub use search::{SearchOutcome, Suggestion};
pub use species::{
    NamedResource, RawChainLink, RawEvolutionChain, RawEvolutionDetail, SpeciesDetail,
};
