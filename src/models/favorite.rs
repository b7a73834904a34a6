//! Persisted projections of entities: favorites and their export format.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Version tag written into favorites exports.
pub const EXPORT_VERSION: &str = "1.0";

/// A favorited entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub types: Vec<String>,
    pub added_at: DateTime<Utc>,
}

impl FavoriteRecord {
    /// Project an entity into a favorite stamped with the current time.
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            image: entity.image_url.clone(),
            types: entity.types.clone(),
            added_at: Utc::now(),
        }
    }
}

/// Document produced by exporting favorites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesExport {
    pub favorites: Vec<FavoriteRecord>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

/// Aggregate figures over the favorites list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritesStats {
    pub total: usize,
    /// Number of favorites carrying each type.
    pub types: BTreeMap<String, usize>,
    /// Favorites added within the last seven days.
    pub recent: usize,
}

/// Sort key for listing favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteSort {
    #[default]
    Date,
    Name,
    Id,
}

impl FromStr for FavoriteSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(FavoriteSort::Date),
            "name" => Ok(FavoriteSort::Name),
            "id" => Ok(FavoriteSort::Id),
            _ => Err(format!(
                "Invalid sort '{}'. Valid values: date, name, id",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}
