//! Favorites persisted under the `favorites` key.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::config::Config;
use crate::context::{AppStorage, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{
    Entity, FavoriteRecord, FavoriteSort, FavoritesExport, FavoritesStats, SortOrder,
    EXPORT_VERSION,
};

const FAVORITES_KEY: &str = "favorites";
const LIMIT_KEY: &str = "favorites_limit";

/// Bounds accepted by [`FavoritesRepository::set_max`].
pub const MAX_FAVORITES_RANGE: std::ops::RangeInclusive<usize> = 1..=100;

/// Repository for the favorites list.
///
/// Records are kept in insertion order. The capacity comes from
/// `storage.max_favorites` unless overridden with [`set_max`](Self::set_max).
#[derive(FromContext, Clone)]
pub struct FavoritesRepository {
    storage: AppStorage,
    config: Arc<Config>,
}

impl FavoritesRepository {
    /// All favorites in insertion order.
    pub fn list(&self) -> Vec<FavoriteRecord> {
        self.storage.read(FAVORITES_KEY)
    }

    fn save(&self, favorites: &[FavoriteRecord]) -> Result<(), AppError> {
        self.storage.write(FAVORITES_KEY, favorites)
    }

    /// Current capacity.
    pub fn max(&self) -> usize {
        let limit: Option<usize> = self.storage.read(LIMIT_KEY);
        limit.unwrap_or(self.config.storage.max_favorites)
    }

    /// Change the capacity, dropping the oldest favorites when shrinking.
    pub fn set_max(&self, max: usize) -> Result<(), AppError> {
        if !MAX_FAVORITES_RANGE.contains(&max) {
            return Err(AppError::Validation(format!(
                "The limit must be between {} and {}",
                MAX_FAVORITES_RANGE.start(),
                MAX_FAVORITES_RANGE.end()
            )));
        }
        self.storage.write(LIMIT_KEY, &max)?;

        let favorites = self.list();
        if favorites.len() > max {
            let kept = self.sorted_by(FavoriteSort::Date, SortOrder::Descending);
            self.save(&kept[..max])?;
            tracing::info!(max, dropped = favorites.len() - max, "Favorites trimmed to new limit");
        }
        Ok(())
    }

    pub fn add(&self, entity: &Entity) -> Result<FavoriteRecord, AppError> {
        let mut favorites = self.list();
        let max = self.max();

        if favorites.len() >= max {
            return Err(AppError::Capacity(format!(
                "You cannot have more than {} favorites",
                max
            )));
        }
        if favorites.iter().any(|f| f.id == entity.id) {
            return Err(AppError::Duplicate(format!(
                "{} is already in your favorites",
                entity.display_name()
            )));
        }

        let record = FavoriteRecord::from_entity(entity);
        favorites.push(record.clone());
        self.save(&favorites)?;
        tracing::debug!(id = entity.id, name = %entity.name, "Favorite added");
        Ok(record)
    }

    /// Returns `true` if a favorite was removed.
    pub fn remove(&self, id: u32) -> Result<bool, AppError> {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|f| f.id != id);

        if favorites.len() == before {
            return Ok(false);
        }
        self.save(&favorites)?;
        Ok(true)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.list().iter().any(|f| f.id == id)
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.save(&[])
    }

    pub fn sorted_by(&self, sort: FavoriteSort, order: SortOrder) -> Vec<FavoriteRecord> {
        let mut favorites = self.list();
        match sort {
            FavoriteSort::Date => favorites.sort_by_key(|f| f.added_at),
            FavoriteSort::Name => favorites.sort_by_key(|f| f.name.to_lowercase()),
            FavoriteSort::Id => favorites.sort_by_key(|f| f.id),
        }
        if order == SortOrder::Descending {
            favorites.reverse();
        }
        favorites
    }

    pub fn by_type(&self, type_name: &str) -> Vec<FavoriteRecord> {
        let type_name = type_name.to_lowercase();
        self.list()
            .into_iter()
            .filter(|f| f.types.iter().any(|t| *t == type_name))
            .collect()
    }

    /// Favorites whose name or id contains `query`.
    pub fn search(&self, query: &str) -> Vec<FavoriteRecord> {
        let query = query.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|f| f.name.to_lowercase().contains(&query) || f.id.to_string().contains(&query))
            .collect()
    }

    pub fn stats(&self) -> FavoritesStats {
        let favorites = self.list();
        let week_ago = Utc::now() - Duration::days(7);

        let mut types = BTreeMap::new();
        for t in favorites.iter().flat_map(|f| &f.types) {
            *types.entry(t.clone()).or_insert(0) += 1;
        }

        FavoritesStats {
            total: favorites.len(),
            types,
            recent: favorites.iter().filter(|f| f.added_at > week_ago).count(),
        }
    }

    /// Serialize all favorites as a pretty JSON export document.
    pub fn export(&self) -> Result<String, AppError> {
        let export = FavoritesExport {
            favorites: self.list(),
            exported_at: Utc::now(),
            version: EXPORT_VERSION.to_string(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Merge favorites from an export document and return how many were new.
    ///
    /// Entries lacking an id, name, image or types list are dropped. Existing
    /// ids are kept as they are. The merged list is truncated to the limit.
    pub fn import(&self, json: &str) -> Result<usize, AppError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| AppError::Validation(format!("Invalid favorites data: {}", e)))?;

        let entries = document
            .get("favorites")
            .and_then(Value::as_array)
            .ok_or_else(|| AppError::Validation("Invalid favorites data".to_string()))?;

        let valid: Vec<FavoriteRecord> = entries.iter().filter_map(parse_entry).collect();
        if valid.is_empty() {
            return Err(AppError::Validation("No valid favorites found".to_string()));
        }

        let mut favorites = self.list();
        let mut seen: HashSet<u32> = favorites.iter().map(|f| f.id).collect();
        let fresh: Vec<FavoriteRecord> = valid.into_iter().filter(|f| seen.insert(f.id)).collect();
        let imported = fresh.len();

        favorites.extend(fresh);
        favorites.truncate(self.max());
        self.save(&favorites)?;

        tracing::info!(imported, total = favorites.len(), "Favorites imported");
        Ok(imported)
    }
}

/// Lenient parse of one imported entry. A missing or unreadable timestamp
/// becomes the import time.
fn parse_entry(value: &Value) -> Option<FavoriteRecord> {
    let id = value.get("id")?.as_u64().filter(|id| *id > 0)?;
    let name = value.get("name")?.as_str().filter(|s| !s.is_empty())?;
    let image = value.get("image")?.as_str().filter(|s| !s.is_empty())?;
    let types = value
        .get("types")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    let added_at = value
        .get("addedAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Some(FavoriteRecord {
        id: u32::try_from(id).ok()?,
        name: name.to_string(),
        image: image.to_string(),
        types,
        added_at,
    })
}
