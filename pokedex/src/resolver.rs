use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::api::PokeApi;
use crate::config::DEFAULT_LIST_LIMIT;
use crate::error::{ApiError, ResolveError, StoreError};
use crate::favorites::FavoritesStore;
use crate::model::{
    favorite_key, FavoriteRecord, PokemonDetail, PokemonSummary, PokemonType, Region,
};

/// Outcome of flipping a favorite. `is_favorite` is final as soon as this is
/// returned; `persisted` completes once the store write or delete has run.
#[derive(Debug)]
pub struct FavoriteToggle {
    pub is_favorite: bool,
    pub persisted: JoinHandle<Result<(), StoreError>>,
}

/// Live lookups with a favorites fallback, plus favorite bookkeeping.
#[derive(Clone)]
pub struct DetailResolver {
    api: Arc<dyn PokeApi>,
    store: Arc<dyn FavoritesStore>,
    flags: Arc<Mutex<HashMap<String, bool>>>,
    list_limit: u32,
}

impl DetailResolver {
    pub fn new(api: Arc<dyn PokeApi>, store: Arc<dyn FavoritesStore>) -> Self {
        Self {
            api,
            store,
            flags: Arc::new(Mutex::new(HashMap::new())),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, list_limit: u32) -> Self {
        self.list_limit = list_limit;
        self
    }

    pub async fn resolve_detail(&self, name: &str) -> Result<PokemonDetail, ResolveError> {
        let err = match self.api.get_pokemon_detail(name).await {
            Ok(detail) => return Ok(detail),
            Err(err) => err,
        };
        if err.is_unsuccessful_response() {
            warn!(name, error = %err, "server returned no detail, trying favorites");
        } else {
            warn!(name, error = %err, "live lookup failed, trying favorites");
        }

        let key = favorite_key(name);
        match self.store.find_by_name(&key).await {
            Ok(Some(record)) => {
                info!(name = %key, "serving detail from favorites");
                Ok(record.to_detail())
            }
            Ok(None) => Err(ResolveError::NotAvailable { name: key }),
            Err(store_err) => {
                error!(name = %key, error = %store_err, "favorites lookup failed");
                Err(ResolveError::NotAvailable { name: key })
            }
        }
    }

    /// Flips the remembered flag and starts persisting the new state.
    pub async fn toggle_favorite(&self, detail: &PokemonDetail) -> FavoriteToggle {
        let current = match self.remembered(&detail.name) {
            Some(flag) => flag,
            None => self.check_favorite_status(&detail.name).await,
        };
        let is_favorite = !current;
        let persisted = self.set_favorite(detail, is_favorite);
        FavoriteToggle {
            is_favorite,
            persisted,
        }
    }

    /// Records `favorite` for the detail and writes it in the background.
    /// Failures are logged and returned through the handle, never retried.
    pub fn set_favorite(
        &self,
        detail: &PokemonDetail,
        favorite: bool,
    ) -> JoinHandle<Result<(), StoreError>> {
        self.remember(&detail.name, favorite);
        let store = Arc::clone(&self.store);
        let record = FavoriteRecord::from_detail(detail);
        tokio::spawn(async move {
            let name = record.name.clone();
            let result = if favorite {
                store.upsert(record).await
            } else {
                store.delete_by_name(&name).await
            };
            if let Err(err) = &result {
                error!(name = %name, favorite, error = %err, "favorite change not persisted");
            }
            result
        })
    }

    pub async fn check_favorite_status(&self, name: &str) -> bool {
        let key = favorite_key(name);
        let status = match self.store.find_by_name(&key).await {
            Ok(record) => record.is_some(),
            Err(err) => {
                error!(name = %key, error = %err, "favorite status unavailable");
                false
            }
        };
        self.remember(&key, status);
        status
    }

    pub async fn list_favorites(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        self.store.list_all().await
    }

    pub async fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        self.api.list_regions().await
    }

    pub async fn list_pokemon_by_region(
        &self,
        region_id: &str,
    ) -> Result<Vec<PokemonSummary>, ApiError> {
        self.api.list_pokemon_by_region(region_id).await
    }

    /// Lists every Pokemon using the configured page size.
    pub async fn list_all_pokemon(&self) -> Result<Vec<PokemonSummary>, ApiError> {
        self.api.list_all_pokemon(self.list_limit).await
    }

    pub async fn list_types(&self) -> Result<Vec<PokemonType>, ApiError> {
        self.api.list_types().await
    }

    pub async fn list_pokemon_by_type(
        &self,
        type_name: &str,
    ) -> Result<Vec<PokemonSummary>, ApiError> {
        self.api.list_pokemon_by_type(type_name).await
    }

    fn remembered(&self, name: &str) -> Option<bool> {
        let flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        flags.get(&favorite_key(name)).copied()
    }

    fn remember(&self, name: &str, favorite: bool) {
        let mut flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        flags.insert(favorite_key(name), favorite);
    }
}
