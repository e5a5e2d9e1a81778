//! Effects - side effects declared by the reducer, and their execution

use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::model::PokemonDetail;
use crate::resolver::DetailResolver;
use crate::state::ListSource;

/// Task keys for the detail screen; reopening or closing it cancels both.
pub const DETAIL_TASK: &str = "detail";
pub const DETAIL_FAVORITE_TASK: &str = "detail_favorite";

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadRegions,
    LoadTypes,
    LoadList { source: ListSource },
    LoadFavorites,
    ResolveDetail { name: String },
    CheckFavorite { name: String },
    ToggleFavorite { detail: PokemonDetail },
    CancelDetail,
}

/// Spawns each effect as a keyed task. A new task replaces the running task
/// with the same key, so stale list and detail loads are aborted.
pub fn handle_effect(
    effect: Effect,
    tasks: &mut TaskManager<Action>,
    resolver: &DetailResolver,
) {
    let resolver = resolver.clone();
    match effect {
        Effect::LoadRegions => {
            tasks.spawn(TaskKey::new("regions"), async move {
                match resolver.list_regions().await {
                    Ok(regions) => Action::RegionsDidLoad(regions),
                    Err(err) => Action::RegionsDidError(err.to_string()),
                }
            });
        }
        Effect::LoadTypes => {
            tasks.spawn(TaskKey::new("types"), async move {
                match resolver.list_types().await {
                    Ok(types) => Action::TypesDidLoad(types),
                    Err(err) => Action::TypesDidError(err.to_string()),
                }
            });
        }
        Effect::LoadList { source } => {
            tasks.spawn(TaskKey::new("list"), async move {
                let result = match &source {
                    ListSource::Region(region) => {
                        resolver.list_pokemon_by_region(region.pokedex()).await
                    }
                    ListSource::All => resolver.list_all_pokemon().await,
                    ListSource::Type(name) => resolver.list_pokemon_by_type(name).await,
                };
                match result {
                    Ok(pokemon) => Action::ListDidLoad { source, pokemon },
                    Err(err) => Action::ListDidError {
                        source,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::LoadFavorites => {
            tasks.spawn(TaskKey::new("favorites"), async move {
                match resolver.list_favorites().await {
                    Ok(favorites) => Action::FavoritesDidLoad(favorites),
                    Err(err) => Action::FavoritesDidError(err.to_string()),
                }
            });
        }
        Effect::ResolveDetail { name } => {
            tasks.spawn(TaskKey::new(DETAIL_TASK), async move {
                match resolver.resolve_detail(&name).await {
                    Ok(detail) => Action::DetailDidLoad { name, detail },
                    Err(err) => Action::DetailDidError {
                        name,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::CheckFavorite { name } => {
            tasks.spawn(TaskKey::new(DETAIL_FAVORITE_TASK), async move {
                let is_favorite = resolver.check_favorite_status(&name).await;
                Action::FavoriteStatusDidLoad { name, is_favorite }
            });
        }
        Effect::ToggleFavorite { detail } => {
            // A status read still in flight would overwrite the toggled flag.
            tasks.cancel(&TaskKey::new(DETAIL_FAVORITE_TASK));
            let key = format!("favorite_{}", detail.name);
            tasks.spawn(TaskKey::new(key), async move {
                let toggle = resolver.toggle_favorite(&detail).await;
                let name = detail.name;
                match toggle.persisted.await {
                    Ok(Ok(())) => Action::FavoriteDidPersist {
                        name,
                        is_favorite: toggle.is_favorite,
                    },
                    Ok(Err(err)) => Action::FavoriteDidError {
                        name,
                        error: err.to_string(),
                    },
                    Err(err) => Action::FavoriteDidError {
                        name,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::CancelDetail => {
            tasks.cancel(&TaskKey::new(DETAIL_TASK));
            tasks.cancel(&TaskKey::new(DETAIL_FAVORITE_TASK));
        }
    }
}
