use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, DetailScreen};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.region_loading = true;
            state.type_loading = true;
            state.favorites_loading = true;
            state.message = None;
            DispatchResult::changed_with_many(vec![
                Effect::LoadRegions,
                Effect::LoadTypes,
                Effect::LoadFavorites,
            ])
        }

        Action::RegionsDidLoad(regions) => {
            state.region_loading = false;
            state.regions = regions;
            DispatchResult::changed()
        }

        Action::RegionsDidError(error) => {
            state.region_loading = false;
            state.message = Some(format!("Region error: {error}"));
            DispatchResult::changed()
        }

        Action::TypesDidLoad(types) => {
            state.type_loading = false;
            state.types = types;
            DispatchResult::changed()
        }

        Action::TypesDidError(error) => {
            state.type_loading = false;
            state.message = Some(format!("Type error: {error}"));
            DispatchResult::changed()
        }

        Action::ListOpen(source) => {
            state.list_source = Some(source.clone());
            state.list_loading = true;
            DispatchResult::changed_with(Effect::LoadList { source })
        }

        Action::ListDidLoad { source, pokemon } => {
            if !state.is_current_source(&source) {
                return DispatchResult::unchanged();
            }
            state.list_loading = false;
            state.pokemon = pokemon;
            DispatchResult::changed()
        }

        Action::ListDidError { source, error } => {
            if !state.is_current_source(&source) {
                return DispatchResult::unchanged();
            }
            state.list_loading = false;
            state.message = Some(format!("Could not load {source}: {error}"));
            DispatchResult::changed()
        }

        Action::FavoritesRefresh => {
            state.favorites_loading = true;
            DispatchResult::changed_with(Effect::LoadFavorites)
        }

        Action::FavoritesDidLoad(favorites) => {
            state.favorites_loading = false;
            state.favorites = favorites;
            DispatchResult::changed()
        }

        Action::FavoritesDidError(error) => {
            state.favorites_loading = false;
            state.message = Some(format!("Favorites error: {error}"));
            DispatchResult::changed()
        }

        Action::DetailOpen(name) => {
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return DispatchResult::unchanged();
            }
            state.detail = Some(DetailScreen::new(name.clone()));
            DispatchResult::changed_with_many(vec![
                Effect::ResolveDetail { name: name.clone() },
                Effect::CheckFavorite { name },
            ])
        }

        Action::DetailDidLoad { name, detail } => {
            let Some(screen) = state.detail.as_mut().filter(|screen| screen.name == name) else {
                return DispatchResult::unchanged();
            };
            // Opened by id: re-key the screen and ask again under the real name.
            let renamed = screen.name != detail.name;
            let recheck = renamed.then(|| detail.name.clone());
            if renamed {
                screen.name = detail.name.clone();
            }
            screen.detail = DataResource::Loaded(detail);
            match recheck {
                Some(name) => DispatchResult::changed_with(Effect::CheckFavorite { name }),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailDidError { name, error } => {
            let Some(screen) = state.detail.as_mut().filter(|screen| screen.name == name) else {
                return DispatchResult::unchanged();
            };
            screen.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::DetailClose => {
            if state.detail.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(Effect::CancelDetail)
        }

        Action::FavoriteStatusDidLoad { name, is_favorite } => {
            let Some(screen) = state.detail.as_mut().filter(|screen| screen.name == name) else {
                return DispatchResult::unchanged();
            };
            if screen.toggle_pending || screen.is_favorite == is_favorite {
                return DispatchResult::unchanged();
            }
            screen.is_favorite = is_favorite;
            DispatchResult::changed()
        }

        Action::FavoriteToggle => {
            let Some(screen) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            let Some(detail) = screen.detail.data().cloned() else {
                return DispatchResult::unchanged();
            };
            screen.is_favorite = !screen.is_favorite;
            screen.toggle_pending = true;
            DispatchResult::changed_with(Effect::ToggleFavorite { detail })
        }

        Action::FavoriteDidPersist { name, is_favorite } => {
            if let Some(screen) = state.detail.as_mut().filter(|screen| screen.name == name) {
                screen.is_favorite = is_favorite;
                screen.toggle_pending = false;
            }
            state.favorites_loading = true;
            DispatchResult::changed_with(Effect::LoadFavorites)
        }

        Action::FavoriteDidError { name, error } => {
            if let Some(screen) = state.detail.as_mut().filter(|screen| screen.name == name) {
                screen.toggle_pending = false;
            }
            state.message = Some(format!("Favorite {name} not saved: {error}"));
            DispatchResult::changed()
        }

        Action::MessageDismiss => {
            if state.message.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }
    }
}
