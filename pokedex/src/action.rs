use serde::{Deserialize, Serialize};

use crate::model::{FavoriteRecord, PokemonDetail, PokemonSummary, PokemonType, Region};
use crate::state::ListSource;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    RegionsDidLoad(Vec<Region>),
    RegionsDidError(String),

    TypesDidLoad(Vec<PokemonType>),
    TypesDidError(String),

    ListOpen(ListSource),
    ListDidLoad {
        source: ListSource,
        pokemon: Vec<PokemonSummary>,
    },
    ListDidError {
        source: ListSource,
        error: String,
    },

    FavoritesRefresh,
    FavoritesDidLoad(Vec<FavoriteRecord>),
    FavoritesDidError(String),

    DetailOpen(String),
    DetailDidLoad {
        name: String,
        detail: PokemonDetail,
    },
    DetailDidError {
        name: String,
        error: String,
    },
    DetailClose,

    FavoriteStatusDidLoad {
        name: String,
        is_favorite: bool,
    },
    FavoriteToggle,
    FavoriteDidPersist {
        name: String,
        is_favorite: bool,
    },
    FavoriteDidError {
        name: String,
        error: String,
    },

    MessageDismiss,
}
