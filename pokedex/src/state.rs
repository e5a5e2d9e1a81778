//! View-model state - what a list or detail screen renders

use std::fmt;

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::model::{FavoriteRecord, PokemonDetail, PokemonSummary, PokemonType, Region, RegionId};

/// Where the current Pokemon list came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListSource {
    Region(RegionId),
    All,
    Type(String),
}

impl fmt::Display for ListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListSource::Region(region) => write!(f, "region {}", region.label()),
            ListSource::All => f.write_str("all Pokemon"),
            ListSource::Type(name) => write!(f, "type {name}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DetailScreen {
    pub name: String,
    /// Starts Loading; ends Loaded, or Failed when details are unavailable
    pub detail: DataResource<PokemonDetail>,
    pub is_favorite: bool,
    /// Set by a toggle until its write is confirmed; status reads are ignored meanwhile.
    pub toggle_pending: bool,
}

impl DetailScreen {
    pub fn new(name: String) -> Self {
        Self {
            name,
            detail: DataResource::Loading,
            is_favorite: false,
            toggle_pending: false,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.detail.is_failed()
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub regions: Vec<Region>,
    pub types: Vec<PokemonType>,
    pub pokemon: Vec<PokemonSummary>,
    pub list_source: Option<ListSource>,
    pub favorites: Vec<FavoriteRecord>,
    pub detail: Option<DetailScreen>,

    pub region_loading: bool,
    pub type_loading: bool,
    pub list_loading: bool,
    pub favorites_loading: bool,
    /// Transient notification; list failures land here instead of an error screen.
    pub message: Option<String>,
}

impl AppState {
    pub fn current_detail(&self) -> Option<&PokemonDetail> {
        self.detail.as_ref().and_then(|screen| screen.detail.data())
    }

    pub fn is_detail_for(&self, name: &str) -> bool {
        self.detail
            .as_ref()
            .is_some_and(|screen| screen.name == name)
    }

    pub fn is_current_source(&self, source: &ListSource) -> bool {
        self.list_source.as_ref() == Some(source)
    }

    pub fn is_loading(&self) -> bool {
        self.region_loading
            || self.type_loading
            || self.list_loading
            || self.favorites_loading
            || self
                .detail
                .as_ref()
                .is_some_and(|screen| screen.detail.is_loading())
    }
}
