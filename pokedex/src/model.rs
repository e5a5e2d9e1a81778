use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Separator used when list fields are flattened into a favorite row.
pub const LIST_SEPARATOR: &str = ", ";

pub const SPRITE_BASE: &str = "https://pokeapi.co/media/sprites/pokemon";

pub const OFFLINE_DESCRIPTION: &str = "Description unavailable offline.";
pub const OFFLINE_CATEGORY: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub reference_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub reference_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub name: String,
    pub reference_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    /// Only known when the detail came from the live API.
    pub id: Option<u32>,
    pub name: String,
    pub height_decimeters: u32,
    pub weight_hectograms: u32,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
    pub sprite_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Flattened snapshot of a favorited Pokemon, keyed by `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub name: String,
    pub height_decimeters: u32,
    pub weight_hectograms: u32,
    pub types: String,
    pub abilities: String,
    pub moves: String,
}

impl FavoriteRecord {
    pub fn from_detail(detail: &PokemonDetail) -> Self {
        Self {
            name: favorite_key(&detail.name),
            height_decimeters: detail.height_decimeters,
            weight_hectograms: detail.weight_hectograms,
            types: join_list(&detail.types),
            abilities: join_list(&detail.abilities),
            moves: join_list(&detail.moves),
        }
    }

    /// Rebuilds a partial detail: placeholders for the text fields and a
    /// sprite URL derived from the name.
    pub fn to_detail(&self) -> PokemonDetail {
        PokemonDetail {
            id: None,
            name: self.name.clone(),
            height_decimeters: self.height_decimeters,
            weight_hectograms: self.weight_hectograms,
            types: split_list(&self.types),
            abilities: split_list(&self.abilities),
            moves: split_list(&self.moves),
            sprite_url: Some(derived_sprite_url(&self.name)),
            description: Some(OFFLINE_DESCRIPTION.to_string()),
            category: Some(OFFLINE_CATEGORY.to_string()),
        }
    }
}

/// Favorites are keyed by the trimmed, lowercased name.
pub fn favorite_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

pub fn join_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

/// Inverse of [`join_list`]; the empty string maps back to an empty list.
pub fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_string).collect()
}

pub fn derived_sprite_url(name: &str) -> String {
    format!("{SPRITE_BASE}/{name}.png")
}

/// The pokedexes the browser can list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionId {
    Kanto,
    Hoenn,
    Galar,
    Paldea,
    Hisui,
    OriginalJohto,
    OriginalSinnoh,
    OriginalUnova,
    KalosCentral,
    OriginalAlola,
}

impl RegionId {
    pub const ALL: [RegionId; 10] = [
        RegionId::Kanto,
        RegionId::OriginalJohto,
        RegionId::Hoenn,
        RegionId::OriginalSinnoh,
        RegionId::OriginalUnova,
        RegionId::KalosCentral,
        RegionId::OriginalAlola,
        RegionId::Galar,
        RegionId::Hisui,
        RegionId::Paldea,
    ];

    /// Pokedex identifier as used in the API path.
    pub fn pokedex(&self) -> &'static str {
        match self {
            RegionId::Kanto => "kanto",
            RegionId::Hoenn => "hoenn",
            RegionId::Galar => "galar",
            RegionId::Paldea => "paldea",
            RegionId::Hisui => "hisui",
            RegionId::OriginalJohto => "original-johto",
            RegionId::OriginalSinnoh => "original-sinnoh",
            RegionId::OriginalUnova => "original-unova",
            RegionId::KalosCentral => "kalos-central",
            RegionId::OriginalAlola => "original-alola",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionId::Kanto => "Kanto",
            RegionId::Hoenn => "Hoenn",
            RegionId::Galar => "Galar",
            RegionId::Paldea => "Paldea",
            RegionId::Hisui => "Hisui",
            RegionId::OriginalJohto => "Johto",
            RegionId::OriginalSinnoh => "Sinnoh",
            RegionId::OriginalUnova => "Unova",
            RegionId::KalosCentral => "Kalos",
            RegionId::OriginalAlola => "Alola",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pokedex())
    }
}

impl FromStr for RegionId {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        // Region-list names ("johto") resolve to their pokedex ("original-johto").
        RegionId::ALL
            .into_iter()
            .find(|id| id.pokedex() == needle || id.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| ApiError::NotFound(format!("unknown region: {value}")))
    }
}
