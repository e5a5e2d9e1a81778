use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::{PokemonDetail, PokemonSummary, PokemonType, Region, RegionId};

/// Moves kept from the source list, in source order.
pub const MAX_MOVES: usize = 10;

const NON_CANONICAL_TYPES: [&str; 3] = ["unknown", "shadow", "stellar"];

/// Read-only view of the remote Pokemon API.
#[async_trait]
pub trait PokeApi: Send + Sync {
    async fn list_regions(&self) -> Result<Vec<Region>, ApiError>;

    /// `region_id` must name one of [`RegionId::ALL`]; anything else is
    /// `NotFound` without touching the network.
    async fn list_pokemon_by_region(&self, region_id: &str)
        -> Result<Vec<PokemonSummary>, ApiError>;

    async fn list_all_pokemon(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError>;

    async fn list_types(&self) -> Result<Vec<PokemonType>, ApiError>;

    async fn list_pokemon_by_type(&self, type_name: &str)
        -> Result<Vec<PokemonSummary>, ApiError>;

    async fn get_pokemon_detail(&self, name_or_id: &str) -> Result<PokemonDetail, ApiError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexResponse {
    pokemon_entries: Vec<PokedexEntryResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexEntryResponse {
    entry_number: u32,
    pokemon_species: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    moves: Vec<PokemonMoveSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
    species: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    genera: Vec<GenusEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct GenusEntry {
    genus: String,
    language: NamedResource,
}

/// [`PokeApi`] over HTTP + JSON.
#[derive(Clone, Debug)]
pub struct HttpPokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPokeApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Setup)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| network_error(&url, source))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "unsuccessful response");
            return Err(ApiError::UnsuccessfulResponse {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| network_error(&url, source))?;
        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(%url, error = %source, "response did not match expected shape");
            ApiError::Decode { url, source }
        })
    }

    async fn fetch_species_text(&self, species: &str) -> (Option<String>, Option<String>) {
        let path = format!("pokemon-species/{}", urlencoding::encode(species));
        match self.get_json::<PokemonSpeciesResponse>(&path).await {
            Ok(response) => {
                let description = response
                    .flavor_text_entries
                    .iter()
                    .find(|entry| entry.language.name == "en")
                    .map(|entry| sanitize_text(&entry.flavor_text));
                let category = response
                    .genera
                    .iter()
                    .find(|entry| entry.language.name == "en")
                    .map(|entry| entry.genus.clone());
                (description, category)
            }
            Err(error) => {
                debug!(species, %error, "species text unavailable");
                (None, None)
            }
        }
    }
}

#[async_trait]
impl PokeApi for HttpPokeApi {
    async fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        let response: ListResponse = self.get_json("region").await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| Region {
                name: entry.name,
                reference_url: entry.url,
            })
            .collect())
    }

    async fn list_pokemon_by_region(
        &self,
        region_id: &str,
    ) -> Result<Vec<PokemonSummary>, ApiError> {
        let region: RegionId = region_id.parse()?;
        let response: PokedexResponse = self
            .get_json(&format!("pokedex/{}", region.pokedex()))
            .await?;
        let mut entries = response.pokemon_entries;
        entries.sort_by_key(|entry| entry.entry_number);
        Ok(entries
            .into_iter()
            .map(|entry| summary(entry.pokemon_species))
            .collect())
    }

    async fn list_all_pokemon(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        let response: ListResponse = self.get_json(&format!("pokemon?limit={limit}")).await?;
        Ok(response.results.into_iter().map(summary).collect())
    }

    async fn list_types(&self) -> Result<Vec<PokemonType>, ApiError> {
        let response: ListResponse = self.get_json("type?limit=100").await?;
        Ok(response
            .results
            .into_iter()
            .filter(|entry| !NON_CANONICAL_TYPES.contains(&entry.name.as_str()))
            .map(|entry| PokemonType {
                name: entry.name,
                reference_url: entry.url,
            })
            .collect())
    }

    async fn list_pokemon_by_type(
        &self,
        type_name: &str,
    ) -> Result<Vec<PokemonSummary>, ApiError> {
        let type_name = normalize_identifier(type_name);
        let response: TypeDetailResponse = self
            .get_json(&format!("type/{}", urlencoding::encode(&type_name)))
            .await?;
        Ok(response
            .pokemon
            .into_iter()
            .map(|entry| summary(entry.pokemon))
            .collect())
    }

    async fn get_pokemon_detail(&self, name_or_id: &str) -> Result<PokemonDetail, ApiError> {
        let key = normalize_identifier(name_or_id);
        let response: PokemonResponse = self
            .get_json(&format!("pokemon/{}", urlencoding::encode(&key)))
            .await?;

        let species = response
            .species
            .as_ref()
            .map(|species| species.name.clone())
            .unwrap_or_else(|| response.name.clone());
        let (description, category) = self.fetch_species_text(&species).await;

        Ok(PokemonDetail {
            id: Some(response.id),
            name: response.name,
            height_decimeters: response.height,
            weight_hectograms: response.weight,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            moves: response
                .moves
                .into_iter()
                .take(MAX_MOVES)
                .map(|slot| slot.move_info.name)
                .collect(),
            sprite_url: pointer_string(&response.sprites, "/front_default"),
            description,
            category,
        })
    }
}

fn network_error(url: &str, source: reqwest::Error) -> ApiError {
    warn!(%url, error = %source, "could not reach server");
    ApiError::Network {
        url: url.to_string(),
        source,
    }
}

fn summary(resource: NamedResource) -> PokemonSummary {
    PokemonSummary {
        name: resource.name,
        reference_url: resource.url,
    }
}

fn normalize_identifier(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

fn sanitize_text(text: &str) -> String {
    text.replace(['\n', '\u{000C}'], " ")
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
