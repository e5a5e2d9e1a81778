use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIST_LIMIT: u32 = 1500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const APP_DIR: &str = "pokedex";
const DATABASE_FILE: &str = "favorites.db";

/// Runtime settings, fixed for the lifetime of the process.
#[derive(clap::Args, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the PokeAPI instance
    #[arg(long, default_value = API_BASE)]
    pub base_url: String,

    /// Favorites database file (defaults to the user data directory)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Page size used when listing every Pokemon
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub list_limit: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            database: None,
            list_limit: DEFAULT_LIST_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database {
            return path.clone();
        }
        dirs_next::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATABASE_FILE)
    }
}
