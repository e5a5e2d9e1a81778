#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    UnsuccessfulResponse { url: String, status: u16 },
    #[error("unexpected response shape from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

impl ApiError {
    /// The server answered, but not with data.
    pub fn is_unsuccessful_response(&self) -> bool {
        matches!(self, ApiError::UnsuccessfulResponse { .. })
    }

    /// The server could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("favorites database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("favorites directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("favorites database lock poisoned")]
    Poisoned,
    #[error("favorites task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("details unavailable for {name}")]
    NotAvailable { name: String },
}
