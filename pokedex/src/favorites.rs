//! Local favorites table.
//!
//! Every call runs on the blocking pool so the caller's task is never held up
//! by SQLite I/O.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;
use crate::model::FavoriteRecord;

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Insert-or-replace keyed by name.
    async fn upsert(&self, record: FavoriteRecord) -> Result<(), StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<FavoriteRecord>, StoreError>;

    /// Order is not meaningful.
    async fn list_all(&self) -> Result<Vec<FavoriteRecord>, StoreError>;

    /// Deleting an absent name is not an error.
    async fn delete_by_name(&self, name: &str) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SqliteFavorites {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFavorites {
    /// Opens (or creates) the favorites database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS favorites (
                name TEXT PRIMARY KEY NOT NULL,
                height INTEGER NOT NULL,
                weight INTEGER NOT NULL,
                types TEXT NOT NULL,
                abilities TEXT NOT NULL,
                moves TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            op(&*guard).map_err(StoreError::from)
        })
        .await?
    }
}

fn read_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<FavoriteRecord> {
    Ok(FavoriteRecord {
        name: row.get(0)?,
        height_decimeters: row.get(1)?,
        weight_hectograms: row.get(2)?,
        types: row.get(3)?,
        abilities: row.get(4)?,
        moves: row.get(5)?,
    })
}

#[async_trait]
impl FavoritesStore for SqliteFavorites {
    async fn upsert(&self, record: FavoriteRecord) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO favorites (name, height, weight, types, abilities, moves)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(name) DO UPDATE SET
                    height = excluded.height,
                    weight = excluded.weight,
                    types = excluded.types,
                    abilities = excluded.abilities,
                    moves = excluded.moves",
                params![
                    record.name,
                    record.height_decimeters,
                    record.weight_hectograms,
                    record.types,
                    record.abilities,
                    record.moves,
                ],
            )
            .map(|_| ())
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<FavoriteRecord>, StoreError> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT name, height, weight, types, abilities, moves
                 FROM favorites WHERE name = ?1",
                params![name],
                read_record,
            )
            .optional()
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name, height, weight, types, abilities, moves FROM favorites",
            )?;
            let rows = stmt.query_map([], read_record)?;
            let records = rows.collect::<Result<Vec<_>, _>>();
            records
        })
        .await
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), StoreError> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM favorites WHERE name = ?1", params![name])
                .map(|_| ())
        })
        .await
    }
}
