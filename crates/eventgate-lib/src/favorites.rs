//! Persistent favorites collection backed by SQLite.
//!
//! One table keyed by the upstream event id. Records are created and deleted,
//! never updated.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS favorites (
    id       TEXT PRIMARY KEY NOT NULL,
    name     TEXT NOT NULL,
    date     TEXT,
    time     TEXT,
    category TEXT,
    venue    TEXT,
    image    TEXT
);";

const COLUMNS: &str = "id, name, date, time, category, venue, image";

/// A saved reference to an upstream event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Favorite {
    /// Create a favorite carrying only the required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: None,
            time: None,
            category: None,
            venue: None,
            image: None,
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            category: row.get(4)?,
            venue: row.get(5)?,
            image: row.get(6)?,
        })
    }
}

/// SQLite-backed favorites collection.
///
/// The `id` column is the table's primary key, so SQLite itself guarantees at
/// most one record per id. The lookup in [`FavoritesStore::add`] only exists to
/// report the common duplicate case without relying on the constraint error.
///
/// Cloning shares the underlying connection.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    conn: Arc<Mutex<Connection>>,
}

impl FavoritesStore {
    /// Open the store described by a connection string.
    ///
    /// Accepts a filesystem path, optionally prefixed with `sqlite://` or
    /// `sqlite:`, or `:memory:` for a private in-memory database.
    pub fn open(url: &str) -> Result<Self> {
        let target = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url)
            .trim();

        if target.is_empty() {
            return Err(Error::InvalidDatabaseUrl {
                url: url.to_string(),
            });
        }

        if target == ":memory:" {
            return Self::open_in_memory();
        }

        Self::open_path(Path::new(target))
    }

    /// Open (creating if needed) a database file at `path`.
    pub fn open_path(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening favorites database");
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::StorePoisoned)
    }

    /// All stored favorites in insertion order.
    pub fn list(&self) -> Result<Vec<Favorite>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM favorites ORDER BY rowid"))?;
        let rows = stmt.query_map([], Favorite::from_row)?;
        let favorites = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(favorites)
    }

    /// Number of stored favorites.
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Persist `favorite` and return the stored record.
    ///
    /// # Errors
    ///
    /// [`Error::FavoriteExists`] when the id is already stored, whether caught
    /// by the lookup or by the primary-key constraint on insert.
    pub fn add(&self, favorite: Favorite) -> Result<Favorite> {
        let conn = self.lock()?;

        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM favorites WHERE id = ?1",
                params![favorite.id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(Error::FavoriteExists { id: favorite.id });
        }

        insert(&conn, &favorite)?;
        debug!(id = %favorite.id, "favorite stored");
        Ok(favorite)
    }

    /// Delete the favorite with `id`.
    ///
    /// # Errors
    ///
    /// [`Error::FavoriteNotFound`] when no such favorite is stored.
    pub fn remove(&self, id: &str) -> Result<()> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM favorites WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::FavoriteNotFound { id: id.to_string() });
        }
        debug!(id, "favorite removed");
        Ok(())
    }
}

/// Insert one row, reporting a primary-key collision as [`Error::FavoriteExists`].
fn insert(conn: &Connection, favorite: &Favorite) -> Result<()> {
    let inserted = conn.execute(
        &format!("INSERT INTO favorites ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
            favorite.id,
            favorite.name,
            favorite.date,
            favorite.time,
            favorite.category,
            favorite.venue,
            favorite.image,
        ],
    );

    match inserted {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Err(Error::FavoriteExists {
                id: favorite.id.clone(),
            })
        }
        Err(err) => Err(err.into()),
    }
}
