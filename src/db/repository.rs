//! SQLite-backed key-value repository.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, KvEntry, NewKvEntry, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Durable string-keyed storage in a single SQLite file.
///
/// Each call opens its own connection, so an in-memory path (`":memory:"`)
/// does not keep data between calls. Use a file path.
#[derive(Debug, Clone)]
pub struct KvRepository {
    db_path: String,
}

impl KvRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!("Opening key-value store");
        let repo = Self { db_path };
        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(repo)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("cannot open '{}': {}", self.db_path, e),
            )
        })
    }

    /// Gets the value stored under `key`. Returns `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        let mut conn = self.connection()?;
        let value = schema::kv_store::table
            .find(key)
            .select(schema::kv_store::value)
            .first::<String>(&mut conn)
            .optional()?;
        debug!(found = value.is_some(), "Key looked up");
        Ok(value)
    }

    /// Writes all entries in one transaction. Either every key is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; nothing is written in that case.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub fn put_all(&self, entries: &[NewKvEntry]) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for entry in entries {
                diesel::replace_into(schema::kv_store::table)
                    .values(entry)
                    .execute(conn)?;
            }
            Ok(())
        })?;
        info!(count = entries.len(), "Entries written");
        Ok(())
    }

    /// Removes `key`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete(&self, key: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::kv_store::table.find(key)).execute(&mut conn)?;
        debug!(removed, "Key deleted");
        Ok(removed > 0)
    }

    /// Lists all entries ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entries(&self) -> Result<Vec<KvEntry>, DbError> {
        let mut conn = self.connection()?;
        let entries = schema::kv_store::table
            .select(KvEntry::as_select())
            .order(schema::kv_store::key.asc())
            .load(&mut conn)?;
        debug!(count = entries.len(), "Entries loaded");
        Ok(entries)
    }
}
