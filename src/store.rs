//! The on-device database.
//!
//! [`Store`] owns the SQLite pool and guarantees the schema in [`schema`]
//! exists before anyone touches it. It carries no note logic; see
//! [`crate::repository`] for that.

pub mod schema;

use crate::config::{StoreConfig, StoreLocation};
use crate::error::{NotesError, NotesResult};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub use schema::SCHEMA_VERSION;

#[derive(Clone)]
pub struct Store {
    pub(crate) pool: SqlitePool,
}

impl Store {
    /// Opens (creating if needed) the database described by `config` and
    /// brings it to [`SCHEMA_VERSION`].
    ///
    /// Opening the same database repeatedly is safe: schema statements are
    /// idempotent and existing rows are never rewritten.
    ///
    /// # Errors
    /// - [`NotesError::SchemaVersion`] if the file was written by a newer schema
    /// - [`NotesError::Db`] if SQLite cannot open or initialise the file
    /// - [`NotesError::Io`] if the parent directory cannot be created
    pub async fn open(config: &StoreConfig) -> NotesResult<Self> {
        let (options, pool_options) = match &config.location {
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                let pool_options =
                    SqlitePoolOptions::new().max_connections(config.max_connections.max(1));
                (options, pool_options)
            }
            StoreLocation::InMemory => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
                // Dropping the only connection would drop the database with it.
                let pool_options = SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                (options, pool_options)
            }
        };

        let pool = pool_options.connect_with(options.foreign_keys(true)).await?;
        let store = Store { pool };
        store.migrate().await?;

        tracing::debug!(location = ?config.location, version = SCHEMA_VERSION, "note store opened");
        Ok(store)
    }

    /// Version recorded in the database header.
    pub async fn schema_version(&self) -> NotesResult<i64> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for in-flight queries and closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn migrate(&self) -> NotesResult<()> {
        let found = self.schema_version().await?;
        if found > SCHEMA_VERSION {
            return Err(NotesError::SchemaVersion {
                found,
                supported: SCHEMA_VERSION,
            });
        }

        let mut tx = self.pool.begin().await?;
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        if found < SCHEMA_VERSION {
            // PRAGMA does not accept bound parameters.
            sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .execute(&mut *tx)
                .await?;
            tracing::info!(from = found, to = SCHEMA_VERSION, "note store schema upgraded");
        }
        tx.commit().await?;

        Ok(())
    }
}
