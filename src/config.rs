use crate::error::{NotesError, NotesResult};
use serde::{Deserialize, Serialize};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Logical name of the database; doubles as the on-disk file stem.
pub const DATABASE_NAME: &str = "notes-db-v1";

const APP_DIR: &str = "notes-core";
const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Where the note store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreLocation {
    /// A SQLite file on disk. Parent directories are created on open.
    File(PathBuf),
    /// A private in-memory database that lives as long as the pool.
    InMemory,
}

/// Settings used by [`crate::store::Store::open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub location: StoreLocation,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl StoreConfig {
    /// Store backed by the given database file.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Store that never touches the filesystem. Always uses one connection,
    /// since every SQLite memory connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            max_connections: 1,
        }
    }

    /// Store at `<data_dir>/notes-core/notes-db-v1.sqlite`.
    ///
    /// # Errors
    /// - [`NotesError::Io`] with `NotFound` if the platform has no data directory
    pub fn from_default_location() -> NotesResult<Self> {
        Ok(Self::at(Self::default_location()?))
    }

    /// Resolves the default database path under the user's data directory.
    pub fn default_location() -> NotesResult<PathBuf> {
        let data = dirs::data_dir().ok_or_else(|| {
            NotesError::Io(Error::new(ErrorKind::NotFound, "data directory not found"))
        })?;

        Ok(data.join(APP_DIR).join(format!("{DATABASE_NAME}.sqlite")))
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}
