use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("database schema version {found} is newer than supported version {supported}")]
    SchemaVersion { found: i64, supported: i64 },

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    NotImplemented(String),
}

pub type NotesResult<T> = Result<T, NotesError>;
