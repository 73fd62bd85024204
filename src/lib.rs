//! # notes_core
//!
//! Local-first persistence and search for a notes application: notebooks and
//! notes kept in an on-device SQLite database, plus an in-memory full-text
//! index over the live notes.
//!
//! ## Features
//!
//! - **Versioned store**: One database, schema version 1, idempotent open
//! - **Repository**: Create, list, update and soft-delete notebooks and notes
//! - **Search index**: Prefix and substring matching over titles, plaintext and tags
//! - **Import/export**: JSON bundles and single-note Markdown
//! - **Sync seam**: A `SyncAdapter` trait whose placeholder adapters fail loudly
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notes_core::config::StoreConfig;
//! use notes_core::domain::NotePatch;
//! use notes_core::repository::Repository;
//! use notes_core::search::SearchIndex;
//! use notes_core::store::Store;
//!
//! # async fn run() -> notes_core::NotesResult<()> {
//! let store = Store::open(&StoreConfig::from_default_location()?).await?;
//! let repo = Repository::new(&store);
//!
//! let work = repo.create_notebook("Work").await?;
//! let id = repo.create_note(&work, Some("Draft")).await?;
//! repo.update_note(&id, NotePatch::plaintext("quarterly report")).await?;
//!
//! // The index is not wired to the repository; keep it in step by hand.
//! let mut index = SearchIndex::new();
//! index.build_index(&repo.list_notes(None).await?);
//!
//! let hits = index.search("quarterly");
//! assert_eq!(hits[0].id, id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`config`]**: Where the database lives
//! - **[`store`]**: Opening the database and declaring its schema
//! - **[`repository`]**: The CRUD contract over notebooks and notes
//! - **[`search`]**: The caller-owned search index
//! - **[`transfer`]**: Import and export
//! - **[`sync`]**: Remote sync trait and placeholders
//! - **[`error`]**: Unified error handling
//!
//! ## Error Handling
//!
//! Everything fallible returns [`NotesResult<T>`]. Storage errors are passed
//! through unchanged from SQLite; nothing is retried. Missing ids are not
//! errors for `get_note` (it returns `None`) or for `update_note` and
//! `delete_note` (silent no-ops).

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod search;
pub mod store;
pub mod sync;
pub mod transfer;

/// Re-exports the most commonly used types for convenience.
pub use error::{NotesError, NotesResult};
