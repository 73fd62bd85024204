//! In-memory full-text search over live notes.
//!
//! [`SearchIndex`] is a plain value owned by the caller, typically the
//! application shell, which holds one per session. It never reads or writes
//! storage. Keep it in step with the [`crate::repository::Repository`] by hand:
//!
//! - [`SearchIndex::build_index`] after every bulk load (startup, notebook switch)
//! - [`SearchIndex::add_to_index`] after creating a note
//! - [`SearchIndex::update_in_index`] after updating one
//! - [`SearchIndex::remove_from_index`] after deleting one
//!
//! Forgetting a step leaves the index stale until the next full rebuild.
//!
//! # Usage
//!
//! ```rust,no_run
//! use notes_core::config::StoreConfig;
//! use notes_core::repository::Repository;
//! use notes_core::search::SearchIndex;
//! use notes_core::store::Store;
//!
//! # async fn run() -> notes_core::NotesResult<()> {
//! let store = Store::open(&StoreConfig::in_memory()).await?;
//! let repo = Repository::new(&store);
//!
//! let mut index = SearchIndex::new();
//! index.build_index(&repo.list_notes(None).await?);
//!
//! for hit in index.search("quarterly") {
//!     println!("{} ({:.2})", hit.title, hit.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod index;
pub mod query;
pub mod tokenize;

pub use index::SearchIndex;
pub use query::{Field, SearchHit};
