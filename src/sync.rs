//! Remote synchronisation seam.
//!
//! No real adapter exists yet. [`PlaceholderAdapter`] stands in for the
//! planned backends and fails every call with
//! [`NotesError::NotImplemented`], so a caller wired to it finds out
//! immediately instead of silently syncing nothing.

use crate::domain::Bundle;
use crate::error::{NotesError, NotesResult};
use serde_json::Value;
use std::future::Future;

/// A remote store that notebooks and notes can be mirrored to.
pub trait SyncAdapter {
    fn name(&self) -> &str;

    /// Everything currently held remotely.
    fn list(&self) -> impl Future<Output = NotesResult<Bundle>> + Send;

    /// Uploads local records.
    fn push(&self, data: Bundle) -> impl Future<Output = NotesResult<()>> + Send;

    /// Downloads remote records.
    fn pull(&self) -> impl Future<Output = NotesResult<Bundle>> + Send;

    /// Settles conflicting records reported by a previous push or pull.
    fn resolve(&self, conflicts: Vec<Value>) -> impl Future<Output = NotesResult<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderAdapter {
    name: &'static str,
    label: &'static str,
}

impl PlaceholderAdapter {
    pub fn supabase() -> Self {
        Self {
            name: "supabase",
            label: "Supabase",
        }
    }

    pub fn git_remote() -> Self {
        Self {
            name: "git-remote",
            label: "Git Remote",
        }
    }

    fn unimplemented<T>(&self, op: &str) -> NotesResult<T> {
        tracing::warn!(adapter = self.name, op, "sync adapter called but not implemented");
        Err(NotesError::NotImplemented(format!(
            "{} adapter not yet implemented",
            self.label
        )))
    }
}

impl SyncAdapter for PlaceholderAdapter {
    fn name(&self) -> &str {
        self.name
    }

    async fn list(&self) -> NotesResult<Bundle> {
        self.unimplemented("list")
    }

    async fn push(&self, _data: Bundle) -> NotesResult<()> {
        self.unimplemented("push")
    }

    async fn pull(&self) -> NotesResult<Bundle> {
        self.unimplemented("pull")
    }

    async fn resolve(&self, _conflicts: Vec<Value>) -> NotesResult<()> {
        self.unimplemented("resolve")
    }
}
