use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub type NotebookId = String;
pub type NoteId = String;

/// Title given to notes created without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh globally unique identifier for a notebook or note.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A named grouping of notes. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    pub created_at: i64,
}

/// A single document.
///
/// `content` is the structured rich-text body and is stored verbatim; nothing
/// in this crate looks inside it. `plaintext` is its flattened projection and
/// is what search and previews read. A note with `deleted` set is a
/// tombstone: listings skip it, direct lookups still return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub notebook_id: NotebookId,
    pub title: String,
    pub plaintext: String,
    #[sqlx(json)]
    pub content: Value,
    #[sqlx(skip)]
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Note {
    /// The body given to freshly created notes: a document with no children.
    pub fn empty_content() -> Value {
        json!({ "type": "doc", "content": [] })
    }

    /// Applies every field present in `patch`. Timestamps are left alone;
    /// the repository assigns `updated_at` itself.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(notebook_id) = patch.notebook_id {
            self.notebook_id = notebook_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(plaintext) = patch.plaintext {
            self.plaintext = plaintext;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        if let Some(deleted) = patch.deleted {
            self.deleted = deleted;
        }
    }
}

/// Partial update for [`Note`]. `updated_at` is accepted so callers can
/// round-trip a whole record, but it is always overwritten on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    pub notebook_id: Option<NotebookId>,
    pub title: Option<String>,
    pub plaintext: Option<String>,
    pub content: Option<Value>,
    pub tags: Option<Vec<String>>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub deleted: Option<bool>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn plaintext(plaintext: impl Into<String>) -> Self {
        Self {
            plaintext: Some(plaintext.into()),
            ..Default::default()
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}

/// Tags behave as a set: duplicates collapse, first occurrence wins.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// A point-in-time copy of a note body. The table is declared but nothing
/// writes to it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub note_id: NoteId,
    pub at: i64,
    #[sqlx(json)]
    pub snapshot: Value,
}

/// Binary payload attached to a note. Declared, unused by the CRUD flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub note_id: NoteId,
    pub name: String,
    pub mime: String,
    pub size: i64,
    pub data: Vec<u8>,
}

/// Every notebook and note, as written by JSON export and exchanged with
/// sync adapters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bundle {
    pub notes: Vec<Note>,
    pub notebooks: Vec<Notebook>,
}
