//! CRUD boundary over persisted notebooks and notes.
//!
//! The repository never touches a [`crate::search::SearchIndex`]. After every
//! successful mutation the caller is expected to patch the index itself
//! (`add_to_index`, `update_in_index`, `remove_from_index`) and to rebuild it
//! after any bulk load. Two calls issued concurrently are not ordered with
//! respect to each other; await the first if order matters.

use crate::domain::{
    DEFAULT_TITLE, Note, NoteId, NotePatch, Notebook, NotebookId, new_id, normalize_tags,
    now_millis,
};
use crate::error::NotesResult;
use crate::store::Store;
use sqlx::types::Json;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

const NOTE_COLUMNS: &str =
    "id, notebook_id, title, plaintext, content, created_at, updated_at, deleted";

/// Handle for reading and writing notebooks and notes. Cheap to clone.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(store: &Store) -> Self {
        Self {
            pool: store.pool.clone(),
        }
    }

    /// Creates a notebook and returns its id. Names need not be unique.
    pub async fn create_notebook(&self, name: &str) -> NotesResult<NotebookId> {
        let notebook = Notebook {
            id: new_id(),
            name: name.to_string(),
            created_at: now_millis(),
        };

        let mut conn = self.pool.acquire().await?;
        insert_notebook(&mut conn, &notebook).await?;

        tracing::debug!(notebook_id = %notebook.id, "notebook created");
        Ok(notebook.id)
    }

    /// All notebooks, most recently created first.
    pub async fn list_notebooks(&self) -> NotesResult<Vec<Notebook>> {
        let notebooks = sqlx::query_as::<_, Notebook>(
            "SELECT id, name, created_at FROM notebooks ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(notebooks)
    }

    /// Creates an empty note and returns its id.
    ///
    /// `title` defaults to [`DEFAULT_TITLE`]. The notebook id is not checked
    /// against existing notebooks; a note may reference a notebook that does
    /// not exist.
    pub async fn create_note(
        &self,
        notebook_id: &str,
        title: Option<&str>,
    ) -> NotesResult<NoteId> {
        let now = now_millis();
        let note = Note {
            id: new_id(),
            notebook_id: notebook_id.to_string(),
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            plaintext: String::new(),
            content: Note::empty_content(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted: false,
        };

        let mut tx = self.pool.begin().await?;
        insert_note(&mut tx, &note).await?;
        tx.commit().await?;

        tracing::debug!(note_id = %note.id, notebook_id, "note created");
        Ok(note.id)
    }

    /// Merges `patch` into the stored note and stamps `updated_at`.
    ///
    /// Any `updated_at` in the patch is ignored. The new stamp never moves
    /// backwards and never precedes `created_at`. A missing id is a silent
    /// no-op; re-fetch with [`Repository::get_note`] if existence matters.
    pub async fn update_note(&self, id: &str, patch: NotePatch) -> NotesResult<()> {
        let mut tx = self.pool.begin().await?;

        let Some(mut note) = fetch_note(&mut tx, id).await? else {
            tracing::debug!(note_id = id, "update skipped, note does not exist");
            return Ok(());
        };

        let tags_changed = patch.tags.is_some();
        note.apply(patch);
        note.updated_at = now_millis().max(note.updated_at).max(note.created_at);

        sqlx::query(
            "UPDATE notes SET notebook_id = ?, title = ?, plaintext = ?, content = ?,
                created_at = ?, updated_at = ?, deleted = ?
             WHERE id = ?",
        )
        .bind(&note.notebook_id)
        .bind(&note.title)
        .bind(&note.plaintext)
        .bind(Json(&note.content))
        .bind(note.created_at)
        .bind(note.updated_at)
        .bind(note.deleted)
        .bind(&note.id)
        .execute(&mut *tx)
        .await?;

        if tags_changed {
            replace_tags(&mut tx, &note.id, &note.tags).await?;
        }

        tx.commit().await?;

        tracing::debug!(note_id = id, updated_at = note.updated_at, "note updated");
        Ok(())
    }

    /// Direct lookup by id. Tombstoned notes are returned too.
    pub async fn get_note(&self, id: &str) -> NotesResult<Option<Note>> {
        let mut conn = self.pool.acquire().await?;
        fetch_note(&mut conn, id).await
    }

    /// Marks a note deleted and stamps `updated_at`. The row stays in
    /// storage as a tombstone. A missing id is a silent no-op.
    pub async fn delete_note(&self, id: &str) -> NotesResult<()> {
        let res = sqlx::query(
            "UPDATE notes SET deleted = 1, updated_at = max(?, updated_at) WHERE id = ?",
        )
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::debug!(note_id = id, found = res.rows_affected() > 0, "note deleted");
        Ok(())
    }

    /// Live notes, most recently modified first, optionally restricted to
    /// one notebook.
    pub async fn list_notes(&self, notebook_id: Option<&str>) -> NotesResult<Vec<Note>> {
        let scope = match notebook_id {
            Some(notebook_id) => NoteScope::LiveIn(notebook_id),
            None => NoteScope::Live,
        };
        self.load_notes(scope, "n.updated_at DESC, n.rowid DESC").await
    }

    /// Every notebook in insertion order, for export.
    pub async fn all_notebooks(&self) -> NotesResult<Vec<Notebook>> {
        let notebooks = sqlx::query_as::<_, Notebook>(
            "SELECT id, name, created_at FROM notebooks ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(notebooks)
    }

    /// Every note including tombstones, in insertion order, for export.
    pub async fn all_notes(&self) -> NotesResult<Vec<Note>> {
        self.load_notes(NoteScope::All, "n.rowid").await
    }

    async fn load_notes(&self, scope: NoteScope<'_>, order_by: &str) -> NotesResult<Vec<Note>> {
        let mut conn = self.pool.acquire().await?;
        let filter = scope.filter();

        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes n WHERE {filter} ORDER BY {order_by}");
        let mut query = sqlx::query_as::<_, Note>(&sql);
        if let Some(notebook_id) = scope.notebook_id() {
            query = query.bind(notebook_id);
        }
        let mut notes = query.fetch_all(&mut *conn).await?;

        if !notes.is_empty() {
            attach_tags(&mut conn, &mut notes, &scope).await?;
        }
        Ok(notes)
    }

    /// Inserts notebooks verbatim in one transaction. An id that already
    /// exists fails the whole batch with the storage error.
    pub async fn insert_notebooks(&self, notebooks: &[Notebook]) -> NotesResult<()> {
        let mut tx = self.pool.begin().await?;
        for notebook in notebooks {
            insert_notebook(&mut tx, notebook).await?;
        }
        tx.commit().await?;

        tracing::debug!(count = notebooks.len(), "notebooks inserted");
        Ok(())
    }

    /// Inserts notes in one transaction, timestamps included. An `updated_at`
    /// earlier than `created_at` is raised to `created_at`; everything else is
    /// stored verbatim. An id that already exists fails the whole batch with
    /// the storage error.
    pub async fn insert_notes(&self, notes: &[Note]) -> NotesResult<()> {
        let mut tx = self.pool.begin().await?;
        for note in notes {
            insert_note(&mut tx, note).await?;
        }
        tx.commit().await?;

        tracing::debug!(count = notes.len(), "notes inserted");
        Ok(())
    }

    /// Physically removes tombstones last touched before `older_than`
    /// (milliseconds since epoch). Returns how many notes were dropped.
    ///
    /// Tombstones otherwise accumulate forever; nothing calls this
    /// implicitly.
    pub async fn purge_deleted_notes(&self, older_than: i64) -> NotesResult<u64> {
        let res = sqlx::query("DELETE FROM notes WHERE deleted = 1 AND updated_at < ?")
            .bind(older_than)
            .execute(&self.pool)
            .await?;

        let purged = res.rows_affected();
        tracing::info!(purged, older_than, "tombstones purged");
        Ok(purged)
    }
}

async fn insert_notebook(conn: &mut SqliteConnection, notebook: &Notebook) -> NotesResult<()> {
    sqlx::query("INSERT INTO notebooks (id, name, created_at) VALUES (?, ?, ?)")
        .bind(&notebook.id)
        .bind(&notebook.name)
        .bind(notebook.created_at)
        .execute(conn)
        .await?;

    Ok(())
}

async fn insert_note(conn: &mut SqliteConnection, note: &Note) -> NotesResult<()> {
    sqlx::query(
        "INSERT INTO notes (id, notebook_id, title, plaintext, content, created_at, updated_at, deleted)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&note.id)
    .bind(&note.notebook_id)
    .bind(&note.title)
    .bind(&note.plaintext)
    .bind(Json(&note.content))
    .bind(note.created_at)
    .bind(note.updated_at.max(note.created_at))
    .bind(note.deleted)
    .execute(&mut *conn)
    .await?;

    replace_tags(conn, &note.id, &note.tags).await
}

async fn fetch_note(conn: &mut SqliteConnection, id: &str) -> NotesResult<Option<Note>> {
    let note = sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(mut note) = note else {
        return Ok(None);
    };

    note.tags = sqlx::query_scalar::<_, String>("SELECT tag FROM note_tags WHERE note_id = ? ORDER BY position")
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(Some(note))
}

async fn replace_tags(conn: &mut SqliteConnection, note_id: &str, tags: &[String]) -> NotesResult<()> {
    sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
        .bind(note_id)
        .execute(&mut *conn)
        .await?;

    for (position, tag) in normalize_tags(tags.to_vec()).iter().enumerate() {
        sqlx::query("INSERT INTO note_tags (note_id, tag, position) VALUES (?, ?, ?)")
            .bind(note_id)
            .bind(tag)
            .bind(position as i64)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Which notes a bulk read covers. The same filter drives the note query and
/// the tag query, so tags are only read for the notes being returned.
enum NoteScope<'a> {
    Live,
    LiveIn(&'a str),
    All,
}

impl NoteScope<'_> {
    fn filter(&self) -> &'static str {
        match self {
            NoteScope::Live => "n.deleted = 0",
            NoteScope::LiveIn(_) => "n.deleted = 0 AND n.notebook_id = ?",
            NoteScope::All => "1 = 1",
        }
    }

    fn notebook_id(&self) -> Option<&str> {
        match self {
            NoteScope::LiveIn(notebook_id) => Some(*notebook_id),
            _ => None,
        }
    }
}

/// Fills `tags` for the notes covered by `scope` in one query.
async fn attach_tags(
    conn: &mut SqliteConnection,
    notes: &mut [Note],
    scope: &NoteScope<'_>,
) -> NotesResult<()> {
    let sql = format!(
        "SELECT t.note_id, t.tag FROM note_tags t
         JOIN notes n ON n.id = t.note_id
         WHERE {}
         ORDER BY t.note_id, t.position",
        scope.filter()
    );
    let mut query = sqlx::query_as::<Sqlite, (String, String)>(&sql);
    if let Some(notebook_id) = scope.notebook_id() {
        query = query.bind(notebook_id);
    }
    let rows = query.fetch_all(&mut *conn).await?;

    let mut by_note: HashMap<String, Vec<String>> = HashMap::new();
    for (note_id, tag) in rows {
        by_note.entry(note_id).or_default().push(tag);
    }

    for note in notes.iter_mut() {
        if let Some(tags) = by_note.remove(&note.id) {
            note.tags = tags;
        }
    }

    Ok(())
}
