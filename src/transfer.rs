//! JSON and Markdown import/export.
//!
//! These sit on top of the [`Repository`] and do not update any search index;
//! rebuild it after an import.

use crate::domain::{Bundle, DEFAULT_TITLE, Note, NoteId, new_id, now_millis};
use crate::error::{NotesError, NotesResult};
use crate::repository::Repository;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serializes every notebook and note, tombstones included, as pretty JSON
/// of the form `{ "notes": [...], "notebooks": [...] }`.
pub async fn export_json(repo: &Repository) -> NotesResult<String> {
    let bundle = Bundle {
        notes: repo.all_notes().await?,
        notebooks: repo.all_notebooks().await?,
    };

    tracing::debug!(
        notes = bundle.notes.len(),
        notebooks = bundle.notebooks.len(),
        "exported json"
    );
    Ok(serde_json::to_string_pretty(&bundle)?)
}

/// Bulk-inserts the notebooks and then the notes found in `json`.
///
/// Records keep their ids and timestamps. There is no conflict resolution:
/// an id already present in the store fails that batch with the storage
/// error. Notebooks are committed before notes are attempted.
pub async fn import_json(repo: &Repository, json: &str) -> NotesResult<()> {
    let bundle: Bundle = serde_json::from_str(json)?;

    if !bundle.notebooks.is_empty() {
        repo.insert_notebooks(&bundle.notebooks).await?;
    }
    if !bundle.notes.is_empty() {
        repo.insert_notes(&bundle.notes).await?;
    }

    tracing::info!(
        notes = bundle.notes.len(),
        notebooks = bundle.notebooks.len(),
        "imported json"
    );
    Ok(())
}

/// Renders a note as `# <title>`, a blank line, then its plaintext.
///
/// # Errors
/// - [`NotesError::NoteNotFound`] if no note has this id
pub async fn export_markdown(repo: &Repository, note_id: &str) -> NotesResult<String> {
    let note = repo
        .get_note(note_id)
        .await?
        .ok_or_else(|| NotesError::NoteNotFound(note_id.to_string()))?;

    Ok(render_markdown(&note))
}

pub fn render_markdown(note: &Note) -> String {
    format!("# {}\n\n{}", note.title, note.plaintext)
}

/// Creates a note from Markdown text and returns its id.
///
/// The first line, minus a leading `#` and whitespace, becomes the title
/// (falling back to [`DEFAULT_TITLE`]); the remaining lines, trimmed, become
/// the plaintext. Structured content starts empty.
pub async fn import_markdown(
    repo: &Repository,
    markdown: &str,
    notebook_id: &str,
) -> NotesResult<NoteId> {
    let (title, plaintext) = parse_markdown(markdown);
    let now = now_millis();

    let note = Note {
        id: new_id(),
        notebook_id: notebook_id.to_string(),
        title,
        plaintext,
        content: Note::empty_content(),
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
        deleted: false,
    };
    repo.insert_notes(std::slice::from_ref(&note)).await?;

    tracing::debug!(note_id = %note.id, notebook_id, "imported markdown");
    Ok(note.id)
}

/// Splits Markdown into `(title, plaintext)`.
pub fn parse_markdown(markdown: &str) -> (String, String) {
    let (first, rest) = markdown.split_once('\n').unwrap_or((markdown, ""));

    let heading = match first.strip_prefix('#') {
        Some(heading) => heading.trim_start(),
        None => first,
    };
    let title = if heading.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        heading.to_string()
    };

    (title, rest.trim().to_string())
}

/// Writes an export to `path` atomically: a temp file in the same directory
/// is filled and then renamed over the target, so a crash never leaves a
/// half-written export behind.
pub fn write_export(path: &Path, data: &str) -> NotesResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data.as_bytes())?;
    tmp.persist(path).map_err(|e| NotesError::Io(e.error))?;

    Ok(())
}
