//! Table and index declarations for schema version 1.
//!
//! Every statement is `IF NOT EXISTS`, so replaying the list against an
//! already initialised database is a no-op. Future versions may only append
//! statements here; existing rows must stay readable.

pub const SCHEMA_VERSION: i64 = 1;

pub const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS notebooks (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS notebooks_name ON notebooks(name)",
    "CREATE INDEX IF NOT EXISTS notebooks_created_at ON notebooks(created_at)",
    // notebook_id is deliberately not a foreign key: orphaned notes are allowed.
    "CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY NOT NULL,
        notebook_id TEXT NOT NULL CHECK (notebook_id <> ''),
        title TEXT NOT NULL,
        plaintext TEXT NOT NULL DEFAULT '',
        content TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        deleted INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE INDEX IF NOT EXISTS notes_notebook_id ON notes(notebook_id)",
    "CREATE INDEX IF NOT EXISTS notes_updated_at ON notes(updated_at)",
    "CREATE INDEX IF NOT EXISTS notes_created_at ON notes(created_at)",
    "CREATE INDEX IF NOT EXISTS notes_title ON notes(title)",
    "CREATE INDEX IF NOT EXISTS notes_plaintext ON notes(plaintext)",
    "CREATE TABLE IF NOT EXISTS note_tags (
        note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
        tag TEXT NOT NULL,
        position INTEGER NOT NULL,
        PRIMARY KEY (note_id, tag)
    )",
    "CREATE INDEX IF NOT EXISTS note_tags_tag ON note_tags(tag)",
    "CREATE TABLE IF NOT EXISTS revisions (
        id TEXT PRIMARY KEY NOT NULL,
        note_id TEXT NOT NULL,
        at INTEGER NOT NULL,
        snapshot TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS revisions_note_id ON revisions(note_id)",
    "CREATE INDEX IF NOT EXISTS revisions_at ON revisions(at)",
    "CREATE TABLE IF NOT EXISTS attachments (
        id TEXT PRIMARY KEY NOT NULL,
        note_id TEXT NOT NULL,
        name TEXT NOT NULL,
        mime TEXT NOT NULL,
        size INTEGER NOT NULL,
        data BLOB NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS attachments_note_id ON attachments(note_id)",
    "CREATE INDEX IF NOT EXISTS attachments_name ON attachments(name)",
    "CREATE INDEX IF NOT EXISTS attachments_size ON attachments(size)",
];
