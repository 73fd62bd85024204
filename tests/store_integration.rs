use notes_core::config::StoreConfig;
use notes_core::domain::{Attachment, Revision};
use notes_core::error::NotesError;
use notes_core::repository::Repository;
use notes_core::store::{SCHEMA_VERSION, Store};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn fresh_store_records_schema_version() -> Result<(), NotesError> {
    let store = Store::open(&StoreConfig::in_memory()).await?;
    assert_eq!(store.schema_version().await?, SCHEMA_VERSION);
    Ok(())
}

#[tokio::test]
async fn file_store_creates_missing_directories() -> Result<(), NotesError> {
    let tmpdir = TempDir::new()?;
    let db_path = tmpdir.path().join("nested/dir/notes.sqlite");

    let store = Store::open(&StoreConfig::at(&db_path)).await?;
    store.close().await;

    assert!(db_path.exists());
    Ok(())
}

#[tokio::test]
async fn reopening_keeps_existing_data() -> Result<(), NotesError> {
    let tmpdir = TempDir::new()?;
    let config = StoreConfig::at(tmpdir.path().join("notes.sqlite"));

    let store = Store::open(&config).await?;
    let repo = Repository::new(&store);
    let nb = repo.create_notebook("Persistent").await?;
    let id = repo.create_note(&nb, Some("Survives")).await?;
    store.close().await;

    for _ in 0..2 {
        let store = Store::open(&config).await?;
        let repo = Repository::new(&store);

        let notebooks = repo.list_notebooks().await?;
        assert_eq!(notebooks.len(), 1);
        assert_eq!(notebooks[0].id, nb);

        let notes = repo.list_notes(None).await?;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, id);
        assert_eq!(notes[0].title, "Survives");

        assert_eq!(store.schema_version().await?, SCHEMA_VERSION);
        store.close().await;
    }

    Ok(())
}

#[tokio::test]
async fn newer_schema_is_rejected() -> Result<(), NotesError> {
    let tmpdir = TempDir::new()?;
    let config = StoreConfig::at(tmpdir.path().join("notes.sqlite"));

    let store = Store::open(&config).await?;
    sqlx::query("PRAGMA user_version = 7")
        .execute(store.pool())
        .await?;
    store.close().await;

    match Store::open(&config).await {
        Err(NotesError::SchemaVersion { found, supported }) => {
            assert_eq!(found, 7);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("store with newer schema should not open"),
    }

    Ok(())
}

#[tokio::test]
async fn in_memory_stores_are_isolated() -> Result<(), NotesError> {
    let first = Repository::new(&Store::open(&StoreConfig::in_memory()).await?);
    let second = Repository::new(&Store::open(&StoreConfig::in_memory()).await?);

    first.create_notebook("only here").await?;

    assert_eq!(first.list_notebooks().await?.len(), 1);
    assert!(second.list_notebooks().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn reserved_tables_match_record_shapes() -> Result<(), NotesError> {
    let store = Store::open(&StoreConfig::in_memory()).await?;

    sqlx::query("INSERT INTO revisions (id, note_id, at, snapshot) VALUES (?, ?, ?, ?)")
        .bind("r1")
        .bind("n1")
        .bind(42_i64)
        .bind(r#"{"title":"old"}"#)
        .execute(store.pool())
        .await?;

    let revision = sqlx::query_as::<_, Revision>(
        "SELECT id, note_id, at, snapshot FROM revisions WHERE note_id = ?",
    )
    .bind("n1")
    .fetch_one(store.pool())
    .await?;
    assert_eq!(revision.at, 42);
    assert_eq!(revision.snapshot, json!({ "title": "old" }));

    sqlx::query(
        "INSERT INTO attachments (id, note_id, name, mime, size, data) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind("a1")
    .bind("n1")
    .bind("photo.png")
    .bind("image/png")
    .bind(3_i64)
    .bind(vec![1_u8, 2, 3])
    .execute(store.pool())
    .await?;

    let attachment = sqlx::query_as::<_, Attachment>(
        "SELECT id, note_id, name, mime, size, data FROM attachments WHERE name = ?",
    )
    .bind("photo.png")
    .fetch_one(store.pool())
    .await?;
    assert_eq!(attachment.size, 3);
    assert_eq!(attachment.data, vec![1, 2, 3]);

    Ok(())
}
