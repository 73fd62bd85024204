use notes_core::config::StoreConfig;
use notes_core::domain::NotePatch;
use notes_core::error::NotesError;
use notes_core::repository::Repository;
use notes_core::search::SearchIndex;
use notes_core::store::Store;

async fn open_repo() -> Result<Repository, NotesError> {
    let store = Store::open(&StoreConfig::in_memory()).await?;
    Ok(Repository::new(&store))
}

fn hit_ids(index: &SearchIndex, query: &str) -> Vec<String> {
    index.search(query).into_iter().map(|hit| hit.id).collect()
}

#[tokio::test]
async fn built_index_finds_note_by_plaintext() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("Work").await?;
    let id = repo.create_note(&nb, None).await?;
    repo.update_note(&id, NotePatch::plaintext("quarterly report")).await?;

    let note = repo.get_note(&id).await?.unwrap();
    let mut index = SearchIndex::new();
    index.build_index(&[note]);

    let hits = index.search("quarterly");
    assert!(hits.iter().any(|hit| hit.id == id));
    assert_eq!(hits[0].title, "Untitled");

    Ok(())
}

fn assert_every_substring_found(index: &SearchIndex, id: &str, text: &str) {
    let chars: Vec<char> = text.chars().collect();
    for start in 0..chars.len() {
        for end in start + 1..=chars.len() {
            let needle: String = chars[start..end].iter().collect();
            if needle.trim().is_empty() {
                continue;
            }
            assert!(
                hit_ids(index, &needle).iter().any(|hit| hit == id),
                "query {needle:?} missed the note"
            );
        }
    }
}

#[tokio::test]
async fn every_substring_of_title_and_body_is_found() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("nb").await?;
    let id = repo.create_note(&nb, Some("Budget Planning 2024")).await?;
    repo.update_note(&id, NotePatch::plaintext("Review the Q3 numbers, then ship."))
        .await?;
    let greek = repo.create_note(&nb, Some("ΣΑΣΑ")).await?;
    repo.update_note(&greek, NotePatch::plaintext("ΟΔΟΣΟΣ ΣΟΦΙΑΣ")).await?;
    let other = repo.create_note(&nb, Some("Groceries")).await?;
    repo.update_note(&other, NotePatch::plaintext("milk and eggs")).await?;

    let mut index = SearchIndex::new();
    index.build_index(&repo.list_notes(None).await?);

    for note_id in [&id, &greek] {
        let note = repo.get_note(note_id).await?.unwrap();
        assert_every_substring_found(&index, note_id, &note.title);
        assert_every_substring_found(&index, note_id, &note.plaintext);
    }

    assert!(hit_ids(&index, "ΣΑΣ").contains(&greek));
    assert!(hit_ids(&index, "ΟΔΟΣ").contains(&greek));

    Ok(())
}

#[tokio::test]
async fn double_update_leaves_single_entry() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("nb").await?;
    let id = repo.create_note(&nb, Some("Meeting notes")).await?;

    let mut index = SearchIndex::new();
    index.build_index(&repo.list_notes(None).await?);

    let note = repo.get_note(&id).await?.unwrap();
    index.update_in_index(&note);
    index.update_in_index(&note);

    assert_eq!(index.len(), 1);
    assert_eq!(hit_ids(&index, "meeting"), vec![id]);

    Ok(())
}

#[tokio::test]
async fn manual_sync_follows_repository_mutations() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("nb").await?;

    let mut index = SearchIndex::new();
    index.build_index(&repo.list_notes(None).await?);
    assert!(index.is_empty());

    let id = repo.create_note(&nb, Some("Travel plans")).await?;
    index.add_to_index(&repo.get_note(&id).await?.unwrap());
    assert_eq!(hit_ids(&index, "travel"), vec![id.clone()]);

    repo.update_note(&id, NotePatch::title("Vacation")).await?;
    index.update_in_index(&repo.get_note(&id).await?.unwrap());
    assert!(hit_ids(&index, "travel").is_empty());
    assert_eq!(hit_ids(&index, "vacation"), vec![id.clone()]);

    repo.delete_note(&id).await?;
    index.remove_from_index(&id);
    assert!(hit_ids(&index, "vacation").is_empty());
    assert!(!index.contains(&id));

    Ok(())
}

#[tokio::test]
async fn rebuild_clears_stale_entries() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("nb").await?;
    let id = repo.create_note(&nb, Some("Forgotten")).await?;

    let mut index = SearchIndex::new();
    index.build_index(&repo.list_notes(None).await?);

    // Deleted without patching the index: stale until the next rebuild.
    repo.delete_note(&id).await?;
    assert_eq!(hit_ids(&index, "forgotten"), vec![id.clone()]);

    index.build_index(&repo.list_notes(None).await?);
    assert!(hit_ids(&index, "forgotten").is_empty());
    assert!(index.is_empty());

    Ok(())
}

#[tokio::test]
async fn tombstone_passed_to_build_is_not_indexed() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("nb").await?;
    let id = repo.create_note(&nb, Some("Archived")).await?;
    repo.delete_note(&id).await?;

    let tombstone = repo.get_note(&id).await?.unwrap();
    let mut index = SearchIndex::new();
    index.build_index(&[tombstone]);

    assert!(index.search("archived").is_empty());
    Ok(())
}

#[tokio::test]
async fn search_before_build_is_empty() -> Result<(), NotesError> {
    let repo = open_repo().await?;
    let nb = repo.create_notebook("nb").await?;
    let id = repo.create_note(&nb, Some("Early")).await?;

    let mut index = SearchIndex::new();
    index.add_to_index(&repo.get_note(&id).await?.unwrap());

    assert!(index.search("early").is_empty());
    assert!(index.search("").is_empty());
    Ok(())
}
