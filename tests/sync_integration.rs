use notes_core::domain::Bundle;
use notes_core::error::NotesError;
use notes_core::sync::{PlaceholderAdapter, SyncAdapter};

#[tokio::test]
async fn placeholder_adapters_fail_every_call() {
    for adapter in [PlaceholderAdapter::supabase(), PlaceholderAdapter::git_remote()] {
        assert!(matches!(adapter.list().await, Err(NotesError::NotImplemented(_))));
        assert!(matches!(
            adapter.push(Bundle::default()).await,
            Err(NotesError::NotImplemented(_))
        ));
        assert!(matches!(adapter.pull().await, Err(NotesError::NotImplemented(_))));
        assert!(matches!(
            adapter.resolve(Vec::new()).await,
            Err(NotesError::NotImplemented(_))
        ));
    }
}

#[tokio::test]
async fn placeholder_error_names_the_adapter() {
    let adapter = PlaceholderAdapter::git_remote();
    assert_eq!(adapter.name(), "git-remote");

    match adapter.pull().await {
        Err(err) => assert_eq!(err.to_string(), "Git Remote adapter not yet implemented"),
        Ok(_) => panic!("placeholder adapter must not succeed"),
    }

    let err = PlaceholderAdapter::supabase().list().await.unwrap_err();
    assert_eq!(err.to_string(), "Supabase adapter not yet implemented");
}
