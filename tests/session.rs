// Full session through the library API: load from disk, mutate, save,
// and load again as the next run would.

use library_manager::catalog::{AddOutcome, Library, RemoveOutcome, SearchField};
use library_manager::models::Book;
use library_manager::storage::LibraryStore;
use tempfile::TempDir;

#[test]
fn session_changes_survive_restart() {
    let td = TempDir::new().unwrap();
    let store = LibraryStore::new(td.path().join("library.json"));

    // first run: nothing on disk yet
    let mut library = Library::from_books(store.load().unwrap());
    assert!(library.is_empty());

    assert_eq!(
        library.add(Book::new("Dune", "Herbert", 1965, "sci-fi", true)),
        AddOutcome::Added
    );
    assert_eq!(
        library.add(Book::new("Emma", "Jane Austen", 1815, "romance", false)),
        AddOutcome::Added
    );
    assert_eq!(
        library.add(Book::new("Hyperion", "Dan Simmons", 1989, "SCI-FI", false)),
        AddOutcome::Added
    );
    store.save(library.list_all()).unwrap();

    // second run
    let mut library = Library::from_books(store.load().unwrap());
    assert_eq!(library.len(), 3);
    assert_eq!(
        library.add(Book::new("dune", "HERBERT", 1965, "sci-fi", true)),
        AddOutcome::Duplicate
    );
    assert!(matches!(library.remove("EMMA"), RemoveOutcome::Removed(_)));
    assert_eq!(library.remove("Emma"), RemoveOutcome::NotFound);

    let stats = library.statistics().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.genres, vec![("Sci-fi".to_string(), 2)]);
    store.save(library.list_all()).unwrap();

    // third run sees exactly what the second one saved
    let reloaded = Library::from_books(store.load().unwrap());
    assert_eq!(reloaded, library);
    assert_eq!(reloaded.search(SearchField::Author, "simmons").len(), 1);
}

#[test]
fn unsaved_changes_are_lost() {
    let td = TempDir::new().unwrap();
    let store = LibraryStore::new(td.path().join("library.json"));
    store
        .save(&[Book::new("Dune", "Herbert", 1965, "sci-fi", true)])
        .unwrap();

    let mut library = Library::from_books(store.load().unwrap());
    library.remove("Dune");
    drop(library);

    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced_on_save() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("library.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = LibraryStore::new(&path);
    let mut library = Library::from_books(store.load().unwrap());
    assert!(library.is_empty());

    library.add(Book::new("Dune", "Herbert", 1965, "sci-fi", true));
    store.save(library.list_all()).unwrap();
    assert_eq!(store.load().unwrap(), library.list_all().to_vec());
}
