//! End-to-end behaviour of the record store against a real catalog file

use std::fs;

use shelf_core::{BookUpdate, NewBook, RecordStore, StorageError};
use tempfile::TempDir;

fn library(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("data").join("library.csv")
}

#[test]
fn reload_reproduces_records_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = library(&temp_dir);

    let original = {
        let mut store = RecordStore::open(&path).unwrap();
        store
            .add(NewBook::new("Dune", "Frank Herbert", 1965, "SciFi", "978-0441013593", 3))
            .unwrap();
        store
            .add(
                NewBook::new("Emma", "Jane Austen", 1815, "Classic", "ISBN2", 0)
                    .with_image_path("covers/emma, first edition.png"),
            )
            .unwrap();
        store
            .add(NewBook::new(
                "The \"Hobbit\"",
                "Tolkien, J.R.R.",
                -1,
                "Fantasy\nChildren",
                "",
                12,
            ))
            .unwrap();
        store.delete(2).unwrap();
        store
            .update(3, BookUpdate::new().quantity(11).image_path("hobbit.jpg"))
            .unwrap();
        store.get_all()
    };

    let reopened = RecordStore::open(&path).unwrap();
    assert!(reopened.recovered_from().is_none());
    assert_eq!(reopened.get_all(), original);
}

#[test]
fn header_names_columns_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = library(&temp_dir);

    let mut store = RecordStore::open(&path).unwrap();
    store
        .add(NewBook::new("Dune", "Herbert", 1965, "SciFi", "ISBN1", 3))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Title,Author,Year,Category,ISBN,Quantity,ImagePath")
    );
    assert_eq!(lines.next(), Some("1,Dune,Herbert,1965,SciFi,ISBN1,3,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn identifiers_strictly_increase_across_deletes() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = RecordStore::open(library(&temp_dir)).unwrap();

    let mut issued: Vec<u64> = Vec::new();
    for round in 0..30u64 {
        let id = store
            .add(NewBook::new(
                format!("Book {round}"),
                "Author",
                2000,
                "General",
                format!("ISBN{round}"),
                1,
            ))
            .unwrap();

        if let Some(&last) = issued.last() {
            assert!(id > last, "id {id} not greater than {last}");
        }
        issued.push(id);

        // Delete a mix of the newest and older records
        match round % 3 {
            0 => assert!(store.delete(id).unwrap()),
            1 => {
                if let Some(first) = store.get_all().first() {
                    assert!(store.delete(first.id).unwrap());
                }
            }
            _ => {}
        }
    }

    let mut deduped = issued.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), issued.len());
}

#[test]
fn delete_then_lookup_is_absent() {
    let temp_dir = TempDir::new().unwrap();
    let path = library(&temp_dir);
    let mut store = RecordStore::open(&path).unwrap();

    let id = store
        .add(NewBook::new("Dune", "Herbert", 1965, "SciFi", "ISBN1", 3))
        .unwrap();
    assert!(store.delete(id).unwrap());
    assert!(store.get_by_id(id).is_none());

    let reopened = RecordStore::open(&path).unwrap();
    assert!(reopened.get_by_id(id).is_none());
    assert!(reopened.is_empty());
}

#[test]
fn empty_search_equals_get_all() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = RecordStore::open(library(&temp_dir)).unwrap();
    store
        .add(NewBook::new("Dune", "Herbert", 1965, "SciFi", "ISBN1", 3))
        .unwrap();
    store
        .add(NewBook::new("Emma", "Austen", 1815, "Classic", "ISBN2", 2))
        .unwrap();

    assert_eq!(store.search(""), store.get_all());
}

#[test]
fn header_only_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("library.csv");
    fs::write(&path, "ID,Title,Author,Year,Category,ISBN,Quantity,ImagePath\n").unwrap();

    let mut store = RecordStore::open(&path).unwrap();
    assert!(store.is_empty());
    assert!(store.recovered_from().is_none());
    assert_eq!(
        store
            .add(NewBook::new("Dune", "Herbert", 1965, "SciFi", "ISBN1", 3))
            .unwrap(),
        1
    );
}

#[test]
fn corrupt_catalog_survives_next_write_via_backup() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("library.csv");
    let garbage = "Title;Author\nDune;Herbert\n";
    fs::write(&path, garbage).unwrap();

    let mut store = RecordStore::open(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), garbage);

    let backup = match store.recovered_from() {
        Some(StorageError::CorruptCatalog { backup_path, .. }) => backup_path.clone(),
        other => panic!("expected corrupt catalog, got {other:?}"),
    };

    // The first write replaces the unreadable file; the backup keeps the data
    store
        .add(NewBook::new("Emma", "Austen", 1815, "Classic", "ISBN2", 2))
        .unwrap();
    assert_eq!(fs::read_to_string(&backup).unwrap(), garbage);
    assert_eq!(RecordStore::open(&path).unwrap().len(), 1);
}
