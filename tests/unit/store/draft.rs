use std::path::PathBuf;

use super::*;
use crate::record::fields::Field;
use crate::store::backend::FileBackend;

fn letter(subject: &str) -> LetterRecord {
    LetterRecord::new()
        .with(Field::RecipientName, "Ada Lovelace")
        .with(Field::Subject, subject)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("kelsa_store").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn draft_and_final_are_independent_slots() {
    let mut store = DraftStore::in_memory();
    store.save_draft(&letter("draft")).unwrap();
    assert_eq!(store.load(Slot::Draft), Some(letter("draft")));
    assert_eq!(store.load(Slot::Final), None);

    store.save_final(&letter("final")).unwrap();
    assert_eq!(store.load(Slot::Final), Some(letter("final")));
    assert_eq!(store.load(Slot::Draft), Some(letter("draft")));
}

#[test]
fn latest_save_wins() {
    let mut store = DraftStore::in_memory();
    store.save_draft(&letter("a")).unwrap();
    store.save_draft(&letter("ab")).unwrap();
    store.save_draft(&letter("abc")).unwrap();
    assert_eq!(
        store.load(Slot::Draft).unwrap().get(Field::Subject),
        Some("abc")
    );
}

#[test]
fn malformed_blob_reads_as_absent() {
    let mut backend = MemoryBackend::new();
    backend
        .set(Slot::Final.key(), "{\"subject\": ".to_string())
        .unwrap();
    backend
        .set(Slot::Draft.key(), "[1, 2, 3]".to_string())
        .unwrap();
    let store = DraftStore::new(Box::new(backend));
    assert_eq!(store.load(Slot::Final), None);
    assert_eq!(store.load(Slot::Draft), None);
}

#[test]
fn try_load_reports_malformed_blob_as_persistence_parse() {
    let mut backend = MemoryBackend::new();
    backend
        .set(Slot::Final.key(), "{\"subject\": ".to_string())
        .unwrap();
    let store = DraftStore::new(Box::new(backend));

    let err = store.try_load(Slot::Final).unwrap_err();
    assert!(matches!(err, KelsaError::PersistenceParse(_)));
    assert!(err.to_string().contains("kelsa_letter_data"));
    assert_eq!(store.try_load(Slot::Draft).unwrap(), None);
}

#[test]
fn clear_all_removes_every_slot_including_scratch() {
    let mut store = DraftStore::in_memory();
    store.save_draft(&letter("d")).unwrap();
    store.save_final(&letter("f")).unwrap();
    store
        .backend_mut()
        .set(Slot::Scratch.key(), "{}".to_string())
        .unwrap();
    assert!(store.load(Slot::Scratch).is_some());

    store.clear_all().unwrap();
    for slot in Slot::ALL {
        assert_eq!(store.load(slot), None, "{slot:?} should be cleared");
    }
}

#[test]
fn clear_slot_leaves_others() {
    let mut store = DraftStore::in_memory();
    store.save_draft(&letter("d")).unwrap();
    store.save_final(&letter("f")).unwrap();
    store.clear_slot(Slot::Draft).unwrap();
    assert_eq!(store.load(Slot::Draft), None);
    assert_eq!(store.load(Slot::Final), Some(letter("f")));
}

#[test]
fn file_backend_persists_and_clears() {
    let dir = scratch_dir("file_backend_persists_and_clears");
    let mut store = DraftStore::new(Box::new(FileBackend::new(&dir)));
    store.save_final(&letter("on disk")).unwrap();
    assert!(dir.join("kelsa_letter_data.json").is_file());

    let reopened = DraftStore::new(Box::new(FileBackend::new(&dir)));
    assert_eq!(reopened.load(Slot::Final), Some(letter("on disk")));

    store.end_session().unwrap();
    assert!(!dir.join("kelsa_letter_data.json").exists());
    assert_eq!(reopened.load(Slot::Final), None);
}

#[test]
fn file_backend_rejects_path_like_keys() {
    let mut backend = FileBackend::new(scratch_dir("file_backend_rejects_path_like_keys"));
    assert!(backend.set("../escape", "x".to_string()).is_err());
    assert!(backend.get("").is_err());
    assert!(backend.remove("missing_key").is_ok());
}
