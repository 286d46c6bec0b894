use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("kelsa_downloads")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn directory_downloads_create_the_directory() {
    let dir = scratch_dir("create").join("nested");
    let sink = DirectoryDownloads::new(&dir);
    let path = sink.save("Kelsa_Letter_A_2024-05-01.pdf", b"%PDF-1.4").unwrap();
    assert_eq!(path, dir.join("Kelsa_Letter_A_2024-05-01.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
}

#[test]
fn directory_downloads_overwrite_same_name() {
    let sink = DirectoryDownloads::new(scratch_dir("overwrite"));
    sink.save("a.pdf", b"one").unwrap();
    let path = sink.save("a.pdf", b"two").unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"two");
}

#[test]
fn filenames_must_be_single_components() {
    let sink = DirectoryDownloads::new(scratch_dir("reject"));
    for name in ["", ".", "..", "../escape.pdf", "a/b.pdf", "a\\b.pdf"] {
        let err = sink.save(name, b"x").unwrap_err();
        assert!(matches!(err, KelsaError::Export(_)), "{name:?}");
    }
}

#[test]
fn memory_downloads_record_in_order() {
    let sink = MemoryDownloads::new();
    assert!(sink.is_empty());
    sink.save("first.pdf", b"1").unwrap();
    sink.save("second.pdf", b"22").unwrap();
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.names(), vec!["first.pdf", "second.pdf"]);
    assert_eq!(sink.files()[1].1, b"22".to_vec());
}
