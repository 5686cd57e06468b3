use expertmem::{DocumentSource, DomainError, HttpDocumentSource};
use tempfile::tempdir;

#[tokio::test]
async fn local_paths_are_read_without_a_network_call() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("notes.md");
    std::fs::write(&path, b"hello").expect("write");

    let source = HttpDocumentSource::new();
    let fetched = source
        .fetch(path.to_str().expect("utf8 path"))
        .await
        .expect("fetch");

    assert_eq!(fetched.bytes, b"hello");
    assert_eq!(fetched.file_name, "notes.md");
}

#[tokio::test]
async fn missing_local_paths_surface_io_errors() {
    let source = HttpDocumentSource::new();
    let err = source
        .fetch("/definitely/not/here.pdf")
        .await
        .expect_err("missing file");
    assert!(matches!(err, DomainError::IoError(_)));
}
