// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

#[tokio::test]
async fn test_create_run_dir_under_base_path() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("nested"));
    let run_id = Uuid::new_v4();

    let run_dir = store.create_run_dir(&run_id).await.unwrap();

    assert!(run_dir.is_dir());
    assert_eq!(run_dir, dir.path().join("nested").join(run_id.to_string()));
}

#[tokio::test]
async fn test_resolve_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let run_id = Uuid::new_v4();
    let run_dir = store.create_run_dir(&run_id).await.unwrap();
    std::fs::write(run_dir.join("k_page_1.pdf"), b"pdf").unwrap();

    let path = store
        .resolve(&run_id.to_string(), "k_page_1.pdf")
        .await
        .unwrap();

    assert_eq!(path, run_dir.join("k_page_1.pdf"));
}

#[tokio::test]
async fn test_resolve_missing_file_or_run_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let run_id = Uuid::new_v4();

    let missing_run = store.resolve(&run_id.to_string(), "a.pdf").await;
    assert!(matches!(missing_run, Err(ArtifactError::NotFound(_))));

    store.create_run_dir(&run_id).await.unwrap();
    let missing_file = store.resolve(&run_id.to_string(), "a.pdf").await;
    assert!(matches!(missing_file, Err(ArtifactError::NotFound(_))));
}

#[tokio::test]
async fn test_resolve_rejects_path_components() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let run_id = Uuid::new_v4().to_string();

    for name in ["../secret.txt", "..", ".", "", "a/b.pdf", "a\\b.pdf", "/etc/passwd"] {
        let result = store.resolve(&run_id, name).await;
        assert!(
            matches!(result, Err(ArtifactError::InvalidName(_))),
            "{:?} should be rejected",
            name
        );
    }
}

#[tokio::test]
async fn test_resolve_rejects_non_uuid_run_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());

    let result = store.resolve("..", "a.pdf").await;

    assert!(matches!(result, Err(ArtifactError::InvalidName(_))));
}

#[tokio::test]
async fn test_artifact_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("present.pdf"), b"x").unwrap();

    assert!(artifact_exists(dir.path(), "present.pdf").await);
    assert!(!artifact_exists(dir.path(), "absent.pdf").await);
}
