//! Integration tests for concurrent presign-and-download batches
//!
//! Every test runs against a local mock server that plays both the Production
//! API (presigned URL lookups) and the storage service (file contents).

mod common;

use common::{
    FILES_PATH, MockApi, STORAGE_PREFIX, assert_aborted, assert_all_succeeded,
    assert_dir_empty, assert_file_contents, content_for, file,
};
use publit_production::{Auth, BatchConfig, Error, FileBatch, FileId};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Happy path
// ============================================================================

/// Two files already hold a URL, two are resolved; all four land byte-exact.
#[tokio::test]
async fn test_four_files_mixed_credentials() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut files = Vec::new();
    for n in 1..=4 {
        let name = format!("somefile{}.txt", n);
        api.mount_content(&name, &content_for(n), 1).await;
        if n <= 2 {
            files.push(file(n, &name, Some(api.presigned_url(&name))));
        } else {
            api.mount_presign(n, &name, 1).await;
            files.push(file(n, &name, None));
        }
    }

    let report = FileBatch::new(&api.client())
        .download(&mut files, dir.path())
        .await
        .unwrap();

    assert_all_succeeded(&report, &[1, 2, 3, 4]);
    for n in 1..=4 {
        assert_file_contents(dir.path(), &format!("somefile{}.txt", n), &content_for(n));
    }
    assert!(files.iter().all(|f| f.has_presigned_url()));
    assert_eq!(api.requests_to(FILES_PATH).await, 2);
}

/// No detail call is made when every file already holds a URL.
#[tokio::test]
async fn test_fully_credentialed_batch_skips_api() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut files = Vec::new();
    for n in 1..=3 {
        let name = format!("ready{}.pdf", n);
        api.mount_content(&name, &content_for(n), 1).await;
        files.push(file(n, &name, Some(api.presigned_url(&name))));
    }

    let report = FileBatch::new(&api.client())
        .download(&mut files, dir.path())
        .await
        .unwrap();

    assert_all_succeeded(&report, &[1, 2, 3]);
    assert_eq!(api.requests_to(FILES_PATH).await, 0);
}

/// The outcome does not depend on the worker count.
#[tokio::test]
async fn test_worker_count_does_not_change_outcome() {
    let api = MockApi::start().await;
    let names: Vec<String> = (1..=8).map(|n| format!("part{}.bin", n)).collect();
    for (n, name) in (1..=8).zip(&names) {
        api.mount_content(name, &content_for(n), 3).await;
        api.mount_presign(n, name, 3).await;
    }
    api.mount_content_status("broken.bin", 403).await;

    for workers in [1, 5, 50] {
        let dir = tempfile::tempdir().unwrap();
        let mut files: Vec<_> = (1..=8)
            .zip(&names)
            .map(|(n, name)| file(n, name, None))
            .collect();
        files.push(file(99, "broken.bin", Some(api.presigned_url("broken.bin"))));

        let client = api.client();
        let batch = FileBatch::with_config(&client, BatchConfig::with_workers(workers));
        let report = batch.download(&mut files, dir.path()).await.unwrap();

        assert_eq!(report.len(), 9, "workers = {}", workers);
        let mut ok: Vec<FileId> = report.succeeded().collect();
        ok.sort();
        assert_eq!(ok, (1..=8).map(FileId).collect::<Vec<_>>(), "workers = {}", workers);
        assert_eq!(
            report.error(FileId(99)).and_then(Error::status),
            Some(403),
            "workers = {}",
            workers
        );
        for (n, name) in (1..=8).zip(&names) {
            assert_file_contents(dir.path(), name, &content_for(n));
        }
    }
}

/// Presigned downloads carry no Authorization header, API calls do.
#[tokio::test]
async fn test_presigned_download_is_unauthenticated() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(format!("{}/1", FILES_PATH)))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "1",
            "presigned_url": api.presigned_url("cover.pdf"),
        })))
        .expect(1)
        .mount(&api.server)
        .await;
    api.mount_content("cover.pdf", b"%PDF", 1).await;

    let client = api.client_with_auth(Auth::Bearer {
        token: "test-token".to_string(),
    });
    let mut files = vec![file(1, "cover.pdf", None)];
    let report = FileBatch::new(&client)
        .download(&mut files, dir.path())
        .await
        .unwrap();
    assert_all_succeeded(&report, &[1]);

    let requests = api.server.received_requests().await.unwrap();
    let storage: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path().starts_with(STORAGE_PREFIX))
        .collect();
    assert_eq!(storage.len(), 1);
    assert!(storage[0].headers.get("authorization").is_none());
}

// ============================================================================
// Failures
// ============================================================================

/// A 400 from storage fails that file only; no file is created, no top-level error.
#[tokio::test]
async fn test_http_400_is_per_file() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();

    api.mount_content_status("somefile1.txt", 400).await;
    api.mount_content("somefile2.txt", &content_for(2), 1).await;

    let mut files = vec![
        file(1, "somefile1.txt", Some(api.presigned_url("somefile1.txt"))),
        file(2, "somefile2.txt", Some(api.presigned_url("somefile2.txt"))),
    ];
    let report = FileBatch::new(&api.client())
        .download(&mut files, dir.path())
        .await
        .unwrap();

    let err = report.error(FileId(1)).unwrap();
    assert!(err.to_string().contains("400"), "got: {}", err);
    assert!(!dir.path().join("somefile1.txt").exists());
    assert!(report.get(FileId(2)).unwrap().is_ok());
    assert_file_contents(dir.path(), "somefile2.txt", &content_for(2));
}

/// One failed lookup aborts the whole batch before any transfer.
#[tokio::test]
async fn test_resolution_failure_aborts_all() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();

    api.mount_presign(1, "a.txt", 1).await;
    api.mount_presign_error(2, 500).await;
    api.mount_content("a.txt", b"a", 0).await;
    api.mount_content("c.txt", b"c", 0).await;

    let mut files = vec![
        file(1, "a.txt", None),
        file(2, "b.txt", None),
        file(3, "c.txt", Some(api.presigned_url("c.txt"))),
    ];
    let report = FileBatch::new(&api.client())
        .download(&mut files, dir.path())
        .await
        .unwrap();

    assert_eq!(report.len(), 3);
    assert!(report.succeeded().next().is_none());
    assert_eq!(report.error(FileId(2)).and_then(Error::status), Some(500));
    assert_aborted(&report, 1);
    assert_aborted(&report, 3);
    match report.error(FileId(1)) {
        Some(Error::BatchAborted { failed }) => assert_eq!(failed, &vec![FileId(2)]),
        other => panic!("Expected BatchAborted, got {:?}", other),
    }
    assert_eq!(api.requests_to(STORAGE_PREFIX).await, 0);
    assert_dir_empty(dir.path());
}

/// A missing destination is the only top-level error, and nothing is sent.
#[tokio::test]
async fn test_invalid_destination_sends_nothing() {
    let api = MockApi::start().await;
    let mut files = vec![
        file(1, "a.txt", None),
        file(2, "b.txt", Some(api.presigned_url("b.txt"))),
    ];

    let err = FileBatch::new(&api.client())
        .download(&mut files, "some/dir/that/doesnt/exist")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDestination { .. }));
    assert!(api.server.received_requests().await.unwrap().is_empty());
}

/// Names that would escape the destination fail that file only.
#[tokio::test]
async fn test_unsafe_name_fails_single_file() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    api.mount_content("ok.txt", b"ok", 1).await;

    let mut files = vec![
        file(1, "../escape.txt", Some(api.presigned_url("escape.txt"))),
        file(2, "ok.txt", Some(api.presigned_url("ok.txt"))),
    ];
    let report = FileBatch::new(&api.client())
        .download(&mut files, dir.path())
        .await
        .unwrap();

    assert!(matches!(
        report.error(FileId(1)),
        Some(Error::InvalidFileName { .. })
    ));
    assert_file_contents(dir.path(), "ok.txt", b"ok");
}

/// A local write failure fails that file only; siblings still land.
#[tokio::test]
async fn test_local_io_failure_is_per_file() {
    let api = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("taken.pdf")).unwrap();

    api.mount_content("taken.pdf", b"never written", 1).await;
    api.mount_content("free.pdf", &content_for(2), 1).await;

    let mut files = vec![
        file(1, "taken.pdf", Some(api.presigned_url("taken.pdf"))),
        file(2, "free.pdf", Some(api.presigned_url("free.pdf"))),
    ];
    let report = FileBatch::new(&api.client())
        .download(&mut files, dir.path())
        .await
        .unwrap();

    assert!(
        matches!(report.error(FileId(1)), Some(Error::Io(_))),
        "got: {:?}",
        report.get(FileId(1))
    );
    assert!(dir.path().join("taken.pdf").is_dir());
    assert!(report.get(FileId(2)).unwrap().is_ok());
    assert_file_contents(dir.path(), "free.pdf", &content_for(2));
}

// ============================================================================
// Resolution only
// ============================================================================

/// Resolving twice only calls the API for files that still lack a URL.
#[tokio::test]
async fn test_resolve_is_idempotent() {
    let api = MockApi::start().await;
    api.mount_presign(1, "a.txt", 1).await;
    api.mount_presign(2, "b.txt", 1).await;

    let batch = FileBatch::new(&api.client());
    let mut files = vec![file(1, "a.txt", None), file(2, "b.txt", None)];

    let first = batch.resolve_presigned(&mut files).await;
    assert_all_succeeded(&first, &[1, 2]);
    let second = batch.resolve_presigned(&mut files).await;
    assert_all_succeeded(&second, &[1, 2]);

    assert_eq!(
        files[0].presigned_url.as_deref(),
        Some(api.presigned_url("a.txt").as_str())
    );
    assert_eq!(api.requests_to(FILES_PATH).await, 2);
}
