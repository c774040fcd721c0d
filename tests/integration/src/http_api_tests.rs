//! End-to-end tests of the HTTP API
//!
//! Each test boots a real server on an ephemeral port over a fresh
//! [`TestTree`] and talks to it with reqwest.

use filebox_server::{FileboxServer, ServerConfig};
use filebox_test_utils::TestTree;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestServer {
    tree: TestTree,
    base: String,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<filebox_server::Result<()>>>,
}

impl TestServer {
    async fn start(tree: TestTree) -> Self {
        Self::start_with_limit(tree, filebox_server::config::DEFAULT_MAX_UPLOAD_BYTES).await
    }

    async fn start_with_limit(tree: TestTree, max_upload_bytes: usize) -> Self {
        let config = ServerConfig {
            home_directory: tree.root().to_path_buf(),
            max_upload_bytes,
            create_home: false,
            ..ServerConfig::default()
        };
        let server = FileboxServer::new(config).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api/files", listener.local_addr().unwrap());

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve(listener, async {
            let _ = rx.await;
        }));

        Self {
            tree,
            base,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{route}", self.base)
    }

    async fn get(&self, route: &str, query: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .get(self.url(route))
            .query(query)
            .send()
            .await
            .unwrap()
    }

    async fn upload(&self, path: &str, form: Form) -> reqwest::Response {
        self.client
            .post(self.url("upload"))
            .query(&[("path", path)])
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    async fn delete(&self, path: &str, is_directory: bool) -> reqwest::Response {
        self.client
            .delete(self.url("delete"))
            .query(&[("path", path), ("isDirectory", &is_directory.to_string())])
            .send()
            .await
            .unwrap()
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.unwrap().unwrap();
        }
    }
}

fn file_part(name: &str, content: impl Into<Vec<u8>>) -> Part {
    Part::bytes(content.into()).file_name(name.to_string())
}

async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}

// =============================================================================
// Browse
// =============================================================================

#[tokio::test]
async fn browse_root_returns_sorted_partitions() {
    let tree = TestTree::new()
        .with_file("b.txt", "bb")
        .with_file("a.txt", "a")
        .with_dir("photos")
        .with_dir("docs");
    let server = TestServer::start(tree).await;

    let response = server.get("browse", &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "path": "",
            "directories": [
                { "name": "docs", "type": "directory" },
                { "name": "photos", "type": "directory" },
            ],
            "files": [
                { "name": "a.txt", "type": "file", "size": 1 },
                { "name": "b.txt", "type": "file", "size": 2 },
            ],
        })
    );
    server.stop().await;
}

#[tokio::test]
async fn browse_outside_root_is_bad_request() {
    let server = TestServer::start(TestTree::new()).await;

    let response = server.get("browse", &[("path", "../")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Invalid path");
    server.stop().await;
}

#[tokio::test]
async fn browse_missing_directory_is_not_found() {
    let server = TestServer::start(TestTree::new()).await;

    let response = server.get("browse", &[("path", "nope")]).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Directory not found");
    server.stop().await;
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_reports_paths_relative_to_root() {
    let tree = TestTree::new()
        .with_file("docs/2024/Report-Q1.pdf", "q1")
        .with_dir("docs/reports")
        .with_file("notes.txt", "n");
    let server = TestServer::start(tree).await;

    let response = server.get("search", &[("query", "REPORT"), ("path", "docs")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["query"], "REPORT");
    assert_eq!(body["path"], "docs");
    assert_eq!(body["totalResults"], 2);
    assert_eq!(
        body["directories"],
        json!([{ "name": "reports", "type": "directory", "fullPath": "docs/reports" }])
    );
    assert_eq!(
        body["files"],
        json!([{
            "name": "Report-Q1.pdf",
            "type": "file",
            "fullPath": "docs/2024/Report-Q1.pdf",
            "size": 2,
        }])
    );
    server.stop().await;
}

#[tokio::test]
async fn search_with_blank_query_is_bad_request() {
    let server = TestServer::start(TestTree::new()).await;

    let response = server.get("search", &[("query", "   ")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().await.unwrap(),
        "Search query cannot be empty"
    );
    server.stop().await;
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn upload_stores_files_and_reports_traversal_per_item() {
    let server = TestServer::start(TestTree::new().with_dir("inbox")).await;
    let form = Form::new()
        .part("files", file_part("ok.txt", "fine"))
        .part("files", file_part("../evil.txt", "nope"))
        .part("files", file_part("nested/deep.txt", "deep"));

    let response = server.upload("inbox", form).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "message": "2 item(s) uploaded successfully. Failed: evil.txt (path traversal detected)",
            "uploadedCount": 2,
            "failedCount": 1,
        })
    );
    assert_eq!(server.tree.read("inbox/ok.txt"), b"fine");
    assert_eq!(server.tree.read("inbox/nested/deep.txt"), b"deep");
    server.tree.assert_not_exists("evil.txt");
    server.tree.assert_outside_untouched();
    server.stop().await;
}

#[tokio::test]
async fn upload_overwrites_existing_file() {
    let server = TestServer::start(TestTree::new().with_file("a.txt", "old")).await;

    let response = server
        .upload("", Form::new().part("files", file_part("a.txt", "new")))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(server.tree.read("a.txt"), b"new");
    server.stop().await;
}

#[tokio::test]
async fn upload_without_file_parts_is_bad_request() {
    let server = TestServer::start(TestTree::new()).await;
    let form = Form::new().text("comment", "no files here");

    let response = server.upload("", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "No files provided");
    server.stop().await;
}

#[tokio::test]
async fn upload_with_only_an_empty_file_input_is_bad_request() {
    let server = TestServer::start(TestTree::new()).await;
    let form = Form::new()
        .part("files", file_part("", Vec::new()))
        .text("comment", "nothing chosen");

    let response = server.upload("", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "No files provided");
    server.stop().await;
}

#[tokio::test]
async fn upload_into_missing_directory_is_not_found() {
    let server = TestServer::start(TestTree::new()).await;

    let response = server
        .upload("missing", Form::new().part("files", file_part("a.txt", "a")))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Directory not found");
    server.stop().await;
}

#[tokio::test]
async fn upload_over_size_limit_is_rejected() {
    let server = TestServer::start_with_limit(TestTree::new(), 1024).await;
    let form = Form::new().part("files", file_part("big.bin", vec![7u8; 16 * 1024]));

    let response = server.upload("", form).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    server.tree.assert_not_exists("big.bin");
    server.stop().await;
}

#[tokio::test]
async fn concurrent_uploads_of_distinct_files_all_land() {
    let server = TestServer::start(TestTree::new()).await;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let client = server.client.clone();
        let url = server.url("upload");
        tasks.spawn(async move {
            let form = Form::new().part("files", file_part(&format!("f{i}.txt"), format!("{i}")));
            client.post(url).multipart(form).send().await.unwrap().status()
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    for i in 0..8 {
        assert_eq!(server.tree.read(&format!("f{i}.txt")), format!("{i}").into_bytes());
    }
    server.stop().await;
}

// =============================================================================
// Download
// =============================================================================

#[tokio::test]
async fn download_round_trips_bytes_with_attachment_headers() {
    let content: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();
    let server = TestServer::start(TestTree::new().with_file("docs/data.bin", &content)).await;

    let response = server.get("download", &[("path", "docs/data.bin")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers["content-type"], "application/octet-stream");
    assert_eq!(headers["content-length"], "70000");
    assert!(
        headers["content-disposition"]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"data.bin\"")
    );
    assert_eq!(response.bytes().await.unwrap().to_vec(), content);
    server.stop().await;
}

#[tokio::test]
async fn download_of_directory_or_missing_file_is_not_found() {
    let server = TestServer::start(TestTree::new().with_dir("docs")).await;

    for path in ["docs", "docs/missing.txt"] {
        let response = server.get("download", &[("path", path)]).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
        assert_eq!(response.text().await.unwrap(), "File not found");
    }
    server.stop().await;
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_directory_removes_subtree() {
    let server = TestServer::start(TestTree::new().with_file("old/a/b.txt", "x")).await;

    let response = server.delete("old", true).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Item deleted successfully" })
    );
    server.tree.assert_not_exists("old");
    server.stop().await;
}

#[tokio::test]
async fn delete_with_wrong_kind_is_not_found() {
    let server = TestServer::start(TestTree::new().with_file("a.txt", "x")).await;

    let response = server.delete("a.txt", true).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Directory not found");
    server.tree.assert_file_exists("a.txt");
    server.stop().await;
}

#[tokio::test]
async fn delete_outside_root_is_bad_request() {
    let server = TestServer::start(TestTree::new()).await;

    let response = server.delete("../sentinel.txt", false).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Invalid path");
    server.tree.assert_outside_untouched();
    server.stop().await;
}

#[tokio::test]
async fn delete_root_empties_it_and_keeps_serving() {
    let tree = TestTree::new()
        .with_file("top.txt", "x")
        .with_file("docs/a.txt", "a");
    let server = TestServer::start(tree).await;

    let response = server.delete("", true).await;

    assert_eq!(response.status(), StatusCode::OK);
    server.tree.assert_not_exists("top.txt");
    server.tree.assert_not_exists("docs");
    server.tree.assert_outside_untouched();

    let listing = json_body(server.get("browse", &[]).await).await;
    assert_eq!(listing["directories"], json!([]));
    assert_eq!(listing["files"], json!([]));
    server.stop().await;
}
