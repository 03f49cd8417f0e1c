//! Mock Production API and storage server for batch tests

use publit_production::{ApiClient, Auth, Config, File, FileId};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix under which the mock serves presigned downloads
pub const STORAGE_PREFIX: &str = "/storage/";

/// Path of the files collection on the mock API
pub const FILES_PATH: &str = "/production/v2.0/files";

/// One mock server playing both the Production API and the storage service
pub struct MockApi {
    /// The underlying server; expectations are verified when it is dropped
    pub server: MockServer,
}

impl MockApi {
    /// Start a fresh mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client without authentication
    pub fn client(&self) -> ApiClient {
        self.client_with_auth(Auth::None)
    }

    /// Client with the given authentication
    pub fn client_with_auth(&self, auth: Auth) -> ApiClient {
        let config = Config {
            auth,
            ..Config::new(self.server.uri())
        };
        ApiClient::new(config).unwrap()
    }

    /// Presigned URL the mock hands out for `name`
    pub fn presigned_url(&self, name: &str) -> String {
        format!("{}{}{}", self.server.uri(), STORAGE_PREFIX, name)
    }

    /// Answer the presigned URL request for `id`, expecting exactly `calls` requests
    pub async fn mount_presign(&self, id: i64, name: &str, calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("{}/{}", FILES_PATH, id)))
            .and(query_param("aux", "presigned_url"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": id.to_string(),
                "original_name": name,
                "presigned_url": self.presigned_url(name),
            })))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Fail the presigned URL request for `id` with `status`
    pub async fn mount_presign_error(&self, id: i64, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("{}/{}", FILES_PATH, id)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Serve `body` at the presigned URL of `name`, expecting exactly `calls` requests
    pub async fn mount_content(&self, name: &str, body: &[u8], calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", STORAGE_PREFIX, name)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Answer the presigned URL of `name` with `status` and a short body
    pub async fn mount_content_status(&self, name: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", STORAGE_PREFIX, name)))
            .respond_with(ResponseTemplate::new(status).set_body_string("denied"))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received whose path starts with `prefix`
    pub async fn requests_to(&self, prefix: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().starts_with(prefix))
            .count()
    }
}

/// File with an id, a name and optionally a presigned URL
pub fn file(id: i64, name: &str, presigned_url: Option<String>) -> File {
    File {
        id: FileId(id),
        original_name: name.to_string(),
        presigned_url,
        ..Default::default()
    }
}

/// Distinct content for test file `n`
pub fn content_for(n: i64) -> Vec<u8> {
    format!("Hello, file {}!\nThis is line two.\n", n).into_bytes()
}
