//! Test helpers: build application state and router for integration tests,
//! plus a loopback stand-in for the license validation endpoint.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use prhub_api::constants;
use prhub_api::setup::routes;
use prhub_api::state::AppState;
use prhub_core::{Config, StorageBackend};
use prhub_services::LicenseValidator;
use prhub_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

/// Namespace all test uploads derive their server IDs under.
pub const TEST_NAMESPACE: Uuid = Uuid::from_u128(0x1f2e3d4c_5b6a_4798_8765_43210fedcba9);

pub const PUBLIC_BASE_URL: &str = "http://localhost:4000/demos";

/// API path prefix for tests (e.g. `/api/v1/servers`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: in-process server plus the storage root it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

/// Serve a canned validation response on an ephemeral loopback port and
/// return the endpoint URL.
pub async fn spawn_validator(status: StatusCode, body: &'static str) -> String {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(move || async move { (status, body) }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind validator listener");
    let addr = listener.local_addr().expect("validator addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("serve mock validator");
    });

    format!("http://{}/lcp_validate.php", addr)
}

/// Validator that accepts every license.
pub async fn spawn_accepting_validator() -> String {
    spawn_validator(StatusCode::OK, r#"{"Valid": true, "User": "x"}"#).await
}

/// Setup a test app with isolated local storage and the given validation
/// endpoint.
pub async fn setup_test_app(validator_endpoint: String) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let upload_dir = temp_dir.path().to_path_buf();

    let config = Config {
        server_port: 0,
        namespace: TEST_NAMESPACE,
        storage_backend: StorageBackend::Local,
        upload_dir: Some(upload_dir.display().to_string()),
        public_base_url: PUBLIC_BASE_URL.to_string(),
        s3_region: None,
        s3_endpoint: None,
        license_endpoint: validator_endpoint.clone(),
        license_timeout_secs: 2,
        max_upload_size_bytes: 10 * 1024 * 1024,
    };

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(upload_dir.clone())
            .await
            .expect("create local storage"),
    );
    let validator = LicenseValidator::new(validator_endpoint, Duration::from_secs(2))
        .expect("build validator client");

    let state = Arc::new(AppState {
        config,
        storage,
        validator,
    });
    let server = TestServer::new(routes::setup_routes(state)).expect("build test server");

    TestApp {
        server,
        upload_dir,
        _temp_dir: temp_dir,
    }
}

/// Number of entries (of any kind) under the storage root.
pub fn storage_entry_count(app: &TestApp) -> usize {
    std::fs::read_dir(&app.upload_dir)
        .expect("read upload dir")
        .count()
}
