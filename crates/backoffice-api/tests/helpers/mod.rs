//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p backoffice-api`. No external services
//! are needed: storage is an in-memory presigner and the Graph API is a mockito server.

#![allow(dead_code)]

pub mod auth;
pub mod storage;

use axum_test::TestServer;
use backoffice_api::auth::SessionVerifier;
use backoffice_api::constants;
use backoffice_api::setup::routes;
use backoffice_api::state::AppState;
use backoffice_core::Config;
use backoffice_social::GraphApiClient;
use backoffice_storage::UploadAuthorizer;
use mockito::ServerGuard;
use std::collections::HashMap;
use std::sync::Arc;

pub use auth::TEST_AUTH_SECRET;
pub use storage::RecordingPresigner;

/// Instagram business account used by the test configuration
pub const TEST_INSTAGRAM_ACCOUNT: &str = "17841400000000000";
pub const TEST_INSTAGRAM_TOKEN: &str = "test-instagram-token";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the doubles behind it.
pub struct TestApp {
    pub server: TestServer,
    pub presigner: Arc<RecordingPresigner>,
    pub graph_api: ServerGuard,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(graph_api_base: &str) -> Config {
    let vars = HashMap::from([
        ("AUTH_SECRET", TEST_AUTH_SECRET.to_string()),
        ("AWS_BUCKET_NAME", "association-uploads".to_string()),
        ("AWS_REGION", "eu-west-3".to_string()),
        ("AWS_ACCESS_KEY", "AKIDEXAMPLE".to_string()),
        ("AWS_SECRET_ACCESS_KEY", "test-secret".to_string()),
        ("INSTAGRAM_ACCESS_TOKEN", TEST_INSTAGRAM_TOKEN.to_string()),
        ("INSTAGRAM_USER_ID", TEST_INSTAGRAM_ACCOUNT.to_string()),
        ("INSTAGRAM_API_BASE", graph_api_base.to_string()),
        ("INSTAGRAM_TIMEOUT_SECS", "5".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test configuration")
}

/// Setup test app with a recording presigner and a mock Graph API.
pub async fn setup_test_app() -> TestApp {
    let graph_api = mockito::Server::new_async().await;
    let config = create_test_config(&graph_api.url());

    let presigner = Arc::new(RecordingPresigner::default());
    let instagram =
        GraphApiClient::new(&config.instagram).expect("Failed to create Graph API client");

    let state = Arc::new(AppState {
        config: config.clone(),
        uploads: UploadAuthorizer::new(presigner.clone()),
        instagram,
        sessions: SessionVerifier::new(&config.base.auth_secret),
    });

    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        presigner,
        graph_api,
    }
}
