//! Test helpers: build AppState and router for integration tests.
//!
//! The router runs against the in-memory repository and temporary
//! directories for blobs and placeholder assets; no database is needed.
//! Run with `cargo test -p oedoc-api`.

pub mod fixtures;

use axum_test::TestServer;
use oedoc_api::setup::routes;
use oedoc_api::state::AppState;
use oedoc_core::{BaseConfig, Config, ServiceConfig};
use oedoc_db::test_helpers::MockDocumentRepository;
use oedoc_storage::{AssetDirectory, LocalBlobStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

/// Route prefix of the test configuration.
pub const PREFIX: &str = "/v4/oe";

/// Test application: server, repository fake and owned directories.
pub struct TestApp {
    pub server: TestServer,
    pub repository: MockDocumentRepository,
    pub data_dir: TempDir,
    pub _assets_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Store `data` as the blob of `guid`.
    pub fn write_blob(&self, guid: &Uuid, data: &[u8]) {
        write_blob(self.data_dir.path(), guid, data);
    }
}

pub fn path(rest: &str) -> String {
    format!("{}{}", PREFIX, rest)
}

pub fn test_config(data_path: &Path, assets_path: &Path) -> Config {
    Config(Box::new(ServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 1,
            environment: "test".to_string(),
        },
        database_url: "postgres://unused/documents".to_string(),
        data_path: data_path.to_path_buf(),
        assets_path: assets_path.to_path_buf(),
        app_version: Some("v4".to_string()),
        service_name: "oe".to_string(),
        public_base_url: "https://pcm.groupclaes.be".to_string(),
        thumbnail_redirect_base_url: "https://pcm.groupclaes.be/v4/product-images".to_string(),
    }))
}

pub fn write_blob(root: &Path, guid: &Uuid, data: &[u8]) {
    let key = guid.as_hyphenated().to_string();
    let dir = root.join("content").join(&key[..2]).join(&key);
    std::fs::create_dir_all(&dir).expect("create blob dir");
    std::fs::write(dir.join("file"), data).expect("write blob");
}

/// Setup the test app with an empty repository and the six placeholder assets.
pub async fn setup_test_app() -> TestApp {
    let data_dir = TempDir::new().expect("data dir");
    let assets_dir = TempDir::new().expect("assets dir");
    for name in oedoc_api::constants::PLACEHOLDER_ASSETS {
        std::fs::write(assets_dir.path().join(name), format!("placeholder {}", name))
            .expect("write asset");
    }

    let config = test_config(data_dir.path(), assets_dir.path());
    let repository = MockDocumentRepository::new();
    let blobs = LocalBlobStore::new(data_dir.path())
        .await
        .expect("blob store");
    let assets = AssetDirectory::new(assets_dir.path());

    let state = Arc::new(AppState::new(
        &config,
        Arc::new(repository.clone()),
        Arc::new(blobs),
        assets,
    ));
    let router = routes::setup_routes(&config, state).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        repository,
        data_dir,
        _assets_dir: assets_dir,
    }
}
