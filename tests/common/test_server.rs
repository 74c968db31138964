use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio::config::ServerConfig;
use folio::server::{AppState, create_router};
use folio::store::{SqliteStore, Store};
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    server_task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_limit(None).await
    }

    pub async fn start_with_limit(max_upload_bytes: Option<usize>) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: temp_dir.path().to_path_buf(),
            ..ServerConfig::default()
        };

        std::fs::create_dir_all(config.uploads_dir()).expect("create uploads dir");
        let store = SqliteStore::new(config.db_path()).expect("open store");
        store.initialize().expect("initialize store");

        let mut state = AppState::new(Arc::new(store), config.uploads_dir());
        if let Some(limit) = max_upload_bytes {
            state = state.with_max_upload_bytes(limit);
        }
        let app = create_router(Arc::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let server_task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self::wait_for_ready(&base_url).await;

        Self {
            temp_dir,
            base_url,
            server_task: Some(server_task),
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready");
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir().join("uploads")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = self.server_task.take() {
            task.abort();
        }
    }
}
