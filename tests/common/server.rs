//! Test server lifecycle management.

use super::constants::*;
use media_catalog_server::media_store::{
    seed_demo_records, JsonMediaStore, MediaStore, MEDIA_STORE_FILE_NAME,
};
use media_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server with its own media store.
///
/// Dropping it shuts the server down and removes the temporary data
/// directory, if the server owns one.
pub struct TestServer {
    /// Base URL for requests, e.g. "http://127.0.0.1:12345"
    pub base_url: String,

    pub port: u16,

    /// Store file the server reads and writes.
    pub store_path: PathBuf,

    /// Direct handle on the store, for assertions that bypass HTTP.
    pub media_store: Arc<JsonMediaStore>,

    _temp_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server whose store holds the three demo items.
    pub async fn spawn() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut server = Self::start(temp_dir.path(), true).await;
        server._temp_dir = Some(temp_dir);
        server
    }

    /// Spawns a server with an empty store.
    pub async fn spawn_empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut server = Self::start(temp_dir.path(), false).await;
        server._temp_dir = Some(temp_dir);
        server
    }

    /// Spawns a server on a data directory owned by the caller, so that a
    /// later server can be started on the same files.
    pub async fn spawn_in(data_dir: &Path) -> Self {
        Self::start(data_dir, false).await
    }

    async fn start(data_dir: &Path, seed: bool) -> Self {
        let store_path = data_dir.join(MEDIA_STORE_FILE_NAME);
        let media_store =
            Arc::new(JsonMediaStore::open(&store_path).expect("Failed to open media store"));
        if seed {
            seed_demo_records(media_store.as_ref()).expect("Failed to seed demo items");
            assert_eq!(media_store.count(), DEMO_ITEMS_COUNT);
        }

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };
        let app = make_app(config, media_store.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            store_path,
            media_store,
            _temp_dir: None,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Polls the home route until the server answers.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
