//! Shared infrastructure for the end-to-end tests.
//!
//! Every test spawns its own server on a random port, backed by a media
//! store in a temporary directory.
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer, DUNE_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_get_media() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.get_media(DUNE_ID).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod server;

pub use client::TestClient;
pub use constants::*;
pub use server::TestServer;
