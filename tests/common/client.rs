//! Raw HTTP client for the end-to-end tests.
//!
//! Returns plain responses so tests can assert on status codes as well as
//! bodies.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    pub async fn list_media(&self) -> Response {
        self.get("/media").await
    }

    pub async fn list_by_category(&self, category: &str) -> Response {
        self.get(&format!("/media/category/{}", category)).await
    }

    pub async fn search(&self, name: &str) -> Response {
        self.client
            .get(format!("{}/media/search", self.base_url))
            .query(&[("name", name)])
            .send()
            .await
            .expect("Search request failed")
    }

    pub async fn get_media(&self, id: &str) -> Response {
        self.get(&format!("/media/{}", id)).await
    }

    pub async fn create_media(
        &self,
        name: &str,
        author: &str,
        publication_date: &str,
        category: &str,
    ) -> Response {
        self.create_media_raw(json!({
            "name": name,
            "author": author,
            "publication_date": publication_date,
            "category": category,
        }))
        .await
    }

    pub async fn create_media_raw(&self, body: Value) -> Response {
        self.client
            .post(format!("{}/media", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Create request failed")
    }

    pub async fn delete_media(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/media/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete request failed")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }
}
