//! HTTP client for the media catalog API.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::media_store::{CreateMediaRequest, MediaRecord};
use crate::server::{DeletedResponse, ErrorResponse};

const DEFAULT_TIMEOUT_SEC: u64 = 10;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server could not be reached, or it did not answer in time.
    #[error("Could not reach the media server: {0}")]
    Connection(String),

    #[error("Server answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from the media server: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

pub struct MediaApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl MediaApiClient {
    /// Creates a client for the server at `base_url` (e.g. "http://127.0.0.1:5000").
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SEC))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Connection(err.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_all(&self) -> ClientResult<Vec<MediaRecord>> {
        let url = format!("{}/media", self.base_url);
        self.send_json(self.client.get(&url)).await
    }

    pub async fn list_by_category(&self, category: &str) -> ClientResult<Vec<MediaRecord>> {
        let url = format!(
            "{}/media/category/{}",
            self.base_url,
            urlencoding::encode(category)
        );
        self.send_json(self.client.get(&url)).await
    }

    pub async fn search_by_name(&self, name: &str) -> ClientResult<Vec<MediaRecord>> {
        let url = format!("{}/media/search", self.base_url);
        self.send_json(self.client.get(&url).query(&[("name", name)]))
            .await
    }

    pub async fn get_media(&self, id: &str) -> ClientResult<MediaRecord> {
        let url = format!("{}/media/{}", self.base_url, urlencoding::encode(id));
        self.send_json(self.client.get(&url)).await
    }

    pub async fn create_media(&self, request: &CreateMediaRequest) -> ClientResult<MediaRecord> {
        let url = format!("{}/media", self.base_url);
        self.send_json(self.client.post(&url).json(request)).await
    }

    /// Deletes a record and returns the id the server reports as deleted.
    pub async fn delete_media(&self, id: &str) -> ClientResult<String> {
        let url = format!("{}/media/{}", self.base_url, urlencoding::encode(id));
        let response: DeletedResponse = self.send_json(self.client.delete(&url)).await?;
        Ok(response.deleted)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(connection_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}

fn connection_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Connection("request timed out".to_string())
    } else {
        ClientError::Connection(err.to_string())
    }
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => error.error,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// One-line summary of a record, e.g. "Dune - Film by Denis Villeneuve".
pub fn format_media_line(record: &MediaRecord) -> String {
    format!("{} - {} by {}", record.name, record.category, record.author)
}

pub fn format_media_details(record: &MediaRecord) -> String {
    format!(
        "Id: {}\nName: {}\nAuthor: {}\nPublication date: {}\nCategory: {}",
        record.id, record.name, record.author, record.publication_date, record.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_store::MediaCategory;

    fn dune() -> MediaRecord {
        MediaRecord {
            id: "2".to_string(),
            name: "Dune".to_string(),
            author: "Denis Villeneuve".to_string(),
            publication_date: "2021".to_string(),
            category: MediaCategory::Film,
        }
    }

    #[test]
    fn formats_record_line() {
        assert_eq!(format_media_line(&dune()), "Dune - Film by Denis Villeneuve");
    }

    #[test]
    fn formats_record_details() {
        let details = format_media_details(&dune());
        assert!(details.starts_with("Id: 2\n"));
        assert!(details.contains("Publication date: 2021"));
        assert!(details.ends_with("Category: Film"));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = MediaApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        let message = error_message(StatusCode::NOT_FOUND, r#"{"error":"Media 7 not found"}"#);
        assert_eq!(message, "Media 7 not found");
    }

    #[test]
    fn error_message_falls_back_to_body_or_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
    }
}
