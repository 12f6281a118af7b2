//! End-to-end tests for `MediaApiClient` against a live server.

mod common;

use common::{TestServer, DEMO_ITEMS_COUNT, DUNE_ID, DUNE_NAME, MISSING_ID};
use media_catalog_server::client::{format_media_line, ClientError, MediaApiClient};
use media_catalog_server::media_store::{CreateMediaRequest, MediaCategory};
use std::time::Duration;

fn make_client(server: &TestServer) -> MediaApiClient {
    MediaApiClient::new(server.base_url.clone()).unwrap()
}

#[tokio::test]
async fn test_client_lists_and_filters() {
    let server = TestServer::spawn().await;
    let client = make_client(&server);

    let all = client.list_all().await.unwrap();
    assert_eq!(all.len(), DEMO_ITEMS_COUNT);

    let films = client.list_by_category("film").await.unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(format_media_line(&films[0]), "Dune - Film by Denis Villeneuve");

    let found = client.search_by_name("dune").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, DUNE_ID);
}

#[tokio::test]
async fn test_client_search_encodes_spaces() {
    let server = TestServer::spawn().await;
    let client = make_client(&server);

    let found = client.search_by_name("the martian").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category, MediaCategory::Book);
}

#[tokio::test]
async fn test_client_create_get_delete() {
    let server = TestServer::spawn_empty().await;
    let client = make_client(&server);

    let request = CreateMediaRequest::new("Arrival", "Denis Villeneuve", "2016", "FILM");
    let created = client.create_media(&request).await.unwrap();
    assert_eq!(created.category, MediaCategory::Film);

    let fetched = client.get_media(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let deleted = client.delete_media(&created.id).await.unwrap();
    assert_eq!(deleted, created.id);
    assert!(client.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_client_reports_api_errors() {
    let server = TestServer::spawn().await;
    let client = make_client(&server);

    match client.get_media(MISSING_ID).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains(MISSING_ID));
        }
        other => panic!("Expected a 404 api error, got {:?}", other),
    }

    match client.list_by_category("Vinyl").await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, 400),
        other => panic!("Expected a 400 api error, got {:?}", other),
    }

    let request = CreateMediaRequest::new(DUNE_NAME, "", "2021", "Film");
    match client.create_media(&request).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("author"));
        }
        other => panic!("Expected a 400 api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_reports_unreachable_server() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = MediaApiClient::with_timeout(
        format!("http://127.0.0.1:{}", port),
        Duration::from_secs(2),
    )
    .unwrap();

    let result = client.list_all().await;
    assert!(matches!(result, Err(ClientError::Connection(_))));
}
