//! Media API routes

use crate::media_store::{CreateMediaRequest, MediaCategory, MediaStoreError};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::state::{GuardedMediaStore, ServerState};

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a successful delete.
#[derive(Serialize, Deserialize, Debug)]
pub struct DeletedResponse {
    pub deleted: String,
}

#[derive(Deserialize)]
struct SearchQuery {
    pub name: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for MediaStoreError {
    fn into_response(self) -> Response {
        match &self {
            MediaStoreError::Validation(err) => {
                error_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            MediaStoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, self.to_string()),
            MediaStoreError::Storage { .. } | MediaStoreError::CorruptStore { .. } => {
                error!("Media store failure: {}", self);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not persist the media store.",
                )
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(_) => format!(
            "Request body has a field of the wrong type, all fields must be strings: {}",
            rejection.body_text()
        ),
        JsonRejection::JsonSyntaxError(_) => {
            format!("Request body is not valid JSON: {}", rejection.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be sent as application/json.".to_string()
        }
        _ => format!("Could not read request body: {}", rejection.body_text()),
    }
}

async fn list_media(State(media_store): State<GuardedMediaStore>) -> Response {
    Json(media_store.list_all()).into_response()
}

async fn list_media_by_category(
    State(media_store): State<GuardedMediaStore>,
    Path(category): Path<String>,
) -> Response {
    match category.parse::<MediaCategory>() {
        Ok(category) => Json(media_store.list_by_category(category.as_str())).into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
    }
}

async fn search_media(
    State(media_store): State<GuardedMediaStore>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match query.name.filter(|name| !name.trim().is_empty()) {
        Some(name) => Json(media_store.search_by_name(&name)).into_response(),
        None => error_response(StatusCode::BAD_REQUEST, "Missing 'name' query parameter."),
    }
}

async fn get_media(
    State(media_store): State<GuardedMediaStore>,
    Path(id): Path<String>,
) -> Response {
    match media_store.find_by_id(&id) {
        Ok(record) => Json(record).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn create_media(
    State(media_store): State<GuardedMediaStore>,
    body: Result<Json<CreateMediaRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected create body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection_message(&rejection));
        }
    };

    match media_store.create(request) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_media(
    State(media_store): State<GuardedMediaStore>,
    Path(id): Path<String>,
) -> Response {
    match media_store.delete(&id) {
        Ok(()) => Json(DeletedResponse { deleted: id }).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn make_media_routes(state: ServerState) -> Router {
    Router::new()
        .route("/media", get(list_media).post(create_media))
        .route("/media/search", get(search_media))
        .route("/media/category/{category}", get(list_media_by_category))
        .route("/media/{id}", get(get_media).delete(delete_media))
        .with_state(state)
}
