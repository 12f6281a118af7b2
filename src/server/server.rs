use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{error, info};

use crate::media_store::CategoryCounts;
use tower_http::services::ServeDir;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{log_requests, make_media_routes, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize, Deserialize, Debug)]
pub struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub media_count: usize,
    pub categories: CategoryCounts,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let categories = state.media_store.count_by_category();
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        media_count: categories.total(),
        categories,
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, media_store: GuardedMediaStore) -> Router {
    let state = ServerState::new(config.clone(), media_store);

    let media_routes = make_media_routes(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            info!("Serving frontend from {}", frontend_path);
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    #[allow(unused_mut)]
    let mut app: Router = home_router.merge(media_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app.layer(middleware::from_fn_with_state(state, log_requests))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down.");
}

pub async fn run_server(
    media_store: GuardedMediaStore,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, media_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
