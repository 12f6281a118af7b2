use axum::extract::FromRef;

use crate::media_store::MediaStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedMediaStore = Arc<dyn MediaStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub media_store: GuardedMediaStore,
}

impl ServerState {
    pub fn new(config: ServerConfig, media_store: GuardedMediaStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            media_store,
        }
    }
}

impl FromRef<ServerState> for GuardedMediaStore {
    fn from_ref(input: &ServerState) -> Self {
        input.media_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
