pub mod config;
mod http_layers;
mod media_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use media_routes::{make_media_routes, DeletedResponse, ErrorResponse};
#[allow(unused_imports)] // Used by main.rs
pub use server::{make_app, run_server, ServerStats};
