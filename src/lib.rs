//! Media catalog server library.
//!
//! Holds the JSON-backed media store, the HTTP API built on top of it and a
//! small async client for talking to a running server.

pub mod client;
pub mod config;
pub mod media_store;
pub mod server;

pub use media_store::{JsonMediaStore, MediaStore};
