// file: src/engine/mod.rs
// description: search engine client module exports
// reference: internal module structure

pub mod backend;
pub mod client;
pub mod schema;

pub use backend::{EngineResponse, SearchBackend};
pub use client::ElasticsearchClient;
pub use schema::{IndexManager, IndexStatus, PROJECTS_INDEX};
