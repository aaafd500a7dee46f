// file: src/server/mod.rs
// description: HTTP surface module exports
// reference: internal module structure

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, SearchParams};
pub use routes::{build_router, serve};
