// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod query;
pub mod server;
pub mod utils;

pub use config::{Config, EngineConfig, ServerConfig};
pub use engine::{ElasticsearchClient, EngineResponse, IndexManager, PROJECTS_INDEX, SearchBackend};
pub use error::{Result, SearchError};
pub use models::{ExtractedHits, ProjectDocument, extract_hits};
pub use query::{SearchMode, SearchQuery};
pub use server::{AppState, build_router};
pub use utils::{HealthCheck, HealthReport, HealthStatus, Validator};
