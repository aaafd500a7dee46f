// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod project;
pub mod search_result;

pub use project::{ProjectDocument, Tag};
pub use search_result::{ExtractedHits, ProjectHit, SearchEnvelope, extract_hits};
