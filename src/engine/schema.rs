// file: src/engine/schema.rs
// description: projects index mapping and startup bootstrap
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/nested.html

use crate::engine::backend::SearchBackend;
use crate::error::Result;
use serde_json::{Value, json};
use tracing::info;

/// Collection every search runs against.
pub const PROJECTS_INDEX: &str = "projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    AlreadyExists,
    Created,
}

pub struct IndexManager<'a> {
    backend: &'a dyn SearchBackend,
}

impl<'a> IndexManager<'a> {
    pub fn new(backend: &'a dyn SearchBackend) -> Self {
        Self { backend }
    }

    /// Creates `index` with the projects mapping unless it already exists.
    /// The mapping is never updated on an existing index.
    pub async fn ensure_index(&self, index: &str) -> Result<IndexStatus> {
        if self.backend.index_exists(index).await? {
            info!("Index '{}' already exists", index);
            return Ok(IndexStatus::AlreadyExists);
        }

        info!("Creating index '{}'", index);
        self.backend
            .create_index(index, &Self::projects_mapping())
            .await?;

        info!("Index '{}' created successfully", index);
        Ok(IndexStatus::Created)
    }

    /// Mapping for project documents: flat text fields plus nested
    /// `users` and `hashtags` entries.
    pub fn projects_mapping() -> Value {
        let nested_entry = json!({
            "type": "nested",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "text" },
                "created_at": { "type": "date" }
            }
        });

        json!({
            "mappings": {
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "text" },
                    "slug": { "type": "text" },
                    "description": { "type": "text" },
                    "users": nested_entry.clone(),
                    "hashtags": nested_entry
                }
            }
        })
    }
}
