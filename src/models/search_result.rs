// file: src/models/search_result.rs
// description: engine response envelope and hits extraction
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/search-search.html#search-api-response-body

use crate::error::{Result, SearchError};
use crate::models::project::ProjectDocument;
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;
use serde_json::error::Category;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Search response decoded as a generic object of raw values. Only `hits`
/// is relayed; the rest of the envelope (took, shards, ...) is ignored.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct SearchEnvelope {
    fields: HashMap<String, Box<RawValue>>,
}

impl SearchEnvelope {
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            let reason = match e.classify() {
                Category::Data => "Response is not a JSON object",
                Category::Io | Category::Syntax | Category::Eof => "Response is not valid JSON",
            };
            SearchError::Extraction(format!("{}: {}", reason, e))
        })
    }

    /// Engine-side time in milliseconds, when reported as an integer.
    pub fn took(&self) -> Option<u64> {
        self.fields
            .get("took")
            .and_then(|raw| serde_json::from_str::<Value>(raw.get()).ok())
            .and_then(|value| value.as_u64())
    }

    /// Removes `hits`; a JSON `null` counts as absent.
    pub fn take_hits(&mut self) -> Option<Box<RawValue>> {
        self.fields
            .remove("hits")
            .filter(|raw| raw.get().trim() != "null")
    }
}

/// The `hits` section of a response, kept as the engine wrote it.
#[derive(Debug)]
pub struct ExtractedHits {
    raw: Box<RawValue>,
    took: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct HitsShape {
    #[serde(default)]
    hits: Vec<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct ProjectHitsShape {
    #[serde(default)]
    hits: Vec<ProjectHit>,
}

/// A single matched project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectHit {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_score", default)]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: ProjectDocument,
}

/// Decodes an engine response and keeps only its `hits` value.
pub fn extract_hits(body: &[u8]) -> Result<ExtractedHits> {
    let mut envelope = SearchEnvelope::parse(body)?;

    let raw = envelope
        .take_hits()
        .ok_or_else(|| SearchError::Extraction("Response has no 'hits' key".to_string()))?;

    Ok(ExtractedHits {
        raw,
        took: envelope.took(),
    })
}

impl ExtractedHits {
    pub fn as_json(&self) -> &str {
        self.raw.get()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.raw.get().as_bytes().to_vec()
    }

    pub fn took(&self) -> Option<u64> {
        self.took
    }

    /// Number of entries in `hits.hits`, when the section has that shape.
    pub fn hit_count(&self) -> Option<usize> {
        serde_json::from_str::<HitsShape>(self.raw.get())
            .ok()
            .map(|shape| shape.hits.len())
    }

    /// Decodes `hits.hits` as project documents.
    pub fn projects(&self) -> Result<Vec<ProjectHit>> {
        serde_json::from_str::<ProjectHitsShape>(self.raw.get())
            .map(|shape| shape.hits)
            .map_err(|e| SearchError::Extraction(format!("Unexpected hit shape: {}", e)))
    }
}
