// file: src/engine/backend.rs
// description: search engine abstraction injected into handlers and index bootstrap
// reference: https://docs.rs/async-trait

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Raw engine reply: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl EngineResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations the service needs from the external search engine.
///
/// Implementations must be safe to share between concurrent requests.
/// Transport failures are `SearchError::Upstream`; a reply with any status
/// code is `Ok`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, index: &str, body: Vec<u8>) -> Result<EngineResponse>;

    async fn index_exists(&self, index: &str) -> Result<bool>;

    async fn create_index(&self, index: &str, definition: &Value) -> Result<()>;

    async fn ping(&self) -> Result<bool>;
}
