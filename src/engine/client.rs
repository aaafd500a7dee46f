// file: src/engine/client.rs
// description: Elasticsearch REST client over reqwest
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/rest-apis.html

use crate::config::EngineConfig;
use crate::engine::backend::{EngineResponse, SearchBackend};
use crate::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ElasticsearchClient {
    client: Client,
    config: EngineConfig,
}

impl ElasticsearchClient {
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.url
            );
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!("Search engine client configured for {}", config.url);

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(username) => request.basic_auth(username, self.config.password.as_ref()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<reqwest::Response> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| SearchError::Upstream(format!("{} request failed: {}", what, e)))
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    async fn search(&self, index: &str, body: Vec<u8>) -> Result<EngineResponse> {
        let url = self.endpoint(&format!("{}/_search", index));
        debug!("POST {} ({} bytes)", url, body.len());

        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let response = self.send(request, "Search").await?;
        let status = response.status().as_u16();

        let body = response.bytes().await.map_err(|e| {
            SearchError::Upstream(format!("Failed to read search response body: {}", e))
        })?;

        Ok(EngineResponse::new(status, body.to_vec()))
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        let url = self.endpoint(index);
        debug!("HEAD {}", url);

        let response = self.send(self.client.head(&url), "Index check").await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(SearchError::Upstream(format!(
                "Index check error for '{}': status {}",
                index, status
            ))),
        }
    }

    async fn create_index(&self, index: &str, definition: &Value) -> Result<()> {
        let url = self.endpoint(index);
        debug!("PUT {}", url);

        let response = self
            .send(self.client.put(&url).json(definition), "Index create")
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::Upstream(format!(
                "Failed to create index '{}' with status {}: {}",
                index, status, error_text
            )));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<bool> {
        debug!("Checking search engine connection");

        let response = self.send(self.client.get(self.base_url()), "Ping").await?;
        Ok(response.status().is_success())
    }
}
