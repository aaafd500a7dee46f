// file: tests/http_routes.rs
// description: router tests against an in-memory search backend
// reference: https://docs.rs/tower/latest/tower/trait.ServiceExt.html#method.oneshot

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use project_search::engine::{EngineResponse, PROJECTS_INDEX, SearchBackend};
use project_search::error::{Result, SearchError};
use project_search::server::{AppState, build_router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Canned engine that records what it was asked.
struct FakeBackend {
    reply: std::result::Result<EngineResponse, String>,
    ping_reply: std::result::Result<bool, String>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeBackend {
    fn replying(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(EngineResponse::new(status, body.to_string())),
            ping_reply: Ok(true),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            ping_reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Reachable engine whose ping answers with a non-2xx status.
    fn erroring() -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(EngineResponse::new(503, json!({}).to_string())),
            ping_reply: Ok(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn last_query(&self) -> (String, Value) {
        self.calls.lock().unwrap().last().cloned().expect("engine was called")
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(&self, index: &str, body: Vec<u8>) -> Result<EngineResponse> {
        let query: Value = serde_json::from_slice(&body).expect("query is JSON");
        self.calls.lock().unwrap().push((index.to_string(), query));
        self.reply.clone().map_err(SearchError::Upstream)
    }

    async fn index_exists(&self, _index: &str) -> Result<bool> {
        Ok(true)
    }

    async fn create_index(&self, _index: &str, _definition: &Value) -> Result<()> {
        Ok(())
    }

    async fn ping(&self) -> Result<bool> {
        self.ping_reply.clone().map_err(SearchError::Upstream)
    }
}

fn app(backend: Arc<FakeBackend>) -> axum::Router {
    build_router(Arc::new(AppState::new(backend, PROJECTS_INDEX)))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, bytes)
}

fn engine_reply() -> Value {
    json!({
        "took": 5,
        "timed_out": false,
        "_shards": {"total": 1, "successful": 1},
        "hits": {
            "total": {"value": 1, "relation": "eq"},
            "max_score": 1.0,
            "hits": [{"_index": "projects", "_id": "1", "_score": 1.0, "_source": {"slug": "design-kit"}}]
        }
    })
}

#[tokio::test]
async fn users_search_requires_every_name() {
    let backend = FakeBackend::replying(200, engine_reply());
    let (status, content_type, body) = get(app(backend.clone()), "/users?query=Jane%20Doe").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let (index, query) = backend.last_query();
    assert_eq!(index, "projects");
    assert_eq!(
        query,
        json!({
            "query": {
                "bool": {
                    "must": [
                        {"nested": {"path": "users", "query": {"term": {"users.name": "jane"}}}},
                        {"nested": {"path": "users", "query": {"term": {"users.name": "doe"}}}}
                    ]
                }
            }
        })
    );

    let hits: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(hits, engine_reply()["hits"]);
}

#[tokio::test]
async fn hashtags_search_requires_every_tag() {
    let backend = FakeBackend::replying(200, engine_reply());
    let (status, _, _) = get(app(backend.clone()), "/hashtags?query=go%20web").await;

    assert_eq!(status, StatusCode::OK);
    let (_, query) = backend.last_query();
    let must = query["query"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must.len(), 2);
    assert_eq!(must[0]["nested"]["query"]["term"]["hashtags.name"], "go");
    assert_eq!(must[1]["nested"]["query"]["term"]["hashtags.name"], "web");
}

#[tokio::test]
async fn fuzzy_search_sends_raw_query() {
    let backend = FakeBackend::replying(200, engine_reply());
    let (status, _, body) = get(app(backend.clone()), "/fuzzy?query=desgin").await;

    assert_eq!(status, StatusCode::OK);
    let (_, query) = backend.last_query();
    assert_eq!(
        query,
        json!({
            "query": {
                "multi_match": {
                    "query": "desgin",
                    "fields": ["slug", "description"],
                    "fuzziness": "AUTO"
                }
            }
        })
    );

    let hits: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(hits["hits"][0]["_source"]["slug"], "design-kit");
    assert!(hits.get("took").is_none());
}

#[tokio::test]
async fn empty_query_is_forwarded() {
    let backend = FakeBackend::replying(200, json!({"hits": {"total": 0, "hits": []}}));
    let (status, _, body) = get(app(backend.clone()), "/hashtags?query=").await;

    assert_eq!(status, StatusCode::OK);
    let (_, query) = backend.last_query();
    assert_eq!(
        query["query"]["bool"]["must"][0]["nested"]["query"]["term"]["hashtags.name"],
        ""
    );
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"total": 0, "hits": []}));
}

#[tokio::test]
async fn missing_query_parameter_is_rejected_before_the_engine() {
    let backend = FakeBackend::replying(200, engine_reply());
    let (status, _, _) = get(app(backend.clone()), "/users").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn engine_status_is_mirrored() {
    let reply = json!({"hits": {"total": 0, "hits": []}, "_shards": {"failed": 1}});
    let backend = FakeBackend::replying(206, reply);
    let (status, _, _) = get(app(backend), "/fuzzy?query=x").await;

    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
}

#[tokio::test]
async fn engine_failure_is_generic_500() {
    let backend = FakeBackend::failing("connection refused 10.1.2.3:9200");
    let (status, _, body) = get(app(backend), "/users?query=jane").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(body).unwrap();
    assert_eq!(text, "Elasticsearch search error");
}

#[tokio::test]
async fn response_without_hits_is_500() {
    let backend = FakeBackend::replying(
        404,
        json!({"error": {"type": "index_not_found_exception"}, "status": 404}),
    );
    let (status, _, body) = get(app(backend), "/hashtags?query=go").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), "Error extracting search hits");
}

#[tokio::test]
async fn health_reports_engine_state() {
    let (status, _, body) = get(app(FakeBackend::replying(200, json!({}))), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["overall_status"], "healthy");
    assert_eq!(report["checks"][0]["component"], "elasticsearch");

    let (status, _, body) = get(app(FakeBackend::failing("down")), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["overall_status"], "unhealthy");
}

#[tokio::test]
async fn health_is_unavailable_when_engine_answers_with_error_status() {
    let (status, content_type, body) = get(app(FakeBackend::erroring()), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["overall_status"], "unhealthy");
    assert_eq!(report["checks"][0]["status"], "unhealthy");
    assert_eq!(report["checks"][0]["message"], "Engine answered with an error status");
}
