// file: src/server/handlers.rs
// description: per-mode search handlers and health endpoint
// reference: https://docs.rs/axum/latest/axum/extract/index.html

use crate::engine::SearchBackend;
use crate::error::{Result, SearchError};
use crate::models::{ExtractedHits, extract_hits};
use crate::query::SearchMode;
use crate::utils::{HealthCheck, HealthReport};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

/// Shared by every request; the backend is the only cross-request resource.
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
    pub index: String,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// Engine status plus the hits to relay.
#[derive(Debug)]
pub struct SearchOutcome {
    pub status: StatusCode,
    pub hits: ExtractedHits,
}

impl IntoResponse for SearchOutcome {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.hits.into_bytes(),
        )
            .into_response()
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}

pub async fn handle_users_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(&state, SearchMode::Users, &params.query).await
}

pub async fn handle_hashtags_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(&state, SearchMode::Hashtags, &params.query).await
}

pub async fn handle_fuzzy_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(&state, SearchMode::Fuzzy, &params.query).await
}

async fn run_search(state: &AppState, mode: SearchMode, raw: &str) -> Response {
    let span = info_span!("search", mode = mode.as_str(), request_id = %Uuid::new_v4());

    async {
        match execute_search(state, mode, raw).await {
            Ok(outcome) => outcome.into_response(),
            Err(e) => {
                error!("Search failed: {}", e);
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// Builds the query for `mode`, sends it to the engine and extracts the hits.
pub async fn execute_search(
    state: &AppState,
    mode: SearchMode,
    raw: &str,
) -> Result<SearchOutcome> {
    let start = Instant::now();

    let body = mode.build(raw).to_json()?;
    debug!("Query: {}", String::from_utf8_lossy(&body));

    let response = state.backend.search(&state.index, body).await?;

    let status = StatusCode::from_u16(response.status).map_err(|_| {
        SearchError::Upstream(format!("Invalid status code {}", response.status))
    })?;

    let hits = extract_hits(&response.body)?;

    info!(
        status = status.as_u16(),
        hits = ?hits.hit_count(),
        took_ms = ?hits.took(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Search complete"
    );

    Ok(SearchOutcome { status, hits })
}

pub async fn handle_health(State(state): State<Arc<AppState>>) -> Response {
    let start = Instant::now();

    let check = match state.backend.ping().await {
        Ok(true) => HealthCheck::healthy("elasticsearch", start.elapsed()),
        Ok(false) => HealthCheck::unhealthy(
            "elasticsearch",
            "Engine answered with an error status".to_string(),
            start.elapsed(),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            HealthCheck::unhealthy(
                "elasticsearch",
                "Engine unreachable".to_string(),
                start.elapsed(),
            )
        }
    };

    let report = HealthReport::new(vec![check], env!("CARGO_PKG_VERSION").to_string());
    let status = if report.is_serving() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report)).into_response()
}
