use std::any::Any;
use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::search::{SearchError, SearchService};
use crate::upstream::CompletionClient;

use super::models::{ErrorBody, HealthResponse, SearchResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn bad_request(reason: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(reason)))
}

fn internal_error(message: impl Into<String>) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(message)))
}

fn search_to_http_error(e: SearchError) -> ApiError {
    match e {
        SearchError::Invalid(reason) => bad_request(reason.to_string()),
        SearchError::Upstream(upstream) => {
            error!(error = %upstream, status = upstream.status(), "search failed");
            internal_error(upstream.to_string())
        }
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn search<C>(
    State(search): State<Arc<SearchService<C>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SearchResponse>, ApiError>
where
    C: CompletionClient + Send + Sync + 'static,
{
    let body = body.map_err(|e| {
        warn!(error = %e, "failed to read request body");
        bad_request(format!("could not read request body: {e}"))
    })?;

    let raw: Value = serde_json::from_slice(&body)
        .map_err(|e| bad_request(format!("invalid JSON body: {e}")))?;

    info!("POST /search");

    let result = search.search_raw(&raw).await.map_err(search_to_http_error)?;

    info!(chars = result.text.len(), "search complete");
    Ok(Json(SearchResponse::text(result.text)))
}

/// Pre-flight requests get an empty 200; everything else unrouted is a 404.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found"))).into_response()
    }
}

pub fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("panic while handling request");
    internal_error("Internal server error").into_response()
}
