//! HTTP transport module for prompt-enhancer
//!
//! Axum-based JSON API consumed by the web front end: enhancement, the
//! framework catalog, and saved-prompt history. Optional bearer authentication.

use crate::config::Config;
use crate::engine::{Enhancement, PromptService};
use crate::error::{EnhancerError, Result};
use crate::frameworks::FrameworkId;
use crate::parameters::{PromptParameters, RawPromptParameters};
use crate::storage::{NewPromptRecord, PromptStore, SavedPrompt};
use axum::{
    Json, Router,
    body::Body,
    error_handling::HandleErrorLayer,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<Config>,
    pub service: PromptService,
}

/// Error wrapper that renders as `{"error": {"code", "message"}}`.
#[derive(Debug)]
pub struct ApiError(pub EnhancerError);

impl From<EnhancerError> for ApiError {
    fn from(err: EnhancerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EnhancerError::Validation { .. } | EnhancerError::InvalidParams { .. } => {
                StatusCode::BAD_REQUEST
            }
            EnhancerError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            EnhancerError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        (
            status,
            Json(json!({"error": {"code": self.0.code(), "message": self.0.to_string()}})),
        )
            .into_response()
    }
}

/// Undecodable bodies are malformed structured input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(EnhancerError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(EnhancerError::InvalidParams {
            message: rejection.body_text(),
        })
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub input: String,
    #[serde(default)]
    pub parameters: RawPromptParameters,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FrameworkInfo {
    pub id: FrameworkId,
    pub components: &'static [&'static str],
    pub description: &'static str,
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Framework catalog endpoint
pub async fn frameworks_handler() -> Json<Vec<FrameworkInfo>> {
    Json(
        FrameworkId::ALL
            .iter()
            .map(|&id| FrameworkInfo {
                id,
                components: id.components(),
                description: id.description(),
            })
            .collect(),
    )
}

/// Detect, classify, transform and (for signed-in callers) save
pub async fn enhance_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<EnhanceRequest>, JsonRejection>,
) -> ApiResult<Enhancement> {
    let Json(req) = payload?;
    let params = PromptParameters::try_from(req.parameters)?;
    let user_id = req
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    let outcome = state
        .service
        .enhance_and_save(&req.input, &params, user_id)
        .await?;
    Ok(Json(outcome))
}

fn require_store(state: &HttpState) -> Result<&Arc<dyn PromptStore>> {
    state.service.store().ok_or_else(|| EnhancerError::Config {
        message: "no prompt store configured".to_string(),
    })
}

/// Save a prompt record produced elsewhere
pub async fn save_prompt_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<NewPromptRecord>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Json(record) = payload?;
    let id = require_store(&state)?.save(record).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Saved prompts for one user, or the latest across everyone
pub async fn list_prompts_handler(
    State(state): State<HttpState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<SavedPrompt>> {
    let Query(query) = query?;
    let store = require_store(&state)?;
    let limit = query.limit.unwrap_or(state.config.server.list_limit);
    if !(1..=200).contains(&limit) {
        return Err(EnhancerError::InvalidParams {
            message: format!("limit must be between 1 and 200, got {}", limit),
        }
        .into());
    }
    let prompts = match query.user_id.as_deref().map(str::trim) {
        Some(user_id) if !user_id.is_empty() => {
            let mut all = store.list_by_user(user_id).await?;
            all.truncate(limit);
            all
        }
        _ => store.list_recent(limit).await?,
    };
    Ok(Json(prompts))
}

async fn require_bearer(
    State(token): State<Option<String>>,
    req: axum::http::Request<Body>,
    next: middleware::Next,
) -> Response {
    let Some(expected) = token else {
        return next.run(req).await;
    };
    if req.uri().path() == "/health" {
        return next.run(req).await;
    }
    let headers: &HeaderMap = req.headers();
    let ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|v| v == format!("Bearer {}", expected))
        .unwrap_or(false);
    if ok {
        next.run(req).await
    } else {
        ApiError(EnhancerError::Unauthorized {
            message: "missing or invalid bearer token".to_string(),
        })
        .into_response()
    }
}

/// Build the application router
pub fn router(state: HttpState) -> Router {
    let timeout_ms = state.config.server.request_timeout_ms;
    let token = state.config.runtime.bearer_token.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/frameworks", get(frameworks_handler))
        .route("/api/enhance", axum::routing::post(enhance_handler))
        .route(
            "/api/prompts",
            get(list_prompts_handler).post(save_prompt_handler),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    let err = if err.is::<tower::timeout::error::Elapsed>() {
                        EnhancerError::Timeout {
                            operation: "request".to_string(),
                            timeout_ms,
                        }
                    } else {
                        EnhancerError::Internal {
                            message: err.to_string(),
                        }
                    };
                    ApiError(err)
                }))
                .timeout(Duration::from_millis(timeout_ms)),
        )
        .layer(middleware::from_fn_with_state(token, require_bearer))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>, service: PromptService) -> anyhow::Result<()> {
    if config.runtime.bearer_token.is_none() {
        tracing::warn!("PE_BEARER_TOKEN not set; the HTTP API accepts unauthenticated requests");
    }
    let bind = config.server.http_bind;
    let app = router(HttpState { config, service });
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("prompt-enhancer HTTP API listening on {}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}
