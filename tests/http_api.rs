//! HTTP API tests driven through the router with `oneshot`, no socket.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use prompt_enhancer::PromptService;
use prompt_enhancer::config::Config;
use prompt_enhancer::http::{HttpState, router};
use async_trait::async_trait;
use prompt_enhancer::storage::{MemoryStore, NewPromptRecord, PromptStore, SavedPrompt};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app(token: Option<&str>) -> axum::Router {
    let mut config = Config::default();
    config.storage.backend = "memory".to_string();
    config.runtime.bearer_token = token.map(str::to_string);
    router(HttpState {
        config: Arc::new(config),
        service: PromptService::with_store(Arc::new(MemoryStore::new())),
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let resp = app(None).oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn frameworks_lists_catalog() {
    let resp = app(None).oneshot(get("/api/frameworks")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["TCREI", "RSTI", "TFCDC"]);
}

#[tokio::test]
async fn enhance_returns_prompt_and_saves_for_user() {
    let app = app(None);
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/enhance",
            json!({
                "input": "Help me write a blog post about coffee",
                "parameters": {
                    "audienceLevel": "intermediate",
                    "tone": "professional",
                    "outputFormat": "article",
                    "wordCount": "800"
                },
                "userId": "alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["enhanced"]["useCase"], "general");
    assert!(
        body["enhanced"]["finalPrompt"]
            .as_str()
            .unwrap()
            .contains("approximately 800 words")
    );
    assert_eq!(body["candidates"].as_array().unwrap().len(), 3);
    let saved_id = body["savedId"].as_str().unwrap().to_string();

    let resp = app.oneshot(get("/api/prompts?userId=alice")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    assert_eq!(listed[0]["id"], saved_id.as_str());
    assert_eq!(listed[0]["userId"], "alice");
}

#[tokio::test]
async fn enhance_without_parameters_is_bad_request() {
    let resp = app(None)
        .oneshot(post_json("/api/enhance", json!({"input": "write a poem"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "validation");
    let message = body["error"]["message"].as_str().unwrap();
    for field in ["audienceLevel", "tone", "outputFormat", "wordCount"] {
        assert!(message.contains(field), "{}", message);
    }
}

#[tokio::test]
async fn enhance_rejects_unknown_tone() {
    let resp = app(None)
        .oneshot(post_json(
            "/api/enhance",
            json!({
                "input": "write a poem",
                "parameters": {
                    "audienceLevel": "beginner",
                    "tone": "sarcastic",
                    "outputFormat": "list",
                    "wordCount": 200
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_and_list_recent() {
    let app = app(None);
    let record = json!({
        "originalInput": "draft a slogan",
        "transformedPrompt": "You are an experienced marketing strategist...",
        "frameworks": ["TCREI"],
        "parameters": {
            "audienceLevel": "beginner",
            "tone": "playful",
            "outputFormat": "list",
            "wordCount": 100
        },
        "useCase": "marketing",
        "userId": "dana"
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/prompts", record))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app.oneshot(get("/api/prompts?limit=5")).await.unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["parameters"]["tone"], "playful");
}

#[tokio::test]
async fn bearer_token_guards_api_but_not_health() {
    let app = app(Some("s3cret"));

    let resp = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(get("/api/frameworks")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"]["code"], "unauthorized");

    let req = Request::builder()
        .uri("/api/frameworks")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn out_of_range_limit_is_invalid_params() {
    let resp = app(None).oneshot(get("/api/prompts?limit=0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["code"], "invalid_params");
}

fn enhance_body(word_count: Value) -> Value {
    json!({
        "input": "write a poem",
        "parameters": {
            "audienceLevel": "beginner",
            "tone": "casual",
            "outputFormat": "list",
            "wordCount": word_count
        }
    })
}

async fn assert_error(resp: axum::response::Response, status: StatusCode, code: &str) {
    assert_eq!(resp.status(), status);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], code, "{}", body);
    assert!(body["error"]["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn undecodable_word_count_is_validation_error() {
    for word_count in [json!("lots"), json!(-5), json!(5_000_000_000u64)] {
        let resp = app(None)
            .oneshot(post_json("/api/enhance", enhance_body(word_count)))
            .await
            .unwrap();
        assert_error(resp, StatusCode::BAD_REQUEST, "validation").await;
    }
}

#[tokio::test]
async fn missing_input_is_validation_error() {
    let resp = app(None)
        .oneshot(post_json("/api/enhance", json!({"parameters": {}})))
        .await
        .unwrap();
    assert_error(resp, StatusCode::BAD_REQUEST, "validation").await;
}

#[tokio::test]
async fn malformed_saved_record_is_validation_error() {
    let resp = app(None)
        .oneshot(post_json("/api/prompts", json!({"originalInput": "x"})))
        .await
        .unwrap();
    assert_error(resp, StatusCode::BAD_REQUEST, "validation").await;
}

#[tokio::test]
async fn non_numeric_limit_is_invalid_params() {
    let resp = app(None).oneshot(get("/api/prompts?limit=abc")).await.unwrap();
    assert_error(resp, StatusCode::BAD_REQUEST, "invalid_params").await;
}

/// Store whose saves outlast any short request timeout.
struct SlowStore;

#[async_trait]
impl PromptStore for SlowStore {
    async fn save(&self, _record: NewPromptRecord) -> prompt_enhancer::Result<String> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok("late".to_string())
    }

    async fn list_by_user(&self, _user_id: &str) -> prompt_enhancer::Result<Vec<SavedPrompt>> {
        Ok(Vec::new())
    }

    async fn list_recent(&self, _limit: usize) -> prompt_enhancer::Result<Vec<SavedPrompt>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn slow_request_times_out_with_408() {
    let mut config = Config::default();
    config.storage.backend = "memory".to_string();
    config.server.request_timeout_ms = 10;
    let app = router(HttpState {
        config: Arc::new(config),
        service: PromptService::with_store(Arc::new(SlowStore)),
    });

    let mut body = enhance_body(json!(200));
    body["userId"] = json!("erin");
    let resp = app.oneshot(post_json("/api/enhance", body)).await.unwrap();
    assert_error(resp, StatusCode::REQUEST_TIMEOUT, "timeout").await;
}
