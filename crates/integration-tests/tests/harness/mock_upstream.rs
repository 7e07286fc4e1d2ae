//! Mock chat-completions backend for integration tests
//!
//! Answers every variant request in one of the response shapes image models
//! are known to use, and records what it was sent.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// How the mock answers a variant request
#[derive(Debug, Clone)]
pub enum Reply {
    /// `choices[0].message.images[0].image_url.url`
    MessageImages,
    /// `choices[0].message.content` holding a data URL
    TextContent,
    /// `choices[0].message.content[]` with an `image_url` part
    ContentParts,
    /// `choices[0].inline_data`
    InlineData,
    /// Plain prose where the image should be
    Prose(String),
    /// Fail any request whose prompt contains the marker with a 500
    FailWhenPromptContains(String),
    /// 200 with a `text/plain` body that is not JSON
    Garbage,
    /// Wait before answering as `MessageImages`
    Stall(Duration),
}

/// One request seen by the mock
#[derive(Debug, Clone)]
pub struct Recorded {
    pub text: String,
    pub image_url: String,
    pub model: String,
    pub max_tokens: u64,
    pub response_format: Value,
    pub authorization: Option<String>,
    pub title: Option<String>,
    /// Image reference the mock answered with, if any
    pub answered: Option<String>,
}

/// Mock chat-completions backend
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    reply: Reply,
    request_count: AtomicU32,
    recorded: Mutex<Vec<Recorded>>,
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            reply,
            request_count: AtomicU32::new(0),
            recorded: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`, the provider appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of chat-completions requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Requests received so far, in arrival order
    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    /// The image the mock returned for the request whose text contains `prompt`
    pub fn answer_for(&self, prompt: &str) -> Option<String> {
        self.recorded()
            .into_iter()
            .find(|r| r.text.contains(prompt))
            .and_then(|r| r.answered)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn fingerprint(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let parts = body["messages"][0]["content"].as_array().cloned().unwrap_or_default();
    let text = parts
        .iter()
        .find(|p| p["type"] == "text")
        .and_then(|p| p["text"].as_str())
        .unwrap_or_default()
        .to_owned();
    let image_url = parts
        .iter()
        .find(|p| p["type"] == "image_url")
        .and_then(|p| p["image_url"]["url"].as_str())
        .unwrap_or_default()
        .to_owned();

    let hash = fingerprint(&text);

    // Scramble completion order
    tokio::time::sleep(Duration::from_millis(hash % 40)).await;

    if let Reply::Stall(delay) = &state.reply {
        tokio::time::sleep(*delay).await;
    }

    let url = format!("https://images.test/{hash:016x}.png");
    let payload = format!("{hash:016x}");

    let (response, answered) = match &state.reply {
        Reply::FailWhenPromptContains(marker) if text.contains(marker.as_str()) => (
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"message": "mock upstream failure"}})),
            )
                .into_response(),
            None,
        ),
        Reply::Garbage => (
            (
                StatusCode::OK,
                [(axum::http::header::CONTENT_TYPE, "text/plain")],
                "<html>upstream maintenance</html>",
            )
                .into_response(),
            None,
        ),
        Reply::MessageImages | Reply::FailWhenPromptContains(_) | Reply::Stall(_) => (
            completion(json!({
                "role": "assistant",
                "content": "",
                "images": [{"type": "image_url", "image_url": {"url": url}}]
            })),
            Some(url),
        ),
        Reply::TextContent => {
            let data_url = format!("data:image/png;base64,{payload}");
            (
                completion(json!({"role": "assistant", "content": data_url})),
                Some(data_url),
            )
        }
        Reply::ContentParts => (
            completion(json!({
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "here you go"},
                    {"type": "image_url", "image_url": {"url": url}}
                ]
            })),
            Some(url),
        ),
        Reply::InlineData => {
            let response = Json(json!({
                "choices": [{
                    "index": 0,
                    "inline_data": {"mime_type": "image/jpeg", "data": payload}
                }]
            }))
            .into_response();
            (response, Some(format!("data:image/jpeg;base64,{payload}")))
        }
        Reply::Prose(prose) => (completion(json!({"role": "assistant", "content": prose})), None),
    };

    state.recorded.lock().unwrap().push(Recorded {
        text,
        image_url,
        model: body["model"].as_str().unwrap_or_default().to_owned(),
        max_tokens: body["max_tokens"].as_u64().unwrap_or_default(),
        response_format: body["response_format"].clone(),
        authorization: header(&headers, "authorization"),
        title: header(&headers, "x-title"),
        answered,
    });

    response
}

fn completion(message: Value) -> Response {
    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": message, "finish_reason": "stop"}]
    }))
    .into_response()
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}
