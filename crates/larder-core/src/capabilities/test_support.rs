//! Local HTTP stand-ins for the chat-completions and page-summary services.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// One request received by the completions stub.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct CompletionsState {
    status: StatusCode,
    reply: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub(crate) struct CompletionsStub {
    /// Value for `ChatConfig::base_url`.
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CompletionsStub {
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `/v1/chat/completions`, answering every call with `reply` as the first choice,
/// or with `status` and a plain error body when it is not a success.
pub(crate) async fn spawn_completions(status: StatusCode, reply: &str) -> CompletionsStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = CompletionsState {
        status,
        reply: reply.to_string(),
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(state);

    let base = serve(app).await;
    CompletionsStub {
        base_url: format!("{}/v1", base),
        requests,
    }
}

async fn completions(
    State(state): State<CompletionsState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest {
            authorization,
            body,
        });

    if !state.status.is_success() {
        return (state.status, "upstream unavailable").into_response();
    }
    Json(json!({
        "id": "chatcmpl-local",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": state.reply}}
        ]
    }))
    .into_response()
}

/// Serve `/summary/:title`: "Onion" has a thumbnail, "Durian" has none, anything else is 404.
pub(crate) async fn spawn_summaries() -> String {
    let app = Router::new().route("/summary/:title", get(summary));
    format!("{}/summary", serve(app).await)
}

async fn summary(Path(title): Path<String>) -> Response {
    match title.as_str() {
        "Onion" | "Red chili" => Json(json!({
            "title": &title,
            "thumbnail": {
                "source": format!("https://upload.wikimedia.org/{}.jpg", title.replace(' ', "_")),
                "width": 320
            }
        }))
        .into_response(),
        "Durian" => Json(json!({"title": "Durian", "extract": "A fruit."})).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"title": "Not found."}))).into_response(),
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}
