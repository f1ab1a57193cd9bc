use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use base64::{Engine as _, engine::general_purpose};
use color_eyre::Result;
use common_types::EXAMPLE_ANALYSIS_JSON;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const GLASSES_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0 pretend these are glasses";
pub const GARBLED_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0 this one confuses the model";

/// Serves a few fixed images and records every request uri it sees.
#[derive(Clone)]
pub struct FakeImageHost {
    pub base_url: String,
    seen: Arc<Mutex<Vec<String>>>,
}

impl FakeImageHost {
    pub async fn spawn() -> Result<Self> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .fallback(serve_image)
            .with_state(seen.clone());
        let base_url = spawn_router(app).await?;
        Ok(Self { base_url, seen })
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("lock").clone()
    }
}

async fn serve_image(State(seen): State<Arc<Mutex<Vec<String>>>>, uri: Uri) -> Response {
    seen.lock().expect("lock").push(uri.to_string());
    match uri.path() {
        "/glasses.jpg" => GLASSES_BYTES.to_vec().into_response(),
        "/garbled.jpg" => GARBLED_BYTES.to_vec().into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Ollama-style `/api/chat` endpoint. Answers with the example analysis, or with broken
/// JSON when it receives the garbled image.
#[derive(Clone)]
pub struct FakeModel {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
}

impl FakeModel {
    pub async fn spawn() -> Result<Self> {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/api/chat", post(chat))
            .with_state(calls.clone());
        let base_url = spawn_router(app).await?;
        Ok(Self { base_url, calls })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn chat(State(calls): State<Arc<AtomicUsize>>, Json(request): Json<Value>) -> String {
    calls.fetch_add(1, Ordering::SeqCst);
    let image = request["messages"][0]["images"][0].as_str().unwrap_or_default();
    let content = if image == general_purpose::STANDARD.encode(GARBLED_BYTES) {
        "{\"visual_dimensions\": {\"rim_presence\": oops".to_string()
    } else {
        EXAMPLE_ANALYSIS_JSON.to_string()
    };

    let chars: Vec<char> = content.chars().collect();
    let mut lines: Vec<String> = chars
        .chunks(64)
        .map(|piece| {
            let piece: String = piece.iter().collect();
            json!({ "message": { "role": "assistant", "content": piece }, "done": false })
                .to_string()
        })
        .collect();
    lines.push(json!({ "message": { "role": "assistant", "content": "" }, "done": true }).to_string());
    lines.join("\n")
}

async fn spawn_router(app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(format!("http://{addr}"))
}
