use crate::{TextStream, VisionModel, collect_text};
use async_stream::try_stream;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use bon::bon;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::io::StreamReader;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model reported an error mid-stream: {0}")]
    Stream(String),
    #[error("response stream ended before the model signalled completion")]
    Incomplete,
}

pub type LlmResult<T> = Result<T, LlmError>;

/// One chat turn in the Ollama `/api/chat` format. Images are base64 without a data-url prefix.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a Value>,
    options: ChatOptions,
}

/// Sent with every request; not configurable.
const TEMPERATURE: f32 = 0.0;

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatChunk {
    #[serde(default)]
    message: Option<ChunkMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ChunkMessage {
    #[serde(default)]
    content: String,
}

#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[bon]
impl OllamaClient {
    #[builder(start_fn = with_base_url)]
    #[must_use]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        model: Option<String>,
        http: Option<reqwest::Client>,
    ) -> Self {
        Self {
            http: http.unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_default(),
        }
    }

    pub async fn prepare_message(&self, prompt: &str, images: &[&Path]) -> LlmResult<Message> {
        let mut encoded = Vec::with_capacity(images.len());
        for path in images {
            let bytes = fs::read(path).await?;
            encoded.push(general_purpose::STANDARD.encode(&bytes));
        }
        Ok(Message {
            role: "user".to_string(),
            content: prompt.to_string(),
            images: encoded,
        })
    }

    #[builder]
    pub async fn chat(
        &self,
        #[builder(start_fn)] prompt: &str,
        images: Option<&[&Path]>,
        format: Option<&Value>,
    ) -> LlmResult<String> {
        let msg = self
            .prepare_message(prompt, images.unwrap_or_default())
            .await?;
        let stream = self.call_stream(vec![msg], format).await?;
        collect_text(stream).await
    }

    #[builder]
    pub async fn chat_stream(
        &self,
        #[builder(start_fn)] prompt: &str,
        images: Option<&[&Path]>,
        format: Option<&Value>,
    ) -> LlmResult<TextStream> {
        let msg = self
            .prepare_message(prompt, images.unwrap_or_default())
            .await?;
        self.call_stream(vec![msg], format).await
    }

    /// Start a streamed chat. The returned stream yields content fragments as they arrive
    /// and ends once the server reports `done`.
    pub async fn call_stream(
        &self,
        messages: Vec<Message>,
        format: Option<&Value>,
    ) -> LlmResult<TextStream> {
        let req_body = self.build_request(messages, format);
        let url = format!("{}/api/chat", self.base_url);
        debug!(model = %self.model, %url, "Starting streamed chat");
        let response = self.http.post(url).json(&req_body).send().await?;
        if !response.status().is_success() {
            return Err(LlmError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let stream_bytes = response.bytes_stream().map_err(std::io::Error::other);
        let reader = StreamReader::new(stream_bytes);
        let mut lines = BufReader::new(reader).lines();
        Ok(Box::pin(try_stream! {
            let mut finished = false;
            while let Some(line) = lines.next_line().await.map_err(LlmError::Io)? {
                let line = line.trim();
                if line.is_empty() { continue; }
                let chunk = serde_json::from_str::<ChatChunk>(line).map_err(LlmError::Json)?;
                if let Some(error) = chunk.error {
                    Err(LlmError::Stream(error))?;
                }
                if let Some(message) = chunk.message {
                    if !message.content.is_empty() {
                        yield message.content;
                    }
                }
                if chunk.done {
                    finished = true;
                    break;
                }
            }
            if !finished {
                Err(LlmError::Incomplete)?;
            }
        }))
    }

    fn build_request<'a>(
        &'a self,
        messages: Vec<Message>,
        format: Option<&'a Value>,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages,
            stream: true,
            format,
            options: ChatOptions {
                temperature: TEMPERATURE,
            },
        }
    }
}

#[async_trait]
impl VisionModel for OllamaClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn stream_chat(
        &self,
        prompt: &str,
        images: &[&Path],
        format: Option<&Value>,
    ) -> LlmResult<TextStream> {
        let msg = self.prepare_message(prompt, images).await?;
        self.call_stream(vec![msg], format).await
    }
}
