use crate::LlmResult;
use async_trait::async_trait;
use futures_util::{Stream, TryStreamExt};
use serde_json::Value;
use std::path::Path;
use std::pin::Pin;

/// Incrementally produced response text. Finite and not restartable.
pub type TextStream = Pin<Box<dyn Stream<Item = LlmResult<String>> + Send>>;

/// A vision-capable chat model that streams its answer.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Identifier of the model that answers, used for logging.
    fn model_name(&self) -> &str;

    /// Send one user turn with images attached. `format` constrains the output shape
    /// (a JSON Schema) when given.
    async fn stream_chat(
        &self,
        prompt: &str,
        images: &[&Path],
        format: Option<&Value>,
    ) -> LlmResult<TextStream>;
}

/// Drain a response stream into one string, failing on the first broken chunk.
pub async fn collect_text(stream: TextStream) -> LlmResult<String> {
    stream
        .try_fold(String::new(), |mut text, chunk| async move {
            text.push_str(&chunk);
            Ok(text)
        })
        .await
}
