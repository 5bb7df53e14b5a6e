//! Model service traits
//!
//! Every trait here is object-safe and `Send + Sync` so handles can be held
//! as `Arc<dyn …>` and swapped for fakes in tests.

use super::types::*;
use async_trait::async_trait;

/// Raw access to a hosted model service.
///
/// One call is one synchronous request/response exchange: a JSON body goes
/// to `model_id`, the response body comes back unparsed.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_kernel::ModelRuntime;
///
/// let body = serde_json::json!({ "inputText": "hello" });
/// let response = runtime.invoke_json("amazon.titan-embed-text-v1", &body).await?;
/// ```
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// Runtime name used in logs
    fn name(&self) -> &str;

    /// Send `body` to `model_id` and return the response body.
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> ModelResult<Vec<u8>>;

    /// JSON convenience wrapper over [`ModelRuntime::invoke`].
    async fn invoke_json(
        &self,
        model_id: &str,
        body: &serde_json::Value,
    ) -> ModelResult<serde_json::Value> {
        let encoded = serde_json::to_vec(body)?;
        let response = self.invoke(model_id, encoded).await?;
        Ok(serde_json::from_slice(&response)?)
    }
}

/// Turns text into an embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model id recorded in the index manifest
    fn model_id(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> ModelResult<Vec<f32>>;

    /// Embed several texts, one call at a time, preserving order.
    ///
    /// The first failure aborts the whole batch.
    async fn embed_batch(&self, texts: &[String]) -> ModelResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}

/// A hosted text-generation model with fixed generation parameters.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Model id
    fn model_id(&self) -> &str;

    /// Human-readable name
    fn display_name(&self) -> &str {
        self.model_id()
    }

    /// Complete `prompt` and return the generated text verbatim.
    async fn complete(&self, prompt: &str) -> ModelResult<String>;
}

/// A hosted image-generation model.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Model id
    fn model_id(&self) -> &str;

    /// Generate one or more images for `request`.
    async fn generate(&self, request: &ImageRequest) -> ModelResult<Vec<GeneratedImage>>;
}
