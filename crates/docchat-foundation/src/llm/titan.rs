//! Amazon Titan text embeddings

use super::parse_envelope;
use async_trait::async_trait;
use docchat_kernel::llm::{Embedder, ModelResult, ModelRuntime};
use serde::Deserialize;
use std::sync::Arc;

/// Default Titan embedding model
pub const TITAN_EMBED_TEXT_V1: &str = "amazon.titan-embed-text-v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanEmbeddingResponse {
    embedding: Vec<f32>,
    #[allow(dead_code)]
    input_text_token_count: Option<u32>,
}

/// Embedder calling a Titan embedding model.
///
/// Request: `{"inputText": …}`; response: `{"embedding": [...]}`.
pub struct TitanEmbedder {
    runtime: Arc<dyn ModelRuntime>,
    model_id: String,
}

impl TitanEmbedder {
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self::with_model(runtime, TITAN_EMBED_TEXT_V1)
    }

    pub fn with_model(runtime: Arc<dyn ModelRuntime>, model_id: impl Into<String>) -> Self {
        Self {
            runtime,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl Embedder for TitanEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn embed(&self, text: &str) -> ModelResult<Vec<f32>> {
        let body = serde_json::json!({ "inputText": text });
        let response = self.runtime.invoke_json(&self.model_id, &body).await?;
        let parsed: TitanEmbeddingResponse = parse_envelope(&self.model_id, response)?;
        Ok(parsed.embedding)
    }
}
