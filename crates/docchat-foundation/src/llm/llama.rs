//! Meta Llama 2 chat completion

use super::parse_envelope;
use async_trait::async_trait;
use docchat_kernel::llm::{GenerationParams, ModelResult, ModelRuntime, TextModel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default Llama 2 model
pub const LLAMA2_70B_CHAT_V1: &str = "meta.llama2-70b-chat-v1";

#[derive(Debug, Serialize)]
struct Llama2Request<'a> {
    prompt: &'a str,
    max_gen_len: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Llama2Response {
    generation: String,
    #[allow(dead_code)]
    stop_reason: Option<String>,
}

/// Llama 2 chat model.
pub struct Llama2Model {
    runtime: Arc<dyn ModelRuntime>,
    model_id: String,
    params: GenerationParams,
}

impl Llama2Model {
    pub fn new(runtime: Arc<dyn ModelRuntime>, params: GenerationParams) -> Self {
        Self::with_model(runtime, LLAMA2_70B_CHAT_V1, params)
    }

    pub fn with_model(
        runtime: Arc<dyn ModelRuntime>,
        model_id: impl Into<String>,
        params: GenerationParams,
    ) -> Self {
        Self {
            runtime,
            model_id: model_id.into(),
            params,
        }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }
}

#[async_trait]
impl TextModel for Llama2Model {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn display_name(&self) -> &str {
        "Llama 2"
    }

    async fn complete(&self, prompt: &str) -> ModelResult<String> {
        let request = Llama2Request {
            prompt,
            max_gen_len: self.params.max_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
        };
        let body = serde_json::to_value(&request)?;
        let response = self.runtime.invoke_json(&self.model_id, &body).await?;
        let parsed: Llama2Response = parse_envelope(&self.model_id, response)?;
        Ok(parsed.generation)
    }
}
