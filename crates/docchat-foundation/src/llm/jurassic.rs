//! AI21 Jurassic-2 text completion

use super::parse_envelope;
use async_trait::async_trait;
use docchat_kernel::llm::{GenerationParams, ModelError, ModelResult, ModelRuntime, TextModel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default Jurassic-2 model
pub const J2_MID_V1: &str = "ai21.j2-mid-v1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Jurassic2Request<'a> {
    prompt: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Jurassic2Response {
    completions: Vec<Completion>,
}

#[derive(Debug, Deserialize)]
struct Completion {
    data: CompletionData,
}

#[derive(Debug, Deserialize)]
struct CompletionData {
    text: String,
}

/// Jurassic-2 completion model.
///
/// Returns the text of the first completion verbatim.
pub struct Jurassic2Model {
    runtime: Arc<dyn ModelRuntime>,
    model_id: String,
    params: GenerationParams,
}

impl Jurassic2Model {
    pub fn new(runtime: Arc<dyn ModelRuntime>, params: GenerationParams) -> Self {
        Self::with_model(runtime, J2_MID_V1, params)
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
impl TextModel for Jurassic2Model {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn display_name(&self) -> &str {
        "Jurassic-2"
    }

    async fn complete(&self, prompt: &str) -> ModelResult<String> {
        let request = Jurassic2Request {
            prompt,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
        };
        let body = serde_json::to_value(&request)?;
        let response = self.runtime.invoke_json(&self.model_id, &body).await?;
        let parsed: Jurassic2Response = parse_envelope(&self.model_id, response)?;

        parsed
            .completions
            .into_iter()
            .next()
            .map(|c| c.data.text)
            .ok_or_else(|| ModelError::malformed(&self.model_id, "response has no completions"))
    }
}
