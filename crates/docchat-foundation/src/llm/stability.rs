//! Stability AI Stable Diffusion XL image generation

use super::parse_envelope;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use docchat_kernel::llm::{
    GeneratedImage, ImageModel, ImageRequest, ModelError, ModelResult, ModelRuntime,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default SDXL model
pub const SDXL_V0: &str = "stability.stable-diffusion-xl-v0";

#[derive(Debug, Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
    weight: f32,
}

#[derive(Debug, Serialize)]
struct SdxlRequest<'a> {
    text_prompts: Vec<TextPrompt<'a>>,
    cfg_scale: f32,
    seed: u64,
    steps: u32,
    width: u32,
    height: u32,
}

impl<'a> From<&'a ImageRequest> for SdxlRequest<'a> {
    fn from(req: &'a ImageRequest) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: &req.prompt,
                weight: req.weight,
            }],
            cfg_scale: req.cfg_scale,
            seed: req.seed,
            steps: req.steps,
            width: req.width,
            height: req.height,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SdxlResponse {
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    base64: String,
    seed: Option<u64>,
    finish_reason: Option<String>,
}

/// Stable Diffusion XL.
///
/// Every returned artifact is base64-decoded and checked to be a
/// recognizable image before it is handed back.
pub struct StableDiffusionXl {
    runtime: Arc<dyn ModelRuntime>,
    model_id: String,
}

impl StableDiffusionXl {
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self::with_model(runtime, SDXL_V0)
    }

    pub fn with_model(runtime: Arc<dyn ModelRuntime>, model_id: impl Into<String>) -> Self {
        Self {
            runtime,
            model_id: model_id.into(),
        }
    }
}

fn decode_artifact(model_id: &str, artifact: Artifact) -> ModelResult<GeneratedImage> {
    let bytes = STANDARD
        .decode(artifact.base64.trim())
        .map_err(|e| ModelError::Decode(format!("artifact is not valid base64: {e}")))?;

    if !infer::is_image(&bytes) {
        return Err(ModelError::malformed(
            model_id,
            "artifact does not decode to a known image format",
        ));
    }

    Ok(GeneratedImage {
        bytes,
        seed: artifact.seed,
        finish_reason: artifact.finish_reason,
    })
}

#[async_trait]
impl ImageModel for StableDiffusionXl {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &ImageRequest) -> ModelResult<Vec<GeneratedImage>> {
        let body = serde_json::to_value(SdxlRequest::from(request))?;
        let response = self.runtime.invoke_json(&self.model_id, &body).await?;
        let parsed: SdxlResponse = parse_envelope(&self.model_id, response)?;

        if parsed.artifacts.is_empty() {
            return Err(ModelError::malformed(&self.model_id, "response has no artifacts"));
        }

        let images = parsed
            .artifacts
            .into_iter()
            .map(|artifact| decode_artifact(&self.model_id, artifact))
            .collect::<ModelResult<Vec<_>>>()?;

        tracing::debug!(model_id = %self.model_id, count = images.len(), "decoded image artifacts");
        Ok(images)
    }
}
