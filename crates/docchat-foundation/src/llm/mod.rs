//! Hosted model clients
//!
//! [`BedrockRuntime`] is the only component that talks to the network. Each
//! model family wraps a shared `Arc<dyn ModelRuntime>` and owns its JSON
//! request/response envelope.

pub mod bedrock;
pub mod jurassic;
pub mod llama;
pub mod stability;
pub mod titan;

pub use bedrock::{BedrockConfig, BedrockRuntime};
pub use jurassic::{J2_MID_V1, Jurassic2Model};
pub use llama::{LLAMA2_70B_CHAT_V1, Llama2Model};
pub use stability::{SDXL_V0, StableDiffusionXl};
pub use titan::{TITAN_EMBED_TEXT_V1, TitanEmbedder};

pub use docchat_kernel::llm::{
    Embedder, GeneratedImage, GenerationParams, ImageModel, ImageRequest, ModelError, ModelResult,
    ModelRuntime, TextModel,
};

use serde::de::DeserializeOwned;

/// Deserialize a response body into a model-specific envelope.
///
/// Shape mismatches are reported as [`ModelError::MalformedResponse`]
/// naming the model.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    model_id: &str,
    value: serde_json::Value,
) -> ModelResult<T> {
    serde_json::from_value(value).map_err(|e| ModelError::malformed(model_id, e.to_string()))
}
