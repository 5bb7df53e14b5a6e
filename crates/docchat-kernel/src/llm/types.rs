//! Model invocation data types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from remote model calls.
///
/// Remote failures are surfaced as-is; nothing here is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The service rejected or failed the call
    #[error("API error: {0}")]
    Api(String),

    /// Request body could not be encoded or response body could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The response parsed but did not have the expected envelope
    #[error("Malformed response from {model}: {reason}")]
    MalformedResponse { model: String, reason: String },

    /// An encoded payload in the response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModelError {
    /// Shorthand for [`ModelError::MalformedResponse`].
    pub fn malformed(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Model result type
pub type ModelResult<T> = Result<T, ModelError>;

/// Fixed generation parameters sent with every text-model call.
///
/// `temperature` and `top_p` are omitted from the request when unset, leaving
/// the model's own defaults in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: None,
            top_p: None,
        }
    }
}

impl GenerationParams {
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// An image generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRequest {
    /// Text prompt describing the image
    pub prompt: String,
    /// Prompt weight
    pub weight: f32,
    /// How strictly the model follows the prompt
    pub cfg_scale: f32,
    /// Sampling seed; a fixed seed gives reproducible output
    pub seed: u64,
    /// Diffusion step count
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            weight: 1.0,
            cfg_scale: 10.0,
            seed: 0,
            steps: 50,
            width: 512,
            height: 512,
        }
    }
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// A decoded image returned by an image model.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Decoded image bytes
    pub bytes: Vec<u8>,
    /// Seed reported by the service, if any
    pub seed: Option<u64>,
    /// Finish reason reported by the service, if any
    pub finish_reason: Option<String>,
}
