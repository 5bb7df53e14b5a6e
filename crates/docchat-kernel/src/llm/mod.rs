//! Hosted model traits and types
//!
//! The remote service is reached through a single seam, [`ModelRuntime`],
//! which sends a JSON body to a model id and returns the raw response body.
//! Model-family envelopes ([`Embedder`], [`TextModel`], [`ImageModel`]) are
//! layered on top of it in `docchat-foundation`.

pub mod provider;
pub mod types;

pub use provider::{Embedder, ImageModel, ModelRuntime, TextModel};
pub use types::{GeneratedImage, GenerationParams, ImageRequest, ModelError, ModelResult};
