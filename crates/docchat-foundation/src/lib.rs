//! docchat foundation
//!
//! Concrete building blocks behind the docchat entry points:
//!
//! - [`llm`]: the Bedrock runtime client and the per-model request/response
//!   envelopes (Titan embeddings, Jurassic-2, Llama 2, Stable Diffusion XL)
//! - [`rag`]: document loaders, chunkers, the flat similarity index and its
//!   on-disk form, ingestion and retrieval-augmented question answering
//! - [`prompt`]: the prompt template used to assemble model input
//! - [`artifacts`]: writing generated images to disk

pub mod artifacts;
pub mod error_conversions;
pub mod llm;
pub mod prompt;
pub mod rag;

pub use docchat_kernel as kernel;
