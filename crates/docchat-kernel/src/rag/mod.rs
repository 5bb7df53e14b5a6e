//! Retrieval traits and types
//!
//! Core abstractions for the similarity index and retrieval step of the
//! question-answering pipeline. Concrete implementations live in
//! docchat-foundation.

pub mod pipeline;
pub mod types;
pub mod vector_store;

pub use pipeline::Retriever;
pub use types::{Document, DocumentChunk, IndexError, IndexResult, SearchResult, SimilarityMetric};
pub use vector_store::VectorStore;
