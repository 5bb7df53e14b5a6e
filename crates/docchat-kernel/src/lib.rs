//! docchat kernel
//!
//! Service traits and core types shared by every docchat crate. Concrete
//! implementations (Bedrock clients, loaders, the flat index) live in
//! `docchat-foundation`; this crate only defines the seams so that callers
//! can pass in fakes.

// config module
pub mod config;

// error module
pub mod error;

// model invocation traits and types
pub mod llm;

// retrieval traits and types
pub mod rag;

pub use error::{DocChatError, DocChatResult};
pub use llm::{
    Embedder, GeneratedImage, GenerationParams, ImageModel, ImageRequest, ModelError,
    ModelResult, ModelRuntime, TextModel,
};
pub use rag::{
    Document, DocumentChunk, IndexError, IndexResult, Retriever, SearchResult, SimilarityMetric,
    VectorStore,
};
