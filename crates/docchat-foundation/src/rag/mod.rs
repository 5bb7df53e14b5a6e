//! Retrieval-augmented generation
//!
//! Concrete implementations of the kernel retrieval traits: document
//! loaders, chunkers, the flat similarity index and its on-disk form,
//! ingestion, the embedding retriever and the question-answering pipeline.

pub mod chunker;
pub mod ingest;
pub mod loaders;
pub mod persist;
pub mod qa;
pub mod recursive_chunker;
pub mod retriever;
pub mod similarity;
pub mod vector_store;

pub use chunker::{ChunkConfig, ChunkStrategy, DocumentSplitter, TextChunker};
pub use ingest::{IngestReport, Ingestor};
pub use loaders::{DirectoryLoader, DocumentLoader, LoaderError, PdfLoader, TextLoader};
pub use persist::{IndexManifest, IndexStore, LoadedIndex};
pub use qa::{DEFAULT_TOP_K, ModelChoice, QaAnswer, RetrievalQa, TextModels};
pub use recursive_chunker::{RecursiveChunkConfig, RecursiveChunker};
pub use retriever::VectorRetriever;
pub use similarity::compute_similarity;
pub use vector_store::FlatIndex;

// Re-export kernel types for convenience
pub use docchat_kernel::rag::{
    Document, DocumentChunk, IndexError, Retriever, SearchResult, SimilarityMetric, VectorStore,
};
