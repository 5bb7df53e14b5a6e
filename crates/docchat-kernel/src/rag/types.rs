//! Retrieval data types
//!
//! Types shared by the loaders, the chunkers, the similarity index and the
//! question-answering pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Metadata key holding the originating file path.
pub const META_SOURCE: &str = "source";
/// Metadata key holding the 0-based page number within the source.
pub const META_PAGE: &str = "page";
/// Metadata key holding the chunk's position within its page.
pub const META_CHUNK_INDEX: &str = "chunk_index";
/// Metadata key holding the chunk's first character offset within its page.
pub const META_START_CHAR: &str = "start_char";

/// Errors from the similarity index.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IndexError {
    /// No index has been built at the expected location
    #[error("No vector index found at {0}; build one first")]
    NotFound(String),

    /// The persisted index could not be decoded
    #[error("Corrupt index: {0}")]
    Corrupt(String),

    /// A vector's length differs from the index's dimensions
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An index cannot be built from zero chunks
    #[error("Cannot build an index from zero chunks")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// A loaded source document: one PDF page or one whole text file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier (source path plus page)
    pub id: String,
    /// Extracted text
    pub text: String,
    /// Source locator and format
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The originating file path, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE).map(String::as_str)
    }

    /// The page number, if recorded.
    pub fn page(&self) -> Option<usize> {
        self.metadata.get(META_PAGE).and_then(|p| p.parse().ok())
    }
}

/// A chunk of a document with its embedding vector and metadata.
///
/// This is the unit stored in the similarity index. `embedding` is empty
/// until the chunk has been through the embedder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Unique identifier for this chunk
    pub id: String,
    /// The text content of this chunk
    pub text: String,
    /// The embedding vector for this chunk
    pub embedding: Vec<f32>,
    /// Source file, page, position within the page
    pub metadata: BTreeMap<String, String>,
}

impl DocumentChunk {
    pub fn new(id: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            embedding,
            metadata: BTreeMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace the embedding
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    /// The originating file path, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE).map(String::as_str)
    }

    /// The page number, if recorded.
    pub fn page(&self) -> Option<usize> {
        self.metadata.get(META_PAGE).and_then(|p| p.parse().ok())
    }
}

/// Result returned from a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The id of the matched chunk
    pub id: String,
    /// The text content of the matched chunk
    pub text: String,
    /// Similarity score (higher is more similar)
    pub score: f32,
    /// Metadata from the matched chunk
    pub metadata: BTreeMap<String, String>,
}

impl SearchResult {
    /// Create from a document chunk with a score
    pub fn from_chunk(chunk: &DocumentChunk, score: f32) -> Self {
        Self {
            id: chunk.id.clone(),
            text: chunk.text.clone(),
            score,
            metadata: chunk.metadata.clone(),
        }
    }

    /// Short "source p.N" label for display.
    pub fn locator(&self) -> String {
        let source = self
            .metadata
            .get(META_SOURCE)
            .map(String::as_str)
            .unwrap_or("<unknown>");
        match self.metadata.get(META_PAGE) {
            Some(page) => format!("{source} p.{page}"),
            None => source.to_string(),
        }
    }
}

/// Similarity metric used for comparing embedding vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Cosine similarity
    #[default]
    Cosine,
    /// Euclidean distance, mapped so that higher is more similar
    Euclidean,
    /// Dot product
    DotProduct,
}
