//! Flat (brute-force) similarity index
//!
//! Built wholesale from a batch of embedded chunks and searched read-only.
//! Every search scores the query against every stored vector.

use super::similarity::compute_similarity;
use async_trait::async_trait;
use docchat_kernel::rag::{
    DocumentChunk, IndexError, IndexResult, SearchResult, SimilarityMetric, VectorStore,
};

/// In-memory flat index over embedded chunks.
///
/// Chunks keep their insertion order. Searches sort stably by score, so
/// equal scores come back in insertion order and repeated searches are
/// deterministic.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_foundation::rag::{FlatIndex, SimilarityMetric, DocumentChunk, VectorStore};
///
/// let index = FlatIndex::build(chunks, SimilarityMetric::Cosine)?;
/// let results = index.search(&query_embedding, 3, None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FlatIndex {
    chunks: Vec<DocumentChunk>,
    dimensions: usize,
    metric: SimilarityMetric,
}

impl FlatIndex {
    /// Build an index from embedded chunks.
    ///
    /// Fails on an empty batch or when embedding lengths disagree.
    pub fn build(chunks: Vec<DocumentChunk>, metric: SimilarityMetric) -> IndexResult<Self> {
        let dimensions = chunks.first().map(|c| c.embedding.len()).ok_or(IndexError::Empty)?;

        if dimensions == 0 {
            return Err(IndexError::Corrupt(format!(
                "chunk '{}' has no embedding",
                chunks[0].id
            )));
        }

        if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != dimensions) {
            return Err(IndexError::DimensionMismatch {
                expected: dimensions,
                actual: bad.embedding.len(),
            });
        }

        Ok(Self {
            chunks,
            dimensions,
            metric,
        })
    }

    /// Build a cosine index.
    pub fn cosine(chunks: Vec<DocumentChunk>) -> IndexResult<Self> {
        Self::build(chunks, SimilarityMetric::Cosine)
    }

    /// Stored chunks in insertion order.
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Synchronous search used by the async trait method.
    pub fn search_sync(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        threshold: Option<f32>,
    ) -> IndexResult<Vec<SearchResult>> {
        if query_embedding.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: query_embedding.len(),
            });
        }

        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| {
                let score = compute_similarity(&chunk.embedding, query_embedding, self.metric);
                SearchResult::from_chunk(chunk, score)
            })
            .filter(|result| threshold.is_none_or(|t| result.score >= t))
            .collect();

        // stable: ties keep insertion order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }
}

#[async_trait]
impl VectorStore for FlatIndex {
    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        threshold: Option<f32>,
    ) -> IndexResult<Vec<SearchResult>> {
        self.search_sync(query_embedding, top_k, threshold)
    }

    async fn count(&self) -> IndexResult<usize> {
        Ok(self.chunks.len())
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.dimensions)
    }

    fn similarity_metric(&self) -> SimilarityMetric {
        self.metric
    }
}
