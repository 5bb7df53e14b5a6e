//! VectorStore trait definition
//!
//! Read-side interface of the similarity index. Indexes are built wholesale
//! from a batch of embedded chunks and never mutated afterwards, so the trait
//! exposes no insert or delete operations.

use crate::rag::types::{IndexResult, SearchResult, SimilarityMetric};
use async_trait::async_trait;

/// Nearest-neighbour lookup over stored embeddings.
///
/// # Example
///
/// ```rust,ignore
/// let results = store.search(&query_embedding, 3, None).await?;
/// for result in results {
///     println!("{:.3} {}", result.score, result.locator());
/// }
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return up to `top_k` chunks most similar to `query_embedding`,
    /// highest score first. With `threshold`, lower-scoring chunks are
    /// dropped.
    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        threshold: Option<f32>,
    ) -> IndexResult<Vec<SearchResult>>;

    /// Number of stored chunks.
    async fn count(&self) -> IndexResult<usize>;

    /// Embedding length, or `None` for an empty store.
    fn dimensions(&self) -> Option<usize>;

    /// The similarity metric used by this store.
    fn similarity_metric(&self) -> SimilarityMetric;
}
