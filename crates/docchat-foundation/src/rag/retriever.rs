//! Embedding-based retriever

use super::persist::IndexStore;
use async_trait::async_trait;
use docchat_kernel::DocChatResult;
use docchat_kernel::llm::Embedder;
use docchat_kernel::rag::{Retriever, SearchResult, VectorStore};
use std::sync::Arc;

/// Embeds the query with the ingestion embedder and searches an index.
pub struct VectorRetriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl VectorRetriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Load the persisted index and wrap it.
    ///
    /// Fails with `IndexError::NotFound` when nothing has been ingested.
    pub fn open(embedder: Arc<dyn Embedder>, index_store: &IndexStore) -> DocChatResult<Self> {
        let loaded = index_store.load()?;

        if loaded.manifest.embedding_model != embedder.model_id() {
            tracing::warn!(
                index_model = %loaded.manifest.embedding_model,
                query_model = %embedder.model_id(),
                "index was built with a different embedding model"
            );
        }

        Ok(Self::new(embedder, Arc::new(loaded.index)))
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> DocChatResult<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&query_embedding, top_k, None).await?;

        tracing::debug!(
            top_k,
            hits = results.len(),
            best = results.first().map(|r| r.score),
            "retrieved context"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::vector_store::FlatIndex;
    use docchat_kernel::DocChatError;
    use docchat_kernel::llm::ModelResult;
    use docchat_kernel::rag::{DocumentChunk, IndexError};
    use tempfile::TempDir;

    /// Maps a few known words onto axis vectors.
    struct AxisEmbedder;

    #[async_trait]
    impl Embedder for AxisEmbedder {
        fn model_id(&self) -> &str {
            "axis"
        }

        async fn embed(&self, text: &str) -> ModelResult<Vec<f32>> {
            Ok(match text {
                t if t.contains("rust") => vec![1.0, 0.0],
                _ => vec![0.0, 1.0],
            })
        }
    }

    fn index() -> FlatIndex {
        FlatIndex::cosine(vec![
            DocumentChunk::new("rust", "all about rust", vec![1.0, 0.0]),
            DocumentChunk::new("other", "something else", vec![0.0, 1.0]),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn retrieves_nearest_chunk() {
        let retriever = VectorRetriever::new(Arc::new(AxisEmbedder), Arc::new(index()));
        let results = retriever.retrieve("tell me about rust", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "rust");
    }

    #[tokio::test]
    async fn open_loads_persisted_index() {
        let tmp = TempDir::new().unwrap();
        let store = IndexStore::new(tmp.path().join("idx"));
        store.save(&index(), "axis").unwrap();

        let retriever = VectorRetriever::open(Arc::new(AxisEmbedder), &store).unwrap();
        let results = retriever.retrieve("weather", 2).await.unwrap();
        assert_eq!(results[0].id, "other");
        assert_eq!(retriever.store().count().await.unwrap(), 2);
    }

    #[test]
    fn open_without_index_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = IndexStore::new(tmp.path().join("missing"));
        let err = VectorRetriever::open(Arc::new(AxisEmbedder), &store)
            .err()
            .unwrap();
        assert!(matches!(err, DocChatError::Index(IndexError::NotFound(_))));
    }
}
