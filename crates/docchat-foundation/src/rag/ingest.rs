//! Building the similarity index from a documents directory
//!
//! load → split → embed → build → persist. The whole batch succeeds or
//! nothing is written: a failure at any step leaves any previous index in
//! place.

use super::chunker::DocumentSplitter;
use super::loaders::{DirectoryLoader, DocumentLoader};
use super::persist::{IndexManifest, IndexStore};
use super::vector_store::FlatIndex;
use docchat_kernel::llm::Embedder;
use docchat_kernel::rag::{Document, IndexError, SimilarityMetric};
use docchat_kernel::{DocChatError, DocChatResult};
use std::path::Path;
use std::sync::Arc;

/// Chunks embedded per logged progress step.
const EMBED_BATCH: usize = 16;

/// Outcome of a successful ingestion.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub documents: usize,
    pub manifest: IndexManifest,
}

/// Rebuilds the persisted index from scratch.
pub struct Ingestor {
    loader: DirectoryLoader,
    splitter: DocumentSplitter,
    embedder: Arc<dyn Embedder>,
    store: IndexStore,
    metric: SimilarityMetric,
}

impl Ingestor {
    pub fn new(splitter: DocumentSplitter, embedder: Arc<dyn Embedder>, store: IndexStore) -> Self {
        Self {
            loader: DirectoryLoader::new(),
            splitter,
            embedder,
            store,
            metric: SimilarityMetric::Cosine,
        }
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Load every supported file in `data_dir` and replace the index.
    pub async fn ingest(&self, data_dir: &Path) -> DocChatResult<IngestReport> {
        tracing::info!(dir = %data_dir.display(), "loading documents");
        let documents = self.loader.load(data_dir)?;

        let index = self.build_index(&documents).await?;
        let manifest = self.store.save(&index, self.embedder.model_id())?;

        Ok(IngestReport {
            documents: documents.len(),
            manifest,
        })
    }

    /// Split and embed `documents` into an in-memory index.
    pub async fn build_index(&self, documents: &[Document]) -> DocChatResult<FlatIndex> {
        let mut chunks = self.splitter.split_all(documents);
        if chunks.is_empty() {
            return Err(DocChatError::Index(IndexError::Empty));
        }
        tracing::info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "split documents"
        );

        let total = chunks.len();
        for (batch_no, batch) in chunks.chunks_mut(EMBED_BATCH).enumerate() {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;

            for (chunk, embedding) in batch.iter_mut().zip(embeddings) {
                chunk.embedding = embedding;
            }
            tracing::info!(
                embedded = (batch_no * EMBED_BATCH + batch.len()).min(total),
                total,
                "embedded batch"
            );
        }

        Ok(FlatIndex::build(chunks, self.metric)?)
    }
}
