//! Retrieval contract used by the question-answering pipeline.

use crate::error::DocChatResult;
use crate::rag::types::SearchResult;
use async_trait::async_trait;

/// Finds the chunks most relevant to a free-text query.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize) -> DocChatResult<Vec<SearchResult>>;
}
