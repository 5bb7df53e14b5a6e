//! Retrieval-augmented question answering
//!
//! embed question → top-k search → join chunk texts into a context block →
//! fill the QA template → one call to the chosen text model. The model's
//! output is returned verbatim together with the chunks it was shown.

use crate::prompt::{PromptTemplate, qa_template};
use docchat_kernel::llm::TextModel;
use docchat_kernel::rag::{Retriever, SearchResult};
use docchat_kernel::{DocChatError, DocChatResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default number of chunks placed in the prompt.
pub const DEFAULT_TOP_K: usize = 3;

/// Which hosted model answers the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    /// AI21 Jurassic-2 Mid
    #[default]
    #[serde(alias = "j2")]
    Jurassic2,
    /// Meta Llama 2 70B Chat
    #[serde(alias = "llama")]
    Llama2,
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelChoice::Jurassic2 => write!(f, "Jurassic-2"),
            ModelChoice::Llama2 => write!(f, "Llama 2"),
        }
    }
}

/// The two answering models.
#[derive(Clone)]
pub struct TextModels {
    pub jurassic2: Arc<dyn TextModel>,
    pub llama2: Arc<dyn TextModel>,
}

impl TextModels {
    pub fn select(&self, choice: ModelChoice) -> &Arc<dyn TextModel> {
        match choice {
            ModelChoice::Jurassic2 => &self.jurassic2,
            ModelChoice::Llama2 => &self.llama2,
        }
    }
}

/// An answer and the chunks that were given to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
    /// Model id that produced the answer
    pub model: String,
    pub sources: Vec<SearchResult>,
}

/// Question-answering pipeline over a retriever.
pub struct RetrievalQa {
    retriever: Arc<dyn Retriever>,
    models: TextModels,
    template: PromptTemplate,
    top_k: usize,
}

impl RetrievalQa {
    pub fn new(retriever: Arc<dyn Retriever>, models: TextModels) -> Self {
        Self {
            retriever,
            models,
            template: qa_template(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Build the prompt for `question` from already-retrieved chunks.
    pub fn build_prompt(&self, question: &str, sources: &[SearchResult]) -> DocChatResult<String> {
        let context = sources
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(self
            .template
            .render(&[("context", context.as_str()), ("question", question)])?)
    }

    /// Answer `question` with the chosen model.
    pub async fn ask(&self, question: &str, choice: ModelChoice) -> DocChatResult<QaAnswer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DocChatError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(DocChatError::InvalidInput(
                "top_k must be at least 1".to_string(),
            ));
        }

        let sources = self.retriever.retrieve(question, self.top_k).await?;
        let prompt = self.build_prompt(question, &sources)?;

        let model = self.models.select(choice);
        tracing::info!(
            model = %model.model_id(),
            chunks = sources.len(),
            prompt_chars = prompt.chars().count(),
            "asking model"
        );
        let answer = model.complete(&prompt).await?;

        Ok(QaAnswer {
            answer,
            model: model.model_id().to_string(),
            sources,
        })
    }
}
