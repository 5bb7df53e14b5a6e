//! Fixed prompts

use super::template::PromptTemplate;

/// Question-answering prompt; filled with the retrieved context and the
/// user's question.
pub const QA_TEMPLATE: &str = "
Human: Use the following pieces of context to provide a concise answer to the question at the end but use at least summarize with 250 words with detailed explanations. If you don't know the answer, just say that you don't know, don't try to make up an answer.
<context>
{context}
</context>

Question: {question}

Assistant:";

/// Prompt sent by the single-shot text generation entry point.
pub const DEFAULT_TEXT_PROMPT: &str = "Act as a Shakespeare and write a poem on Generative AI";

/// Prompt sent by the single-shot image generation entry point.
pub const DEFAULT_IMAGE_PROMPT: &str =
    "provide me an 4k hd image of a beach, also use a blue sky rainy season and cinematic display";

/// The question-answering template.
pub fn qa_template() -> PromptTemplate {
    PromptTemplate::from_static(QA_TEMPLATE)
}
