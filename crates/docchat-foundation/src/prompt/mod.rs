//! Prompt templates
//!
//! [`PromptTemplate`] fills `{name}` placeholders in a single pass;
//! [`presets`] holds the fixed prompts the entry points send.

pub mod presets;
pub mod template;

pub use presets::{DEFAULT_IMAGE_PROMPT, DEFAULT_TEXT_PROMPT, QA_TEMPLATE, qa_template};
pub use template::{PromptError, PromptResult, PromptTemplate};
