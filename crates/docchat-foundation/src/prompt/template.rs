//! Prompt template engine

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"));

/// Prompt template errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PromptError {
    /// A placeholder in the template has no value
    #[error("Required variable not provided: {0}")]
    MissingVariable(String),

    /// The template text is unusable
    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type PromptResult<T> = Result<T, PromptError>;

/// A text template with `{name}` placeholders.
///
/// Rendering substitutes every placeholder in one pass, so braces inside
/// substituted values (retrieved document text, user questions) are never
/// expanded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    content: String,
}

impl PromptTemplate {
    /// Create a template, requiring at least one placeholder.
    pub fn new(content: impl Into<String>) -> PromptResult<Self> {
        let template = Self {
            content: content.into(),
        };
        if template.variable_names().is_empty() {
            return Err(PromptError::ParseError(
                "template has no {placeholders}".to_string(),
            ));
        }
        Ok(template)
    }

    /// Wrap built-in template text; its placeholders are checked by tests.
    pub(crate) fn from_static(content: &'static str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Placeholder names in the template, sorted and deduplicated.
    pub fn variable_names(&self) -> BTreeSet<&str> {
        PLACEHOLDER
            .captures_iter(&self.content)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Render the template.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let template = PromptTemplate::new("Context: {context}\nQ: {question}")?;
    /// let prompt = template.render(&[("context", "..."), ("question", "why?")])?;
    /// ```
    pub fn render(&self, vars: &[(&str, &str)]) -> PromptResult<String> {
        let var_map: HashMap<&str, &str> = vars.iter().copied().collect();
        self.render_with_map(&var_map)
    }

    /// Render the template from a map of values.
    pub fn render_with_map(&self, vars: &HashMap<&str, &str>) -> PromptResult<String> {
        if let Some(missing) = self
            .variable_names()
            .into_iter()
            .find(|name| !vars.contains_key(name))
        {
            return Err(PromptError::MissingVariable(missing.to_string()));
        }

        let rendered = PLACEHOLDER.replace_all(&self.content, |caps: &regex::Captures| {
            vars.get(&caps[1]).copied().unwrap_or_default().to_string()
        });
        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_placeholders() {
        let template = PromptTemplate::new("Hello, {name}! Welcome to {place}.").unwrap();
        let result = template
            .render(&[("name", "Ferris"), ("place", "Rustland")])
            .unwrap();
        assert_eq!(result, "Hello, Ferris! Welcome to Rustland.");
    }

    #[test]
    fn repeated_placeholder_is_filled_everywhere() {
        let template = PromptTemplate::new("{x} and {x}").unwrap();
        assert_eq!(template.render(&[("x", "y")]).unwrap(), "y and y");
        assert_eq!(template.variable_names().len(), 1);
    }

    #[test]
    fn missing_variable_is_reported() {
        let template = PromptTemplate::new("{context} / {question}").unwrap();
        let err = template.render(&[("context", "c")]).unwrap_err();
        assert!(matches!(err, PromptError::MissingVariable(ref v) if v == "question"));
    }

    #[test]
    fn values_are_not_expanded_twice() {
        let template = PromptTemplate::new("C: {context}\nQ: {question}").unwrap();
        let result = template
            .render(&[("context", "literal {question} in a document"), ("question", "why?")])
            .unwrap();
        assert_eq!(result, "C: literal {question} in a document\nQ: why?");
    }

    #[test]
    fn extra_values_are_ignored() {
        let template = PromptTemplate::new("{a}").unwrap();
        assert_eq!(template.render(&[("a", "1"), ("b", "2")]).unwrap(), "1");
    }

    #[test]
    fn template_without_placeholders_is_rejected() {
        assert!(matches!(
            PromptTemplate::new("no variables here"),
            Err(PromptError::ParseError(_))
        ));
    }
}
