//! Splitting documents into chunks before embedding
//!
//! The default `fixed` strategy cuts each document into fixed-size
//! character windows, each starting `chunk_size - chunk_overlap` characters
//! after the previous one, so consecutive windows share exactly
//! `chunk_overlap` characters. No sentence or paragraph detection is done.
//! The `recursive` strategy (see [`super::recursive_chunker`]) prefers
//! natural separators and does not guarantee exact overlap.
//!
//! Sizes are counted in Unicode scalar values, never bytes.

use super::recursive_chunker::{RecursiveChunkConfig, RecursiveChunker};
use docchat_kernel::config::{ConfigError, ConfigResult};
use docchat_kernel::rag::types::{META_CHUNK_INDEX, META_PAGE, META_SOURCE, META_START_CHAR};
use docchat_kernel::rag::{Document, DocumentChunk};
use serde::{Deserialize, Serialize};

/// Default window length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
/// Default overlap between consecutive windows in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 1_000;

/// Configuration for text chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Maximum number of characters per chunk
    pub chunk_size: usize,
    /// Number of characters shared by consecutive chunks
    pub chunk_overlap: usize,
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Reject a zero window or an overlap that would stall the window.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid {
                key: "chunking.chunk_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::Invalid {
                key: "chunking.chunk_overlap".to_string(),
                reason: format!(
                    "must be smaller than chunk_size ({} >= {})",
                    self.chunk_overlap, self.chunk_size
                ),
            });
        }
        Ok(())
    }

    fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap).max(1)
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// How documents are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Fixed-size character windows with fixed overlap
    #[default]
    Fixed,
    /// Separator hierarchy: paragraph, line, sentence, word
    Recursive,
}

/// A piece of text and the character offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub start_char: usize,
    pub text: String,
}

/// Fixed-window character splitter.
pub struct TextChunker {
    config: ChunkConfig,
}

impl TextChunker {
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Split text into windows of at most `chunk_size` characters.
    ///
    /// A text no longer than one window yields a single chunk; empty text
    /// yields none.
    pub fn chunk_by_chars(&self, text: &str) -> Vec<String> {
        self.spans(text).into_iter().map(|span| span.text).collect()
    }

    /// Like [`TextChunker::chunk_by_chars`], keeping each window's offset.
    pub fn spans(&self, text: &str) -> Vec<TextSpan> {
        if text.is_empty() {
            return vec![];
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.config.chunk_size {
            return vec![TextSpan {
                start_char: 0,
                text: text.to_string(),
            }];
        }

        let step = self.config.step();
        let mut spans = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.config.chunk_size).min(chars.len());
            spans.push(TextSpan {
                start_char: start,
                text: chars[start..end].iter().collect(),
            });

            if end >= chars.len() {
                break;
            }

            start += step;
        }

        spans
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

/// Turns loaded documents into chunks carrying source, page and position.
///
/// Chunk ids have the form `{source}#p{page}:c{index}`. The output
/// chunks have empty embeddings.
pub struct DocumentSplitter {
    config: ChunkConfig,
    strategy: ChunkStrategy,
}

impl DocumentSplitter {
    /// Build a splitter, validating the configuration first.
    pub fn new(config: ChunkConfig, strategy: ChunkStrategy) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> ChunkConfig {
        self.config
    }

    pub fn strategy(&self) -> ChunkStrategy {
        self.strategy
    }

    /// Split one document.
    pub fn split(&self, document: &Document) -> Vec<DocumentChunk> {
        let spans = match self.strategy {
            ChunkStrategy::Fixed => TextChunker::new(self.config).spans(&document.text),
            ChunkStrategy::Recursive => {
                let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(
                    self.config.chunk_size,
                    self.config.chunk_overlap,
                ));
                chunker.spans(&document.text)
            }
        };

        let source = document.source().unwrap_or(&document.id).to_string();
        let page = document.page().unwrap_or(0);

        spans
            .into_iter()
            .enumerate()
            .map(|(index, span)| {
                let mut chunk = DocumentChunk::new(
                    format!("{source}#p{page}:c{index}"),
                    span.text,
                    Vec::new(),
                );
                chunk.metadata = document.metadata.clone();
                chunk
                    .with_metadata(META_SOURCE, source.as_str())
                    .with_metadata(META_PAGE, page.to_string())
                    .with_metadata(META_CHUNK_INDEX, index.to_string())
                    .with_metadata(META_START_CHAR, span.start_char.to_string())
            })
            .collect()
    }

    /// Split every document, preserving document order.
    pub fn split_all(&self, documents: &[Document]) -> Vec<DocumentChunk> {
        documents.iter().flat_map(|doc| self.split(doc)).collect()
    }
}
