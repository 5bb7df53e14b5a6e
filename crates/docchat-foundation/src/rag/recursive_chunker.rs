//! Recursive text chunker
//!
//! Splits text using a hierarchy of separators, trying the most meaningful
//! split first (paragraphs → lines → sentences → words) and falling back to
//! fixed character windows when nothing else fits.

use super::chunker::TextSpan;
use std::ops::Range;

/// Configuration for recursive chunking.
#[derive(Debug, Clone)]
pub struct RecursiveChunkConfig {
    /// Maximum number of characters per chunk.
    pub chunk_size: usize,
    /// Characters carried over from the end of the previous chunk.
    pub chunk_overlap: usize,
    /// Ordered list of separators to try (most → least meaningful).
    pub separators: Vec<String>,
}

impl Default for RecursiveChunkConfig {
    fn default() -> Self {
        Self::new(super::chunker::DEFAULT_CHUNK_SIZE, super::chunker::DEFAULT_CHUNK_OVERLAP)
    }
}

impl RecursiveChunkConfig {
    #[must_use]
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: vec!["\n\n".into(), "\n".into(), ". ".into(), " ".into()],
        }
    }

    #[must_use]
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }
}

/// Recursive text chunker that tries multiple separator levels.
///
/// The text is first cut into pieces no longer than `chunk_size`, using the
/// coarsest separator that works. Pieces are then merged greedily into
/// windows; each new window starts with the last `chunk_overlap` characters
/// of the previous one, unless that would push it past `chunk_size`.
#[derive(Debug, Clone, Default)]
pub struct RecursiveChunker {
    config: RecursiveChunkConfig,
}

impl RecursiveChunker {
    #[must_use]
    pub fn new(config: RecursiveChunkConfig) -> Self {
        Self { config }
    }

    /// Split text into chunks of at most `chunk_size` characters.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.spans(text).into_iter().map(|span| span.text).collect()
    }

    /// Like [`RecursiveChunker::chunk`], keeping each chunk's character
    /// offset in `text`.
    pub fn spans(&self, text: &str) -> Vec<TextSpan> {
        if text.trim().is_empty() {
            return vec![];
        }

        let mut pieces = Vec::new();
        self.split_range(text, 0..text.len(), 0, &mut pieces);
        self.merge(text, pieces)
    }

    /// Cut `range` into byte ranges of at most `chunk_size` characters.
    fn split_range(
        &self,
        text: &str,
        range: Range<usize>,
        separator_idx: usize,
        out: &mut Vec<Range<usize>>,
    ) {
        let slice = &text[range.clone()];
        if char_len(slice) <= self.config.chunk_size {
            out.push(range);
            return;
        }

        let Some(separator) = self.config.separators.get(separator_idx) else {
            self.hard_split(text, range, out);
            return;
        };
        if separator.is_empty() || !slice.contains(separator.as_str()) {
            self.split_range(text, range, separator_idx + 1, out);
            return;
        }

        let mut start = range.start;
        for (offset, _) in slice.match_indices(separator.as_str()) {
            let end = range.start + offset;
            if end > start {
                self.split_range(text, start..end, separator_idx + 1, out);
            }
            start = end + separator.len();
        }
        if start < range.end {
            self.split_range(text, start..range.end, separator_idx + 1, out);
        }
    }

    /// Cut `range` every `chunk_size - chunk_overlap` characters; the merge
    /// step adds the overlap back.
    fn hard_split(&self, text: &str, range: Range<usize>, out: &mut Vec<Range<usize>>) {
        let step = self
            .config
            .chunk_size
            .saturating_sub(self.config.chunk_overlap)
            .max(1);
        let mut start = range.start;
        let mut count = 0;

        for (offset, _) in text[range.clone()].char_indices() {
            if count == step {
                out.push(start..range.start + offset);
                start = range.start + offset;
                count = 0;
            }
            count += 1;
        }
        if start < range.end {
            out.push(start..range.end);
        }
    }

    fn merge(&self, text: &str, pieces: Vec<Range<usize>>) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut window: Option<Range<usize>> = None;

        for piece in pieces {
            window = Some(match window {
                None => piece,
                Some(current) => {
                    if char_len(&text[current.start..piece.end]) <= self.config.chunk_size {
                        current.start..piece.end
                    } else {
                        let tail = tail_start(text, current.end, self.config.chunk_overlap);
                        push_span(text, current.clone(), &mut spans);
                        if self.config.chunk_overlap > 0
                            && char_len(&text[tail..piece.end]) <= self.config.chunk_size
                        {
                            tail..piece.end
                        } else {
                            piece
                        }
                    }
                }
            });
        }

        if let Some(current) = window {
            push_span(text, current, &mut spans);
        }
        spans
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index `overlap` characters before `end`.
fn tail_start(text: &str, end: usize, overlap: usize) -> usize {
    text[..end]
        .char_indices()
        .rev()
        .take(overlap)
        .last()
        .map_or(end, |(i, _)| i)
}

/// Push the trimmed window, recording where the trimmed text starts.
fn push_span(text: &str, range: Range<usize>, spans: &mut Vec<TextSpan>) {
    let slice = &text[range.clone()];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let byte_start = range.start + (slice.len() - slice.trim_start().len());
    spans.push(TextSpan {
        start_char: char_len(&text[..byte_start]),
        text: trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_no_split() {
        let chunks = RecursiveChunker::default().chunk("Short text");
        assert_eq!(chunks, vec!["Short text"]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(RecursiveChunker::default().chunk("").is_empty());
        assert!(RecursiveChunker::default().chunk("  \n ").is_empty());
    }

    #[test]
    fn splits_at_paragraph_boundary() {
        let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(50, 0));
        let text =
            "First paragraph content.\n\nSecond paragraph content.\n\nThird paragraph content.";
        let chunks = chunker.chunk(text);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50, "chunk too large: {chunk:?}");
        }
    }

    #[test]
    fn splits_at_sentence_boundary() {
        let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(30, 0));
        let chunks = chunker.chunk("First sentence. Second sentence. Third sentence.");
        assert!(chunks.len() >= 2);
    }

    #[test]
    fn falls_back_to_hard_split() {
        let config = RecursiveChunkConfig::new(5, 0).with_separators(vec![]);
        let chunks = RecursiveChunker::new(config).chunk("abcdefghijklmnopqrst");
        assert_eq!(chunks, vec!["abcde", "fghij", "klmno", "pqrst"]);
    }

    #[test]
    fn keeps_all_words() {
        let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(50, 0));
        let joined = chunker
            .chunk("Hello world.\n\nThis is a test.\n\nFinal paragraph.")
            .join(" ");
        assert!(joined.contains("Hello"));
        assert!(joined.contains("test"));
        assert!(joined.contains("Final"));
    }

    #[test]
    fn default_config_values() {
        let config = RecursiveChunkConfig::default();
        assert_eq!(config.chunk_size, 10_000);
        assert_eq!(config.chunk_overlap, 1_000);
        assert_eq!(config.separators.len(), 4);
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let paragraphs: Vec<String> = (0..8u8)
            .map(|i| char::from(b'a' + i).to_string().repeat(3_000))
            .collect();
        let text = paragraphs.join("\n\n");
        let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(10_000, 1_000));

        let chunks = chunker.chunk(&text);

        assert!(chunks.len() >= 3);
        for pair in chunks.windows(2) {
            let prev = &pair[0];
            let tail: String = prev.chars().skip(prev.chars().count() - 1_000).collect();
            assert!(pair[1].starts_with(&tail), "next chunk does not repeat the tail");
            assert!(pair[1].chars().count() <= 10_000);
        }
        assert!(chunks.last().unwrap().ends_with(&"h".repeat(3_000)));
    }

    #[test]
    fn overlap_applies_to_short_paragraphs() {
        let text = "alpha beta gamma\n\ndelta epsilon zeta\n\neta theta iota\n\nkappa lambda mu";
        let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(40, 10));

        let chunks = chunker.chunk(text);

        assert!(chunks.len() >= 2);
        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .chars()
                .skip(pair[0].chars().count().saturating_sub(10))
                .collect();
            let tail = tail.trim();
            assert!(!tail.is_empty());
            assert!(pair[1].contains(tail), "{:?} does not overlap {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn spans_point_at_their_text() {
        let text = ["same paragraph"; 6].join("\n\n");
        let chunker = RecursiveChunker::new(RecursiveChunkConfig::new(40, 8));

        let spans = chunker.spans(&text);

        assert!(spans.len() >= 3);
        for span in &spans {
            let at: String = text
                .chars()
                .skip(span.start_char)
                .take(span.text.chars().count())
                .collect();
            assert_eq!(at, span.text);
        }
        assert!(spans.windows(2).all(|w| w[0].start_char < w[1].start_char));
    }

    #[test]
    fn hard_split_windows_overlap() {
        let config = RecursiveChunkConfig::new(10, 3).with_separators(vec![]);
        let chunks = RecursiveChunker::new(config).chunk("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(chunks, vec!["abcdefg", "efghijklmn", "lmnopqrstu", "stuvwxyz"]);
    }
}
