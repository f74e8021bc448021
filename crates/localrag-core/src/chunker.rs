//! Character-window chunker with overlap.
//!
//! Windows are measured in Unicode scalar values, never bytes, so a window
//! boundary can never split a multi-byte character.

use crate::error::{Error, Result};

pub const DEFAULT_MAX_CHARS: usize = 800;
pub const DEFAULT_OVERLAP: usize = 100;

/// An untrimmed window over the input, in character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_chars: usize,
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self { max_chars: DEFAULT_MAX_CHARS, overlap: DEFAULT_OVERLAP }
    }
}

impl Chunker {
    /// Validates `max_chars` and clamps an `overlap >= max_chars` to a quarter
    /// of `max_chars` so every step makes forward progress.
    pub fn new(max_chars: usize, overlap: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(Error::InvalidConfig("max_chars must be positive".to_string()));
        }
        let overlap = if overlap >= max_chars {
            let clamped = max_chars / 4;
            tracing::warn!(overlap, max_chars, clamped, "overlap not smaller than max_chars, clamping");
            clamped
        } else {
            overlap
        };
        Ok(Self { max_chars, overlap })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Raw windows before trimming. Consecutive windows share exactly
    /// `overlap` characters and the last one ends at the end of `text`.
    pub fn windows<'a>(&self, text: &'a str) -> Vec<Window<'a>> {
        // Byte offset of every char boundary, plus the end of the string.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let length = bounds.len() - 1;

        let mut windows = Vec::new();
        let mut start = 0;
        while start < length {
            let end = (start + self.max_chars).min(length);
            windows.push(Window { start, end, text: &text[bounds[start]..bounds[end]] });
            if end == length {
                break;
            }
            start = end - self.overlap;
        }
        windows
    }

    /// Trimmed, non-empty chunks in input order.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chunks: Vec<String> = self
            .windows(text)
            .into_iter()
            .map(|w| w.text.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        tracing::debug!(chunks = chunks.len(), max_chars = self.max_chars, overlap = self.overlap, "split text");
        chunks
    }
}

/// Convenience wrapper: validate the parameters, then split `text`.
///
/// Empty text yields no chunks without looking at the parameters.
pub fn split_text_into_chunks(text: &str, max_chars: usize, overlap: usize) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Chunker::new(max_chars, overlap)?.split(text))
}
