//! Paragraph-aware text chunking
//!
//! Text is first split on blank lines. A paragraph that fits in
//! `chunk_size` characters becomes one chunk; a longer one is cut into
//! windows of `chunk_size` characters whose start advances by
//! `chunk_size - chunk_overlap`.

use themis_domain::constants::{CHUNK_OVERLAP_DEFAULT, CHUNK_SIZE_DEFAULT, PARAGRAPH_SEPARATOR};
use themis_domain::error::{Error, Result};
use themis_domain::value_objects::{Chunk, Document};

/// Validated chunking parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingOptions {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkingOptions {
    /// Create options, rejecting sizes that would not advance
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::configuration("chunk_size must be positive"));
        }
        if chunk_overlap >= chunk_size {
            return Err(Error::configuration(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Maximum chunk length in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by consecutive windows
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE_DEFAULT,
            chunk_overlap: CHUNK_OVERLAP_DEFAULT,
        }
    }
}

/// Split `text` into ordered chunk strings
///
/// Pure function: identical input and options always give the same output.
pub fn chunk_text(text: &str, options: &ChunkingOptions) -> Vec<String> {
    let mut chunks = Vec::new();
    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        let chars: Vec<char> = paragraph.chars().collect();
        if chars.len() <= options.chunk_size {
            chunks.push(paragraph.to_string());
            continue;
        }
        let mut start = 0;
        while start < chars.len() {
            let end = (start + options.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            if !window.trim().is_empty() {
                chunks.push(window);
            }
            start += options.step();
        }
    }
    chunks
}

/// Chunk a document, carrying its id, partition and title onto every chunk
pub fn chunk_document(document: &Document, options: &ChunkingOptions) -> Vec<Chunk> {
    Chunk::from_texts(document, chunk_text(&document.text, options))
}
