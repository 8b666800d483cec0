//! Text chunking for retrieval.
//!
//! Splits page-level document text into overlapping chunks suitable for
//! embedding and similarity search. Cuts prefer paragraph breaks, then
//! sentence terminators, so chunks rarely sever a sentence.

use crate::document::Document;
use crate::error::{QuizGenError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A chunk of document text: the unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub text: String,
    /// Zero-based page the chunk was cut from. Chunks never span pages.
    pub source_page: usize,
    /// Position of this chunk in document order, dense from 0.
    pub sequence_index: usize,
}

/// Configuration for text chunking.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks on the same page.
    pub chunk_overlap: usize,
    /// Boundary markers to cut at, in priority order.
    pub boundary_markers: Vec<String>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            boundary_markers: default_boundary_markers(),
        }
    }
}

/// Paragraph break first, then sentence terminators.
pub fn default_boundary_markers() -> Vec<String> {
    vec![
        "\n\n".to_string(),
        ".".to_string(),
        "!".to_string(),
        "?".to_string(),
    ]
}

impl ChunkConfig {
    /// Create a config with the given sizes and default boundary markers.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            boundary_markers: default_boundary_markers(),
        }
    }

    /// Validate sizing before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(QuizGenError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(QuizGenError::InvalidConfig(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Character-based chunker with boundary-aware cuts and overlap carry.
pub struct TextChunker {
    config: ChunkConfig,
}

impl TextChunker {
    /// Create a chunker, validating the configuration.
    pub fn new(config: ChunkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Split a document into chunks.
    ///
    /// Pages are chunked independently; `sequence_index` runs dense across
    /// the whole document. An empty document yields an empty Vec.
    pub fn split(&self, document: &Document) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();

        for (page_idx, page) in document.pages().iter().enumerate() {
            if page.is_empty() {
                continue;
            }
            let start_index = chunks.len();
            self.split_page(page, page_idx, &mut chunks);
            debug!(
                "Page {}: {} chunk(s)",
                page_idx,
                chunks.len() - start_index
            );
        }

        Ok(chunks)
    }

    /// Greedy scan of a single page.
    ///
    /// Accumulates up to `chunk_size` characters, backtracks to the best
    /// boundary marker within the look-back window, and starts the next
    /// chunk `chunk_overlap` characters before the cut.
    fn split_page(&self, page: &str, page_idx: usize, out: &mut Vec<Chunk>) {
        let chars: Vec<char> = page.chars().collect();
        let len = chars.len();
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        // A cut below this leaves no forward progress after overlap carry.
        let min_stride = overlap + 1;

        let mut start = 0usize;
        loop {
            let end = (start + size).min(len);

            let cut = if end < len {
                self.find_boundary_cut(&chars, start, end, min_stride)
                    .unwrap_or(end)
            } else {
                end
            };

            out.push(Chunk {
                text: chars[start..cut].iter().collect(),
                source_page: page_idx,
                sequence_index: out.len(),
            });

            if cut >= len {
                break;
            }
            start = cut - overlap;
        }
    }

    /// Find the cut position just after the best boundary marker.
    ///
    /// Markers are tried in priority order; within one marker, the rightmost
    /// occurrence wins. The look-back window is half the chunk size, so a
    /// marker-free stretch falls through to a hard cut at the limit.
    fn find_boundary_cut(
        &self,
        chars: &[char],
        start: usize,
        end: usize,
        min_stride: usize,
    ) -> Option<usize> {
        let lookback = self.config.chunk_size / 2;
        let floor = (start + min_stride).max(end.saturating_sub(lookback));

        for marker in &self.config.boundary_markers {
            let needle: Vec<char> = marker.chars().collect();
            if needle.is_empty() || needle.len() > end - start {
                continue;
            }
            // Rightmost occurrence whose cut lands in [floor, end].
            let mut pos = end - needle.len();
            loop {
                let cut = pos + needle.len();
                if cut < floor || pos < start {
                    break;
                }
                if chars[pos..cut] == needle[..] {
                    return Some(cut);
                }
                if pos == 0 {
                    break;
                }
                pos -= 1;
            }
        }
        None
    }
}
