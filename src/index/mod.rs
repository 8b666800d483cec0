//! In-memory vector index for chunk embeddings.
//!
//! Similarity is cosine: embeddings are L2-normalized at build time, so
//! search is a dot product and the metric is invariant to whatever scaling
//! the embedding service applied. Equal scores preserve document order.

use crate::chunking::Chunk;
use crate::error::{QuizGenError, Result};

/// A chunk paired with its embedding, owned by the index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A search result with score (higher is better).
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chunk: Chunk,
    pub score: f32,
}

/// In-memory nearest-neighbor index over chunk embeddings.
///
/// Built once per generation request in the pipeline, but nothing here
/// prevents a longer-lived index.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from chunk/embedding pairs.
    ///
    /// Fails with `DimensionMismatch` if embedding lengths are inconsistent.
    /// Embeddings are normalized on the way in; entries are immutable after.
    pub fn build(entries: Vec<IndexEntry>) -> Result<Self> {
        let dimensions = entries.first().map(|e| e.embedding.len()).unwrap_or(0);

        let entries = entries
            .into_iter()
            .map(|mut e| {
                if e.embedding.len() != dimensions {
                    return Err(QuizGenError::DimensionMismatch {
                        expected: dimensions,
                        actual: e.embedding.len(),
                    });
                }
                normalize(&mut e.embedding);
                Ok(e)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimension the index was built with (0 when empty).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Indexed chunks in original document order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }

    /// Return the `top_k` most similar chunks, score descending.
    ///
    /// Equal scores keep lower `sequence_index` first. Asking for more than
    /// is indexed returns everything; an empty index returns nothing.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        if query_embedding.len() != self.dimensions {
            return Err(QuizGenError::DimensionMismatch {
                expected: self.dimensions,
                actual: query_embedding.len(),
            });
        }

        let mut query = query_embedding.to_vec();
        normalize(&mut query);

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|e| SearchHit {
                chunk: e.chunk.clone(),
                score: dot(&query, &e.embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.chunk.sequence_index.cmp(&b.chunk.sequence_index))
        });
        hits.truncate(top_k);

        Ok(hits)
    }
}

/// Scale a vector to unit length in place. Zero vectors are left as-is.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
