//! Top-K context retrieval.
//!
//! Embeds a topic query, searches the vector index, and concatenates the
//! retrieved chunks into bounded context text for generation.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::VectorIndex;
use tracing::{debug, instrument};

/// Separator between retrieved chunks in the context text.
const CHUNK_SEPARATOR: &str = "\n\n";

/// A topic query over the index.
#[derive(Debug, Clone)]
pub struct TopicQuery {
    /// Topic text. Empty means "no topic filter".
    pub text: String,
    /// Number of chunks to retrieve.
    pub top_k: usize,
}

impl TopicQuery {
    pub const DEFAULT_TOP_K: usize = 3;

    /// Create a query. An empty or whitespace-only topic becomes the
    /// no-filter query.
    pub fn new(text: impl Into<String>, top_k: usize) -> Self {
        let text: String = text.into();
        Self {
            text: text.trim().to_string(),
            top_k,
        }
    }

    /// True when no topic was given.
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for TopicQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            top_k: Self::DEFAULT_TOP_K,
        }
    }
}

/// Retrieves bounded context text from a vector index.
pub struct Retriever;

impl Retriever {
    /// Retrieve context for a query.
    ///
    /// A non-empty topic is embedded once and searched; retrieved chunks are
    /// joined in score-descending order. An empty topic has no similarity
    /// signal to rank by, so it returns the first `top_k` chunks in document
    /// order instead.
    #[instrument(skip(index, embedder), fields(topic = %query.text, top_k = query.top_k))]
    pub async fn retrieve(
        index: &VectorIndex,
        query: &TopicQuery,
        embedder: &dyn Embedder,
    ) -> Result<String> {
        if query.is_unfiltered() {
            let texts: Vec<&str> = index
                .chunks()
                .take(query.top_k)
                .map(|c| c.text.as_str())
                .collect();
            debug!("No topic given, using first {} chunk(s)", texts.len());
            return Ok(texts.join(CHUNK_SEPARATOR));
        }

        let query_embedding = embedder.embed(&query.text).await?;
        let hits = index.search(&query_embedding, query.top_k)?;
        debug!("Retrieved {} chunk(s) for topic", hits.len());

        let texts: Vec<&str> = hits.iter().map(|h| h.chunk.text.as_str()).collect();
        Ok(texts.join(CHUNK_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use crate::index::IndexEntry;
    use async_trait::async_trait;

    /// Deterministic embedder mapping vocabulary term counts to vector
    /// components, so term overlap drives similarity.
    struct TermEmbedder {
        vocab: Vec<&'static str>,
    }

    impl TermEmbedder {
        fn new(vocab: Vec<&'static str>) -> Self {
            Self { vocab }
        }

        fn embed_sync(&self, text: &str) -> Vec<f32> {
            self.vocab
                .iter()
                .map(|term| text.matches(term).count() as f32)
                .collect()
        }
    }

    #[async_trait]
    impl Embedder for TermEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(self.embed_sync(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| self.embed_sync(t)).collect())
        }

        fn dimensions(&self) -> usize {
            self.vocab.len()
        }
    }

    fn chunk(seq: usize, text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            source_page: 0,
            sequence_index: seq,
        }
    }

    fn build_index(embedder: &TermEmbedder, texts: &[&str]) -> VectorIndex {
        let entries = texts
            .iter()
            .enumerate()
            .map(|(i, t)| IndexEntry {
                chunk: chunk(i, t),
                embedding: embedder.embed_sync(t),
            })
            .collect();
        VectorIndex::build(entries).unwrap()
    }

    #[tokio::test]
    async fn test_term_overlap_ranks_matching_chunks() {
        let embedder = TermEmbedder::new(vec!["photosynthesis", "mitosis", "gravity"]);
        let texts = [
            "cells divide through mitosis",
            "gravity pulls objects down",
            "water cycles through the atmosphere",
            "rocks erode over time",
            "photosynthesis converts light to energy",
            "the moon orbits the earth",
            "volcanoes shape the landscape",
            "photosynthesis occurs in chloroplasts",
            "rivers carve canyons",
            "mitosis produces two daughter cells",
        ];
        let index = build_index(&embedder, &texts);

        let query = TopicQuery::new("photosynthesis", 3);
        let context = Retriever::retrieve(&index, &query, &embedder).await.unwrap();

        assert!(context.contains("converts light to energy"));
        assert!(context.contains("occurs in chloroplasts"));
    }

    #[tokio::test]
    async fn test_empty_query_returns_document_order_head() {
        let embedder = TermEmbedder::new(vec!["alpha", "beta"]);
        let texts = ["first alpha", "second beta", "third alpha", "fourth beta"];
        let index = build_index(&embedder, &texts);

        let query = TopicQuery::new("", 3);
        let context = Retriever::retrieve(&index, &query, &embedder).await.unwrap();

        assert_eq!(context, "first alpha\n\nsecond beta\n\nthird alpha");
    }

    #[tokio::test]
    async fn test_empty_query_top_k_beyond_count() {
        let embedder = TermEmbedder::new(vec!["alpha"]);
        let texts = ["one", "two"];
        let index = build_index(&embedder, &texts);

        let query = TopicQuery::new("   ", 10);
        let context = Retriever::retrieve(&index, &query, &embedder).await.unwrap();

        assert_eq!(context, "one\n\ntwo");
    }

    #[tokio::test]
    async fn test_context_joined_score_descending() {
        let embedder = TermEmbedder::new(vec!["alpha", "beta"]);
        // Chunk 2 matches the topic twice, chunk 0 once.
        let texts = ["beta alpha", "beta beta", "alpha alpha beta"];
        let index = build_index(&embedder, &texts);

        let query = TopicQuery::new("alpha", 2);
        let context = Retriever::retrieve(&index, &query, &embedder).await.unwrap();

        let parts: Vec<&str> = context.split("\n\n").collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "alpha alpha beta");
        assert_eq!(parts[1], "beta alpha");
    }

    #[tokio::test]
    async fn test_empty_index_yields_empty_context() {
        let embedder = TermEmbedder::new(vec!["alpha"]);
        let index = VectorIndex::build(vec![]).unwrap();

        let query = TopicQuery::new("alpha", 3);
        let context = Retriever::retrieve(&index, &query, &embedder).await.unwrap();
        assert!(context.is_empty());
    }
}
