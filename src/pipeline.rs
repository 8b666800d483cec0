//! End-to-end pipeline for question set generation.
//!
//! Coordinates chunking, embedding, indexing, retrieval and generation for
//! a single request. Each call builds its own vector index, so there is no
//! shared mutable state between concurrent requests.

use crate::chunking::{Chunk, ChunkConfig, TextChunker};
use crate::config::{Prompts, Settings};
use crate::document::Document;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{QuizGenError, Result};
use crate::generation::{GenerationRequest, QuestionGenerator, QuestionSet};
use crate::index::{IndexEntry, VectorIndex};
use crate::retrieval::{Retriever, TopicQuery};
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Texts per embedding request issued by the pipeline.
const EMBED_BATCH_SIZE: usize = 64;

/// The main pipeline for generating question sets from documents.
pub struct QuestionPipeline {
    settings: Settings,
    embedder: Arc<dyn Embedder>,
    generator: QuestionGenerator,
}

impl QuestionPipeline {
    /// Create a pipeline with OpenAI-backed components.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let generator = QuestionGenerator::new(
            &settings.generation.model,
            settings.generation.temperature,
        )
        .with_prompts(prompts);

        Ok(Self {
            settings,
            embedder,
            generator,
        })
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        embedder: Arc<dyn Embedder>,
        generator: QuestionGenerator,
    ) -> Self {
        Self {
            settings,
            embedder,
            generator,
        }
    }

    /// Get a reference to the embedder.
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Split a document using the configured chunk sizes.
    pub fn chunk_document(&self, document: &Document) -> Result<Vec<Chunk>> {
        let chunker = TextChunker::new(ChunkConfig {
            chunk_size: self.settings.chunking.chunk_size,
            chunk_overlap: self.settings.chunking.chunk_overlap,
            boundary_markers: self.settings.chunking.boundary_markers.clone(),
        })?;
        chunker.split(document)
    }

    /// Chunk and embed a document into a searchable index.
    ///
    /// Embedding batches are issued concurrently up to the configured limit;
    /// `buffered` yields results in submission order, so entries enter the
    /// index in `sequence_index` order.
    #[instrument(skip(self, document))]
    pub async fn build_index(&self, document: &Document) -> Result<VectorIndex> {
        if document.is_empty() {
            return Err(QuizGenError::InvalidInput(
                "document contains no text to index".to_string(),
            ));
        }
        let chunks = self.chunk_document(document)?;
        info!("Embedding {} chunk(s)", chunks.len());

        let batches: Vec<Vec<String>> = chunks
            .chunks(EMBED_BATCH_SIZE)
            .map(|c| c.iter().map(|chunk| chunk.text.clone()).collect())
            .collect();

        let max_concurrent = self.settings.embedding.max_concurrent_batches.max(1);
        let results: Vec<Vec<Vec<f32>>> = stream::iter(batches.into_iter().map(|batch| {
            let embedder = self.embedder.clone();
            async move { embedder.embed_batch(&batch).await }
        }))
        .buffered(max_concurrent)
        .try_collect()
        .await?;

        let embeddings: Vec<Vec<f32>> = results.into_iter().flatten().collect();
        if embeddings.len() != chunks.len() {
            return Err(QuizGenError::Embedding(format!(
                "embedding service returned {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        let index = VectorIndex::build(entries)?;
        info!(
            "Indexed {} chunk(s) at {} dimensions",
            index.len(),
            index.dimensions()
        );
        Ok(index)
    }

    /// Retrieve context text for a topic over an already-built index.
    pub async fn retrieve_context(
        &self,
        index: &VectorIndex,
        topic: Option<&str>,
    ) -> Result<String> {
        let query = TopicQuery::new(topic.unwrap_or(""), self.settings.retrieval.top_k);
        Retriever::retrieve(index, &query, self.embedder.as_ref()).await
    }

    /// Generate a question set for a document.
    ///
    /// Validates configuration before any external call, then runs
    /// chunk -> embed -> index -> retrieve -> generate. The generation call
    /// is bounded by the configured timeout; expiry discards the request.
    #[instrument(skip(self, document, topic))]
    pub async fn generate_question_set(
        &self,
        document: &Document,
        topic: Option<&str>,
        request: &GenerationRequest,
    ) -> Result<QuestionSet> {
        let index = self.build_index(document).await?;
        let context = self.retrieve_context(&index, topic).await?;

        let timeout_secs = self.settings.generation.timeout_seconds;
        match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.generator.generate(&context, request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(QuizGenError::Timeout(timeout_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic embedder: component per vocabulary term.
    struct TermEmbedder {
        vocab: Vec<&'static str>,
    }

    impl TermEmbedder {
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

    /// Embedder that always fails, for error propagation tests.
    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(QuizGenError::Embedding("service unavailable".to_string()))
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(QuizGenError::Embedding("service unavailable".to_string()))
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    fn test_pipeline(embedder: Arc<dyn Embedder>) -> QuestionPipeline {
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 200;
        settings.chunking.chunk_overlap = 40;
        QuestionPipeline::with_components(
            settings,
            embedder,
            QuestionGenerator::new("gpt-4o-mini", 0.7),
        )
    }

    fn science_document() -> Document {
        let page = "Photosynthesis converts light into chemical energy. \
            Plants absorb carbon dioxide from the air. \
            Gravity governs the motion of planets. \
            Cells divide through a process called mitosis. \
            Photosynthesis occurs inside chloroplasts. \
            Water evaporates and condenses in the water cycle. "
            .repeat(3);
        Document::from_text(page)
    }

    #[tokio::test]
    async fn test_build_index_and_retrieve_topic() {
        let embedder = Arc::new(TermEmbedder {
            vocab: vec!["Photosynthesis", "Gravity", "mitosis"],
        });
        let pipeline = test_pipeline(embedder);

        let index = pipeline.build_index(&science_document()).await.unwrap();
        assert!(index.len() > 1);

        let context = pipeline
            .retrieve_context(&index, Some("Photosynthesis"))
            .await
            .unwrap();
        assert!(context.contains("Photosynthesis"));
    }

    #[tokio::test]
    async fn test_empty_topic_returns_leading_chunks() {
        let embedder = Arc::new(TermEmbedder {
            vocab: vec!["Photosynthesis"],
        });
        let pipeline = test_pipeline(embedder);

        let doc = science_document();
        let index = pipeline.build_index(&doc).await.unwrap();
        let chunks = pipeline.chunk_document(&doc).unwrap();

        let context = pipeline.retrieve_context(&index, None).await.unwrap();
        assert!(context.starts_with(&chunks[0].text));
    }

    #[tokio::test]
    async fn test_empty_document_is_rejected() {
        let embedder = Arc::new(TermEmbedder { vocab: vec!["x"] });
        let pipeline = test_pipeline(embedder);

        let result = pipeline.build_index(&Document::new(vec![])).await;
        assert!(matches!(result, Err(QuizGenError::InvalidInput(_))));

        // Pages that exist but carry no text are rejected the same way.
        let result = pipeline.build_index(&Document::from_text("")).await;
        assert!(matches!(result, Err(QuizGenError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_invalid_chunk_config_fails_before_embedding() {
        // A failing embedder proves validation happens first.
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 100;
        settings.chunking.chunk_overlap = 100;
        let pipeline = QuestionPipeline::with_components(
            settings,
            Arc::new(FailingEmbedder),
            QuestionGenerator::new("gpt-4o-mini", 0.7),
        );

        let result = pipeline.build_index(&science_document()).await;
        assert!(matches!(result, Err(QuizGenError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_embedding_failure_is_surfaced() {
        let pipeline = test_pipeline(Arc::new(FailingEmbedder));
        let result = pipeline.build_index(&science_document()).await;
        assert!(matches!(result, Err(QuizGenError::Embedding(_))));
    }
}
