//! Chunk command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::document::{DocumentLoader, TextLoader};
use crate::pipeline::QuestionPipeline;
use anyhow::Result;
use std::path::Path;

/// Run the chunk command: show how a document splits into chunks.
pub async fn run_chunk(
    input: &str,
    chunk_size: Option<usize>,
    overlap: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(size) = chunk_size {
        settings.chunking.chunk_size = size;
    }
    if let Some(overlap) = overlap {
        settings.chunking.chunk_overlap = overlap;
    }

    let pipeline = QuestionPipeline::new(settings)?;
    let document = TextLoader::new().load(Path::new(input)).await?;
    let chunks = pipeline.chunk_document(&document)?;

    if chunks.is_empty() {
        Output::warning("Document contains no text.");
        return Ok(());
    }

    Output::success(&format!(
        "{} chunk(s) from {} page(s)",
        chunks.len(),
        document.page_count()
    ));

    for chunk in &chunks {
        Output::chunk_info(
            chunk.sequence_index,
            chunk.source_page,
            chunk.text.chars().count(),
            &chunk.text,
        );
    }

    Ok(())
}
