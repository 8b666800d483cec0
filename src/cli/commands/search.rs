//! Search command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::document::{DocumentLoader, TextLoader};
use crate::pipeline::QuestionPipeline;
use crate::retrieval::TopicQuery;
use anyhow::Result;
use console::style;
use std::path::Path;

/// Run the search command: show the chunks retrieved for a topic.
pub async fn run_search(
    input: &str,
    topic: &str,
    top_k: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Search) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if let Some(top_k) = top_k {
        settings.retrieval.top_k = top_k;
    }

    let pipeline = QuestionPipeline::new(settings)?;
    let document = TextLoader::new().load(Path::new(input)).await?;

    let spinner = Output::spinner("Building index...");
    let index = pipeline.build_index(&document).await?;
    spinner.set_message("Searching...");

    let query = TopicQuery::new(topic, pipeline.settings().retrieval.top_k);
    if query.is_unfiltered() {
        let context = pipeline.retrieve_context(&index, None).await?;
        spinner.finish_and_clear();
        Output::header("Context (no topic, document-order head)");
        println!("{}", context);
        return Ok(());
    }

    let embedding = pipeline.embedder().embed(&query.text).await?;
    let hits = index.search(&embedding, query.top_k)?;
    spinner.finish_and_clear();

    if hits.is_empty() {
        Output::warning("No results found.");
        return Ok(());
    }

    Output::success(&format!("Found {} chunk(s)", hits.len()));
    for hit in &hits {
        println!(
            "\n{} chunk {} (page {}, score: {:.3})",
            style(">>").green(),
            style(hit.chunk.sequence_index).bold(),
            hit.chunk.source_page,
            hit.score
        );
        println!("{}", hit.chunk.text);
    }

    Ok(())
}
