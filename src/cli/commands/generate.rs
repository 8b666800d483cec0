//! Generate command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::document::{DocumentLoader, TextLoader};
use crate::generation::{GenerationRequest, QuestionType};
use crate::pipeline::QuestionPipeline;
use anyhow::Result;
use std::path::Path;

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    input: &str,
    topic: Option<String>,
    grade: u8,
    question_type: &str,
    num_questions: usize,
    top_k: Option<usize>,
    output: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if let Some(top_k) = top_k {
        settings.retrieval.top_k = top_k;
    }

    // Validate before any external call
    let question_type: QuestionType = question_type.parse()?;
    let request = GenerationRequest::new(grade, question_type, num_questions)?;

    let pipeline = QuestionPipeline::new(settings)?;

    let spinner = Output::spinner("Loading document...");
    let document = TextLoader::new().load(Path::new(input)).await?;
    spinner.set_message("Generating questions...");

    let result = pipeline
        .generate_question_set(&document, topic.as_deref(), &request)
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(set) => {
            if set.partial {
                Output::warning(&format!(
                    "Model output was only partially structured ({} of {} questions parsed).",
                    set.questions.len(),
                    request.num_questions
                ));
            } else {
                Output::success(&format!("Generated {} question(s)", set.questions.len()));
            }

            for (i, question) in set.questions.iter().enumerate() {
                Output::question(
                    i + 1,
                    &question.text,
                    question.options.as_deref(),
                    &question.answer,
                );
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&set)?;
                tokio::fs::write(&path, json).await?;
                Output::info(&format!("Wrote question set to {}", path));
            }
        }
        Err(e) => {
            Output::error(&format!("Generation failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
