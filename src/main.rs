//! QuizGen CLI entry point.

use anyhow::Result;
use clap::Parser;
use quizgen::cli::{commands, Cli, Commands};
use quizgen::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("quizgen={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Generate {
            input,
            topic,
            grade,
            question_type,
            num_questions,
            top_k,
            output,
        } => {
            commands::run_generate(
                input,
                topic.clone(),
                *grade,
                question_type,
                *num_questions,
                *top_k,
                output.clone(),
                settings,
            )
            .await?;
        }

        Commands::Chunk {
            input,
            chunk_size,
            overlap,
        } => {
            commands::run_chunk(input, *chunk_size, *overlap, settings).await?;
        }

        Commands::Search {
            input,
            topic,
            top_k,
        } => {
            commands::run_search(input, topic, *top_k, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
