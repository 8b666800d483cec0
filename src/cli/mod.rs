//! CLI module for QuizGen.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// QuizGen - Study Question Generation
///
/// Generate grade-targeted study questions from a document using
/// retrieval-augmented generation.
#[derive(Parser, Debug)]
#[command(name = "quizgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a question set from a document
    Generate {
        /// Path to the source document (plain text or markdown)
        input: String,

        /// Topic or keyword to focus on (optional)
        #[arg(short, long)]
        topic: Option<String>,

        /// Target grade level (1-12)
        #[arg(short, long, default_value = "8")]
        grade: u8,

        /// Question type (mcq, one-word, logical-reasoning, fill-in-blank)
        #[arg(short = 'q', long, default_value = "mcq")]
        question_type: String,

        /// Number of questions to generate (1-50)
        #[arg(short, long, default_value = "20")]
        num_questions: usize,

        /// Number of context chunks to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Write the question set as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show how a document splits into retrieval chunks
    Chunk {
        /// Path to the source document
        input: String,

        /// Override chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Override chunk overlap in characters
        #[arg(long)]
        overlap: Option<usize>,
    },

    /// Show the context retrieved for a topic
    Search {
        /// Path to the source document
        input: String,

        /// Topic to search for
        topic: String,

        /// Number of context chunks to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "generation.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,
}
