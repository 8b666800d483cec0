//! QuizGen - Study Question Generation
//!
//! A CLI tool for generating grade-targeted study questions from documents
//! using retrieval-augmented generation.
//!
//! # Overview
//!
//! QuizGen allows you to:
//! - Split a document into overlapping retrieval chunks
//! - Build an in-memory vector index over chunk embeddings
//! - Retrieve the most relevant passages for a topic
//! - Generate MCQ, one-word, logical-reasoning or fill-in-the-blank
//!   question sets with answers, grounded in the document
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `document` - Document loading abstraction
//! - `chunking` - Text chunking with boundary-aware overlap
//! - `embedding` - Embedding generation
//! - `index` - In-memory vector index
//! - `retrieval` - Top-K context retrieval
//! - `generation` - Prompt assembly and output parsing
//! - `pipeline` - End-to-end pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use quizgen::config::Settings;
//! use quizgen::document::{DocumentLoader, TextLoader};
//! use quizgen::generation::{GenerationRequest, QuestionType};
//! use quizgen::pipeline::QuestionPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = QuestionPipeline::new(settings)?;
//!
//!     let document = TextLoader::new().load("notes.txt".as_ref()).await?;
//!     let request = GenerationRequest::new(8, QuestionType::Mcq, 10)?;
//!     let set = pipeline
//!         .generate_question_set(&document, Some("photosynthesis"), &request)
//!         .await?;
//!     println!("Generated {} questions", set.questions.len());
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod retrieval;

pub use error::{QuizGenError, Result};
