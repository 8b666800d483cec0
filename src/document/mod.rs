//! Document loading abstraction.
//!
//! A [`Document`] is an ordered sequence of page texts, immutable once
//! loaded. Parsing a source file into pages is treated as an external
//! concern behind the [`DocumentLoader`] trait; the bundled [`TextLoader`]
//! handles plain text with form-feed page breaks.

mod text;

pub use text::TextLoader;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// A loaded document: an ordered sequence of page texts.
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    /// Create a document from page texts.
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Create a single-page document from raw text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
        }
    }

    /// The page texts, in order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True if the document has no pages or only empty pages.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.is_empty())
    }
}

/// Trait for document loader implementations.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load a document from a file path.
    async fn load(&self, path: &Path) -> Result<Document>;
}
