//! Plain-text document loader.
//!
//! Reads UTF-8 text files. Form feed characters (`\x0c`), as emitted by
//! `pdftotext` and similar extractors, are treated as page separators.

use super::{Document, DocumentLoader};
use crate::error::{QuizGenError, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Loader for plain text and markdown files.
pub struct TextLoader;

impl TextLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentLoader for TextLoader {
    async fn load(&self, path: &Path) -> Result<Document> {
        let raw = tokio::fs::read(path).await.map_err(|e| {
            QuizGenError::DocumentLoad(format!("{}: {}", path.display(), e))
        })?;

        let text = String::from_utf8(raw).map_err(|_| {
            QuizGenError::DocumentLoad(format!(
                "{}: file is not valid UTF-8 text",
                path.display()
            ))
        })?;

        let pages: Vec<String> = text
            .split('\u{0c}')
            .map(|p| p.to_string())
            .collect();

        debug!("Loaded {} page(s) from {}", pages.len(), path.display());
        Ok(Document::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_single_page() {
        let dir = std::env::temp_dir();
        let path = dir.join("quizgen_test_single.txt");
        tokio::fs::write(&path, "hello world").await.unwrap();

        let doc = TextLoader::new().load(&path).await.unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages()[0], "hello world");

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_load_form_feed_pages() {
        let dir = std::env::temp_dir();
        let path = dir.join("quizgen_test_pages.txt");
        tokio::fs::write(&path, "page one\u{0c}page two\u{0c}page three")
            .await
            .unwrap();

        let doc = TextLoader::new().load(&path).await.unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages()[1], "page two");

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = TextLoader::new()
            .load(Path::new("/nonexistent/quizgen_missing.txt"))
            .await;
        assert!(matches!(result, Err(QuizGenError::DocumentLoad(_))));
    }
}
