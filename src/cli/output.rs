//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a chunk summary line.
    pub fn chunk_info(sequence_index: usize, source_page: usize, chars: usize, preview: &str) {
        println!(
            "\n{} chunk {} (page {}, {} chars)",
            style(">>").green(),
            style(sequence_index).bold(),
            source_page,
            chars
        );
        println!("   {}", content_preview(preview, 160));
    }

    /// Print a single generated question.
    pub fn question(number: usize, text: &str, options: Option<&[String]>, answer: &str) {
        println!("\n{} {}", style(format!("{}.", number)).bold(), text);
        if let Some(options) = options {
            for (i, option) in options.iter().enumerate() {
                let letter = (b'a' + i as u8) as char;
                println!("   {} {}", style(format!("{})", letter)).cyan(), option);
            }
        }
        println!("   {} {}", style("Answer:").green().bold(), answer);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis, flattening newlines.
fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_len {
        content
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}
