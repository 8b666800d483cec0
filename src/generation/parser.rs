//! Parser for the numbered-item question template.
//!
//! The prompt asks the model for numbered items with an "Answer:" line and,
//! for MCQ, lettered options. That is a format contract, not a guarantee:
//! well-formed items are kept, everything else degrades the result instead
//! of failing it.

use super::{GenerationRequest, Question, QuestionSet};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static ITEM_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)[.)]\s*(.*)$").expect("valid regex"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([a-dA-D])[.)]\s*(.+)$").expect("valid regex"));

static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*Answer:\s*(.+)$").expect("valid regex"));

static ANSWER_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-dA-D])[.)]\s*(.*)$").expect("valid regex"));

/// Parse raw model output into a question set.
///
/// Items that match the numbered template are kept, up to the requested
/// count. If no item parses at all, the raw text is returned as a single
/// unstructured record. `partial` is set whenever fewer well-formed items
/// than requested survive.
pub fn parse_question_set(raw: &str, request: &GenerationRequest) -> QuestionSet {
    let mut questions: Vec<Question> = split_items(raw)
        .iter()
        .filter_map(|body| parse_item(body, request))
        .collect();

    if questions.len() > request.num_questions {
        questions.truncate(request.num_questions);
    }

    if questions.is_empty() {
        warn!("Model output did not match the question template, returning raw text");
        return QuestionSet {
            questions: vec![Question {
                text: raw.trim().to_string(),
                options: None,
                answer: String::new(),
            }],
            raw_output: raw.to_string(),
            partial: true,
        };
    }

    let partial = questions.len() < request.num_questions;
    if partial {
        debug!(
            "Parsed {} of {} requested questions",
            questions.len(),
            request.num_questions
        );
    }

    QuestionSet {
        questions,
        raw_output: raw.to_string(),
        partial,
    }
}

/// Split raw output into the bodies of numbered items.
fn split_items(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in raw.lines() {
        if let Some(caps) = ITEM_START.captures(line) {
            // Option lines also look like "a) ..."; the leading digit
            // distinguishes a new item.
            if let Some(item) = current.take() {
                items.push(item);
            }
            current = Some(caps[2].to_string());
        } else if let Some(item) = current.as_mut() {
            item.push('\n');
            item.push_str(line);
        }
    }
    if let Some(item) = current {
        items.push(item);
    }
    items
}

/// Parse one item body into a question, or None if malformed.
fn parse_item(body: &str, request: &GenerationRequest) -> Option<Question> {
    let mut text_lines: Vec<&str> = Vec::new();
    let mut options: Vec<String> = Vec::new();
    let mut answer: Option<String> = None;

    for line in body.lines() {
        if let Some(caps) = ANSWER_LINE.captures(line) {
            answer = Some(caps[1].trim().to_string());
        } else if let Some(caps) = OPTION_LINE.captures(line) {
            options.push(caps[2].trim().to_string());
        } else if answer.is_none() && options.is_empty() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                text_lines.push(trimmed);
            }
        }
    }

    let text = text_lines.join(" ");
    let answer = answer?;
    if text.is_empty() {
        return None;
    }

    if request.question_type.has_options() {
        if options.len() < 2 {
            return None;
        }
        let answer = resolve_mcq_answer(&answer, &options);
        Some(Question {
            text,
            options: Some(options),
            answer,
        })
    } else {
        Some(Question {
            text,
            options: None,
            answer,
        })
    }
}

/// Resolve an MCQ answer like "b) [Correct Option]" to the option text.
fn resolve_mcq_answer(answer: &str, options: &[String]) -> String {
    let stripped = answer.trim();

    if let Some(caps) = ANSWER_LETTER.captures(stripped) {
        let letter = caps[1].to_lowercase().chars().next().unwrap_or('a');
        let index = (letter as usize).saturating_sub('a' as usize);
        if index < options.len() {
            return options[index].clone();
        }
        return caps[2].trim_matches(['[', ']']).trim().to_string();
    }

    // No letter prefix: match the answer text against the options.
    let bare = stripped.trim_matches(['[', ']']).trim();
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(bare))
        .cloned()
        .unwrap_or_else(|| bare.to_string())
}
