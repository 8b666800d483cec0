//! Question generation: request types, prompt assembly, output parsing.

mod generator;
mod parser;

pub use generator::QuestionGenerator;
pub use parser::parse_question_set;

use crate::error::{QuizGenError, Result};
use serde::{Deserialize, Serialize};

/// The kind of questions to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Mcq,
    OneWord,
    LogicalReasoning,
    FillInBlank,
}

impl QuestionType {
    /// Whether questions of this type carry lettered options.
    pub fn has_options(&self) -> bool {
        matches!(self, QuestionType::Mcq)
    }

    /// Human-readable label used in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "multiple choice (MCQ)",
            QuestionType::OneWord => "one word answer",
            QuestionType::LogicalReasoning => "logical reasoning",
            QuestionType::FillInBlank => "fill in the blanks",
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = QuizGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "mcq" | "multiple-choice" => Ok(QuestionType::Mcq),
            "one-word" | "oneword" => Ok(QuestionType::OneWord),
            "logical-reasoning" | "reasoning" => Ok(QuestionType::LogicalReasoning),
            "fill-in-blank" | "fill-in-the-blanks" | "fib" => Ok(QuestionType::FillInBlank),
            _ => Err(QuizGenError::InvalidInput(format!(
                "Unknown question type: {} (expected mcq, one-word, logical-reasoning or fill-in-blank)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Mcq => write!(f, "mcq"),
            QuestionType::OneWord => write!(f, "one-word"),
            QuestionType::LogicalReasoning => write!(f, "logical-reasoning"),
            QuestionType::FillInBlank => write!(f, "fill-in-blank"),
        }
    }
}

/// A validated request for question generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Target grade level, 1 through 12.
    pub grade: u8,
    /// Kind of questions to produce.
    pub question_type: QuestionType,
    /// How many questions to request, 1 through 50.
    pub num_questions: usize,
}

impl GenerationRequest {
    pub const MIN_GRADE: u8 = 1;
    pub const MAX_GRADE: u8 = 12;
    pub const MIN_QUESTIONS: usize = 1;
    pub const MAX_QUESTIONS: usize = 50;

    /// Create a request, validating ranges before any external call.
    pub fn new(grade: u8, question_type: QuestionType, num_questions: usize) -> Result<Self> {
        if !(Self::MIN_GRADE..=Self::MAX_GRADE).contains(&grade) {
            return Err(QuizGenError::InvalidConfig(format!(
                "grade must be between {} and {}, got {}",
                Self::MIN_GRADE,
                Self::MAX_GRADE,
                grade
            )));
        }
        if !(Self::MIN_QUESTIONS..=Self::MAX_QUESTIONS).contains(&num_questions) {
            return Err(QuizGenError::InvalidConfig(format!(
                "num_questions must be between {} and {}, got {}",
                Self::MIN_QUESTIONS,
                Self::MAX_QUESTIONS,
                num_questions
            )));
        }
        Ok(Self {
            grade,
            question_type,
            num_questions,
        })
    }
}

/// A single parsed question with its answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub text: String,
    /// Lettered options, present only for MCQ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// The correct answer. For MCQ this is one of the option texts.
    pub answer: String,
}

/// A generated question set.
///
/// `partial` is set when the model produced fewer well-formed items than
/// requested, or none at all; `raw_output` always carries the model's
/// verbatim text so a degraded result is never silently empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    pub raw_output: String,
    pub partial: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        assert!(GenerationRequest::new(1, QuestionType::Mcq, 1).is_ok());
        assert!(GenerationRequest::new(12, QuestionType::OneWord, 50).is_ok());

        assert!(matches!(
            GenerationRequest::new(0, QuestionType::Mcq, 5),
            Err(QuizGenError::InvalidConfig(_))
        ));
        assert!(matches!(
            GenerationRequest::new(13, QuestionType::Mcq, 5),
            Err(QuizGenError::InvalidConfig(_))
        ));
        assert!(matches!(
            GenerationRequest::new(5, QuestionType::Mcq, 0),
            Err(QuizGenError::InvalidConfig(_))
        ));
        assert!(matches!(
            GenerationRequest::new(5, QuestionType::Mcq, 51),
            Err(QuizGenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_question_type_parsing() {
        assert_eq!("mcq".parse::<QuestionType>().unwrap(), QuestionType::Mcq);
        assert_eq!(
            "one-word".parse::<QuestionType>().unwrap(),
            QuestionType::OneWord
        );
        assert_eq!(
            "Fill-In-The-Blanks".parse::<QuestionType>().unwrap(),
            QuestionType::FillInBlank
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn test_only_mcq_has_options() {
        assert!(QuestionType::Mcq.has_options());
        assert!(!QuestionType::OneWord.has_options());
        assert!(!QuestionType::LogicalReasoning.has_options());
        assert!(!QuestionType::FillInBlank.has_options());
    }
}
