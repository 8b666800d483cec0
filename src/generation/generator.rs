//! Question generation via chat completion.

use super::{parse_question_set, GenerationRequest, QuestionSet, QuestionType};
use crate::config::Prompts;
use crate::error::{QuizGenError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Generates question sets from retrieved context.
///
/// Stateless across calls; each `generate` is independent given its inputs.
pub struct QuestionGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl QuestionGenerator {
    /// Create a new generator.
    pub fn new(model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate a question set grounded in the given context.
    #[instrument(skip(self, context), fields(
        grade = request.grade,
        question_type = %request.question_type,
        num_questions = request.num_questions,
    ))]
    pub async fn generate(
        &self,
        context: &str,
        request: &GenerationRequest,
    ) -> Result<QuestionSet> {
        info!("Generating {} question(s)", request.num_questions);

        let user_prompt = self.build_user_prompt(context, request);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.generation.system.clone())
                .build()
                .map_err(|e| QuizGenError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| QuizGenError::Generation(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| QuizGenError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| QuizGenError::Generation(format!("Chat API error: {}", e)))?;

        let raw = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| QuizGenError::Generation("Empty response from model".to_string()))?
            .clone();

        let set = parse_question_set(&raw, request);
        debug!(
            "Parsed {} question(s), partial = {}",
            set.questions.len(),
            set.partial
        );
        Ok(set)
    }

    /// Assemble the instruction block sent as the user message.
    pub fn build_user_prompt(&self, context: &str, request: &GenerationRequest) -> String {
        let mut vars = HashMap::new();
        vars.insert(
            "num_questions".to_string(),
            request.num_questions.to_string(),
        );
        vars.insert(
            "question_type".to_string(),
            request.question_type.label().to_string(),
        );
        vars.insert("grade".to_string(), request.grade.to_string());
        vars.insert("context".to_string(), context.to_string());
        vars.insert(
            "format_block".to_string(),
            format_block(request.question_type).to_string(),
        );

        self.prompts
            .render_with_custom(&self.prompts.generation.user, &vars)
    }
}

/// The output-format template embedded in the prompt.
fn format_block(question_type: QuestionType) -> &'static str {
    if question_type.has_options() {
        "1. Question?\n   a) Option 1\n   b) Option 2\n   c) Option 3\n   d) Option 4\n   Answer: b) [Correct Option]"
    } else {
        "1. Question?\n   Answer: [Correct Answer]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_request_parameters() {
        let generator = QuestionGenerator::new("gpt-4o-mini", 0.7);
        let request = GenerationRequest::new(8, QuestionType::Mcq, 5).unwrap();

        let prompt = generator.build_user_prompt("Plants convert sunlight.", &request);

        assert!(prompt.contains("5"));
        assert!(prompt.contains("multiple choice (MCQ)"));
        assert!(prompt.contains("Grade 8"));
        assert!(prompt.contains("Plants convert sunlight."));
        assert!(prompt.contains("Answer: b) [Correct Option]"));
    }

    #[test]
    fn test_prompt_format_block_without_options() {
        let generator = QuestionGenerator::new("gpt-4o-mini", 0.7);
        let request = GenerationRequest::new(4, QuestionType::OneWord, 3).unwrap();

        let prompt = generator.build_user_prompt("ctx", &request);

        assert!(prompt.contains("Answer: [Correct Answer]"));
        assert!(!prompt.contains("a) Option 1"));
    }
}
