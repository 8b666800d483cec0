//! Prompt templates for QuizGen.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory. Templates use {{variable}} placeholders.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub generation: GenerationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPrompts {
    pub system: String,
    pub user: String,
}

impl Default for GenerationPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an educational content designer. You write study questions for school students.

Guidelines:
- Every question must be answerable from the provided content alone
- Match the difficulty and vocabulary to the requested grade level
- Follow the requested output format exactly, with no commentary before or after the questions
- Provide exactly one correct answer per question"#
                .to_string(),

            user: r#"Based on the following content, generate {{num_questions}} {{question_type}} questions for Grade {{grade}} students.
Also, provide the correct answer for each question.

{{context}}

Format:
{{format_block}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from a custom directory if given.
    ///
    /// Looks for `generation.toml` in the custom directory; missing files
    /// fall back to the defaults.
    pub fn load(
        custom_dir: Option<&str>,
        variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let path = PathBuf::from(shellexpand::tilde(dir).to_string()).join("generation.toml");
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                prompts.generation = toml::from_str(&content)?;
            }
        }

        if let Some(vars) = variables {
            prompts.variables = vars.clone();
        }

        Ok(prompts)
    }

    /// Render a template, substituting the given variables plus any custom
    /// variables from configuration.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut rendered = template.to_string();
        for (key, value) in vars.iter().chain(self.variables.iter()) {
            rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_variables() {
        let prompts = Prompts::default();
        let mut vars = HashMap::new();
        vars.insert("grade".to_string(), "7".to_string());

        let rendered = prompts.render_with_custom("Grade {{grade}} quiz", &vars);
        assert_eq!(rendered, "Grade 7 quiz");
    }

    #[test]
    fn test_custom_variables_available_everywhere() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("school".to_string(), "Northside".to_string());

        let rendered = prompts.render_with_custom("Welcome to {{school}}", &HashMap::new());
        assert_eq!(rendered, "Welcome to Northside");
    }

    #[test]
    fn test_default_user_template_has_placeholders() {
        let prompts = Prompts::default();
        for placeholder in [
            "{{num_questions}}",
            "{{question_type}}",
            "{{grade}}",
            "{{context}}",
            "{{format_block}}",
        ] {
            assert!(prompts.generation.user.contains(placeholder));
        }
    }
}
