//! Prompt templates for ytsum.
//!
//! Templates use `{{name}}` placeholders. The user template receives
//! `chunk_number`, `total_chunks`, `text` and `title`, plus any
//! `prompt_variables` from the configuration file.

use std::collections::HashMap;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an expert at creating educational summaries. Your task is to:

1. Extract the most important concepts, ideas, and information from the provided text
2. Format the summary as clear, well-structured bullet points
3. Optimize for learning and retention
4. Use proper markdown formatting
5. Group related concepts together
6. Include specific details, examples, and key insights
7. Make it suitable for students and learners

Format your response with:
- Main topic headers using ###
- Key points as bullet points with -
- Sub-points indented with proper spacing
- Important terms or concepts in **bold**
- Examples or specific details in clear, concise language

Focus on clarity, accuracy, and educational value."#;

pub const DEFAULT_USER_PROMPT_TEMPLATE: &str = r#"Please summarize the following text from a YouTube video transcript (Part {{chunk_number}} of {{total_chunks}}):

{{text}}

Create a well-structured summary optimized for learning, using bullet points and proper markdown formatting."#;

/// The prompt pair sent to a provider for every chunk.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub system: String,
    pub user_template: String,
    /// Custom variables from config, available in all prompts.
    pub variables: HashMap<String, String>,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_template: DEFAULT_USER_PROMPT_TEMPLATE.to_string(),
            variables: HashMap::new(),
        }
    }
}

impl Prompts {
    /// Build prompts from the loaded settings.
    pub fn from_settings(settings: &super::Settings) -> Self {
        Self {
            system: settings.system_prompt.clone(),
            user_template: settings.user_prompt_template.clone(),
            variables: settings.prompt_variables.clone(),
        }
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a template that uses single-brace `{name}` placeholders.
    fn render_single_brace(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{}}}", key), value);
        }
        result
    }

    /// Render the user prompt for one chunk.
    ///
    /// Chunk variables take precedence over custom config variables.
    /// Templates written with `{name}` placeholders are accepted as well as
    /// `{{name}}`. The chunk text is substituted last so placeholders inside
    /// the transcript are left alone; a template with no text placeholder
    /// gets the chunk appended.
    pub fn render_chunk(
        &self,
        title: &str,
        chunk_number: usize,
        total_chunks: usize,
        text: &str,
    ) -> String {
        let mut vars = self.variables.clone();
        vars.remove("text");
        vars.insert("chunk_number".to_string(), chunk_number.to_string());
        vars.insert("total_chunks".to_string(), total_chunks.to_string());
        vars.insert("title".to_string(), title.to_string());

        let rendered = Self::render(&self.user_template, &vars);

        if rendered.contains("{{text}}") {
            return rendered.replace("{{text}}", text);
        }

        let rendered = Self::render_single_brace(&rendered, &vars);
        if rendered.contains("{text}") {
            rendered.replace("{text}", text)
        } else {
            format!("{}\n\n{}", rendered.trim_end(), text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_chunk_with_defaults() {
        let prompts = Prompts::default();
        let rendered = prompts.render_chunk("Title", 2, 3, "the transcript body");

        assert!(rendered.contains("(Part 2 of 3)"));
        assert!(rendered.contains("the transcript body"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_render_chunk_custom_variables() {
        let mut prompts = Prompts {
            user_template: "[{{audience}}] {{title}} {{chunk_number}}/{{total_chunks}}: {{text}}"
                .to_string(),
            ..Prompts::default()
        };
        prompts
            .variables
            .insert("audience".to_string(), "beginners".to_string());
        // Chunk variables win over config variables with the same name.
        prompts
            .variables
            .insert("chunk_number".to_string(), "99".to_string());

        let rendered = prompts.render_chunk("Rust", 1, 2, "says {{audience}}");
        assert_eq!(rendered, "[beginners] Rust 1/2: says {{audience}}");
    }

    #[test]
    fn test_render_chunk_single_brace_template() {
        let prompts = Prompts {
            user_template: "Please summarize (Part {chunk_number} of {total_chunks}):\n\n{text}\n"
                .to_string(),
            ..Prompts::default()
        };

        let rendered = prompts.render_chunk("T", 1, 2, "chunk body here");
        assert_eq!(rendered, "Please summarize (Part 1 of 2):\n\nchunk body here\n");
    }

    #[test]
    fn test_render_chunk_without_text_placeholder_appends_chunk() {
        let prompts = Prompts {
            user_template: "Summarize part {{chunk_number}} of {{title}}.\n".to_string(),
            ..Prompts::default()
        };

        let rendered = prompts.render_chunk("Talk", 3, 4, "chunk body here");
        assert_eq!(rendered, "Summarize part 3 of Talk.\n\nchunk body here");
    }
}
