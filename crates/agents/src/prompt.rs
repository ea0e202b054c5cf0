//! Prompt construction for the pairwise relation agent.

use causalflow_core::traits::{ChatMessage, KnowledgeSnippet};

/// Builder for pairwise relation prompts.
#[derive(Debug, Clone)]
pub struct RelationPromptBuilder {
    system_prompt: String,
    max_content_length: usize,
}

impl Default for RelationPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationPromptBuilder {
    /// Create a new prompt builder with default settings.
    pub fn new() -> Self {
        Self {
            system_prompt: Self::default_system_prompt().to_string(),
            max_content_length: 1500,
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set maximum length for injected context and snippets.
    pub fn with_max_content_length(mut self, length: usize) -> Self {
        self.max_content_length = length;
        self
    }

    /// Build the messages asking for a verdict on one variable pair.
    pub fn relation_messages(
        &self,
        var_a: &str,
        var_b: &str,
        context: &str,
        snippets: &[KnowledgeSnippet],
    ) -> Vec<ChatMessage> {
        let mut user = format!("Variable A: \"{}\"\nVariable B: \"{}\"\n", var_a, var_b);

        if !context.trim().is_empty() {
            user.push_str(&format!("\nDomain context: {}\n", self.truncate(context)));
        }

        if !snippets.is_empty() {
            user.push_str("\nBackground knowledge:\n");
            for snippet in snippets {
                user.push_str(&format!(
                    "- {}: {}\n",
                    snippet.title,
                    self.truncate(&snippet.extract)
                ));
            }
        }

        user.push_str(
            "\nOutput JSON: {\"relation\":\"a_causes_b\"|\"b_causes_a\"|\"no_relation\",\
             \"confidence\":0.0-1.0,\"rationale\":\"brief\"}",
        );

        vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(user),
        ]
    }

    /// Truncate content to the maximum length on a word boundary.
    fn truncate(&self, content: &str) -> String {
        if content.len() <= self.max_content_length {
            return content.to_string();
        }
        let mut end = self.max_content_length;
        while !content.is_char_boundary(end) {
            end -= 1;
        }
        let truncated = &content[..end];
        match truncated.rfind(' ') {
            Some(last_space) => format!("{}...", &truncated[..last_space]),
            None => format!("{}...", truncated),
        }
    }

    /// Default system prompt for pairwise causal judgment.
    const fn default_system_prompt() -> &'static str {
        r#"You are an expert in causal reasoning. Your task is to decide whether one variable directly causes another.

Key principles:
1. CAUSATION requires that changing one variable would change the other
2. CORRELATION is not causation; co-occurrence alone is insufficient
3. Consider plausible mechanisms: how would A lead to B, or B lead to A?
4. Prefer "no_relation" when the evidence only supports association through a common cause

Relation labels:
- "a_causes_b": Variable A directly causes Variable B
- "b_causes_a": Variable B directly causes Variable A
- "no_relation": no direct causal relation in either direction

Always respond with valid JSON. Be conservative: only claim causation when the mechanism is plausible."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_messages_carry_both_variables() {
        let builder = RelationPromptBuilder::new();
        let messages = builder.relation_messages("rainfall", "traffic", "", &[]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[1].content.contains("Variable A: \"rainfall\""));
        assert!(messages[1].content.contains("Variable B: \"traffic\""));
        assert!(messages[1].content.contains("no_relation"));
    }

    #[test]
    fn test_context_and_snippets_are_injected() {
        let builder = RelationPromptBuilder::new();
        let snippets = vec![KnowledgeSnippet {
            title: "Rain".to_string(),
            extract: "Rain is liquid precipitation.".to_string(),
            url: None,
        }];
        let messages = builder.relation_messages("rain", "floods", "hydrology study", &snippets);

        let user = &messages[1].content;
        assert!(user.contains("Domain context: hydrology study"));
        assert!(user.contains("- Rain: Rain is liquid precipitation."));
    }

    #[test]
    fn test_truncate_respects_word_boundaries() {
        let builder = RelationPromptBuilder::new().with_max_content_length(20);

        let short = "short context";
        let messages = builder.relation_messages("a", "b", short, &[]);
        assert!(messages[1].content.contains("short context"));

        let long = "a rather long context string that keeps going";
        let messages = builder.relation_messages("a", "b", long, &[]);
        assert!(messages[1].content.contains("..."));
        assert!(!messages[1].content.contains("keeps going"));
    }
}
