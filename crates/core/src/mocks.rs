//! Mock implementations of core traits for testing.
//!
//! These are compiled into the crate (not cfg(test)-gated) so downstream
//! crates and the runner can script agent behavior without a live provider.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::{
    ChatMessage, KnowledgeSnippet, KnowledgeSource, LlmClient, LlmResponse, LlmUsage,
};
use crate::Result;

// =============================================================================
// Mock LLM Client
// =============================================================================

/// Scripted mock LLM that returns predefined responses in order, cycling
/// when the script runs out.
pub struct MockLlm {
    responses: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
}

impl MockLlm {
    /// Create a new mock LLM with a queue of responses.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Get the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _prompt: &str) -> Result<LlmResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        let idx = (*count - 1) % responses.len().max(1);
        let content = responses.get(idx).cloned().unwrap_or_default();

        Ok(LlmResponse {
            content,
            finish_reason: "stop".to_string(),
            usage: LlmUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            },
        })
    }

    async fn chat(&self, _messages: &[ChatMessage]) -> Result<LlmResponse> {
        self.complete("").await
    }
}

// =============================================================================
// Mock Knowledge Source
// =============================================================================

/// Knowledge source answering from a preset table; unknown queries return
/// no snippets.
#[derive(Default)]
pub struct MockKnowledge {
    entries: HashMap<String, Vec<KnowledgeSnippet>>,
}

impl MockKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the source with snippets for one query.
    pub fn with_entry(mut self, query: &str, snippets: Vec<KnowledgeSnippet>) -> Self {
        self.entries.insert(query.to_string(), snippets);
        self
    }

    /// Convenience: a single titled snippet for one query.
    pub fn with_snippet(self, query: &str, title: &str, extract: &str) -> Self {
        self.with_entry(
            query,
            vec![KnowledgeSnippet {
                title: title.to_string(),
                extract: extract.to_string(),
                url: None,
            }],
        )
    }
}

#[async_trait]
impl KnowledgeSource for MockKnowledge {
    async fn lookup(&self, query: &str) -> Result<Vec<KnowledgeSnippet>> {
        Ok(self.entries.get(query).cloned().unwrap_or_default())
    }
}
