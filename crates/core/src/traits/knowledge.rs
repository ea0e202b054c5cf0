//! External knowledge lookup traits.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A snippet returned by a knowledge lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    /// Article or entry title.
    pub title: String,
    /// Short extract of the entry.
    pub extract: String,
    /// Canonical URL, when known.
    pub url: Option<String>,
}

/// Read-only knowledge source consulted before causal judgments.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Look up snippets relevant to a free-text query.
    async fn lookup(&self, query: &str) -> Result<Vec<KnowledgeSnippet>>;
}
