//! Wikipedia-backed knowledge source.

use async_trait::async_trait;
use serde::Deserialize;

use causalflow_core::{
    traits::{KnowledgeSnippet, KnowledgeSource},
    Error, Result,
};

/// Knowledge source querying the MediaWiki search API.
pub struct WikipediaKnowledge {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl WikipediaKnowledge {
    /// Default public search endpoint.
    pub const DEFAULT_ENDPOINT: &'static str =
        "https://en.wikipedia.org/w/rest.php/v1/search/page";

    /// Create a client against the given endpoint.
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64, max_results: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| Error::knowledge(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_results,
        })
    }

    /// Client against the default endpoint with default limits.
    pub fn default_client() -> Result<Self> {
        Self::new(Self::DEFAULT_ENDPOINT, 10_000, 3)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    pages: Vec<SearchPage>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    key: Option<String>,
}

#[async_trait]
impl KnowledgeSource for WikipediaKnowledge {
    async fn lookup(&self, query: &str) -> Result<Vec<KnowledgeSnippet>> {
        tracing::debug!(query = %query, "Querying knowledge source");

        let limit = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| Error::knowledge(format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::knowledge(format!(
                "search returned HTTP {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::knowledge(format!("malformed search response: {}", e)))?;

        Ok(body
            .pages
            .into_iter()
            .take(self.max_results)
            .map(|page| KnowledgeSnippet {
                extract: strip_markup(page.excerpt.or(page.description).unwrap_or_default()),
                url: page
                    .key
                    .map(|key| format!("https://en.wikipedia.org/wiki/{}", key)),
                title: page.title,
            })
            .collect())
    }
}

/// MediaWiki excerpts carry inline match markers; strip tags for prompts.
fn strip_markup(text: String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("Rain is <span class=\"searchmatch\">liquid</span> water.".to_string()),
            "Rain is liquid water."
        );
        assert_eq!(strip_markup("no markup".to_string()), "no markup");
    }

    #[test]
    fn test_search_response_decoding() {
        let body = r#"{
            "pages": [
                {"id": 1, "key": "Rain", "title": "Rain",
                 "excerpt": "<span>Rain</span> is precipitation",
                 "description": "precipitation"}
            ]
        }"#;
        let decoded: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.pages.len(), 1);
        assert_eq!(decoded.pages[0].title, "Rain");
    }
}
