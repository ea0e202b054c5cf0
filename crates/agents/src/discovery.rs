//! Dataset-level causal discovery agent.

use std::sync::Arc;

use serde::Deserialize;

use causalflow_core::{
    traits::{ChatMessage, LlmClient},
    Error, Result,
};
use causalflow_graph::NodeLinkGraph;

use crate::transcript::Transcript;
use crate::verdict::extract_json_object;

const DISCOVERY_SYSTEM_PROMPT: &str = r#"You are an expert in causal discovery. Given a dataset description and optional background knowledge, propose a directed causal structure over the dataset's variables and express it as a structural equation model.

Rules:
1. Only use variables that appear in the dataset
2. Keep the background graph's edges unless the data description contradicts them
3. Express the structure twice: as a node-link graph and as a lavaan-style SEM specification
4. Reply with a single JSON object and nothing else"#;

/// Output of a discovery run.
#[derive(Debug)]
pub struct DiscoveryOutcome {
    /// Narrative agent output.
    pub agent_output: String,
    /// SEM specification derived from the discovered structure.
    pub sem_spec: String,
    /// Discovered causal structure.
    pub graph: NodeLinkGraph,
    /// Full transcript.
    pub transcript: Transcript,
}

#[derive(Debug, Deserialize)]
struct DiscoveryReply {
    graph: NodeLinkGraph,
    #[serde(default)]
    sem: String,
    #[serde(default)]
    summary: String,
}

/// Agent proposing a causal structure over a whole dataset.
pub struct CausalDiscoveryAgent {
    llm: Arc<dyn LlmClient>,
}

impl CausalDiscoveryAgent {
    /// Create an agent over the given LLM client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Propose a causal structure and SEM specification for the dataset.
    ///
    /// `background` seeds the model with a previously discovered node-link
    /// graph when present.
    pub async fn discover(
        &self,
        dataset_summary: &str,
        background: Option<&NodeLinkGraph>,
        context: &str,
    ) -> Result<DiscoveryOutcome> {
        let mut transcript = Transcript::new("causal discovery");

        let mut user = format!("Dataset:\n{}\n", dataset_summary);
        if let Some(graph) = background {
            user.push_str(&format!(
                "\nBackground causal graph (node-link JSON):\n{}\n",
                serde_json::to_string(graph)?
            ));
            transcript.push(format!(
                "background graph: {} nodes, {} links",
                graph.nodes.len(),
                graph.links.len()
            ));
        }
        if !context.trim().is_empty() {
            user.push_str(&format!("\nContext: {}\n", context));
        }
        user.push_str(
            "\nReturn JSON: {\"graph\": {\"nodes\": [{\"id\": ...}], \"links\": \
             [{\"source\": ..., \"target\": ...}]}, \"sem\": \"<lavaan-style \
             specification>\", \"summary\": \"<narrative>\"}",
        );

        let messages = vec![
            ChatMessage::system(DISCOVERY_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ];
        transcript.push("prompting model for a causal structure");

        let response = self.llm.chat(&messages).await?;
        transcript.push(format!("model reply: {}", response.content.trim()));

        let payload = extract_json_object(&response.content)
            .ok_or_else(|| Error::agent("discovery reply carried no JSON object"))?;
        let decoded: DiscoveryReply = serde_json::from_str(&payload)
            .map_err(|e| Error::agent(format!("malformed discovery reply: {}", e)))?;

        transcript.push(format!(
            "proposed structure: {} nodes, {} links",
            decoded.graph.nodes.len(),
            decoded.graph.links.len()
        ));

        Ok(DiscoveryOutcome {
            agent_output: decoded.summary,
            sem_spec: decoded.sem,
            graph: decoded.graph,
            transcript,
        })
    }
}
