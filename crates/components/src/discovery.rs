//! Causal discovery component.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use causalflow_agents::CausalDiscoveryAgent;
use causalflow_core::{
    traits::{ArtifactStore, Component},
    types::{ComponentInputs, ComponentOutput},
    Result,
};
use causalflow_dataset::Dataset;
use causalflow_graph::NodeLinkGraph;

const INPUT_KEYS: &[&str] = &["data", "separator", "background_graph", "context", "log_name"];

/// Runs dataset-level causal discovery through the discovery agent.
///
/// An optional background node-link graph (typically a prior
/// `graph_discovery` export) seeds the proposed structure.
pub struct CausalDiscoveryComponent {
    agent: CausalDiscoveryAgent,
    store: Arc<dyn ArtifactStore>,
}

impl CausalDiscoveryComponent {
    /// Create the component over a discovery agent and an artifact store.
    pub fn new(agent: CausalDiscoveryAgent, store: Arc<dyn ArtifactStore>) -> Self {
        Self { agent, store }
    }
}

#[async_trait]
impl Component for CausalDiscoveryComponent {
    fn name(&self) -> &str {
        "causal_discovery"
    }

    fn description(&self) -> &str {
        "Propose a causal structure and SEM specification for a dataset with an LLM"
    }

    fn input_keys(&self) -> &[&str] {
        INPUT_KEYS
    }

    async fn run(&self, inputs: ComponentInputs) -> Result<ComponentOutput> {
        let data_path = inputs.text("data")?;
        let separator = Dataset::parse_separator(inputs.text_opt("separator").unwrap_or(""))?;
        let context = inputs.text_opt("context").unwrap_or("");
        let log_name = inputs.text("log_name")?;

        let background: Option<NodeLinkGraph> = match inputs.json_opt("background_graph") {
            Some(value) if !value.is_null() => Some(serde_json::from_value(value.clone())?),
            _ => None,
        };

        let dataset = Dataset::from_path(data_path, separator)?;
        let outcome = self
            .agent
            .discover(&dataset.summary(), background.as_ref(), context)
            .await?;

        let log_file = format!("{}.txt", log_name);
        self.store.delete(&log_file).await?;
        self.store
            .write(&log_file, &outcome.transcript.render())
            .await?;

        Ok(ComponentOutput::json(
            format!(
                "proposed {} links over {} variables",
                outcome.graph.links.len(),
                outcome.graph.nodes.len()
            ),
            json!({
                "agent": outcome.agent_output,
                "sem": outcome.sem_spec,
                "graph": outcome.graph,
            }),
        )
        .with_artifact(log_file))
    }
}
