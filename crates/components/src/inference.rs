//! Causal inference component.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use causalflow_agents::CausalInferenceAgent;
use causalflow_core::{
    traits::{ArtifactStore, Component},
    types::{ComponentInputs, ComponentOutput},
    Result,
};
use causalflow_dataset::Dataset;
use causalflow_graph::NodeLinkGraph;

const INPUT_KEYS: &[&str] = &["data", "separator", "graph", "context", "log_name"];

/// Plans causal effect estimation for a discovered graph.
pub struct CausalInferenceComponent {
    agent: CausalInferenceAgent,
    store: Arc<dyn ArtifactStore>,
}

impl CausalInferenceComponent {
    /// Create the component over an inference agent and an artifact store.
    pub fn new(agent: CausalInferenceAgent, store: Arc<dyn ArtifactStore>) -> Self {
        Self { agent, store }
    }
}

#[async_trait]
impl Component for CausalInferenceComponent {
    fn name(&self) -> &str {
        "causal_inference"
    }

    fn description(&self) -> &str {
        "Plan causal effect estimation over a dataset and its causal graph with an LLM"
    }

    fn input_keys(&self) -> &[&str] {
        INPUT_KEYS
    }

    async fn run(&self, inputs: ComponentInputs) -> Result<ComponentOutput> {
        let data_path = inputs.text("data")?;
        let separator = Dataset::parse_separator(inputs.text_opt("separator").unwrap_or(""))?;
        let context = inputs.text_opt("context").unwrap_or("");
        let log_name = inputs.text("log_name")?;
        let graph: NodeLinkGraph = inputs.decode("graph")?;

        let dataset = Dataset::from_path(data_path, separator)?;
        let outcome = self.agent.plan(&dataset.summary(), &graph, context).await?;

        let log_file = format!("{}.txt", log_name);
        self.store.delete(&log_file).await?;
        self.store
            .write(&log_file, &outcome.transcript.render())
            .await?;

        Ok(ComponentOutput::json(
            format!("planned {} estimation tasks", outcome.tasks.len()),
            json!({
                "agent": outcome.agent_output,
                "plan": outcome.tasks,
            }),
        )
        .with_artifact(log_file))
    }
}
