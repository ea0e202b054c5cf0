//! Pairwise graph discovery component.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use causalflow_agents::CausalRelationAgent;
use causalflow_core::{
    traits::{ArtifactStore, Component},
    types::{ComponentInputs, ComponentOutput},
    Result,
};
use causalflow_dataset::Dataset;
use causalflow_graph::CausalGraphBuilder;

const INPUT_KEYS: &[&str] = &["data", "separator", "context", "log_name"];

/// Discovers a causal graph by judging every unordered column pair.
///
/// Walks the dataset's column pairs in order, feeds each judgment into the
/// graph builder, and returns the node-link graph plus the per-pair result
/// log. The full agent transcript is written as `<log_name>.txt`.
pub struct GraphDiscoveryComponent {
    agent: CausalRelationAgent,
    store: Arc<dyn ArtifactStore>,
}

impl GraphDiscoveryComponent {
    /// Create the component over a relation agent and an artifact store.
    pub fn new(agent: CausalRelationAgent, store: Arc<dyn ArtifactStore>) -> Self {
        Self { agent, store }
    }
}

#[async_trait]
impl Component for GraphDiscoveryComponent {
    fn name(&self) -> &str {
        "graph_discovery"
    }

    fn description(&self) -> &str {
        "Discover a causal graph by judging each pair of dataset columns with an LLM"
    }

    fn input_keys(&self) -> &[&str] {
        INPUT_KEYS
    }

    async fn run(&self, inputs: ComponentInputs) -> Result<ComponentOutput> {
        let data_path = inputs.text("data")?;
        let separator = Dataset::parse_separator(inputs.text_opt("separator").unwrap_or(""))?;
        let context = inputs.text_opt("context").unwrap_or("");
        let log_name = inputs.text("log_name")?;

        let dataset = Dataset::from_path(data_path, separator)?;
        let pairs = dataset.variable_pairs();
        tracing::info!(
            columns = dataset.columns().len(),
            pairs = pairs.len(),
            "Starting pairwise graph discovery"
        );

        let mut builder = CausalGraphBuilder::with_variables(dataset.columns().iter().cloned());
        let mut result_log = Vec::with_capacity(pairs.len());
        let mut full_log = Vec::with_capacity(pairs.len());

        for (var_a, var_b) in &pairs {
            let judged = self.agent.judge_pair(var_a, var_b, context).await?;
            result_log.push(format!(
                "{} / {}: {} -> {}",
                var_a, var_b, judged.verdict.rationale, judged.judgment
            ));
            full_log.push(judged.transcript.render());
            builder.update(var_a, var_b, judged.judgment)?;
        }

        let graph = builder.export();

        let log_file = format!("{}.txt", log_name);
        self.store.delete(&log_file).await?;
        self.store.write(&log_file, &full_log.join("\n\n")).await?;

        Ok(ComponentOutput::json(
            format!(
                "judged {} pairs over {} variables",
                pairs.len(),
                graph.nodes.len()
            ),
            json!({ "graph": graph, "log": result_log }),
        )
        .with_artifact(log_file))
    }
}
