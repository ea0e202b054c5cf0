//! SEM refinement component.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use causalflow_agents::SemRefinementAgent;
use causalflow_core::{
    traits::{ArtifactStore, Component},
    types::{ComponentInputs, ComponentOutput},
    Result,
};
use causalflow_dataset::Dataset;

const INPUT_KEYS: &[&str] = &["data", "separator", "sem", "context", "log_name"];

/// Refines an initial SEM specification against the dataset's columns.
pub struct SemRefinementComponent {
    agent: SemRefinementAgent,
    store: Arc<dyn ArtifactStore>,
}

impl SemRefinementComponent {
    /// Create the component over a SEM agent and an artifact store.
    pub fn new(agent: SemRefinementAgent, store: Arc<dyn ArtifactStore>) -> Self {
        Self { agent, store }
    }
}

#[async_trait]
impl Component for SemRefinementComponent {
    fn name(&self) -> &str {
        "sem_refinement"
    }

    fn description(&self) -> &str {
        "Refine and interpret a structural equation model with an LLM"
    }

    fn input_keys(&self) -> &[&str] {
        INPUT_KEYS
    }

    async fn run(&self, inputs: ComponentInputs) -> Result<ComponentOutput> {
        let data_path = inputs.text("data")?;
        let separator = Dataset::parse_separator(inputs.text_opt("separator").unwrap_or(""))?;
        let initial_model = inputs.text("sem")?;
        let context = inputs.text_opt("context").unwrap_or("");
        let log_name = inputs.text("log_name")?;

        let dataset = Dataset::from_path(data_path, separator)?;
        let outcome = self
            .agent
            .refine(initial_model, dataset.columns(), context)
            .await?;

        let log_file = format!("{}.txt", log_name);
        self.store.delete(&log_file).await?;
        self.store
            .write(&log_file, &outcome.transcript.render())
            .await?;

        Ok(ComponentOutput::json(
            "refined the structural equation model",
            json!({
                "output": outcome.agent_output,
                "interpretation": outcome.interpretation,
                "model": outcome.final_model,
            }),
        )
        .with_artifact(log_file))
    }
}
