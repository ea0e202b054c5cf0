//! Causal effect estimation planning agent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use causalflow_core::{
    traits::{ChatMessage, LlmClient},
    Error, Result,
};
use causalflow_graph::NodeLinkGraph;

use crate::transcript::Transcript;
use crate::verdict::extract_json_object;

const INFERENCE_SYSTEM_PROMPT: &str = r#"You are an expert in causal inference. Given a dataset description and a causal graph, plan how to estimate the causal effects the graph implies.

For each treatment/outcome pair worth estimating, name the adjustment set the graph requires and a suitable estimator (for example backdoor.linear_regression, propensity_score_matching, instrumental_variable, difference_in_differences).

Reply with a single JSON object and nothing else."#;

/// A single effect-estimation task in the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationTask {
    /// Treatment variable.
    pub treatment: String,
    /// Outcome variable.
    pub outcome: String,
    /// Adjustment set required by the graph.
    #[serde(default)]
    pub adjustment: Vec<String>,
    /// Suggested estimator.
    #[serde(default)]
    pub estimator: String,
}

/// Output of an inference-planning run.
#[derive(Debug)]
pub struct InferenceOutcome {
    /// Narrative agent output.
    pub agent_output: String,
    /// Planned estimation tasks.
    pub tasks: Vec<EstimationTask>,
    /// Full transcript.
    pub transcript: Transcript,
}

#[derive(Debug, Deserialize)]
struct InferenceReply {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    tasks: Vec<EstimationTask>,
}

/// Agent planning effect estimation over a discovered graph.
pub struct CausalInferenceAgent {
    llm: Arc<dyn LlmClient>,
}

impl CausalInferenceAgent {
    /// Create an agent over the given LLM client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Plan effect estimation for the graph over this dataset.
    pub async fn plan(
        &self,
        dataset_summary: &str,
        graph: &NodeLinkGraph,
        context: &str,
    ) -> Result<InferenceOutcome> {
        let mut transcript = Transcript::new("causal inference");
        transcript.push(format!(
            "graph: {} nodes, {} links",
            graph.nodes.len(),
            graph.links.len()
        ));

        let mut user = format!(
            "Dataset:\n{}\n\nCausal graph (node-link JSON):\n{}\n",
            dataset_summary,
            serde_json::to_string(graph)?
        );
        if !context.trim().is_empty() {
            user.push_str(&format!("\nContext: {}\n", context));
        }
        user.push_str(
            "\nReturn JSON: {\"summary\": \"<narrative>\", \"tasks\": [{\"treatment\": ..., \
             \"outcome\": ..., \"adjustment\": [...], \"estimator\": ...}]}",
        );

        let messages = vec![
            ChatMessage::system(INFERENCE_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ];
        transcript.push("prompting model for an estimation plan");

        let response = self.llm.chat(&messages).await?;
        transcript.push(format!("model reply: {}", response.content.trim()));

        let payload = extract_json_object(&response.content)
            .ok_or_else(|| Error::agent("inference reply carried no JSON object"))?;
        let decoded: InferenceReply = serde_json::from_str(&payload)
            .map_err(|e| Error::agent(format!("malformed inference reply: {}", e)))?;

        for task in &decoded.tasks {
            transcript.push(format!(
                "task: {} -> {} via {}",
                task.treatment, task.outcome, task.estimator
            ));
        }

        Ok(InferenceOutcome {
            agent_output: decoded.summary,
            tasks: decoded.tasks,
            transcript,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causalflow_core::mocks::MockLlm;

    #[tokio::test]
    async fn test_plan_decodes_tasks() {
        let llm = Arc::new(MockLlm::constant(
            r#"{"summary": "one backdoor path",
                "tasks": [{"treatment": "x", "outcome": "y",
                           "adjustment": ["z"], "estimator": "backdoor.linear_regression"}]}"#,
        ));
        let agent = CausalInferenceAgent::new(llm);

        let graph: NodeLinkGraph = serde_json::from_str(
            r#"{"nodes": [{"id": "x"}, {"id": "y"}, {"id": "z"}],
                "links": [{"source": "x", "target": "y"},
                          {"source": "z", "target": "x"},
                          {"source": "z", "target": "y"}]}"#,
        )
        .unwrap();

        let outcome = agent.plan("3 columns", &graph, "").await.unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        assert_eq!(outcome.tasks[0].adjustment, vec!["z"]);
        assert!(outcome
            .transcript
            .render()
            .contains("task: x -> y via backdoor.linear_regression"));
    }
}
