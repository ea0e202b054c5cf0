//! Pairwise causal relation agent.

use std::sync::Arc;

use causalflow_core::{
    traits::{KnowledgeSource, LlmClient},
    Judgment, Result,
};

use crate::prompt::RelationPromptBuilder;
use crate::transcript::Transcript;
use crate::verdict::{decode_verdict, RelationVerdict};

/// Result of judging one variable pair.
#[derive(Debug)]
pub struct PairJudgment {
    /// The three-valued judgment.
    pub judgment: Judgment,
    /// Decoded verdict with confidence and rationale.
    pub verdict: RelationVerdict,
    /// Full step-by-step transcript of the run.
    pub transcript: Transcript,
}

/// LLM agent judging the causal relation of one variable pair at a time.
///
/// When a knowledge source is attached, each pair is looked up before
/// prompting; lookup failures downgrade to an unassisted judgment rather
/// than failing the pair.
pub struct CausalRelationAgent {
    llm: Arc<dyn LlmClient>,
    knowledge: Option<Arc<dyn KnowledgeSource>>,
    prompt: RelationPromptBuilder,
}

impl CausalRelationAgent {
    /// Create an agent over the given LLM client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            knowledge: None,
            prompt: RelationPromptBuilder::new(),
        }
    }

    /// Consult a knowledge source before judging each pair.
    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeSource>) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    /// Replace the prompt builder.
    pub fn with_prompt(mut self, prompt: RelationPromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Judge the causal relation between two variables.
    ///
    /// The order of `var_a`/`var_b` only fixes which one the verdict labels
    /// "A"; it does not bias the direction.
    pub async fn judge_pair(
        &self,
        var_a: &str,
        var_b: &str,
        context: &str,
    ) -> Result<PairJudgment> {
        let mut transcript = Transcript::new(&format!("causal relation: {} / {}", var_a, var_b));

        let snippets = match &self.knowledge {
            Some(source) => {
                let query = format!("{} {}", var_a, var_b);
                transcript.push(format!("knowledge lookup: {}", query));
                match source.lookup(&query).await {
                    Ok(snippets) => {
                        for snippet in &snippets {
                            transcript.push(format!("knowledge: {}", snippet.title));
                        }
                        snippets
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Knowledge lookup failed, judging without background");
                        transcript.push(format!("knowledge lookup failed: {}", e));
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        let messages = self
            .prompt
            .relation_messages(var_a, var_b, context, &snippets);
        transcript.push(format!("prompting model for {} vs {}", var_a, var_b));

        let response = self.llm.chat(&messages).await?;
        transcript.push(format!("model reply: {}", response.content.trim()));

        let verdict = decode_verdict(&response.content)?;
        let judgment = verdict.judgment()?;
        transcript.push(format!(
            "verdict: {} (confidence {:.2})",
            judgment, verdict.confidence
        ));

        tracing::debug!(var_a = %var_a, var_b = %var_b, judgment = %judgment, "Judged pair");

        Ok(PairJudgment {
            judgment,
            verdict,
            transcript,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causalflow_core::mocks::{MockKnowledge, MockLlm};

    #[tokio::test]
    async fn test_judge_pair_decodes_the_verdict() {
        let llm = Arc::new(MockLlm::constant(
            r#"{"relation":"a_causes_b","confidence":0.9,"rationale":"direct mechanism"}"#,
        ));
        let agent = CausalRelationAgent::new(llm);

        let judged = agent.judge_pair("smoking", "cancer", "").await.unwrap();
        assert_eq!(judged.judgment, Judgment::ACausesB);
        assert_eq!(judged.verdict.rationale, "direct mechanism");
        assert!(judged.transcript.render().contains("a_causes_b"));
    }

    #[tokio::test]
    async fn test_knowledge_snippets_reach_the_transcript() {
        let llm = Arc::new(MockLlm::constant(
            r#"{"relation":"no_relation","confidence":0.5,"rationale":"independent"}"#,
        ));
        let knowledge = MockKnowledge::new().with_snippet(
            "ice cream drownings",
            "Confounding",
            "Summer heat drives both.",
        );
        let agent = CausalRelationAgent::new(llm).with_knowledge(Arc::new(knowledge));

        let judged = agent
            .judge_pair("ice cream", "drownings", "seasonal data")
            .await
            .unwrap();
        assert_eq!(judged.judgment, Judgment::NoRelation);
        assert!(judged.transcript.render().contains("knowledge: Confounding"));
    }

    #[tokio::test]
    async fn test_self_pair_still_reaches_the_model() {
        // The agent has no opinion on pair validity; the aggregator rejects
        // self pairs. The agent just labels what it is given.
        let llm = Arc::new(MockLlm::constant(
            r#"{"relation":"no_relation","confidence":0.1,"rationale":"same variable"}"#,
        ));
        let agent = CausalRelationAgent::new(llm.clone());
        let judged = agent.judge_pair("x", "x", "").await.unwrap();
        assert_eq!(judged.judgment, Judgment::NoRelation);
        assert_eq!(llm.call_count(), 1);
    }
}
