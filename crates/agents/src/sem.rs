//! Structural equation model refinement agent.

use std::sync::Arc;

use serde::Deserialize;

use causalflow_core::{
    traits::{ChatMessage, LlmClient},
    Error, Result,
};

use crate::transcript::Transcript;
use crate::verdict::extract_json_object;

const SEM_SYSTEM_PROMPT: &str = r#"You are an expert in structural equation modeling. Given a lavaan-style specification and the dataset's observed variables, refine the specification and interpret the refined model.

Rules:
1. Only reference observed variables from the dataset, plus latent variables you define with =~
2. Keep the specification minimal; remove paths you cannot justify
3. Set "done" to true once no further refinement is warranted
4. Reply with a single JSON object and nothing else"#;

/// Outcome of an SEM refinement run.
#[derive(Debug)]
pub struct SemOutcome {
    /// Narrative agent output from the final iteration.
    pub agent_output: String,
    /// Interpretation of the refined model.
    pub interpretation: String,
    /// The refined specification.
    pub final_model: String,
    /// Full transcript across iterations.
    pub transcript: Transcript,
}

#[derive(Debug, Deserialize)]
struct SemReply {
    #[serde(default)]
    model: String,
    #[serde(default)]
    interpretation: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    done: bool,
}

/// Iterative SEM refinement against a fixed variable set.
///
/// Each proposed specification is validated syntactically against the
/// dataset's columns; proposals referencing unknown variables are rejected
/// and fed back. Model fitting itself happens elsewhere.
pub struct SemRefinementAgent {
    llm: Arc<dyn LlmClient>,
    max_iterations: u32,
}

impl SemRefinementAgent {
    /// Create an agent bounded to `max_iterations` refinement rounds.
    pub fn new(llm: Arc<dyn LlmClient>, max_iterations: u32) -> Self {
        Self {
            llm,
            max_iterations: max_iterations.max(1),
        }
    }

    /// Refine an initial SEM specification and interpret the result.
    pub async fn refine(
        &self,
        initial_model: &str,
        variables: &[String],
        context: &str,
    ) -> Result<SemOutcome> {
        let unknown = unknown_variables(initial_model, variables);
        if !unknown.is_empty() {
            return Err(Error::invalid_input(format!(
                "initial SEM references unknown variables: {}",
                unknown.join(", ")
            )));
        }

        let mut transcript = Transcript::new("sem refinement");
        transcript.push(format!("initial model:\n{}", initial_model));

        let mut current = initial_model.to_string();
        let mut interpretation = String::new();
        let mut agent_output = String::new();
        let mut feedback: Option<String> = None;

        for iteration in 1..=self.max_iterations {
            transcript.push(format!("iteration {}", iteration));

            let mut user = format!(
                "Observed variables: {}\n\nCurrent specification:\n{}\n",
                variables.join(", "),
                current
            );
            if !context.trim().is_empty() {
                user.push_str(&format!("\nContext: {}\n", context));
            }
            if let Some(issues) = feedback.take() {
                user.push_str(&format!(
                    "\nYour previous proposal was rejected: {}\n",
                    issues
                ));
            }
            user.push_str(
                "\nReturn JSON: {\"model\": \"<refined specification>\", \
                 \"interpretation\": \"<interpretation>\", \"summary\": \"<narrative>\", \
                 \"done\": true|false}",
            );

            let messages = vec![
                ChatMessage::system(SEM_SYSTEM_PROMPT),
                ChatMessage::user(user),
            ];
            let response = self.llm.chat(&messages).await?;
            transcript.push(format!("model reply: {}", response.content.trim()));

            let payload = extract_json_object(&response.content)
                .ok_or_else(|| Error::agent("SEM reply carried no JSON object"))?;
            let decoded: SemReply = serde_json::from_str(&payload)
                .map_err(|e| Error::agent(format!("malformed SEM reply: {}", e)))?;

            if !decoded.model.trim().is_empty() {
                let unknown = unknown_variables(&decoded.model, variables);
                if !unknown.is_empty() {
                    let issues = format!("unknown variables: {}", unknown.join(", "));
                    transcript.push(format!("proposal rejected, {}", issues));
                    feedback = Some(issues);
                    continue;
                }
                current = decoded.model;
            }
            interpretation = decoded.interpretation;
            agent_output = decoded.summary;

            if decoded.done {
                transcript.push("refinement converged");
                break;
            }
        }

        transcript.push(format!("final model:\n{}", current));

        Ok(SemOutcome {
            agent_output,
            interpretation,
            final_model: current,
            transcript,
        })
    }
}

/// Variables referenced by a lavaan-style specification but absent from both
/// the dataset and the specification's own latent definitions.
fn unknown_variables(spec: &str, variables: &[String]) -> Vec<String> {
    let mut latents: Vec<String> = Vec::new();
    for line in spec.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if let Some((lhs, _)) = line.split_once("=~") {
            latents.push(lhs.trim().to_string());
        }
    }

    let mut unknown: Vec<String> = Vec::new();
    for line in spec.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (lhs, rhs) = match split_operator(line) {
            Some(parts) => parts,
            None => continue,
        };
        for token in lhs.split('+').chain(rhs.split('+')) {
            // Premultipliers like "0.5*x" or "b1*x" label the path, not a
            // variable.
            let name = token.rsplit('*').next().unwrap_or("").trim();
            if name.is_empty() || name.chars().all(|c| c.is_ascii_digit() || c == '.') {
                continue;
            }
            if !variables.iter().any(|v| v == name)
                && !latents.iter().any(|l| l == name)
                && !unknown.iter().any(|u| u == name)
            {
                unknown.push(name.to_string());
            }
        }
    }
    unknown
}

fn split_operator(line: &str) -> Option<(&str, &str)> {
    for op in ["=~", "~~", "~"] {
        if let Some((lhs, rhs)) = line.split_once(op) {
            return Some((lhs, rhs));
        }
    }
    None
}
