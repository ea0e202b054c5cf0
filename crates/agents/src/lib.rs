//! LLM-backed agents for the causal workflows.
//!
//! Each agent wraps an `LlmClient`, producing a structured outcome plus a
//! timestamped transcript that components persist as the run's log artifact.
//! The agents own prompting and reply decoding only; statistical estimation
//! and model fitting belong to external collaborators.

pub mod discovery;
pub mod inference;
pub mod knowledge;
pub mod prompt;
pub mod relation;
pub mod sem;
pub mod transcript;
pub mod verdict;

pub use discovery::{CausalDiscoveryAgent, DiscoveryOutcome};
pub use inference::{CausalInferenceAgent, EstimationTask, InferenceOutcome};
pub use knowledge::WikipediaKnowledge;
pub use prompt::RelationPromptBuilder;
pub use relation::{CausalRelationAgent, PairJudgment};
pub use sem::{SemOutcome, SemRefinementAgent};
pub use transcript::Transcript;
pub use verdict::{decode_verdict, RelationVerdict};
