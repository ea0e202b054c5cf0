//! LLM provider access for the causal workflows.
//!
//! Wraps Rig provider clients behind the core `LlmClient` trait so agents
//! stay provider-agnostic.

pub mod rig_client;

pub use rig_client::{create_default_client, RigConfig, RigLlmClient, RigProvider};
