#![deny(unused)]
//! Causalflow - LLM-assisted causal inference workflows.
//!
//! Thin runner that wires configuration, tracing, the artifact store, the
//! LLM client, and the component registry, then executes one component
//! against a file of key/value input records.

use std::sync::Arc;

use causalflow_agents::{
    CausalDiscoveryAgent, CausalInferenceAgent, CausalRelationAgent, RelationPromptBuilder,
    SemRefinementAgent, WikipediaKnowledge,
};
use causalflow_components::{
    CausalDiscoveryComponent, CausalInferenceComponent, DefaultComponentRegistry,
    GraphDiscoveryComponent, GraphMatrixComponent, SemRefinementComponent,
};
use causalflow_core::config::AppConfig;
use causalflow_core::logging::configure_tracing;
use causalflow_core::traits::{ArtifactStore, ComponentRegistry, KnowledgeSource, LlmClient};
use causalflow_core::types::{ComponentInputs, InputRecord};
use causalflow_store::LocalArtifactStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    configure_tracing(config.logging.json_logs)?;
    tracing::info!("Starting causalflow v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let (component, inputs_path) = match (args.next(), args.next()) {
        (Some(component), Some(path)) => (component, path),
        _ => {
            eprintln!("usage: causalflow <component> <inputs.json>");
            std::process::exit(2);
        }
    };

    // =========================================================================
    // Artifact store
    // =========================================================================
    let store: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(&config.workflow.log_dir));
    tracing::info!(log_dir = %config.workflow.log_dir, "Artifact store initialized");

    // =========================================================================
    // LLM client
    // =========================================================================
    let llm: Arc<dyn LlmClient> =
        match causalflow_model_gateway::create_default_client(&config.model_gateway) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::warn!(error = %e, "No LLM provider configured, using scripted mock client");
                Arc::new(causalflow_core::mocks::MockLlm::constant(
                    r#"{"relation":"no_relation","confidence":0.0,"rationale":"no provider configured"}"#,
                ))
            }
        };

    // =========================================================================
    // Knowledge source
    // =========================================================================
    let knowledge: Option<Arc<dyn KnowledgeSource>> = if config.knowledge.enabled {
        match WikipediaKnowledge::new(
            &config.knowledge.endpoint,
            config.knowledge.timeout_ms,
            config.knowledge.max_results,
        ) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "Knowledge source unavailable");
                None
            }
        }
    } else {
        None
    };

    // =========================================================================
    // Component registry
    // =========================================================================
    let registry = DefaultComponentRegistry::new();

    let mut relation_agent = CausalRelationAgent::new(llm.clone()).with_prompt(
        RelationPromptBuilder::new().with_max_content_length(config.agents.max_content_length),
    );
    if let Some(knowledge) = knowledge {
        relation_agent = relation_agent.with_knowledge(knowledge);
    }

    registry
        .register(Box::new(GraphDiscoveryComponent::new(
            relation_agent,
            store.clone(),
        )))
        .await?;
    registry
        .register(Box::new(CausalDiscoveryComponent::new(
            CausalDiscoveryAgent::new(llm.clone()),
            store.clone(),
        )))
        .await?;
    registry
        .register(Box::new(CausalInferenceComponent::new(
            CausalInferenceAgent::new(llm.clone()),
            store.clone(),
        )))
        .await?;
    registry
        .register(Box::new(SemRefinementComponent::new(
            SemRefinementAgent::new(llm.clone(), config.agents.sem_max_iterations),
            store.clone(),
        )))
        .await?;
    registry.register(Box::new(GraphMatrixComponent)).await?;

    tracing::info!(components = registry.len(), "Component registry initialized");

    // =========================================================================
    // Run the requested component
    // =========================================================================
    let records: Vec<InputRecord> =
        serde_json::from_str(&std::fs::read_to_string(&inputs_path)?)?;
    let inputs = ComponentInputs::from_records(records);

    let output = registry.run(&component, inputs).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
