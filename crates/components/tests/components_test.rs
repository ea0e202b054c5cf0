//! Integration tests for the workflow components with scripted agents.

use std::io::Write;
use std::sync::Arc;

use causalflow_agents::{
    CausalDiscoveryAgent, CausalInferenceAgent, CausalRelationAgent, SemRefinementAgent,
};
use causalflow_components::{
    CausalDiscoveryComponent, CausalInferenceComponent, GraphDiscoveryComponent,
    GraphMatrixComponent, SemRefinementComponent,
};
use causalflow_core::mocks::MockLlm;
use causalflow_core::traits::{ArtifactStore, Component};
use causalflow_core::types::ComponentInputs;
use causalflow_graph::NodeLinkGraph;
use causalflow_store::InMemoryArtifactStore;
use serde_json::json;

fn csv_fixture(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn base_inputs(path: &std::path::Path, log_name: &str) -> ComponentInputs {
    ComponentInputs::default()
        .set("data", path.to_string_lossy().into_owned())
        .set("separator", ",")
        .set("context", "test run")
        .set("log_name", log_name)
}

#[tokio::test]
async fn graph_discovery_walks_all_pairs_and_writes_the_log() {
    let csv = csv_fixture("x,y,z\n1,2,3\n4,5,6\n");
    let llm = Arc::new(MockLlm::new(vec![
        r#"{"relation":"a_causes_b","confidence":0.9,"rationale":"x drives y"}"#.to_string(),
        r#"{"relation":"b_causes_a","confidence":0.8,"rationale":"z drives x"}"#.to_string(),
        r#"{"relation":"no_relation","confidence":0.7,"rationale":"independent"}"#.to_string(),
    ]));
    let store = Arc::new(InMemoryArtifactStore::new());
    let component =
        GraphDiscoveryComponent::new(CausalRelationAgent::new(llm.clone()), store.clone());

    let output = component
        .run(base_inputs(csv.path(), "run_one"))
        .await
        .unwrap();

    assert!(output.success);
    assert_eq!(llm.call_count(), 3);

    let data = output.data.unwrap();
    let graph: NodeLinkGraph = serde_json::from_value(data["graph"].clone()).unwrap();
    assert_eq!(graph.node_ids(), vec!["x", "y", "z"]);
    assert!(graph.has_link("x", "y"));
    assert!(graph.has_link("z", "x"));
    assert!(!graph.has_link("y", "z"));
    assert!(!graph.has_link("z", "y"));
    assert_eq!(graph.links.len(), 2);

    let result_log = data["log"].as_array().unwrap();
    assert_eq!(result_log.len(), 3);
    assert!(result_log[0].as_str().unwrap().contains("a_causes_b"));

    assert_eq!(output.artifacts, vec!["run_one.txt"]);
    let log = store.content("run_one.txt").unwrap();
    assert!(log.contains("x drives y"));
    assert!(log.contains("verdict: no_relation"));
}

#[tokio::test]
async fn graph_discovery_replaces_a_stale_log() {
    let csv = csv_fixture("a,b\n1,2\n");
    let llm = Arc::new(MockLlm::constant(
        r#"{"relation":"no_relation","confidence":0.5,"rationale":"flat"}"#,
    ));
    let store = Arc::new(InMemoryArtifactStore::new());
    store.write("stale.txt", "old content").await.unwrap();

    let component = GraphDiscoveryComponent::new(CausalRelationAgent::new(llm), store.clone());
    component
        .run(base_inputs(csv.path(), "stale"))
        .await
        .unwrap();

    let log = store.content("stale.txt").unwrap();
    assert!(!log.contains("old content"));
}

#[tokio::test]
async fn causal_discovery_decodes_structure_and_logs() {
    let csv = csv_fixture("x,y\n1,2\n");
    let llm = Arc::new(MockLlm::constant(
        r#"{"graph": {"nodes": [{"id": "x"}, {"id": "y"}],
            "links": [{"source": "x", "target": "y"}]},
            "sem": "y ~ x", "summary": "simple chain"}"#,
    ));
    let store = Arc::new(InMemoryArtifactStore::new());
    let component =
        CausalDiscoveryComponent::new(CausalDiscoveryAgent::new(llm), store.clone());

    let inputs = base_inputs(csv.path(), "disc").set(
        "background_graph",
        json!({"nodes": [{"id": "x"}], "links": []}),
    );
    let output = component.run(inputs).await.unwrap();

    let data = output.data.unwrap();
    assert_eq!(data["sem"], "y ~ x");
    assert_eq!(data["agent"], "simple chain");
    let graph: NodeLinkGraph = serde_json::from_value(data["graph"].clone()).unwrap();
    assert!(graph.has_link("x", "y"));
    assert!(store.content("disc.txt").is_some());
}

#[tokio::test]
async fn causal_inference_reports_the_plan() {
    let csv = csv_fixture("t,o,c\n1,2,3\n");
    let llm = Arc::new(MockLlm::constant(
        r#"{"summary": "backdoor through c",
            "tasks": [{"treatment": "t", "outcome": "o",
                       "adjustment": ["c"], "estimator": "backdoor.linear_regression"}]}"#,
    ));
    let store = Arc::new(InMemoryArtifactStore::new());
    let component =
        CausalInferenceComponent::new(CausalInferenceAgent::new(llm), store.clone());

    let inputs = base_inputs(csv.path(), "inf").set(
        "graph",
        json!({"nodes": [{"id": "t"}, {"id": "o"}, {"id": "c"}],
               "links": [{"source": "t", "target": "o"},
                         {"source": "c", "target": "t"},
                         {"source": "c", "target": "o"}]}),
    );
    let output = component.run(inputs).await.unwrap();

    let data = output.data.unwrap();
    assert_eq!(data["plan"][0]["treatment"], "t");
    assert_eq!(data["plan"][0]["adjustment"][0], "c");
    assert!(store.content("inf.txt").unwrap().contains("task: t -> o"));
}

#[tokio::test]
async fn sem_refinement_returns_the_final_model() {
    let csv = csv_fixture("x1,x2,y\n1,2,3\n");
    let llm = Arc::new(MockLlm::constant(
        r#"{"model": "y ~ x1", "interpretation": "x2 adds nothing",
            "summary": "pruned", "done": true}"#,
    ));
    let store = Arc::new(InMemoryArtifactStore::new());
    let component =
        SemRefinementComponent::new(SemRefinementAgent::new(llm, 3), store.clone());

    let inputs = base_inputs(csv.path(), "sem").set("sem", "y ~ x1 + x2");
    let output = component.run(inputs).await.unwrap();

    let data = output.data.unwrap();
    assert_eq!(data["model"], "y ~ x1");
    assert_eq!(data["interpretation"], "x2 adds nothing");
    assert!(store.content("sem.txt").is_some());
}

#[tokio::test]
async fn graph_matrix_derives_the_binary_map() {
    let component = GraphMatrixComponent;
    let inputs = ComponentInputs::default().set(
        "graph",
        json!({"nodes": [{"id": "b"}, {"id": "a"}],
               "links": [{"source": "b", "target": "a"},
                         {"source": "a", "target": "b", "weight": -1}]}),
    );
    let output = component.run(inputs).await.unwrap();

    let data = output.data.unwrap();
    assert_eq!(data["variables"], json!(["a", "b"]));
    // b -> a survives; the -1 weighted link is treated as absent.
    assert_eq!(data["matrix"], json!([[0, 0], [1, 0]]));
    assert!(output.artifacts.is_empty());
}

#[tokio::test]
async fn missing_required_input_fails_cleanly() {
    let store = Arc::new(InMemoryArtifactStore::new());
    let llm = Arc::new(MockLlm::constant("{}"));
    let component = GraphDiscoveryComponent::new(CausalRelationAgent::new(llm), store);

    let err = component
        .run(ComponentInputs::default().set("data", "/tmp/x.csv"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        causalflow_core::Error::MissingInput(_)
    ));
}
