//! Adjacency matrix component.

use async_trait::async_trait;
use serde_json::json;

use causalflow_core::{
    traits::Component,
    types::{ComponentInputs, ComponentOutput},
    Result,
};
use causalflow_graph::{AdjacencyMatrix, NodeLinkGraph};

const INPUT_KEYS: &[&str] = &["graph"];

/// Derives the binary adjacency matrix of a node-link graph.
///
/// This is the data half of the graph viewer: downstream rendering consumes
/// the sorted variable order and the 0/1 matrix directly.
pub struct GraphMatrixComponent;

#[async_trait]
impl Component for GraphMatrixComponent {
    fn name(&self) -> &str {
        "graph_matrix"
    }

    fn description(&self) -> &str {
        "Derive the binary adjacency matrix of a node-link causal graph"
    }

    fn input_keys(&self) -> &[&str] {
        INPUT_KEYS
    }

    async fn run(&self, inputs: ComponentInputs) -> Result<ComponentOutput> {
        let graph: NodeLinkGraph = inputs.decode("graph")?;
        let matrix = AdjacencyMatrix::from_node_link(&graph);

        Ok(ComponentOutput::json(
            format!("{}x{} adjacency matrix", matrix.variables.len(), matrix.variables.len()),
            json!({
                "variables": matrix.variables,
                "matrix": matrix.matrix,
            }),
        ))
    }
}
