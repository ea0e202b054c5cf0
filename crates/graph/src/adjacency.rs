//! Adjacency-matrix derivation for visualization data prep.

use std::collections::HashMap;

use serde::Serialize;

use crate::node_link::NodeLinkGraph;

/// Dense 0/1 adjacency matrix over lexicographically sorted variables.
///
/// Rows are potential causes, columns the influenced variables, matching the
/// binary-map orientation downstream viewers render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyMatrix {
    /// Sorted variable order shared by rows and columns.
    pub variables: Vec<String>,
    /// matrix[i][j] == 1 when variables[i] → variables[j].
    pub matrix: Vec<Vec<u8>>,
}

impl AdjacencyMatrix {
    /// Build from a node-link document.
    ///
    /// Endpoints referenced only by links are included; links weighted -1
    /// are treated as absent, per the node-link viewer contract.
    pub fn from_node_link(doc: &NodeLinkGraph) -> Self {
        let mut variables: Vec<String> = doc.nodes.iter().map(|n| n.id.clone()).collect();
        for link in &doc.links {
            if !variables.contains(&link.source) {
                variables.push(link.source.clone());
            }
            if !variables.contains(&link.target) {
                variables.push(link.target.clone());
            }
        }
        variables.sort();
        variables.dedup();

        let index: HashMap<&str, usize> = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.as_str(), i))
            .collect();

        let n = variables.len();
        let mut matrix = vec![vec![0u8; n]; n];
        for link in &doc.links {
            if link.weight == Some(-1.0) {
                continue;
            }
            if let (Some(&i), Some(&j)) = (
                index.get(link.source.as_str()),
                index.get(link.target.as_str()),
            ) {
                matrix[i][j] = 1;
            }
        }

        Self { variables, matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_link::{GraphLink, GraphNode};

    fn doc(links: Vec<GraphLink>) -> NodeLinkGraph {
        NodeLinkGraph {
            nodes: vec![
                GraphNode { id: "b".into() },
                GraphNode { id: "a".into() },
                GraphNode { id: "c".into() },
            ],
            links,
        }
    }

    #[test]
    fn test_matrix_rows_are_causes() {
        let matrix = AdjacencyMatrix::from_node_link(&doc(vec![GraphLink::new("a", "c")]));
        assert_eq!(matrix.variables, vec!["a", "b", "c"]);
        assert_eq!(matrix.matrix[0][2], 1);
        assert_eq!(matrix.matrix[2][0], 0);
    }

    #[test]
    fn test_sentinel_weight_is_skipped() {
        let mut link = GraphLink::new("a", "b");
        link.weight = Some(-1.0);
        let matrix = AdjacencyMatrix::from_node_link(&doc(vec![link]));
        assert!(matrix.matrix.iter().flatten().all(|&cell| cell == 0));
    }

    #[test]
    fn test_weighted_link_is_kept() {
        let mut link = GraphLink::new("c", "b");
        link.weight = Some(0.7);
        let matrix = AdjacencyMatrix::from_node_link(&doc(vec![link]));
        assert_eq!(matrix.matrix[2][1], 1);
    }
}
