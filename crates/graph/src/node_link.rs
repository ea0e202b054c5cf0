//! Node-link graph serialization.
//!
//! The JSON shape (`nodes` with `id`, `links` with `source`/`target`) is the
//! contract consumed by the graph viewer and accepted as background knowledge
//! by the discovery components. Unknown keys in incoming documents are
//! ignored, so exports from other graph tooling deserialize cleanly.

use serde::{Deserialize, Serialize};

/// A node entry in a node-link document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Variable name.
    pub id: String,
}

/// A directed link entry in a node-link document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Source variable.
    pub source: String,
    /// Target variable.
    pub target: String,
    /// Optional edge weight; -1 marks a link viewers must skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl GraphLink {
    /// Unweighted directed link.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
        }
    }
}

/// A directed graph in node-link form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    /// Node list.
    pub nodes: Vec<GraphNode>,
    /// Directed link list.
    pub links: Vec<GraphLink>,
}

impl NodeLinkGraph {
    /// Whether a directed link source → target is present.
    pub fn has_link(&self, source: &str, target: &str) -> bool {
        self.links
            .iter()
            .any(|l| l.source == source && l.target == target)
    }

    /// Node ids in document order.
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}
