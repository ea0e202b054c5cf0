//! Pairwise judgment aggregation into a directed causal graph.

use std::collections::HashMap;

use causalflow_core::{Error, Judgment, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::node_link::{GraphLink, GraphNode, NodeLinkGraph};

/// Accumulates pairwise directional judgments into a directed graph.
///
/// One judgment is expected per unordered variable pair. Directional
/// judgments are idempotent; re-judging a pair in the opposite direction
/// replaces the previous edge (last write wins), so at most one edge exists
/// per unordered pair. `NoRelation` installs nothing and removes nothing.
#[derive(Debug, Clone)]
pub struct CausalGraphBuilder {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl Default for CausalGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CausalGraphBuilder {
    /// Empty builder; nodes are added as pairs are processed.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    /// Builder with the variable set known upfront.
    pub fn with_variables<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::new();
        for variable in variables {
            builder.ensure_node(&variable.into());
        }
        builder
    }

    /// Record the judgment for one unordered pair.
    ///
    /// The argument order carries no directional meaning; the judgment does.
    pub fn update(&mut self, var_a: &str, var_b: &str, judgment: Judgment) -> Result<()> {
        if var_a == var_b {
            return Err(Error::invalid_input(format!(
                "pair endpoints must be distinct, got '{}' twice",
                var_a
            )));
        }

        let a = self.ensure_node(var_a);
        let b = self.ensure_node(var_b);

        match judgment {
            Judgment::ACausesB => self.set_edge(a, b),
            Judgment::BCausesA => self.set_edge(b, a),
            Judgment::NoRelation => {}
        }

        Ok(())
    }

    /// Number of variables seen so far.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the directed edge source → target exists.
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.indices.get(source), self.indices.get(target)) {
            (Some(&s), Some(&t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    /// Export the current graph in node-link form.
    ///
    /// Nodes are sorted lexicographically and links by (source, target), so
    /// output never depends on insertion order.
    pub fn export(&self) -> NodeLinkGraph {
        let mut nodes: Vec<String> = self.graph.node_weights().cloned().collect();
        nodes.sort();

        let mut links: Vec<GraphLink> = self
            .graph
            .edge_references()
            .map(|edge| {
                GraphLink::new(
                    self.graph[edge.source()].clone(),
                    self.graph[edge.target()].clone(),
                )
            })
            .collect();
        links.sort_by(|x, y| {
            (x.source.as_str(), x.target.as_str()).cmp(&(y.source.as_str(), y.target.as_str()))
        });

        NodeLinkGraph {
            nodes: nodes.into_iter().map(|id| GraphNode { id }).collect(),
            links,
        }
    }

    /// Rebuild a builder from a node-link document.
    ///
    /// Endpoints referenced only by links are added to the node set; self
    /// loops are rejected.
    pub fn from_node_link(doc: &NodeLinkGraph) -> Result<Self> {
        let mut builder = Self::new();
        for node in &doc.nodes {
            builder.ensure_node(&node.id);
        }
        for link in &doc.links {
            if link.source == link.target {
                return Err(Error::invalid_input(format!(
                    "self loop on '{}'",
                    link.source
                )));
            }
            let s = builder.ensure_node(&link.source);
            let t = builder.ensure_node(&link.target);
            builder.set_edge(s, t);
        }
        Ok(builder)
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), idx);
        idx
    }

    fn set_edge(&mut self, source: NodeIndex, target: NodeIndex) {
        if let Some(reverse) = self.graph.find_edge(target, source) {
            self.graph.remove_edge(reverse);
        }
        if self.graph.find_edge(source, target).is_none() {
            self.graph.add_edge(source, target, ());
        }
    }
}
