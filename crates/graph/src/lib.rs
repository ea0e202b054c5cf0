//! Directed causal graph construction from pairwise judgments.
//!
//! The builder accumulates one directional judgment per unordered variable
//! pair into a directed graph and exports it in node-link form for the
//! downstream viewer and discovery components. Cycles are allowed: judgments
//! over independent pairs carry no global consistency guarantee, so callers
//! must not assume a DAG.

pub mod adjacency;
pub mod builder;
pub mod node_link;

pub use adjacency::AdjacencyMatrix;
pub use builder::CausalGraphBuilder;
pub use node_link::{GraphLink, GraphNode, NodeLinkGraph};
