//! Tabular dataset loading for the causal workflows.

pub mod loader;

pub use loader::Dataset;
