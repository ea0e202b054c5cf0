//! Error types for Causalflow.

use thiserror::Error;

/// Result type alias using Causalflow's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Causalflow.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Component Errors
    // =========================================================================
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    // =========================================================================
    // Dataset Errors
    // =========================================================================
    #[error("Dataset error: {0}")]
    Dataset(String),

    // =========================================================================
    // Agent Errors
    // =========================================================================
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Knowledge lookup failed: {0}")]
    Knowledge(String),

    // =========================================================================
    // Model Gateway Errors
    // =========================================================================
    #[error("Model provider error: {0}")]
    ModelProvider(String),

    // =========================================================================
    // Store Errors
    // =========================================================================
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a component not found error.
    pub fn component_not_found(name: impl Into<String>) -> Self {
        Self::ComponentNotFound(name.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a missing input error.
    pub fn missing_input(key: impl Into<String>) -> Self {
        Self::MissingInput(key.into())
    }

    /// Create a dataset error.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Create an agent error.
    pub fn agent(msg: impl Into<String>) -> Self {
        Self::Agent(msg.into())
    }

    /// Create a knowledge lookup error.
    pub fn knowledge(msg: impl Into<String>) -> Self {
        Self::Knowledge(msg.into())
    }

    /// Create a model provider error.
    pub fn model_provider(msg: impl Into<String>) -> Self {
        Self::ModelProvider(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
