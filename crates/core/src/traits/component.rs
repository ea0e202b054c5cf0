//! Workflow component traits.

use crate::error::Result;
use crate::types::{ComponentDescriptor, ComponentInputs, ComponentOutput};
use async_trait::async_trait;

/// A runnable causal workflow component.
///
/// Components extract their named inputs, delegate the substantive work to an
/// agent, and report a JSON payload plus the names of any artifacts written.
#[async_trait]
pub trait Component: Send + Sync {
    /// Unique component name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Names of the inputs this component consumes.
    fn input_keys(&self) -> &[&str];

    /// Execute the component against a resolved input set.
    async fn run(&self, inputs: ComponentInputs) -> Result<ComponentOutput>;
}

/// Registry of components addressable by name.
#[async_trait]
pub trait ComponentRegistry: Send + Sync {
    /// Register a component.
    async fn register(&self, component: Box<dyn Component>) -> Result<()>;

    /// List descriptors of all registered components.
    async fn list(&self) -> Result<Vec<ComponentDescriptor>>;

    /// Run a component by name.
    async fn run(&self, name: &str, inputs: ComponentInputs) -> Result<ComponentOutput>;
}
