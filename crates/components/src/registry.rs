//! Component registry implementation.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use causalflow_core::{
    traits::{Component, ComponentRegistry},
    types::{ComponentDescriptor, ComponentInputs, ComponentOutput},
    Error, Result,
};

/// Default component registry backed by a concurrent map.
#[derive(Default)]
pub struct DefaultComponentRegistry {
    components: DashMap<String, Arc<dyn Component>>,
}

impl DefaultComponentRegistry {
    /// Create a new component registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[async_trait]
impl ComponentRegistry for DefaultComponentRegistry {
    async fn register(&self, component: Box<dyn Component>) -> Result<()> {
        let name = component.name().to_string();
        tracing::info!(component = %name, "Registering component");

        if self.components.contains_key(&name) {
            return Err(Error::internal(format!(
                "component '{}' is already registered",
                name
            )));
        }

        self.components.insert(name, Arc::from(component));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ComponentDescriptor>> {
        let mut descriptors: Vec<_> = self
            .components
            .iter()
            .map(|entry| ComponentDescriptor {
                name: entry.name().to_string(),
                description: entry.description().to_string(),
                input_keys: entry.input_keys().iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(descriptors)
    }

    async fn run(&self, name: &str, inputs: ComponentInputs) -> Result<ComponentOutput> {
        // Clone the Arc out before awaiting so the map shard is not held
        // across the component run.
        let component = self
            .components
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::component_not_found(name))?;

        tracing::debug!(component = %name, "Running component");
        component.run(inputs).await
    }
}
