//! In-memory artifact store.

use async_trait::async_trait;
use dashmap::DashMap;

use causalflow_core::{traits::ArtifactStore, Result};

/// Concurrent in-memory artifact store.
///
/// Used by tests and as the runner fallback when no log directory is
/// configured.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    files: DashMap<String, String>,
}

impl InMemoryArtifactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Synchronous content lookup for assertions.
    pub fn content(&self, name: &str) -> Option<String> {
        self.files.get(name).map(|entry| entry.clone())
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn write(&self, name: &str, content: &str) -> Result<()> {
        self.files.insert(name.to_string(), content.to_string());
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self.files.get(name).map(|entry| entry.clone()))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.files.remove(name).is_some())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.files.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = InMemoryArtifactStore::new();
        store.write("a.txt", "x").await.unwrap();
        assert!(store.delete("a.txt").await.unwrap());
        assert!(!store.delete("a.txt").await.unwrap());
        assert!(store.is_empty());
    }
}
