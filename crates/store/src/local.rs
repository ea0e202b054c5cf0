//! Filesystem-backed artifact store.

use std::path::PathBuf;

use async_trait::async_trait;

use causalflow_core::{traits::ArtifactStore, Error, Result};

/// Artifact store rooted at a local directory.
///
/// Artifact names must be plain file names; path separators and parent
/// references are rejected so callers cannot escape the root.
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(Error::invalid_input(format!(
                "invalid artifact name '{}'",
                name
            )));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.resolve(name)?;
        std::fs::create_dir_all(&self.root).map_err(|e| {
            Error::storage(format!(
                "failed to create '{}': {}",
                self.root.display(),
                e
            ))
        })?;
        std::fs::write(&path, content)
            .map_err(|e| Error::storage(format!("failed to write '{}': {}", path.display(), e)))?;
        tracing::debug!(artifact = %name, bytes = content.len(), "Wrote artifact");
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.resolve(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::storage(format!("failed to read '{}': {}", path.display(), e)))?;
        Ok(Some(content))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .map_err(|e| Error::storage(format!("failed to delete '{}': {}", path.display(), e)))?;
        Ok(true)
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.resolve(name)?.exists())
    }
}
