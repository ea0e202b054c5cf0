//! Artifact store traits.

use crate::error::Result;
use async_trait::async_trait;

/// Named artifact storage for run logs and exported results.
///
/// Writes replace any existing artifact stored under the same name, matching
/// the delete-then-create protocol of the hosting file connector.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write an artifact, replacing any previous content under `name`.
    async fn write(&self, name: &str, content: &str) -> Result<()>;

    /// Read an artifact if present.
    async fn read(&self, name: &str) -> Result<Option<String>>;

    /// Delete an artifact. Returns false when nothing was stored under `name`.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// Check whether an artifact exists.
    async fn exists(&self, name: &str) -> Result<bool>;
}
