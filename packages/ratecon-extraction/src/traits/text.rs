//! Document text source seam.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Yields plain text for an uploaded document.
///
/// PDF/image parsing itself lives outside this library; hosts plug in a
/// wrapper over their text-extraction dependency, tests use
/// [`MockTextSource`](crate::testing::MockTextSource).
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Extract the full text of the document at `path`.
    async fn extract_text(&self, path: &Path) -> Result<String>;
}
