//! Extraction strategies.
//!
//! Each strategy is one link in the orchestrator's chain: it either
//! produces a candidate record or fails, and failure just means the next
//! strategy gets its turn.

pub mod ai;
pub mod fallback;
pub mod pattern;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExtractionRequest, LoadRecord};

pub use ai::{AiExtractor, DEFAULT_MODEL};
pub use fallback::{sample_record, StaticFallbackExtractor};
pub use pattern::PatternExtractor;

/// One extraction strategy.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Produce a candidate record for the request, or fail so the
    /// orchestrator can fall through.
    async fn extract(&self, request: &ExtractionRequest) -> Result<LoadRecord>;
}
