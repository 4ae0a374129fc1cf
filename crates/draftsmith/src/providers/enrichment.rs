//! Enrichment service trait: categorize and summarize raw text

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Enrichment;

/// Trait for the categorize/summarize call that runs on every ingested fact.
///
/// Implementations:
/// - `GeminiEnricher`: hosted Gemini `generateContent` endpoint
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    /// Analyze one raw text input into a category and a one-sentence summary.
    ///
    /// Callers must treat any error as recoverable and substitute a fallback
    /// record; a failed enrichment never aborts a batch.
    async fn analyze(&self, raw_text: &str) -> Result<Enrichment>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
