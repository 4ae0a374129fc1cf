//! Batch ingestion driver
//!
//! Processes normalized candidates strictly one at a time, in input order:
//! each enrichment call is a blocking round-trip to an external service and
//! items share no mutable state, so serialization keeps the flow simple.
//! There is no rollback: partial completion is an accepted terminal state.

use tracing::{info, warn};

use crate::providers::{EnrichmentService, KnowledgeStore};
use crate::types::{NewKnowledge, SourceType};

use super::normalizer::Candidate;

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchResult {
    /// Number of candidates processed
    pub total: usize,
    /// Records written to the store
    pub succeeded: usize,
    /// Candidates whose store write failed
    pub failed: usize,
    /// Records written with the enrichment fallback (category Raw Data)
    pub enrichment_fallbacks: usize,
}

/// Ingest candidates through the enrichment service into the store.
///
/// Enrichment failures are swallowed per item: the record is written anyway
/// with `category: Raw Data` and the original text as its summary, so one bad
/// row never aborts a batch. Store write failures are counted and skipped
/// without rolling back earlier writes. `progress(done, total)` fires after
/// every item.
pub async fn ingest<F>(
    candidates: Vec<Candidate>,
    enricher: &dyn EnrichmentService,
    store: &dyn KnowledgeStore,
    mut progress: F,
) -> BatchResult
where
    F: FnMut(usize, usize),
{
    let total = candidates.len();
    let mut result = BatchResult {
        total,
        ..Default::default()
    };

    for (index, candidate) in candidates.into_iter().enumerate() {
        let new = match enricher.analyze(&candidate.content).await {
            Ok(enrichment) => NewKnowledge {
                content: candidate.content,
                summary: Some(enrichment.summary),
                category: enrichment.category,
                source: candidate.source,
                source_type: SourceType::External,
            },
            Err(e) => {
                warn!(
                    "Enrichment failed for item {}/{} via {}: {}; storing fallback",
                    index + 1,
                    total,
                    enricher.name(),
                    e
                );
                result.enrichment_fallbacks += 1;
                NewKnowledge::fallback(candidate.content, candidate.source, SourceType::External)
            }
        };

        match store.create_knowledge(new) {
            Ok(_) => result.succeeded += 1,
            Err(e) => {
                warn!("Store write failed for item {}/{}: {}", index + 1, total, e);
                result.failed += 1;
            }
        }

        progress(index + 1, total);
    }

    info!(
        "Batch ingestion complete: {}/{} written ({} fallbacks, {} failed)",
        result.succeeded, result.total, result.enrichment_fallbacks, result.failed
    );

    result
}
