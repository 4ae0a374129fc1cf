//! Knowledge-base endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::KnowledgeStore;
use crate::server::state::AppState;
use crate::types::{KnowledgeRecord, NewKnowledge, SourceType};

/// Provenance label for manually typed entries
const MANUAL_SOURCE: &str = "Manual Entry";

/// Request body for a manual entry
#[derive(Debug, Deserialize)]
pub struct AddKnowledgeRequest {
    pub content: String,
}

/// GET /api/knowledge - list records, newest first
pub async fn list_knowledge(State(state): State<AppState>) -> Result<Json<Vec<KnowledgeRecord>>> {
    Ok(Json(state.db().list_knowledge()?))
}

/// POST /api/knowledge - add one manually typed fact
///
/// The enrichment call runs first; when it fails the record is stored anyway
/// with the fallback shape, so a flaky model never loses a typed entry.
pub async fn add_knowledge(
    State(state): State<AppState>,
    Json(request): Json<AddKnowledgeRequest>,
) -> Result<Json<KnowledgeRecord>> {
    let content = request.content.trim().to_string();
    if content.is_empty() {
        return Err(Error::Config("content must not be empty".to_string()));
    }

    let new = match state.enrichment().analyze(&content).await {
        Ok(enrichment) => NewKnowledge {
            content,
            summary: Some(enrichment.summary),
            category: enrichment.category,
            source: MANUAL_SOURCE.to_string(),
            source_type: SourceType::Internal,
        },
        Err(e) => {
            tracing::warn!("Enrichment failed for manual entry: {}; storing fallback", e);
            NewKnowledge::fallback(content, MANUAL_SOURCE.to_string(), SourceType::Internal)
        }
    };

    let record = state.db().create_knowledge(new)?;
    Ok(Json(record))
}

/// DELETE /api/knowledge/:id - remove a record
pub async fn delete_knowledge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.db().delete_knowledge(id)?;
    Ok(StatusCode::NO_CONTENT)
}
