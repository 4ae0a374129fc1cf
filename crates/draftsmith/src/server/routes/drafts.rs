//! Draft generation and review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::generation::{self, GenerationOutcome, GenerationRequest, GenerationServices};
use crate::providers::{DraftStore, KnowledgeStore};
use crate::server::state::AppState;
use crate::types::{DraftPatch, DraftRecord};

/// GET /api/drafts - list drafts, newest first
pub async fn list_drafts(State(state): State<AppState>) -> Result<Json<Vec<DraftRecord>>> {
    Ok(Json(state.db().list_drafts()?))
}

/// POST /api/drafts/generate - generate drafts for the selected platforms
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationOutcome>> {
    if request.platforms.is_empty() {
        return Err(Error::Config("select at least one platform".to_string()));
    }

    let records = state.db().list_knowledge()?;
    tracing::info!(
        "Generating drafts for {} platform(s) with {} context records",
        request.platforms.len(),
        records.len()
    );

    let outcome = generation::generate_drafts(
        request,
        &records,
        GenerationServices {
            writer: state.writer().as_ref(),
            search: state.search().as_ref(),
            image: state.image().as_ref(),
            store: state.db().as_ref(),
        },
        &state.config().business.name,
    )
    .await;

    Ok(Json(outcome))
}

/// PATCH /api/drafts/:id - edit content or flip status (Draft ⇄ Posted)
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<DraftRecord>> {
    Ok(Json(state.db().update_draft(id, patch)?))
}

/// DELETE /api/drafts/:id - remove a draft
pub async fn delete_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.db().delete_draft(id)?;
    Ok(StatusCode::NO_CONTENT)
}
