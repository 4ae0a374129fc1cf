//! Batch file ingestion endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::ingestion::{self, BatchResult};
use crate::server::state::AppState;

/// POST /api/ingest - upload a JSON or CSV batch file
///
/// The whole file is parsed and normalized before the first write, so a
/// structurally bad file aborts with zero records stored. Per-row enrichment
/// failures inside the batch fall back and never abort it.
pub async fn ingest_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResult>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read file: {}", e)))?;

        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload
        .ok_or_else(|| Error::Config("upload carried no file field".to_string()))?;

    tracing::info!("Ingesting batch file: {} ({} bytes)", filename, data.len());

    let candidates = ingestion::parse_batch_file(&filename, &data)?;
    let total = candidates.len();
    tracing::info!("{} candidates survived normalization", total);

    let result = ingestion::ingest(
        candidates,
        state.enrichment().as_ref(),
        state.db().as_ref(),
        |done, total| tracing::info!("Batch progress: {}/{}", done, total),
    )
    .await;

    Ok(Json(result))
}
