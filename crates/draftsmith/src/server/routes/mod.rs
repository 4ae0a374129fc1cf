//! API routes for the content-operations server

pub mod drafts;
pub mod ingest;
pub mod knowledge;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Knowledge base
        .route("/knowledge", get(knowledge::list_knowledge))
        .route("/knowledge", post(knowledge::add_knowledge))
        .route("/knowledge/:id", delete(knowledge::delete_knowledge))
        // Batch ingestion - with larger body limit for file uploads
        .route(
            "/ingest",
            post(ingest::ingest_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Drafts
        .route("/drafts", get(drafts::list_drafts))
        .route("/drafts/generate", post(drafts::generate))
        .route("/drafts/:id", patch(drafts::update_draft))
        .route("/drafts/:id", delete(drafts::delete_draft))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "draftsmith",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Content operations: knowledge ingestion with LLM enrichment and social post drafting",
        "endpoints": {
            "GET  /api/knowledge": "List knowledge records",
            "POST /api/knowledge": "Add and enrich one manual entry",
            "DELETE /api/knowledge/:id": "Delete a knowledge record",
            "POST /api/ingest": "Upload a JSON or CSV batch file",
            "GET  /api/drafts": "List generated drafts",
            "POST /api/drafts/generate": "Generate drafts for selected platforms",
            "PATCH /api/drafts/:id": "Edit a draft or flip its status",
            "DELETE /api/drafts/:id": "Delete a draft"
        }
    }))
}
