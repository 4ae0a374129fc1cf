//! draftsmith: content-operations backend with LLM enrichment and post drafting
//!
//! Staff paste or upload raw facts, an enrichment call categorizes and
//! summarizes each one into the knowledge base, and draft social posts are
//! generated from that structured knowledge — optionally augmented with live
//! web search and a generated image — for human review.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use ingestion::{parse_batch_file, BatchResult, Candidate};
pub use types::{
    draft::{DraftRecord, DraftStatus, Platform},
    knowledge::{Category, KnowledgeRecord, SourceType},
};
