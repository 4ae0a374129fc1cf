//! Core types for the content-operations system

pub mod draft;
pub mod knowledge;

pub use draft::{DraftPatch, DraftRecord, DraftStatus, NewDraft, Platform};
pub use knowledge::{Category, Enrichment, KnowledgeRecord, NewKnowledge, SourceType};
