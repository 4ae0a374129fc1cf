//! Persistence store traits
//!
//! The store owns all records: it assigns ids and creation timestamps, and
//! callers hold only the returned projections. Listings are ordered by
//! creation time descending, the one sort order the system uses.

use uuid::Uuid;

use crate::error::Result;
use crate::types::{DraftPatch, DraftRecord, KnowledgeRecord, NewDraft, NewKnowledge};

/// Append-only knowledge-base collection
pub trait KnowledgeStore: Send + Sync {
    /// Create a record; the store assigns id and creation timestamp
    fn create_knowledge(&self, new: NewKnowledge) -> Result<KnowledgeRecord>;

    /// List all records, newest first
    fn list_knowledge(&self) -> Result<Vec<KnowledgeRecord>>;

    /// Delete a record by id
    fn delete_knowledge(&self, id: Uuid) -> Result<()>;
}

/// Generated-content collection with partial updates
pub trait DraftStore: Send + Sync {
    /// Create a draft; the store assigns id and creation timestamp
    fn create_draft(&self, new: NewDraft) -> Result<DraftRecord>;

    /// List all drafts, newest first
    fn list_drafts(&self) -> Result<Vec<DraftRecord>>;

    /// Apply a partial field patch to a draft, returning the updated record
    fn update_draft(&self, id: Uuid, patch: DraftPatch) -> Result<DraftRecord>;

    /// Delete a draft by id
    fn delete_draft(&self, id: Uuid) -> Result<()>;
}
