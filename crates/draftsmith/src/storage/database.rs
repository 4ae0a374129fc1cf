//! SQLite persistence for knowledge records and generated drafts
//!
//! The database owns record identity: ids and creation timestamps are
//! assigned here, and every listing comes back newest-first.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::{DraftStore, KnowledgeStore};
use crate::types::{
    Category, DraftPatch, DraftRecord, DraftStatus, KnowledgeRecord, NewDraft, NewKnowledge,
    Platform, SourceType,
};

/// SQLite-backed content database
pub struct ContentDb {
    conn: Arc<Mutex<Connection>>,
}

impl ContentDb {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::store(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::store(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::store(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            -- Knowledge base: append-only facts plus enrichment output
            CREATE TABLE IF NOT EXISTS knowledge_base (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                summary TEXT,
                category TEXT NOT NULL,
                source TEXT NOT NULL,
                source_type TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_knowledge_created_at ON knowledge_base(created_at);

            -- Generated drafts awaiting review
            CREATE TABLE IF NOT EXISTS generated_content (
                id TEXT PRIMARY KEY,
                platform TEXT NOT NULL,
                content TEXT NOT NULL,
                status TEXT NOT NULL,
                tone TEXT,
                topic TEXT,
                promo_message TEXT,
                web_search_enabled INTEGER NOT NULL DEFAULT 0,
                image_url TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_content_created_at ON generated_content(created_at);
            CREATE INDEX IF NOT EXISTS idx_content_status ON generated_content(status);
        "#,
        )
        .map_err(|e| Error::store(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Database migrations complete");
        Ok(())
    }
}

impl KnowledgeStore for ContentDb {
    fn create_knowledge(&self, new: NewKnowledge) -> Result<KnowledgeRecord> {
        if new.content.trim().is_empty() {
            return Err(Error::store("Refusing to store a record with empty content"));
        }

        let record = KnowledgeRecord {
            id: Uuid::new_v4(),
            content: new.content,
            summary: new.summary,
            category: new.category,
            source: new.source,
            source_type: new.source_type,
            created_at: Utc::now(),
        };

        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO knowledge_base (id, content, summary, category, source, source_type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.id.to_string(),
                record.content,
                record.summary,
                record.category.as_str(),
                record.source,
                record.source_type.as_str(),
                record.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| Error::store(format!("Failed to insert knowledge record: {}", e)))?;

        Ok(record)
    }

    fn list_knowledge(&self) -> Result<Vec<KnowledgeRecord>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(
                "SELECT id, content, summary, category, source, source_type, created_at
                 FROM knowledge_base ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| Error::store(format!("Failed to prepare query: {}", e)))?;

        let records = stmt
            .query_map([], row_to_knowledge)
            .map_err(|e| Error::store(format!("Failed to list knowledge records: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(records)
    }

    fn delete_knowledge(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock();

        let deleted = conn
            .execute(
                "DELETE FROM knowledge_base WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| Error::store(format!("Failed to delete knowledge record: {}", e)))?;

        if deleted == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl DraftStore for ContentDb {
    fn create_draft(&self, new: NewDraft) -> Result<DraftRecord> {
        let record = DraftRecord {
            id: Uuid::new_v4(),
            platform: new.platform,
            content: new.content,
            status: new.status,
            tone: new.tone,
            topic: new.topic,
            promo_message: new.promo_message,
            web_search_enabled: new.web_search_enabled,
            image_url: new.image_url,
            created_at: Utc::now(),
        };

        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO generated_content (
                id, platform, content, status, tone, topic, promo_message,
                web_search_enabled, image_url, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                record.id.to_string(),
                record.platform.as_str(),
                record.content,
                record.status.as_str(),
                record.tone,
                record.topic,
                record.promo_message,
                record.web_search_enabled as i64,
                record.image_url,
                record.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| Error::store(format!("Failed to insert draft: {}", e)))?;

        Ok(record)
    }

    fn list_drafts(&self) -> Result<Vec<DraftRecord>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(
                "SELECT id, platform, content, status, tone, topic, promo_message,
                        web_search_enabled, image_url, created_at
                 FROM generated_content ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| Error::store(format!("Failed to prepare query: {}", e)))?;

        let records = stmt
            .query_map([], row_to_draft)
            .map_err(|e| Error::store(format!("Failed to list drafts: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(records)
    }

    fn update_draft(&self, id: Uuid, patch: DraftPatch) -> Result<DraftRecord> {
        let conn = self.conn.lock();

        if !patch.is_empty() {
            let updated = conn
                .execute(
                    r#"
                    UPDATE generated_content
                    SET content = COALESCE(?1, content),
                        status = COALESCE(?2, status)
                    WHERE id = ?3
                    "#,
                    params![
                        patch.content,
                        patch.status.map(|s| s.as_str().to_string()),
                        id.to_string(),
                    ],
                )
                .map_err(|e| Error::store(format!("Failed to update draft: {}", e)))?;

            if updated == 0 {
                return Err(Error::NotFound(id.to_string()));
            }
        }

        let record = conn
            .query_row(
                "SELECT id, platform, content, status, tone, topic, promo_message,
                        web_search_enabled, image_url, created_at
                 FROM generated_content WHERE id = ?1",
                params![id.to_string()],
                row_to_draft,
            )
            .optional()
            .map_err(|e| Error::store(format!("Failed to read back draft: {}", e)))?;

        record.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn delete_draft(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock();

        let deleted = conn
            .execute(
                "DELETE FROM generated_content WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| Error::store(format!("Failed to delete draft: {}", e)))?;

        if deleted == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn row_to_knowledge(row: &rusqlite::Row) -> rusqlite::Result<KnowledgeRecord> {
    let id_str: String = row.get(0)?;
    let content: String = row.get(1)?;
    let summary: Option<String> = row.get(2)?;
    let category_str: String = row.get(3)?;
    let source: String = row.get(4)?;
    let source_type_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    Ok(KnowledgeRecord {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()),
        content,
        summary,
        category: Category::from_label(&category_str).unwrap_or(Category::Uncategorized),
        source,
        source_type: match source_type_str.as_str() {
            "internal" => SourceType::Internal,
            _ => SourceType::External,
        },
        created_at: parse_timestamp(&created_at_str),
    })
}

fn row_to_draft(row: &rusqlite::Row) -> rusqlite::Result<DraftRecord> {
    let id_str: String = row.get(0)?;
    let platform_str: String = row.get(1)?;
    let content: String = row.get(2)?;
    let status_str: String = row.get(3)?;
    let tone: Option<String> = row.get(4)?;
    let topic: Option<String> = row.get(5)?;
    let promo_message: Option<String> = row.get(6)?;
    let web_search_enabled: i64 = row.get(7)?;
    let image_url: Option<String> = row.get(8)?;
    let created_at_str: String = row.get(9)?;

    Ok(DraftRecord {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()),
        platform: Platform::from_label(&platform_str).unwrap_or(Platform::Instagram),
        content,
        status: DraftStatus::from(status_str),
        tone,
        topic,
        promo_message,
        web_search_enabled: web_search_enabled != 0,
        image_url,
        created_at: parse_timestamp(&created_at_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_fact(content: &str) -> NewKnowledge {
        NewKnowledge {
            content: content.to_string(),
            summary: Some(format!("Summary of {}", content)),
            category: Category::BusinessFeature,
            source: "Manual Entry".to_string(),
            source_type: SourceType::Internal,
        }
    }

    fn new_draft(platform: Platform) -> NewDraft {
        NewDraft {
            platform,
            content: "A fine post".to_string(),
            status: DraftStatus::Draft,
            tone: Some("Casual & Fun".to_string()),
            topic: None,
            promo_message: None,
            web_search_enabled: false,
            image_url: None,
        }
    }

    #[test]
    fn test_knowledge_round_trip() {
        let db = ContentDb::in_memory().unwrap();

        let created = db.create_knowledge(new_fact("first fact stored")).unwrap();
        let listed = db.list_knowledge().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].category, Category::BusinessFeature);
        assert_eq!(listed[0].source_type, SourceType::Internal);
    }

    #[test]
    fn test_knowledge_listing_is_newest_first() {
        let db = ContentDb::in_memory().unwrap();
        for i in 0..3 {
            db.create_knowledge(new_fact(&format!("fact {}", i))).unwrap();
        }

        let listed = db.list_knowledge().unwrap();
        assert_eq!(listed[0].content, "fact 2");
        assert_eq!(listed[2].content, "fact 0");
    }

    #[test]
    fn test_knowledge_without_summary_survives() {
        let db = ContentDb::in_memory().unwrap();
        let mut fact = new_fact("unsummarized fact");
        fact.summary = None;
        fact.category = Category::RawData;
        db.create_knowledge(fact).unwrap();

        let listed = db.list_knowledge().unwrap();
        assert!(listed[0].summary.is_none());
        assert_eq!(listed[0].display_text(), "unsummarized fact");
    }

    #[test]
    fn test_empty_content_rejected() {
        let db = ContentDb::in_memory().unwrap();
        let mut fact = new_fact("x");
        fact.content = "   ".to_string();
        assert!(db.create_knowledge(fact).is_err());
    }

    #[test]
    fn test_knowledge_delete() {
        let db = ContentDb::in_memory().unwrap();
        let created = db.create_knowledge(new_fact("short-lived fact")).unwrap();

        db.delete_knowledge(created.id).unwrap();
        assert!(db.list_knowledge().unwrap().is_empty());
        assert!(matches!(
            db.delete_knowledge(created.id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_draft_round_trip_and_order() {
        let db = ContentDb::in_memory().unwrap();
        db.create_draft(new_draft(Platform::Instagram)).unwrap();
        db.create_draft(new_draft(Platform::LinkedIn)).unwrap();

        let listed = db.list_drafts().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].platform, Platform::LinkedIn);
        assert_eq!(listed[1].platform, Platform::Instagram);
        assert!(listed.iter().all(|d| d.status.is_draft()));
    }

    #[test]
    fn test_draft_patch_content_and_status() {
        let db = ContentDb::in_memory().unwrap();
        let created = db.create_draft(new_draft(Platform::Facebook)).unwrap();

        let posted = db
            .update_draft(
                created.id,
                DraftPatch {
                    content: None,
                    status: Some(DraftStatus::Posted),
                },
            )
            .unwrap();
        assert!(posted.status.is_posted());
        assert_eq!(posted.content, "A fine post");

        let edited = db
            .update_draft(
                created.id,
                DraftPatch {
                    content: Some("An edited post".to_string()),
                    status: None,
                },
            )
            .unwrap();
        assert_eq!(edited.content, "An edited post");
        assert!(edited.status.is_posted());

        // Posted reverts back to Draft.
        let reverted = db
            .update_draft(
                created.id,
                DraftPatch {
                    content: None,
                    status: Some(DraftStatus::Draft),
                },
            )
            .unwrap();
        assert!(reverted.status.is_draft());
    }

    #[test]
    fn test_custom_status_label_survives_storage() {
        let db = ContentDb::in_memory().unwrap();
        let mut draft = new_draft(Platform::Instagram);
        draft.status = DraftStatus::Custom("Scheduled".to_string());
        let created = db.create_draft(draft).unwrap();

        let listed = db.list_drafts().unwrap();
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].status.as_str(), "Scheduled");
    }

    #[test]
    fn test_update_missing_draft_is_not_found() {
        let db = ContentDb::in_memory().unwrap();
        let err = db
            .update_draft(
                Uuid::new_v4(),
                DraftPatch {
                    content: Some("x".to_string()),
                    status: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_empty_patch_returns_current_record() {
        let db = ContentDb::in_memory().unwrap();
        let created = db.create_draft(new_draft(Platform::Facebook)).unwrap();

        let unchanged = db.update_draft(created.id, DraftPatch::default()).unwrap();
        assert_eq!(unchanged.content, created.content);
        assert_eq!(unchanged.status, created.status);
    }
}
