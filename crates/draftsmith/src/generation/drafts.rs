//! Draft generation driver
//!
//! One request fans out to the selected platforms strictly in sequence: an
//! optional web-search context fetch, an optional single image generation,
//! then one post-writing call per platform. Per-platform failures are
//! collected rather than aborting the request.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::providers::{DraftStore, GenerationProvider, ImageProvider, SearchProvider};
use crate::types::{DraftRecord, DraftStatus, KnowledgeRecord, NewDraft, Platform};

use super::prompt::PromptBuilder;

/// Parameters for one generation request
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Platforms to draft for (multi-select)
    pub platforms: Vec<Platform>,
    /// Tone of voice
    #[serde(default)]
    pub tone: Option<String>,
    /// Topic focus; when absent the model picks from the context
    #[serde(default)]
    pub topic: Option<String>,
    /// Promotional message to fold into the post
    #[serde(default)]
    pub promo_message: Option<String>,
    /// Enable live web-search augmentation
    #[serde(default)]
    pub web_search: bool,
    /// Enable AI image generation
    #[serde(default)]
    pub image: bool,
}

/// A platform whose post could not be generated or stored
#[derive(Debug, Clone, Serialize)]
pub struct GenerationFailure {
    pub platform: Platform,
    pub error: String,
}

/// Outcome of one generation request
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutcome {
    /// Drafts written to the store, in platform order
    pub drafts: Vec<DraftRecord>,
    /// Platforms that failed
    pub failed: Vec<GenerationFailure>,
}

/// External collaborators for draft generation, injected by the caller
pub struct GenerationServices<'a> {
    pub writer: &'a dyn GenerationProvider,
    pub search: &'a dyn SearchProvider,
    pub image: &'a dyn ImageProvider,
    pub store: &'a dyn DraftStore,
}

/// Generate drafts for every requested platform.
///
/// The knowledge records are rendered into shared context once. The search
/// and image augmentations are best-effort: a failure is logged and the
/// request proceeds without them. Each successful post becomes one
/// `Draft`-status record in the store.
pub async fn generate_drafts(
    request: GenerationRequest,
    records: &[KnowledgeRecord],
    services: GenerationServices<'_>,
    business: &str,
) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();
    let context = PromptBuilder::build_context(records);
    let focus = request
        .topic
        .as_deref()
        .or(request.promo_message.as_deref());

    let search_context = if request.web_search {
        let query = focus.unwrap_or(business);
        match services.search.search_context(query).await {
            Ok(found) => Some(found),
            Err(e) => {
                warn!("Web search via {} failed: {}; generating without it", services.search.name(), e);
                None
            }
        }
    } else {
        None
    };

    let image_url = if request.image {
        let prompt = PromptBuilder::build_image_prompt(business, focus);
        match services.image.generate_image(&prompt).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Image generation via {} failed: {}; drafts will have no image", services.image.name(), e);
                None
            }
        }
    } else {
        None
    };

    for platform in &request.platforms {
        let prompt = PromptBuilder::build_post_prompt(
            business,
            *platform,
            &context,
            request.tone.as_deref(),
            request.topic.as_deref(),
            request.promo_message.as_deref(),
            search_context.as_deref(),
        );

        let content = match services.writer.write_post(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Post generation for {} failed: {}", platform, e);
                outcome.failed.push(GenerationFailure {
                    platform: *platform,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let new = NewDraft {
            platform: *platform,
            content,
            status: DraftStatus::Draft,
            tone: request.tone.clone(),
            topic: request.topic.clone(),
            promo_message: request.promo_message.clone(),
            web_search_enabled: request.web_search,
            image_url: image_url.clone(),
        };

        match services.store.create_draft(new) {
            Ok(draft) => outcome.drafts.push(draft),
            Err(e) => {
                warn!("Failed to store draft for {}: {}", platform, e);
                outcome.failed.push(GenerationFailure {
                    platform: *platform,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Generation complete: {} drafts, {} failures",
        outcome.drafts.len(),
        outcome.failed.len()
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::storage::ContentDb;
    use crate::types::{Category, SourceType};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct FakeWriter {
        fail_for: Option<Platform>,
    }

    #[async_trait]
    impl GenerationProvider for FakeWriter {
        async fn write_post(&self, prompt: &str) -> Result<String> {
            for platform in [Platform::Instagram, Platform::Facebook, Platform::LinkedIn] {
                if prompt.contains(&format!("PLATFORM: {}", platform)) {
                    if self.fail_for == Some(platform) {
                        return Err(Error::llm("simulated outage"));
                    }
                    return Ok(format!("  A great post for {}  ", platform));
                }
            }
            Err(Error::llm("prompt named no platform"))
        }

        fn name(&self) -> &str {
            "fake-writer"
        }
    }

    struct FakeSearch {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for FakeSearch {
        async fn search_context(&self, _query: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("fresh local coverage".to_string())
        }

        fn name(&self) -> &str {
            "fake-search"
        }
    }

    struct FakeImage {
        fail: bool,
    }

    #[async_trait]
    impl ImageProvider for FakeImage {
        async fn generate_image(&self, _prompt: &str) -> Result<String> {
            if self.fail {
                return Err(Error::Image("simulated outage".to_string()));
            }
            Ok("data:image/png;base64,QUJD".to_string())
        }

        fn name(&self) -> &str {
            "fake-image"
        }
    }

    fn sample_records() -> Vec<KnowledgeRecord> {
        vec![KnowledgeRecord {
            id: Uuid::new_v4(),
            content: "Winter league opens in November".to_string(),
            summary: Some("Winter league registration opens in November.".to_string()),
            category: Category::EventPromo,
            source: "Manual Entry".to_string(),
            source_type: SourceType::Internal,
            created_at: Utc::now(),
        }]
    }

    fn request(platforms: Vec<Platform>) -> GenerationRequest {
        GenerationRequest {
            platforms,
            tone: Some("Casual & Fun".to_string()),
            topic: Some("Winter League".to_string()),
            promo_message: None,
            web_search: false,
            image: false,
        }
    }

    #[tokio::test]
    async fn test_one_draft_per_platform() {
        let db = ContentDb::in_memory().unwrap();
        let writer = FakeWriter { fail_for: None };
        let search = FakeSearch { calls: AtomicUsize::new(0) };
        let image = FakeImage { fail: false };

        let outcome = generate_drafts(
            request(vec![Platform::Instagram, Platform::LinkedIn]),
            &sample_records(),
            GenerationServices {
                writer: &writer,
                search: &search,
                image: &image,
                store: &db,
            },
            "Acme Gym",
        )
        .await;

        assert_eq!(outcome.drafts.len(), 2);
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.drafts[0].platform, Platform::Instagram);
        assert_eq!(outcome.drafts[0].content, "A great post for Instagram");
        assert!(outcome.drafts.iter().all(|d| d.status.is_draft()));
        // Search was disabled, so it is never consulted.
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);

        let stored = db.list_drafts().unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_platform_failure_does_not_abort_the_rest() {
        let db = ContentDb::in_memory().unwrap();
        let writer = FakeWriter {
            fail_for: Some(Platform::Facebook),
        };
        let search = FakeSearch { calls: AtomicUsize::new(0) };
        let image = FakeImage { fail: false };

        let outcome = generate_drafts(
            request(vec![Platform::Instagram, Platform::Facebook, Platform::LinkedIn]),
            &sample_records(),
            GenerationServices {
                writer: &writer,
                search: &search,
                image: &image,
                store: &db,
            },
            "Acme Gym",
        )
        .await;

        assert_eq!(outcome.drafts.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].platform, Platform::Facebook);
        assert_eq!(db.list_drafts().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_image_url_shared_across_platforms() {
        let db = ContentDb::in_memory().unwrap();
        let writer = FakeWriter { fail_for: None };
        let search = FakeSearch { calls: AtomicUsize::new(0) };
        let image = FakeImage { fail: false };

        let mut req = request(vec![Platform::Instagram, Platform::Facebook]);
        req.image = true;
        req.web_search = true;

        let outcome = generate_drafts(
            req,
            &sample_records(),
            GenerationServices {
                writer: &writer,
                search: &search,
                image: &image,
                store: &db,
            },
            "Acme Gym",
        )
        .await;

        assert_eq!(outcome.drafts.len(), 2);
        for draft in &outcome.drafts {
            assert_eq!(draft.image_url.as_deref(), Some("data:image/png;base64,QUJD"));
            assert!(draft.web_search_enabled);
        }
        // One search call and one image call serve every platform.
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_image_failure_is_best_effort() {
        let db = ContentDb::in_memory().unwrap();
        let writer = FakeWriter { fail_for: None };
        let search = FakeSearch { calls: AtomicUsize::new(0) };
        let image = FakeImage { fail: true };

        let mut req = request(vec![Platform::Instagram]);
        req.image = true;

        let outcome = generate_drafts(
            req,
            &sample_records(),
            GenerationServices {
                writer: &writer,
                search: &search,
                image: &image,
                store: &db,
            },
            "Acme Gym",
        )
        .await;

        assert_eq!(outcome.drafts.len(), 1);
        assert!(outcome.failed.is_empty());
        assert!(outcome.drafts[0].image_url.is_none());
    }
}
