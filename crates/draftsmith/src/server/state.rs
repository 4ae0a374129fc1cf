//! Application state for the content-operations server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::providers::{
    EnrichmentService, GeminiProvider, GenerationProvider, ImageProvider, SearchProvider,
};
use crate::storage::ContentDb;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Content database (knowledge + drafts)
    db: Arc<ContentDb>,
    /// Enrichment service (categorize/summarize)
    enrichment: Arc<dyn EnrichmentService>,
    /// Post writer
    writer: Arc<dyn GenerationProvider>,
    /// Web search augmentation
    search: Arc<dyn SearchProvider>,
    /// Image generation
    image: Arc<dyn ImageProvider>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Fails immediately when the LLM credential is missing or the database
    /// cannot be opened; no operation starts against a half-built state.
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let db = Arc::new(ContentDb::new(&config.storage.database_path)?);
        tracing::info!(
            "Content database ready at {}",
            config.storage.database_path.display()
        );

        let provider = GeminiProvider::new(&config)?;
        tracing::info!("LLM provider initialized (model: {})", config.llm.text_model);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                enrichment: provider.enricher(),
                writer: provider.writer(),
                search: provider.search(),
                image: provider.image(),
                db,
                config,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the content database
    pub fn db(&self) -> &Arc<ContentDb> {
        &self.inner.db
    }

    /// Get the enrichment service
    pub fn enrichment(&self) -> &Arc<dyn EnrichmentService> {
        &self.inner.enrichment
    }

    /// Get the post writer
    pub fn writer(&self) -> &Arc<dyn GenerationProvider> {
        &self.inner.writer
    }

    /// Get the search provider
    pub fn search(&self) -> &Arc<dyn SearchProvider> {
        &self.inner.search
    }

    /// Get the image provider
    pub fn image(&self) -> &Arc<dyn ImageProvider> {
        &self.inner.image
    }
}
