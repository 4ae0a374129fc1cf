//! Gemini-backed providers for enrichment, generation, search, and images
//!
//! Wraps a shared GeminiClient to implement the provider traits.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{AppConfig, LlmConfig};
use crate::error::{Error, Result};
use crate::generation::gemini::strip_code_fences;
use crate::generation::{GeminiClient, PromptBuilder};
use crate::types::{Category, Enrichment};

use super::enrichment::EnrichmentService;
use super::generation::{GenerationProvider, ImageProvider, SearchProvider};

/// Enrichment over Gemini: categorize + summarize as strict JSON
pub struct GeminiEnricher {
    client: Arc<GeminiClient>,
    business: String,
}

/// The JSON shape the analyst prompt asks the model for
#[derive(Deserialize)]
struct AnalystReply {
    category: String,
    summary: String,
}

impl GeminiEnricher {
    /// Create from an existing client
    pub fn from_client(client: Arc<GeminiClient>, business: String) -> Self {
        Self { client, business }
    }
}

#[async_trait]
impl EnrichmentService for GeminiEnricher {
    async fn analyze(&self, raw_text: &str) -> Result<Enrichment> {
        let prompt = PromptBuilder::build_analyst_prompt(&self.business, raw_text);
        let reply = self.client.generate(&prompt).await?;

        let cleaned = strip_code_fences(&reply);
        let parsed: AnalystReply = serde_json::from_str(&cleaned)
            .map_err(|e| Error::enrichment(format!("Unparseable analyst reply: {}", e)))?;

        // A valid reply with an off-menu label still carries a usable
        // summary; it lands in Uncategorized rather than being discarded.
        let category = Category::from_label(&parsed.category).unwrap_or(Category::Uncategorized);

        Ok(Enrichment {
            category,
            summary: parsed.summary.trim().to_string(),
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Post writing over Gemini
pub struct GeminiWriter {
    client: Arc<GeminiClient>,
}

#[async_trait]
impl GenerationProvider for GeminiWriter {
    async fn write_post(&self, prompt: &str) -> Result<String> {
        self.client.generate(prompt).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Web-search context over Gemini's search grounding tool
pub struct GeminiSearch {
    client: Arc<GeminiClient>,
}

#[async_trait]
impl SearchProvider for GeminiSearch {
    async fn search_context(&self, query: &str) -> Result<String> {
        let prompt = format!(
            "Using live web search, gather 3-5 current, concrete facts relevant to: {}.\n\
             Reply as short plain-text bullet points, no commentary.",
            query
        );
        self.client
            .generate_grounded(&prompt)
            .await
            .map_err(|e| Error::Search(e.to_string()))
    }

    fn name(&self) -> &str {
        "gemini-search"
    }
}

/// Image generation over the Imagen predict endpoint
pub struct GeminiImage {
    client: Arc<GeminiClient>,
}

#[async_trait]
impl ImageProvider for GeminiImage {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        self.client.generate_image(prompt).await
    }

    fn name(&self) -> &str {
        "imagen"
    }
}

/// Combined provider bundle sharing a single client across all four seams
pub struct GeminiProvider {
    enricher: Arc<GeminiEnricher>,
    writer: Arc<GeminiWriter>,
    search: Arc<GeminiSearch>,
    image: Arc<GeminiImage>,
}

impl GeminiProvider {
    /// Create the full provider bundle from configuration.
    ///
    /// Fails with `MissingCredential` when no API key is available.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::from_llm_config(&config.llm, config.business.name.clone())
    }

    /// Create from an LLM config and business name
    pub fn from_llm_config(llm: &LlmConfig, business: String) -> Result<Self> {
        let client = Arc::new(GeminiClient::new(llm)?);
        Ok(Self {
            enricher: Arc::new(GeminiEnricher::from_client(Arc::clone(&client), business)),
            writer: Arc::new(GeminiWriter {
                client: Arc::clone(&client),
            }),
            search: Arc::new(GeminiSearch {
                client: Arc::clone(&client),
            }),
            image: Arc::new(GeminiImage { client }),
        })
    }

    pub fn enricher(&self) -> Arc<GeminiEnricher> {
        Arc::clone(&self.enricher)
    }

    pub fn writer(&self) -> Arc<GeminiWriter> {
        Arc::clone(&self.writer)
    }

    pub fn search(&self) -> Arc<GeminiSearch> {
        Arc::clone(&self.search)
    }

    pub fn image(&self) -> Arc<GeminiImage> {
        Arc::clone(&self.image)
    }
}
