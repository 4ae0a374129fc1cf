//! Generation provider traits: post text, web search context, images

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based post generation
///
/// Implementations:
/// - `GeminiWriter`: hosted Gemini `generateContent` endpoint
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate the text of one social post from a fully built prompt
    async fn write_post(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Trait for live web-search augmentation of draft generation
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch a short grounded context blurb for the given query
    async fn search_context(&self, query: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Trait for AI image generation
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate an image for the prompt; returns a data URL
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
