//! Draft generation: prompts, the hosted LLM client, and the drafting driver

pub mod drafts;
pub mod gemini;
pub mod prompt;

pub use drafts::{generate_drafts, GenerationOutcome, GenerationRequest, GenerationServices};
pub use gemini::GeminiClient;
pub use prompt::PromptBuilder;
