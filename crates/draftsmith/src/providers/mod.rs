//! Provider abstractions for enrichment, generation, search, images, and storage
//!
//! Every external collaborator sits behind a trait so the drivers take
//! constructor-injected handles and stay unit-testable with fakes.

pub mod enrichment;
pub mod gemini;
pub mod generation;
pub mod store;

pub use enrichment::EnrichmentService;
pub use gemini::{GeminiEnricher, GeminiImage, GeminiProvider, GeminiSearch, GeminiWriter};
pub use generation::{GenerationProvider, ImageProvider, SearchProvider};
pub use store::{DraftStore, KnowledgeStore};
