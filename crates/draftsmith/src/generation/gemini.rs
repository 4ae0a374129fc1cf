//! Hosted Gemini API client with retry logic
//!
//! Covers the three calls the system makes: plain text generation,
//! search-grounded generation, and image generation via the Imagen predict
//! endpoint.

use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

/// Gemini API client with automatic retry
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: LlmConfig,
    /// Resolved API key
    api_key: String,
    /// Maximum retries
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<ReplyCandidate>>,
}

#[derive(Deserialize)]
struct ReplyCandidate {
    content: Option<ReplyContent>,
}

#[derive(Deserialize)]
struct ReplyContent {
    parts: Option<Vec<ReplyPart>>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Serialize)]
struct PredictParameters {
    #[serde(rename = "sampleCount")]
    sample_count: u32,
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Option<Vec<Prediction>>,
}

#[derive(Deserialize)]
struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// Fails with `MissingCredential` when no API key was resolved; callers
    /// never get a client that would start an operation it cannot finish.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::MissingCredential(config.api_key_env.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            api_key,
            config: config.clone(),
        })
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Llm("Unknown error".to_string())))
    }

    /// Generate text for a prompt
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_inner(prompt, false).await
    }

    /// Generate text with live web-search grounding enabled
    pub async fn generate_grounded(&self, prompt: &str) -> Result<String> {
        self.generate_inner(prompt, true).await
    }

    async fn generate_inner(&self, prompt: &str, grounded: bool) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.text_model, self.api_key
        );
        let prompt = prompt.to_string();
        let temperature = self.config.temperature;
        let client = self.client.clone();

        self.retry_request(|| {
            let url = url.clone();
            let prompt = prompt.clone();
            let client = client.clone();

            async move {
                let request = GenerateRequest {
                    contents: vec![Content {
                        parts: vec![Part { text: prompt }],
                    }],
                    tools: grounded.then(|| {
                        vec![Tool {
                            google_search: GoogleSearch {},
                        }]
                    }),
                    generation_config: GenerationConfig { temperature },
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::Llm(format!("Generation request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Llm(format!(
                        "Generation failed: HTTP {} - {}",
                        status, body
                    )));
                }

                let generate_response: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::Llm(format!("Failed to parse generation response: {}", e)))?;

                extract_text(generate_response)
            }
        })
        .await
    }

    /// Generate an image and return it as a data URL
    pub async fn generate_image(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:predict?key={}",
            self.config.base_url, self.config.image_model, self.api_key
        );
        let prompt = prompt.to_string();
        let client = self.client.clone();

        self.retry_request(|| {
            let url = url.clone();
            let prompt = prompt.clone();
            let client = client.clone();

            async move {
                let request = PredictRequest {
                    instances: vec![PredictInstance { prompt }],
                    parameters: PredictParameters { sample_count: 1 },
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::Image(format!("Image request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Image(format!(
                        "Image generation failed: HTTP {} - {}",
                        status, body
                    )));
                }

                let predict_response: PredictResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::Image(format!("Failed to parse image response: {}", e)))?;

                extract_image(predict_response)
            }
        })
        .await
    }
}

/// Pull the concatenated text out of a generation response
fn extract_text(response: GenerateResponse) -> Result<String> {
    let text = response
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .map(|parts| {
            parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .filter(|t| !t.trim().is_empty());

    text.ok_or_else(|| Error::Llm("Empty generation response".to_string()))
}

/// Pull the first image out of a predict response as a data URL
fn extract_image(response: PredictResponse) -> Result<String> {
    let prediction = response
        .predictions
        .and_then(|mut p| if p.is_empty() { None } else { Some(p.remove(0)) })
        .ok_or_else(|| Error::Image("Empty image response".to_string()))?;

    let encoded = prediction
        .bytes_base64_encoded
        .ok_or_else(|| Error::Image("Image response carried no payload".to_string()))?;

    // Validate the payload actually decodes before handing it downstream.
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&encoded)
        .map_err(|e| Error::Image(format!("Image payload is not valid base64: {}", e)))?;
    tracing::debug!("Generated image: {} bytes", bytes.len());

    let mime = prediction.mime_type.unwrap_or_else(|| "image/png".to_string());
    Ok(format!("data:{};base64,{}", mime, encoded))
}

/// Strip markdown code fences a model sometimes wraps around JSON replies
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
