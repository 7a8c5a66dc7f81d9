//! Gemini Client - Implementation of AiOrchestrator against the Generative
//! Language REST API.
//!
//! Each operation is a one-shot request with its own model: a low-latency
//! model for reply drafts, a reasoning model for the insight digest, and
//! grounded (search/maps) models for the intelligence panels.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let client = GeminiClient::new(config);
//! ```
//!
//! Failures never escape: text generation degrades to the designated
//! fallback string and grounded lookups return `success=false`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

use crate::domain::foundation::Rating;
use crate::ports::{
    AiOrchestrator, AiText, GroundedAnswer, GroundingSource, ReviewDigest, DRAFT_FALLBACK,
    FALLBACK_COORDS, INSIGHTS_FALLBACK, LOCAL_DEGRADED, TRENDS_DEGRADED,
};

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Model for review reply drafts.
    pub draft_model: String,
    /// Model for the strategic insight digest.
    pub insights_model: String,
    /// Search-grounded model for market trends.
    pub trends_model: String,
    /// Maps-grounded model for local competition.
    pub local_model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            draft_model: "gemini-flash-lite-latest".to_string(),
            insights_model: "gemini-3-pro-preview".to_string(),
            trends_model: "gemini-3-flash-preview".to_string(),
            local_model: "gemini-2.5-flash".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a config from the application AI section.
    pub fn from_app_config(config: &crate::config::AiConfig, api_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            base_url: config.base_url.clone(),
            draft_model: config.draft_model.clone(),
            insights_model: config.insights_model.clone(),
            trends_model: config.trends_model.clone(),
            local_model: config.local_model.clone(),
            timeout: config.timeout(),
        }
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

/// Internal error for a single generation call; always recovered into a
/// degraded result before leaving the adapter.
#[derive(Debug, thiserror::Error)]
enum GeminiError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("response body was not valid JSON: {0}")]
    MalformedResponse(String),
}

impl GeminiClient {
    /// Creates a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL for a model.
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        )
    }

    /// Sends one generateContent request and extracts the response.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeminiError::Timeout
                } else {
                    GeminiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::Status(status.as_u16()));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::MalformedResponse(e.to_string()))
    }

    /// Runs a plain text generation, flattening an empty candidate list to
    /// an empty string.
    async fn generate_text(&self, model: &str, prompt: String) -> Result<String, GeminiError> {
        let response = self
            .generate(model, GenerateContentRequest::text(prompt))
            .await?;
        Ok(response.text().unwrap_or_default())
    }
}

#[async_trait]
impl AiOrchestrator for GeminiClient {
    async fn draft_reply(&self, review_text: &str, rating: Rating, business_name: &str) -> AiText {
        let prompt = format!(
            "You are the customer success manager at {business_name}.\n\
             Write a professional, empathetic, and concise response to a {rating}-star review.\n\
             Review text: \"{review_text}\"\n\
             Keep it under 50 words.\n\
             If rating 1-3: focus on resolution and empathy.\n\
             If rating 4-5: focus on gratitude and welcome back."
        );

        match self.generate_text(&self.config.draft_model, prompt).await {
            Ok(text) if !text.is_empty() => AiText::Generated(text),
            Ok(_) => AiText::Generated("Thank you for your feedback.".to_string()),
            Err(e) => {
                error!(error = %e, "draft generation failed");
                AiText::Degraded {
                    text: DRAFT_FALLBACK.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn strategic_insights(&self, reviews: &[ReviewDigest], business_name: &str) -> AiText {
        let review_context = reviews
            .iter()
            .map(|r| format!("Rating: {}, Comment: {}", r.rating, r.text))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Analyze these customer reviews for {business_name} and provide a 3-point \
             strategic improvement plan.\nReviews:\n{review_context}"
        );

        match self.generate_text(&self.config.insights_model, prompt).await {
            Ok(text) if !text.is_empty() => AiText::Generated(text),
            Ok(_) => AiText::Degraded {
                text: INSIGHTS_FALLBACK.to_string(),
                reason: "empty response".to_string(),
            },
            Err(e) => {
                error!(error = %e, "strategic insights failed");
                AiText::Degraded {
                    text: INSIGHTS_FALLBACK.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn market_trends(&self, niche: &str) -> GroundedAnswer {
        let prompt = format!(
            "What are the top 3 customer service trends in the {niche} industry? \
             Focus on competitive advantages."
        );
        let request = GenerateContentRequest::text(prompt).with_tool(Tool::google_search());

        match self.generate(&self.config.trends_model, request).await {
            Ok(response) => {
                let sources = response.sources();
                let text = response
                    .text()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "No trends found for this niche.".to_string());
                GroundedAnswer::ok(text, sources)
            }
            Err(e) => {
                error!(error = %e, "market trends lookup failed");
                GroundedAnswer::degraded(TRENDS_DEGRADED)
            }
        }
    }

    async fn local_insights(
        &self,
        business_type: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> GroundedAnswer {
        let (lat, lng) = (
            lat.unwrap_or(FALLBACK_COORDS.0),
            lng.unwrap_or(FALLBACK_COORDS.1),
        );
        let prompt = format!(
            "What are the top rated {business_type} businesses near latitude {lat}, \
             longitude {lng}? Provide a summary of their reputation and how a competitor \
             could differentiate."
        );
        let request = GenerateContentRequest::text(prompt)
            .with_tool(Tool::google_maps())
            .with_lat_lng(lat, lng);

        match self.generate(&self.config.local_model, request).await {
            Ok(response) => {
                let sources = response.sources();
                let text = response
                    .text()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "No local insights available for this region.".to_string());
                GroundedAnswer::ok(text, sources)
            }
            Err(e) => {
                error!(error = %e, "local insights lookup failed");
                GroundedAnswer::degraded(LOCAL_DEGRADED)
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    fn text(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            tools: Vec::new(),
            tool_config: None,
        }
    }

    fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    fn with_lat_lng(mut self, latitude: f64, longitude: f64) -> Self {
        self.tool_config = Some(ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng { latitude, longitude },
            },
        });
        self
    }
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch", skip_serializing_if = "Option::is_none")]
    google_search: Option<serde_json::Value>,
    #[serde(rename = "googleMaps", skip_serializing_if = "Option::is_none")]
    google_maps: Option<serde_json::Value>,
}

impl Tool {
    fn google_search() -> Self {
        Self {
            google_search: Some(serde_json::json!({})),
            google_maps: None,
        }
    }

    fn google_maps() -> Self {
        Self {
            google_search: None,
            google_maps: Some(serde_json::json!({})),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let parts = candidate.content.as_ref()?.parts.as_ref()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        Some(text)
    }

    /// Grounding sources of the first candidate.
    fn sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| GroundingSource {
                        title: web.title.clone().unwrap_or_default(),
                        uri: web.uri.clone().unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}
