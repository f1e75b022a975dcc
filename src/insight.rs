//! Client for the external text-generation service.
//!
//! Sends one summary view at a time to the Google Generative Language API
//! and returns the prose commentary, or a typed error. The caller decides
//! what to display on failure; this module never substitutes fallback text
//! on its own and never retries.

use crate::aggregate::{SummaryView, ViewKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the text-generation API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for the insight client.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// API credential; a missing key yields `InsightError::MissingApiKey`
    /// at call time rather than at construction
    pub api_key: Option<String>,
    /// Model identifier (default: "gemini-1.5-flash-latest")
    pub model: String,
    /// Endpoint base URL, overridable for tests
    pub api_base: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        InsightConfig {
            api_key: None,
            model: "gemini-1.5-flash-latest".to_string(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl InsightConfig {
    /// Reads the credential from the `GEMINI_API_KEY` environment variable,
    /// keeping defaults for everything else.
    pub fn from_env() -> Self {
        InsightConfig {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            ..InsightConfig::default()
        }
    }
}

/// Client for generating natural-language commentary about a summary view.
#[derive(Debug)]
pub struct InsightClient {
    client: Client,
    config: InsightConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl InsightClient {
    /// Creates a client with the credential taken from the environment.
    pub fn new() -> Result<Self, InsightError> {
        Self::with_config(InsightConfig::from_env())
    }

    /// Creates a client with custom configuration.
    ///
    /// # Errors
    /// Returns `InsightError::ClientCreation` if the HTTP client cannot be
    /// built.
    pub fn with_config(config: InsightConfig) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InsightError::ClientCreation(e.to_string()))?;

        Ok(InsightClient { client, config })
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Requests exactly-3-bullet commentary for one summary view.
    ///
    /// Blocks the calling flow until the service responds or the request
    /// times out. One view per call; a failure here is scoped to that view.
    ///
    /// # Errors
    /// - `MissingApiKey` when no credential is configured
    /// - `Network` on transport failure or timeout
    /// - `Api` on a non-success HTTP status
    /// - `MalformedResponse` when the payload lacks the expected text
    pub async fn generate_insight(&self, view: &SummaryView) -> Result<String, InsightError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, api_key
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart {
                    text: build_prompt(view),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InsightError::Api(status.as_u16(), detail));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InsightError::MalformedResponse(e.to_string()))?;

        extract_text(payload)
    }
}

/// Pulls the generated text out of the response payload.
fn extract_text(payload: GenerateResponse) -> Result<String, InsightError> {
    payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            InsightError::MalformedResponse("response contained no generated text".to_string())
        })
}

/// Builds the fixed instruction prompt for a view, embedding its entries as
/// a literal JSON list of key/value records.
pub fn build_prompt(view: &SummaryView) -> String {
    let data = serde_json::to_string(&view.entries).unwrap_or_else(|_| "[]".to_string());

    let instruction = match view.kind {
        ViewKind::Sentiment => {
            "Provide 3 key insights about the overall sentiment. Focus on the most \
             prevalent sentiments and any notable imbalances. Mention the dominant \
             sentiment and why it is important."
        }
        ViewKind::EngagementTrend => {
            "Describe the trend of engagements over the period. Give 3 key insights. \
             Highlight any significant spikes or drops in engagement."
        }
        ViewKind::PlatformEngagements => {
            "What are the top platforms driving engagements? Are any platforms \
             significantly underperforming? Provide 3 key insights and identify the \
             top performing platforms."
        }
        ViewKind::MediaTypeMix => {
            "What are the most common media types used? Is there a significant \
             preference for certain types? Give 3 key insights and discuss the most \
             prevalent media type."
        }
        ViewKind::TopLocations => {
            "What does this data tell us about geographical engagement? Provide 3 \
             key insights and point out the most engaged locations."
        }
    };

    format!(
        "Given the following data from a media dataset: {}. {} Present the insights \
         as plain text, using exactly 3 bullet points for readability.",
        data, instruction
    )
}

/// The message displayed in place of an insight when generation fails.
///
/// Scoped to a single view; callers render it verbatim beneath the chart
/// while the other views proceed with their own attempts.
pub fn fallback_message(view: ViewKind, error: &InsightError) -> String {
    format!(
        "Insights are unavailable for {}: {}",
        view.as_str(),
        error
    )
}

/// Errors from the text-generation service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// HTTP client construction failed
    ClientCreation(String),
    /// No API credential is configured
    MissingApiKey,
    /// Transport failure or timeout
    Network(String),
    /// Non-success HTTP status with response detail
    Api(u16, String),
    /// Response payload did not contain generated text
    MalformedResponse(String),
}

impl fmt::Display for InsightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightError::ClientCreation(msg) => write!(f, "client creation error: {}", msg),
            InsightError::MissingApiKey => write!(
                f,
                "no API key configured (set the {} environment variable)",
                API_KEY_ENV
            ),
            InsightError::Network(msg) => write!(f, "network error: {}", msg),
            InsightError::Api(status, detail) => {
                write!(f, "API error (HTTP {}): {}", status, detail)
            }
            InsightError::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for InsightError {}
