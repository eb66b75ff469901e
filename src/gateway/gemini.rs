//! Gemini Suggestion Gateway
//!
//! Asks a Gemini model for dish names using structured JSON output. The
//! first candidate's text part carries the array of names.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::{credential, fallback_suggestions, parse_names, settle, SuggestionGateway};
use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn prompt(context: &str, count: usize) -> String {
    format!(
        "Suggest {} popular Vietnamese dishes suitable for a \"{}\" diet.\n\
         Just return the names of the dishes.\n\
         Return a JSON array of strings.\n\
         Do not include explanations.",
        count, context
    )
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .find_map(|part| part.text)
}

pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGateway {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Gateway(format!("failed to build client: {}", e)))?;
        Ok(Self::with_client(client, base_url, model, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn request(&self, key: &str, context: &str, count: usize) -> DomainResult<Vec<String>> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt(context, count)),
                }],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": { "type": "STRING" } },
            }),
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Gateway(format!("gemini returned {}", status)));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Gateway(format!("malformed gemini response: {}", e)))?;

        match first_text(envelope) {
            Some(text) => parse_names(&text),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl SuggestionGateway for GeminiGateway {
    async fn suggest(&self, context: &str, count: usize) -> Vec<String> {
        let Some(key) = credential(&self.api_key) else {
            warn!("API key is missing for suggestions, serving fallback list");
            return fallback_suggestions();
        };
        debug!(context, count, model = %self.model, "requesting gemini suggestions");
        settle(self.request(key, context, count).await, context, count)
    }
}
