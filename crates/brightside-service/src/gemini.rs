use async_trait::async_trait;
use brightside_core::MotivationRecord;
use reqwest::Client;
use serde::Deserialize;

use crate::{MotivationService, ServiceError};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature for generation. High on purpose: the same prompt
/// runs every morning and should not produce the same quote twice.
const TEMPERATURE: f64 = 0.9;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Async HTTP client implementation of `MotivationService`, backed by the
/// Gemini `generateContent` endpoint with a structured-output schema.
pub struct GeminiService {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(DEFAULT_API_URL, api_key, model)
    }

    /// Point at a non-default endpoint. Tests use this to talk to a local
    /// fake server.
    pub fn with_base_url(base_url: &str, api_key: String, model: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key,
            model,
            client: Client::new(),
        }
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": brightside_prompts::response_schema(),
                "temperature": TEMPERATURE,
            },
        })
    }

    /// Concatenate the text parts of the first candidate.
    fn candidate_text(response: GenerateResponse) -> Result<String, ServiceError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Malformed("no candidates in response".into()))?;
        let content = candidate
            .content
            .ok_or_else(|| ServiceError::Malformed("candidate has no content".into()))?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.is_empty() {
            return Err(ServiceError::Malformed("candidate has no text parts".into()));
        }
        Ok(text)
    }
}

#[async_trait]
impl MotivationService for GeminiService {
    async fn fetch_motivation(&self, goals: &str) -> Result<MotivationRecord, ServiceError> {
        let prompt = brightside_prompts::assemble_prompt(goals);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!(model = %self.model, "requesting motivation");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(&prompt))
            .send()
            .await
            .map_err(|e| ServiceError::Api(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Api(format!("status {status}: {body}")));
        }

        let parsed = resp
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ServiceError::Malformed(format!("json decode: {e}")))?;
        let text = Self::candidate_text(parsed)?;
        Ok(MotivationRecord::from_json_str(&text)?)
    }
}
