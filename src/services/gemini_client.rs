use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::generation::{GenerationClient, GenerationReply};
use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const SAFETY_FINISH_REASON: &str = "SAFETY";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<GenerationReply> {
        let body = json!({
            "contents": [
                { "parts": [{ "text": prompt }] }
            ]
        });

        let response = self
            .http
            .post(self.generate_url())
            .header(API_KEY_HEADER, api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!(error = %redacted(err), "Gemini request failed");
                PlannerError::Service(None)
            })?;

        let status = response.status();
        let response_text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "Failed to read Gemini response body");
                String::new()
            }
        };
        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let message = response_json.as_ref().and_then(provider_message);
            debug!(%status, body = %response_text, "Gemini returned an error status");

            return Err(if status == StatusCode::SERVICE_UNAVAILABLE {
                PlannerError::TransientProvider { message }
            } else {
                PlannerError::Service(message)
            });
        }

        Ok(response_json
            .as_ref()
            .map(reply_from_body)
            .unwrap_or_default())
    }
}

/// Render a transport error without the request URL.
fn redacted(err: reqwest::Error) -> String {
    err.without_url().to_string()
}

fn provider_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|error| error.get("message"))
        .and_then(|value| value.as_str())
        .map(|s| s.to_string())
}

fn reply_from_body(body: &Value) -> GenerationReply {
    let candidate = body
        .get("candidates")
        .and_then(|value| value.as_array())
        .and_then(|candidates| candidates.first());

    let text = candidate
        .and_then(|c| c.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(|value| value.as_str())
        .filter(|text| !text.is_empty())
        .map(|s| s.to_string());

    let finish_blocked = candidate
        .and_then(|c| c.get("finishReason"))
        .and_then(|value| value.as_str())
        == Some(SAFETY_FINISH_REASON);
    let prompt_blocked = body
        .get("promptFeedback")
        .and_then(|feedback| feedback.get("blockReason"))
        .is_some();

    GenerationReply {
        text,
        safety_blocked: finish_blocked || prompt_blocked,
    }
}
