use std::sync::Arc;

use tracing::{error, info, warn};

use super::retry::RetryPolicy;
use crate::{
    error::{PlannerError, Result},
    services::{
        build_trip_prompt, normalize, GeminiClient, GenerationClient, GenerationReply,
    },
    types::TripRequest,
};

/// Turns a trip request into a cleaned-up plan
#[derive(Debug, Clone)]
pub struct TripPlanner {
    client: Arc<dyn GenerationClient>,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl TripPlanner {
    /// Create a planner around any generation client. A missing or empty key
    /// makes every request fail with [`PlannerError::Config`].
    pub fn new(api_key: Option<String>, client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            retry: RetryPolicy::default(),
        }
    }

    /// Planner backed by the default Gemini client
    pub fn gemini(api_key: Option<String>) -> Self {
        Self::new(api_key, Arc::new(GeminiClient::new()))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a plan for `request`.
    ///
    /// Nothing is sent to the provider unless the key is configured and the
    /// required fields are present.
    pub async fn plan(&self, request: &TripRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            error!("GOOGLE_API_KEY missing");
            PlannerError::Config
        })?;
        let trip = request.validate()?;
        let prompt = build_trip_prompt(&trip);

        let reply = self.generate_with_retry(api_key, &prompt).await?;

        match reply {
            GenerationReply {
                text: Some(text), ..
            } => {
                info!(destination = %trip.destination, days = %trip.days, "Plan generated");
                Ok(normalize(text.as_str()))
            }
            GenerationReply {
                safety_blocked: true,
                ..
            } => {
                warn!(destination = %trip.destination, "Plan blocked by safety filter");
                Err(PlannerError::ContentBlocked)
            }
            _ => Err(PlannerError::EmptyResponse),
        }
    }

    async fn generate_with_retry(&self, api_key: &str, prompt: &str) -> Result<GenerationReply> {
        let mut attempt = 1;

        loop {
            match self.client.generate(api_key, prompt).await {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_retryable() && self.retry.allows_retry_after(attempt) => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(attempt, ?delay, "Provider unavailable, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!(attempt, code = err.error_code(), error = %err, "Generation failed");
                    return Err(err);
                }
            }
        }
    }
}
