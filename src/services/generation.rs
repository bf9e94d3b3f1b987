use async_trait::async_trait;

use crate::error::Result;

/// What the provider returned for a prompt on a successful exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReply {
    /// Generated text, if the provider produced any
    pub text: Option<String>,
    /// Whether the provider withheld output on safety grounds
    pub safety_blocked: bool,
}

impl GenerationReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            safety_blocked: false,
        }
    }

    pub fn blocked() -> Self {
        Self {
            text: None,
            safety_blocked: true,
        }
    }
}

/// Submit a prompt and receive text or a classified failure.
///
/// Implementations report provider overload as
/// [`PlannerError::TransientProvider`](crate::PlannerError::TransientProvider)
/// and every other failure as `Service`.
#[async_trait]
pub trait GenerationClient: Send + Sync + std::fmt::Debug {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<GenerationReply>;
}
