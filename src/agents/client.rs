//! @ai:module:intent Agent collaborator seam and a scripted mock
//! @ai:module:layer infrastructure
//! @ai:module:public_api AgentClient, MockAgent
//! @ai:module:stateless true

use crate::metrics::{QueryOutcome, TokenUsage};
use std::time::Duration;

/// @ai:intent Anything that can answer a prompt on behalf of a named agent
///
/// Implementations report failures as `QueryOutcome::Failure` and never fabricate text.
#[allow(async_fn_in_trait)]
pub trait AgentClient: Send + Sync {
    /// @ai:intent Identifier used as the agent key in every report
    fn id(&self) -> &str;

    /// @ai:intent Send one prompt and measure the answer
    async fn query(&self, prompt: &str) -> QueryOutcome;
}

/// @ai:intent Mock agent returning a fixed outcome, optionally after a delay
#[derive(Debug, Clone)]
pub struct MockAgent {
    id: String,
    outcome: QueryOutcome,
    delay: Option<Duration>,
}

impl MockAgent {
    /// @ai:intent Mock that always answers with `text`
    /// @ai:effects pure
    pub fn answering(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: QueryOutcome::Success {
                text: text.into(),
                usage: TokenUsage::new(100, 200),
                latency_seconds: 1.0,
            },
            delay: None,
        }
    }

    /// @ai:intent Mock that always fails with `reason`
    /// @ai:effects pure
    pub fn failing(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: QueryOutcome::failure(reason),
            delay: None,
        }
    }

    pub fn with_latency(mut self, seconds: f64) -> Self {
        if let QueryOutcome::Success { latency_seconds, .. } = &mut self.outcome {
            *latency_seconds = seconds;
        }
        self
    }

    /// Sleep this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl AgentClient for MockAgent {
    fn id(&self) -> &str {
        &self.id
    }

    /// @ai:effects time
    async fn query(&self, _prompt: &str) -> QueryOutcome {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}
