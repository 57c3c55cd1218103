//! @ai:module:intent HTTP adapters for OpenAI, Anthropic and local chat endpoints
//! @ai:module:layer infrastructure
//! @ai:module:public_api HttpAgent, Provider
//! @ai:module:stateless false

use crate::agents::client::AgentClient;
use crate::agents::rate_limiter::{RateLimiter, RateLimiterTrait};
use crate::config::ApiConfig;
use crate::metrics::{QueryOutcome, TokenUsage};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// @ai:intent Wire protocol spoken by an agent endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
    /// OpenAI-style chat completions on a self-hosted endpoint, no auth
    Local,
}

/// @ai:intent Chat request body shared by all three providers
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// @ai:intent Chat-completions response body (OpenAI and local)
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// @ai:intent Messages API response body
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Local servers report input/output tokens, OpenAI reports prompt/completion tokens.
#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default, alias = "prompt_tokens")]
    input_tokens: u64,
    #[serde(default, alias = "completion_tokens")]
    output_tokens: u64,
}

impl From<WireUsage> for TokenUsage {
    fn from(usage: WireUsage) -> Self {
        TokenUsage::new(usage.input_tokens, usage.output_tokens)
    }
}

/// @ai:intent Extract answer text and token usage from a successful response body
/// @ai:effects pure
fn parse_body(provider: Provider, body: &str) -> Result<(String, TokenUsage)> {
    match provider {
        Provider::OpenAi | Provider::Local => {
            let response: CompletionResponse =
                serde_json::from_str(body).context("Failed to parse chat completion response")?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .context("Response contained no choices")?;
            Ok((choice.message.content, response.usage.into()))
        }
        Provider::Anthropic => {
            let response: MessagesResponse =
                serde_json::from_str(body).context("Failed to parse messages response")?;
            let text = response
                .content
                .into_iter()
                .map(|c| c.text)
                .collect::<Vec<_>>()
                .join("\n");
            Ok((text, response.usage.into()))
        }
    }
}

/// @ai:intent Remote agent reached over HTTP, paced by its own rate limiter
pub struct HttpAgent {
    id: String,
    model: String,
    provider: Provider,
    endpoint: String,
    api_key: Option<String>,
    config: ApiConfig,
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl HttpAgent {
    /// @ai:intent Build an adapter; `api_key` is required for hosted providers
    /// @ai:effects pure
    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        provider: Provider,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        config: ApiConfig,
    ) -> Result<Self> {
        if provider != Provider::Local && api_key.is_none() {
            anyhow::bail!("{:?} agent requires an API key", provider);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            id: id.into(),
            model: model.into(),
            provider,
            endpoint: endpoint.into(),
            api_key,
            rate_limiter: RateLimiter::new(config.requests_per_minute),
            config,
            client,
        })
    }

    /// @ai:intent OpenAI chat-completions agent; model is the agent name
    /// @ai:pre OPENAI_API_KEY environment variable is set
    /// @ai:effects env
    pub fn openai(name: &str, config: &ApiConfig) -> Result<Self> {
        let key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set in environment")?;
        Self::new(name, name, Provider::OpenAi, OPENAI_URL, Some(key), config.clone())
    }

    /// @ai:intent Anthropic messages agent; model is the agent name
    /// @ai:pre ANTHROPIC_API_KEY environment variable is set
    /// @ai:effects env
    pub fn anthropic(name: &str, config: &ApiConfig) -> Result<Self> {
        let key =
            std::env::var("ANTHROPIC_API_KEY").context("ANTHROPIC_API_KEY not set in environment")?;
        Self::new(name, name, Provider::Anthropic, ANTHROPIC_URL, Some(key), config.clone())
    }

    /// @ai:intent Self-hosted agent speaking chat completions at `endpoint`
    /// @ai:effects pure
    pub fn local(name: &str, model: &str, endpoint: &str, config: &ApiConfig) -> Result<Self> {
        Self::new(name, model, Provider::Local, endpoint, None, config.clone())
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// @ai:effects network
    async fn send(&self, prompt: &str) -> Result<String, String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        builder = match (self.provider, &self.api_key) {
            (Provider::OpenAi, Some(key)) => builder.bearer_auth(key),
            (Provider::Anthropic, Some(key)) => builder
                .header("x-api-key", key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            _ => builder,
        };

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("{} returned {}: {}", self.id, status, error_text);
            return Err(format!("API error {}", status.as_u16()));
        }

        response.text().await.map_err(|e| e.to_string())
    }
}

impl AgentClient for HttpAgent {
    fn id(&self) -> &str {
        &self.id
    }

    /// @ai:intent Query the endpoint; transport, status and parse problems become failures
    /// @ai:effects network
    async fn query(&self, prompt: &str) -> QueryOutcome {
        self.rate_limiter.wait().await;

        let start = Instant::now();
        let body = match self.send(prompt).await {
            Ok(body) => body,
            Err(reason) => return QueryOutcome::failure(reason),
        };
        let latency_seconds = start.elapsed().as_secs_f64();

        match parse_body(self.provider, &body) {
            Ok((text, usage)) => QueryOutcome::Success {
                text,
                usage,
                latency_seconds,
            },
            Err(e) => QueryOutcome::failure(format!("{e:#}")),
        }
    }
}
