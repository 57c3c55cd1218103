//! @ai:module:intent Agent adapters and the factory that resolves agent names
//! @ai:module:layer infrastructure
//! @ai:module:public_api Agent, AgentClient, HttpAgent, SimulatedAgent, MockAgent, RateLimiter, create_agent, build_agents

pub mod client;
pub mod http;
pub mod rate_limiter;
pub mod simulated;

pub use client::{AgentClient, MockAgent};
pub use http::{HttpAgent, Provider};
pub use rate_limiter::{RateLimiter, RateLimiterTrait};
pub use simulated::SimulatedAgent;

use crate::config::ApiConfig;
use crate::metrics::QueryOutcome;
use anyhow::Result;

/// @ai:intent Any agent the factory can build
pub enum Agent {
    Http(HttpAgent),
    Simulated(SimulatedAgent),
}

impl AgentClient for Agent {
    fn id(&self) -> &str {
        match self {
            Agent::Http(a) => a.id(),
            Agent::Simulated(a) => a.id(),
        }
    }

    async fn query(&self, prompt: &str) -> QueryOutcome {
        match self {
            Agent::Http(a) => a.query(prompt).await,
            Agent::Simulated(a) => a.query(prompt).await,
        }
    }
}

/// @ai:intent Resolve an agent name to an adapter
/// @ai:pre gpt-* needs OPENAI_API_KEY, claude-* needs ANTHROPIC_API_KEY
/// @ai:example ("local:http://10.0.0.5:9000/chat") -> local agent at that endpoint
/// @ai:effects env
pub fn create_agent(name: &str, config: &ApiConfig) -> Result<Agent> {
    let agent = if name.starts_with("gpt-") {
        HttpAgent::openai(name, config)?
    } else if name.starts_with("claude-") {
        HttpAgent::anthropic(name, config)?
    } else if name == "local" {
        let endpoint =
            std::env::var("LOCAL_AGENT_ENDPOINT").unwrap_or_else(|_| config.local_endpoint.clone());
        HttpAgent::local(name, "local-model", &endpoint, config)?
    } else if let Some(endpoint) = name.strip_prefix("local:") {
        HttpAgent::local(name, "custom-local-model", endpoint, config)?
    } else {
        anyhow::bail!("Unsupported agent '{}'", name);
    };

    Ok(Agent::Http(agent))
}

/// @ai:intent Build every configured agent; a dry run simulates them all under the same ids
/// @ai:post agents that cannot be built are logged and skipped, order is kept
/// @ai:effects env
pub fn build_agents(names: &[String], config: &ApiConfig, dry_run: bool) -> Vec<Agent> {
    names
        .iter()
        .filter_map(|name| {
            if dry_run {
                return Some(Agent::Simulated(SimulatedAgent::new(name.as_str())));
            }
            match create_agent(name, config) {
                Ok(agent) => Some(agent),
                Err(e) => {
                    tracing::warn!("Skipping agent {}: {:#}", name, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_agents() {
        let config = ApiConfig::default();

        let Agent::Http(custom) = create_agent("local:http://10.0.0.5:9000/chat", &config).unwrap() else {
            panic!("expected an HTTP agent");
        };
        assert_eq!(custom.provider(), Provider::Local);
        assert_eq!(custom.endpoint(), "http://10.0.0.5:9000/chat");
        assert_eq!(custom.id(), "local:http://10.0.0.5:9000/chat");
    }

    #[test]
    fn test_unsupported_agent() {
        let err = create_agent("mystery-model", &ApiConfig::default()).err().unwrap();
        assert!(err.to_string().contains("Unsupported agent 'mystery-model'"));
    }

    #[tokio::test]
    async fn test_dry_run_simulates_every_agent() {
        let names = vec!["gpt-4".to_string(), "unknown".to_string()];
        let agents = build_agents(&names, &ApiConfig::default(), true);

        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].id(), "gpt-4");
        assert!(matches!(agents[1], Agent::Simulated(_)));
        assert!(!agents[1].query("logic").await.is_failure());
    }

    #[test]
    fn test_unknown_agent_is_skipped() {
        let names = vec!["unknown".to_string(), "local:http://127.0.0.1:9/chat".to_string()];
        let agents = build_agents(&names, &ApiConfig::default(), false);

        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id(), "local:http://127.0.0.1:9/chat");
    }
}
