//! @ai:module:intent Deterministic offline agent for dry runs and failure substitution
//! @ai:module:layer infrastructure
//! @ai:module:public_api SimulatedAgent
//! @ai:module:stateless true

use crate::agents::client::AgentClient;
use crate::metrics::{QueryOutcome, TokenUsage};

/// @ai:intent Answers from canned text keyed on prompt keywords; never calls the network
#[derive(Debug, Clone)]
pub struct SimulatedAgent {
    id: String,
}

impl SimulatedAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// @ai:intent Pick the canned answer for a prompt
    /// @ai:example ("Calculate 6*7") -> "Based on the mathematical question, the answer would be 42."
    /// @ai:effects pure
    pub fn answer_for(prompt: &str) -> &'static str {
        let lower = prompt.to_lowercase();

        if lower.contains("math") || lower.contains("calculate") {
            "Based on the mathematical question, the answer would be 42."
        } else if lower.contains("reasoning") || lower.contains("logic") {
            "Through logical deduction, the conclusion is that all paths lead to the same result."
        } else if lower.contains("question") {
            "This is a comprehensive answer to your question, taking into account all relevant factors."
        } else {
            "As an AI assistant, I can help you with various tasks including answering questions, \
             solving problems, and providing information."
        }
    }

    /// @ai:intent Full simulated outcome: word-count tokens, length-scaled latency
    /// @ai:effects pure
    pub fn respond(prompt: &str) -> QueryOutcome {
        let text = Self::answer_for(prompt);
        let usage = TokenUsage::new(
            prompt.split_whitespace().count() as u64,
            text.split_whitespace().count() as u64,
        );

        QueryOutcome::Success {
            text: text.to_string(),
            usage,
            latency_seconds: 0.1 + prompt.len() as f64 * 0.0001,
        }
    }
}

impl AgentClient for SimulatedAgent {
    fn id(&self) -> &str {
        &self.id
    }

    async fn query(&self, prompt: &str) -> QueryOutcome {
        Self::respond(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_answers() {
        assert!(SimulatedAgent::answer_for("Calculate 2+2").contains("42"));
        assert!(SimulatedAgent::answer_for("A LOGIC puzzle").starts_with("Through logical deduction"));
        assert!(SimulatedAgent::answer_for("One question for you").contains("comprehensive"));
        assert!(SimulatedAgent::answer_for("Hello").starts_with("As an AI assistant"));
    }

    #[tokio::test]
    async fn test_usage_and_latency() {
        let prompt = "what is the math answer";
        let outcome = SimulatedAgent::new("sim").query(prompt).await;

        let QueryOutcome::Success {
            usage,
            latency_seconds,
            ..
        } = outcome
        else {
            panic!("simulated agent never fails");
        };
        assert_eq!(usage.input, 5);
        assert_eq!(usage.output, 10);
        assert_eq!(usage.total, 15);
        assert!((latency_seconds - (0.1 + prompt.len() as f64 * 0.0001)).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_is_deterministic() {
        let agent = SimulatedAgent::new("sim");
        assert_eq!(agent.query("logic").await, agent.query("logic").await);
    }
}
