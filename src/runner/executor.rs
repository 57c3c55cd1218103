//! @ai:module:intent Fan questions out to every agent and collect per-question results
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkExecutor
//! @ai:module:stateless false

use crate::agents::{AgentClient, SimulatedAgent};
use crate::config::{FailurePolicy, RunConfig};
use crate::dataset::QuestionItem;
use crate::metrics::{AgentResponse, QueryOutcome, QuestionResult};
use crate::runner::matching::AnswerMatcher;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// @ai:intent Executes questions against a fixed set of agents
pub struct BenchmarkExecutor<C: AgentClient> {
    agents: Vec<Arc<C>>,
    run_config: RunConfig,
    matcher: AnswerMatcher,
}

impl<C: AgentClient> BenchmarkExecutor<C> {
    /// @ai:intent Create a new benchmark executor
    /// @ai:effects pure
    pub fn new(agents: Vec<Arc<C>>, run_config: RunConfig) -> Self {
        let matcher = AnswerMatcher::new(run_config.match_mode);
        Self {
            agents,
            run_config,
            matcher,
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// @ai:post None when `timeout_secs` is 0
    fn timeout(&self) -> Option<Duration> {
        match self.run_config.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// @ai:intent Query one agent with a timeout, apply the failure policy and grade the answer
    /// @ai:post never returns an error; failures are recorded on the response
    /// @ai:effects network
    async fn query_agent(&self, agent: &C, question: &QuestionItem) -> AgentResponse {
        let outcome = match self.timeout() {
            Some(limit) => match tokio::time::timeout(limit, agent.query(&question.question)).await {
                Ok(outcome) => outcome,
                Err(_) => QueryOutcome::failure(format!("timed out after {}s", limit.as_secs())),
            },
            None => agent.query(&question.question).await,
        };

        let outcome = match outcome {
            QueryOutcome::Failure { reason } => {
                tracing::warn!("{} failed on question {}: {}", agent.id(), question.id, reason);
                match self.run_config.failure_policy {
                    FailurePolicy::Record => QueryOutcome::Failure { reason },
                    FailurePolicy::Substitute => {
                        tracing::warn!("Substituting a simulated answer for {}", agent.id());
                        SimulatedAgent::respond(&question.question)
                    }
                }
            }
            success => success,
        };

        match outcome {
            QueryOutcome::Success {
                text,
                usage,
                latency_seconds,
            } => {
                let is_correct = self.matcher.is_correct(&text, &question.expected_answer);
                AgentResponse::answered(agent.id(), text, usage, latency_seconds, is_correct)
            }
            QueryOutcome::Failure { reason } => AgentResponse::failed(agent.id(), reason),
        }
    }

    /// @ai:intent Ask every agent one question concurrently
    /// @ai:post responses follow agent input order
    /// @ai:effects network
    pub async fn run_question(&self, question: &QuestionItem) -> QuestionResult {
        let responses = join_all(
            self.agents
                .iter()
                .map(|agent| self.query_agent(agent, question)),
        )
        .await;

        QuestionResult {
            question_id: question.id.clone(),
            responses,
        }
    }

    /// @ai:intent Run all questions with at most `max_concurrent_questions` in flight
    /// @ai:post results follow question input order
    /// @ai:effects network
    pub async fn run_questions(&self, questions: &[QuestionItem]) -> Vec<QuestionResult> {
        let total = questions.len();
        let in_flight = self.run_config.max_concurrent_questions.max(1);

        stream::iter(questions.iter().enumerate())
            .map(|(i, question)| async move {
                tracing::info!("[{}/{}] Question {}", i + 1, total, question.id);
                self.run_question(question).await
            })
            .buffered(in_flight)
            .collect()
            .await
    }
}
