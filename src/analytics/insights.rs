//! @ai:module:intent Rule-based insights, kept as reason codes with separate text rendering
//! @ai:module:layer domain
//! @ai:module:public_api Insight, InsightKind, generate_insights
//! @ai:module:stateless true

use crate::analytics::rating::tokens_per_second;
use crate::metrics::AgentRecord;
use serde::{Deserialize, Serialize};

/// @ai:intent Reason code for a single insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    ExcellentAccuracy,
    GoodAccuracy,
    LowAccuracy,
    FastResponse,
    HighLatency,
    HighTokenThroughput,
    LowTokenThroughput,
}

/// @ai:intent One observation about one agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insight {
    pub agent_id: String,
    pub kind: InsightKind,
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = &self.agent_id;
        match self.kind {
            InsightKind::ExcellentAccuracy => write!(f, "{id} demonstrates excellent precision (>=90%)"),
            InsightKind::GoodAccuracy => write!(f, "{id} shows good precision (80-89%)"),
            InsightKind::LowAccuracy => write!(f, "{id} needs improvement in precision (<70%)"),
            InsightKind::FastResponse => write!(f, "{id} has excellent response time (<=2s)"),
            InsightKind::HighLatency => write!(f, "{id} shows high latency (>5s)"),
            InsightKind::HighTokenThroughput => write!(f, "{id} is very efficient at token processing"),
            InsightKind::LowTokenThroughput => {
                write!(f, "{id} could be more efficient at token processing")
            }
        }
    }
}

const FAST_RESPONSE_SECS: f64 = 2.0;
const HIGH_LATENCY_SECS: f64 = 5.0;
const HIGH_THROUGHPUT_TPS: f64 = 500.0;
const LOW_THROUGHPUT_TPS: f64 = 100.0;

/// @ai:intent Emit every matching insight per agent: accuracy, then latency, then efficiency rules
/// @ai:effects pure
pub fn generate_insights(agents: &[AgentRecord]) -> Vec<Insight> {
    let mut insights = Vec::new();

    for agent in agents {
        let metrics = &agent.metrics;
        let mut push = |kind| {
            insights.push(Insight {
                agent_id: agent.id.clone(),
                kind,
            })
        };

        // 70-80% accuracy is deliberately silent
        if metrics.accuracy_pct >= 90.0 {
            push(InsightKind::ExcellentAccuracy);
        } else if metrics.accuracy_pct >= 80.0 {
            push(InsightKind::GoodAccuracy);
        } else if metrics.accuracy_pct < 70.0 {
            push(InsightKind::LowAccuracy);
        }

        if metrics.latency_avg <= FAST_RESPONSE_SECS {
            push(InsightKind::FastResponse);
        } else if metrics.latency_avg > HIGH_LATENCY_SECS {
            push(InsightKind::HighLatency);
        }

        let tps = tokens_per_second(metrics.tokens_avg, metrics.latency_avg);
        if tps > HIGH_THROUGHPUT_TPS {
            push(InsightKind::HighTokenThroughput);
        } else if tps < LOW_THROUGHPUT_TPS {
            push(InsightKind::LowTokenThroughput);
        }
    }

    insights
}
