//! @ai:module:intent Fixed-threshold ratings and efficiency figures for one agent
//! @ai:module:layer domain
//! @ai:module:public_api Rating, rate_accuracy, rate_latency, tokens_per_second, cost_efficiency
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Four-level quality bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Rate accuracy percentage; lower bounds are inclusive
/// @ai:example (90.0) -> Excellent
/// @ai:example (69.9) -> Poor
/// @ai:effects pure
pub fn rate_accuracy(accuracy: f64) -> Rating {
    if accuracy >= 90.0 {
        Rating::Excellent
    } else if accuracy >= 80.0 {
        Rating::Good
    } else if accuracy >= 70.0 {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

/// @ai:intent Rate average latency in seconds; upper bounds are inclusive
/// @ai:example (1.5) -> Good
/// @ai:effects pure
pub fn rate_latency(latency: f64) -> Rating {
    if latency <= 1.0 {
        Rating::Excellent
    } else if latency <= 3.0 {
        Rating::Good
    } else if latency <= 5.0 {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

/// @ai:intent Token throughput, 0 when latency or tokens are not positive
/// @ai:effects pure
pub fn tokens_per_second(tokens_avg: f64, latency_avg: f64) -> f64 {
    if latency_avg <= 0.0 || tokens_avg <= 0.0 {
        return 0.0;
    }
    tokens_avg / latency_avg
}

/// @ai:intent Accuracy fraction per thousand tokens, 0 when tokens are not positive
/// @ai:effects pure
pub fn cost_efficiency(accuracy: f64, tokens_avg: f64) -> f64 {
    if tokens_avg <= 0.0 {
        return 0.0;
    }
    (accuracy / 100.0) / (tokens_avg / 1000.0)
}
