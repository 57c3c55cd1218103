//! @ai:module:intent Descriptive statistics over per-agent metric vectors
//! @ai:module:layer domain
//! @ai:module:public_api MetricSummary, mean, median, std_dev, pearson, round2
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Summary of one metric across all agents of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    /// @ai:intent Summarize a non-empty slice of values
    /// @ai:post returns None for an empty slice
    /// @ai:effects pure
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean: mean(values),
            median: median(values),
            std_dev: std_dev(values),
            min,
            max,
        })
    }
}

/// @ai:intent Arithmetic mean, 0 for an empty slice
/// @ai:effects pure
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// @ai:intent Median, averaging the two middle values for even lengths
/// @ai:effects pure
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// @ai:intent Population standard deviation (divides by n)
/// @ai:effects pure
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// @ai:intent Sample standard deviation (divides by n - 1)
/// @ai:post 0.0 for fewer than two values
/// @ai:effects pure
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// @ai:intent Pearson correlation coefficient
/// @ai:post None when lengths differ, fewer than 2 points, or either vector has zero variance
/// @ai:effects pure
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);
    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    let den = (den_x * den_y).sqrt();
    if den == 0.0 || !den.is_finite() {
        None
    } else {
        Some((num / den).clamp(-1.0, 1.0))
    }
}

/// @ai:intent Round to two decimal places
/// @ai:effects pure
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
