//! @ai:module:intent Configuration structs for the agent benchmark pipeline
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, ApiConfig, RunConfig, PathConfig, MatchMode, FailurePolicy
//! @ai:module:stateless true

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for a benchmark run
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Agent names resolved by the agent factory
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub paths: PathConfig,
}

/// @ai:intent Settings shared by every HTTP agent adapter
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_rate_limit")]
    pub requests_per_minute: u32,
    #[serde(default = "default_local_endpoint")]
    pub local_endpoint: String,
}

/// @ai:intent How a response is compared against the expected answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Trimmed response equals the expected answer
    #[default]
    Exact,
    /// Case-insensitive, with whitespace runs collapsed
    Normalized,
}

/// @ai:intent What the executor does with a failed agent query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Record,
    /// Replace the failure with a simulated answer
    Substitute,
}

/// @ai:intent Run configuration for benchmark execution
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Per-query limit; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 1 processes questions sequentially
    #[serde(default = "default_concurrent_questions")]
    pub max_concurrent_questions: usize,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// @ai:intent Path configuration for input/output directories
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            requests_per_minute: default_rate_limit(),
            local_endpoint: default_local_endpoint(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_concurrent_questions: default_concurrent_questions(),
            dry_run: false,
            match_mode: MatchMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            datasets_dir: default_datasets_dir(),
            results_dir: default_results_dir(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_rate_limit() -> u32 {
    60
}

fn default_local_endpoint() -> String {
    "http://localhost:8001/chat".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrent_questions() -> usize {
    1
}

fn default_datasets_dir() -> PathBuf {
    PathBuf::from("datasets")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.api.max_tokens, 1024);
        assert!((config.api.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.api.local_endpoint, "http://localhost:8001/chat");
        assert_eq!(config.run.timeout_secs, 30);
        assert_eq!(config.run.max_concurrent_questions, 1);
        assert_eq!(config.run.match_mode, MatchMode::Exact);
        assert_eq!(config.run.failure_policy, FailurePolicy::Record);
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BenchmarkConfig = toml::from_str(
            r#"
agents = ["gpt-4", "local"]

[run]
match_mode = "normalized"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.agents, vec!["gpt-4", "local"]);
        assert_eq!(config.run.match_mode, MatchMode::Normalized);
        assert_eq!(config.run.timeout_secs, 5);
        assert_eq!(config.run.failure_policy, FailurePolicy::Record);
        assert_eq!(config.paths.datasets_dir, PathBuf::from("datasets"));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("benchmark.toml");

        let mut config = BenchmarkConfig::default();
        config.agents = vec!["claude-3-haiku".to_string()];
        config.run.failure_policy = FailurePolicy::Substitute;
        config.save(&path).unwrap();

        let loaded = BenchmarkConfig::load(&path).unwrap();
        assert_eq!(loaded.agents, config.agents);
        assert_eq!(loaded.run.failure_policy, FailurePolicy::Substitute);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = BenchmarkConfig::load(std::path::Path::new("/nonexistent/benchmark.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
