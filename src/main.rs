//! @ai:module:intent CLI for the multi-agent benchmark pipeline
//! @ai:module:layer presentation

use agent_bench::{
    agents::build_agents,
    config::BenchmarkConfig,
    dataset::{DatasetLoader, DatasetLoaderTrait},
    metrics::AgentRecord,
    pipeline::{BenchmarkRunner, Pipeline},
    report::{JsonReportWriter, ReportSink, ReportSummary},
    AnalysisReport, Deductions,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "agent-bench")]
#[command(about = "Benchmark several AI agents on a shared question set and explain the results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark against the configured agents
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dataset id (file name without .json in the datasets directory)
        #[arg(short, long)]
        benchmark: String,

        /// Agents to query (comma-separated), overrides the config
        #[arg(short, long)]
        agents: Option<String>,

        /// Answer with simulated agents instead of calling any endpoint
        #[arg(long)]
        dry_run: bool,

        /// Per-query timeout in seconds (0 disables it)
        #[arg(long)]
        timeout: Option<u64>,

        /// Results directory, overrides the config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-run analytics and deduction over a JSON file of agent records
    Analyze {
        /// JSON array of agent records, or a saved report
        #[arg(short, long)]
        input: PathBuf,

        /// Write the analysis here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the summary of a saved report
    Summary {
        /// Path to report.json
        #[arg(short, long)]
        report: PathBuf,
    },

    /// List available datasets
    List {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "benchmark.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agent_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            benchmark,
            agents,
            dry_run,
            timeout,
            output,
        } => {
            run_benchmark(RunArgs {
                config,
                benchmark,
                agents,
                dry_run,
                timeout,
                output,
            })
            .await
        }
        Commands::Analyze { input, output } => analyze(input, output).await,
        Commands::Summary { report } => print_saved_summary(report),
        Commands::List { config } => list_datasets(config),
        Commands::Init { output } => init_config(output),
    }
}

struct RunArgs {
    config: Option<PathBuf>,
    benchmark: String,
    agents: Option<String>,
    dry_run: bool,
    timeout: Option<u64>,
    output: Option<PathBuf>,
}

/// @ai:intent Load dataset, query agents, reduce and persist the report
/// @ai:effects network, fs:read, fs:write
async fn run_benchmark(args: RunArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if let Some(agents) = args.agents {
        config.agents = split_list(&agents);
    }
    if args.dry_run {
        config.run.dry_run = true;
    }
    if let Some(timeout) = args.timeout {
        config.run.timeout_secs = timeout;
    }
    if let Some(output) = args.output {
        config.paths.results_dir = output;
    }

    if config.agents.is_empty() {
        anyhow::bail!("No agents configured; pass --agents or set `agents` in the config");
    }

    tracing::info!("Loading dataset from {}", config.paths.datasets_dir.display());
    let dataset = DatasetLoader::new().load(&config.paths.datasets_dir, &args.benchmark)?;

    if config.run.dry_run {
        tracing::info!("Dry run: agents will be simulated");
    }
    let agents: Vec<_> = build_agents(&config.agents, &config.api, config.run.dry_run)
        .into_iter()
        .map(Arc::new)
        .collect();

    let runner = BenchmarkRunner::new(config.run.clone(), Pipeline::default());
    let report = runner.run(&dataset, agents, &args.benchmark).await?;

    let path = JsonReportWriter::new(&config.paths.results_dir).persist(&report)?;

    println!();
    println!("{}", ReportSummary(&report));
    println!("Report saved to {}", path.display());
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyzeInput {
    Records(Vec<AgentRecord>),
    Report { agents: Vec<AgentRecord> },
}

#[derive(Serialize)]
struct AnalyzeOutput {
    analysis: AnalysisReport,
    deductions: Deductions,
}

/// @ai:intent Analyze previously computed agent metrics without querying any agent
/// @ai:effects fs:read, fs:write
async fn analyze(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let agents = match serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse agent records in {}", input.display()))?
    {
        AnalyzeInput::Records(agents) => agents,
        AnalyzeInput::Report { agents } => agents,
    };

    tracing::info!("Analyzing {} agents from {}", agents.len(), input.display());
    let (analysis, deductions) = Pipeline::default().analyze_records(agents).await?;
    let json = serde_json::to_string_pretty(&AnalyzeOutput { analysis, deductions })?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Analysis saved to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// @ai:effects fs:read, io
fn print_saved_summary(path: PathBuf) -> Result<()> {
    let report = JsonReportWriter::load(&path)
        .with_context(|| format!("Failed to load report {}", path.display()))?;
    println!("{}", ReportSummary(&report));
    Ok(())
}

/// @ai:intent List available datasets
/// @ai:effects fs:read
fn list_datasets(config: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config)?;
    let datasets = DatasetLoader::new().list(&config.paths.datasets_dir)?;

    println!("Available datasets ({}):", datasets.len());
    println!();
    println!("{:<24} {:>9}  {:<30}  {}", "ID", "Questions", "Name", "Categories");
    println!("{}", "-".repeat(90));

    for info in &datasets {
        println!(
            "{:<24} {:>9}  {:<30}  {}",
            info.id,
            info.question_count,
            info.name.as_deref().unwrap_or("-"),
            info.categories.join(", ")
        );
    }

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchmarkConfig {
        agents: vec!["local".to_string()],
        ..Default::default()
    };
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(p) => BenchmarkConfig::load(&p),
        None => {
            let default_path = Path::new("benchmark.toml");

            if default_path.exists() {
                BenchmarkConfig::load(default_path)
            } else {
                Ok(BenchmarkConfig::default())
            }
        }
    }
}

/// @ai:effects pure
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
