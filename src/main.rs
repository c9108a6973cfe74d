use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use libyear::age::error::AnalysisError;
use libyear::age::maven::MavenSearchClient;
use libyear::age::session::AnalysisSession;
use libyear::age::types::BuildAnalysis;
use libyear::config::AnalysisConfig;

#[derive(Parser)]
#[command(name = "libyear")]
#[command(version, about = "Measures how many libyears behind a build's dependencies are")]
struct Cli {
    /// Version-resolver handoff document (JSON), "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Base URI of the release-date search API
    #[arg(long)]
    search_uri: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Retries per lookup on transient failures
    #[arg(long)]
    retry_count: Option<u32>,

    /// Fail when a module's total reaches this many libyears (0 disables)
    #[arg(long)]
    max_lib_years: Option<f32>,

    /// Only report dependencies older than this many libyears
    #[arg(long)]
    min_lib_years_for_report: Option<f32>,

    /// Append CSV report records to this file
    #[arg(long)]
    report_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> (String, AnalysisConfig) {
        let mut config = AnalysisConfig::default();
        if let Some(search_uri) = self.search_uri {
            config.search_uri = search_uri;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.http_timeout_secs = timeout_secs;
        }
        if let Some(retry_count) = self.retry_count {
            config.http_retry_count = retry_count;
        }
        if let Some(max_lib_years) = self.max_lib_years {
            config.max_lib_years = max_lib_years;
        }
        if let Some(min_lib_years) = self.min_lib_years_for_report {
            config.min_lib_years_for_report = min_lib_years;
        }
        config.report_file = self.report_file;
        (self.input, config)
    }
}

fn read_build_analysis(input: &str) -> anyhow::Result<BuildAnalysis> {
    let contents = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };

    serde_json::from_str(&contents).context("failed to parse version-resolver output")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let (input, config) = cli.into_config();

    let build = read_build_analysis(&input)?;

    let client = MavenSearchClient::new(
        config.search_uri.clone(),
        Duration::from_secs(config.http_timeout_secs),
        config.http_retry_count,
    )
    .context("failed to build HTTP client")?;
    let session = AnalysisSession::new(config, client);

    let outcome = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(session.run(&build));

    match outcome {
        Ok(_) => Ok(()),
        Err(e @ AnalysisError::ThresholdExceeded { .. }) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
