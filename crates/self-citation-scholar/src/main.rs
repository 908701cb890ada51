//! Self-Citation Scholar - Entry Point
//!
//! Analyzes one author (or several ids merged as one person) and prints a report.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use self_citation_scholar::config::api;
use self_citation_scholar::formatters::render_report;
use self_citation_scholar::models::{PublicationOrder, ResponseFormat};
use self_citation_scholar::{
    AnalysisStage, AuthorQuery, Config, PipelineConfig, ProgressObserver, SelfCitationAnalyzer,
    SemanticScholarClient,
};

#[derive(Parser, Debug)]
#[command(name = "self-citation-scholar")]
#[command(about = "Self-citation analysis for Semantic Scholar authors")]
#[command(version)]
struct Cli {
    /// Author IDs to analyze as one person (space- or comma-separated)
    #[arg(required = true, value_name = "AUTHOR_ID")]
    author_ids: Vec<String>,

    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Publications whose citations are fetched concurrently
    #[arg(long, default_value_t = api::BATCH_SIZE)]
    batch_size: usize,

    /// Pause between citation batches, in milliseconds
    #[arg(long, default_value_t = api::BATCH_PAUSE.as_millis() as u64)]
    batch_pause_ms: u64,

    /// Pause between author lookups, in milliseconds
    #[arg(long, default_value_t = api::AUTHOR_FETCH_PAUSE.as_millis() as u64)]
    author_pause_ms: u64,

    /// Report format
    #[arg(long, value_enum, default_value_t = ResponseFormat::Markdown)]
    format: ResponseFormat,

    /// Publication order in the report
    #[arg(long, value_enum, default_value_t = PublicationOrder::SelfCitations)]
    sort: PublicationOrder,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            batch_pause: Duration::from_millis(self.batch_pause_ms),
            author_pause: Duration::from_millis(self.author_pause_ms),
            ..PipelineConfig::default()
        }
        .with_batch_size(self.batch_size)
    }
}

/// Logs progress and stage changes.
struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        tracing::info!("Progress: {completed}/{total} publications");
    }

    fn on_stage(&self, stage: AnalysisStage) {
        tracing::debug!(%stage, "Entered stage");
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // Logs go to stderr so the report on stdout stays clean.
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        authors = cli.author_ids.len(),
        "Starting self-citation analysis"
    );

    let query = match AuthorQuery::parse(&cli.author_ids) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{}", e.to_user_message());
            return Ok(ExitCode::from(2));
        }
    };

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config.api_key.clone_from(&cli.api_key);
    }
    if !config.has_api_key() {
        tracing::warn!("No API key configured; requests use the shared public rate limit");
    }

    let client = SemanticScholarClient::new(config)?;
    let analyzer = SelfCitationAnalyzer::new(Arc::new(client), cli.pipeline_config());

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling analysis");
            on_ctrl_c.cancel();
        }
    });

    match analyzer.analyze(&query, &LogProgress, &cancel).await {
        Ok(report) => {
            println!("{}", render_report(&report, cli.format, cli.sort)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.to_user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
