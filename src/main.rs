//! CLI entry point for the Review Rater tool.
//!
//! Provides subcommands for running the sentiment pipeline against a URL and
//! for reading back the accumulated run history.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use review_rater::analysis::lexicon::Lexicon;
use review_rater::analysis::stats;
use review_rater::extract::{BasicClient, UrlExtractor, UserAgent};
use review_rater::output::{
    RunRecord, append_history, read_history, write_json_report, write_sentiment_csv,
};
use review_rater::pipeline::{Pipeline, PipelineConfig, StageStatus};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "review_rater")]
#[command(about = "A tool to score the sentiment of reviews behind a URL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline against a URL and write reports
    Analyze {
        /// URL to pull review content from
        #[arg(value_name = "URL")]
        url: String,

        /// Directory to write the JSON report and sentiment CSV to
        #[arg(short, long, default_value = "reports")]
        output_dir: String,

        /// CSV file to append the run summary to
        #[arg(long, default_value = "history.csv")]
        history: String,

        /// Number of keywords to keep in the ranking
        #[arg(short = 'k', long, default_value_t = 15)]
        top_keywords: usize,

        /// Minimum review length in characters; shorter reviews are dropped
        #[arg(short = 'm', long, default_value_t = 10)]
        min_review_len: usize,

        /// HTTP request timeout in seconds
        #[arg(short = 't', long, default_value_t = 30)]
        timeout_secs: u64,
    },
    /// List previously recorded runs with an aggregate summary
    History {
        /// CSV file the run summaries were appended to
        #[arg(long, default_value = "history.csv")]
        history: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/review_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("review_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            url,
            output_dir,
            history,
            top_keywords,
            min_review_len,
            timeout_secs,
        } => {
            run_analysis(
                &url,
                &output_dir,
                &history,
                top_keywords,
                min_review_len,
                timeout_secs,
            )
            .await?;
        }
        Commands::History { history } => {
            let records = read_history(Path::new(&history))?;

            info!(total = records.len(), "History loaded");

            for record in &records {
                info!(
                    completed_at = %record.completed_at,
                    domain = %record.domain,
                    records = record.records,
                    mean_polarity = record.mean_polarity,
                    positive = record.positive,
                    negative = record.negative,
                    neutral = record.neutral,
                    overall_score = record.overall_score,
                    grade = %record.grade,
                    "Run"
                );
            }

            let positive: usize = records.iter().map(|r| r.positive).sum();
            let negative: usize = records.iter().map(|r| r.negative).sum();
            let neutral: usize = records.iter().map(|r| r.neutral).sum();
            let scores: Vec<f64> = records.iter().map(|r| r.overall_score).collect();

            info!(
                runs = records.len(),
                positive,
                negative,
                neutral,
                mean_overall_score = stats::mean(&scores),
                "History summary"
            );
        }
    }

    Ok(())
}

/// Runs the staged pipeline against a URL, writing the JSON report, the
/// per-review sentiment CSV, and a summary row into the history file.
#[tracing::instrument(skip(output_dir, history), fields(source = %url))]
async fn run_analysis(
    url: &str,
    output_dir: &str,
    history: &str,
    top_keywords: usize,
    min_review_len: usize,
    timeout_secs: u64,
) -> Result<()> {
    let client = BasicClient::with_timeout(Duration::from_secs(timeout_secs))?;
    let extractor = UrlExtractor::new(UserAgent::browser(client));

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl+C received, cancelling run");
            signal_token.cancel();
        }
    });

    let config = PipelineConfig {
        min_review_len,
        top_keywords,
    };

    let pipeline = Pipeline::new(extractor, Arc::new(Lexicon::default()), config)
        .on_progress(|stages| {
            let completed = stages
                .iter()
                .filter(|s| s.status == StageStatus::Completed)
                .count();
            debug!(completed, total = stages.len(), "Progress snapshot");
        })
        .with_cancellation(cancel);

    let result = pipeline.execute(url).await?;

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(output_dir)?;

    let date = Utc::now().format("%Y-%m-%d").to_string();
    let report_path = Path::new(output_dir).join(format!("report_{}.json", date));
    let csv_path = Path::new(output_dir).join(format!("sentiment_{}.csv", date));

    write_json_report(&report_path, &result)?;
    write_sentiment_csv(&csv_path, &result.sentiment)?;
    append_history(Path::new(history), &RunRecord::from(&result))?;

    info!(
        report = %report_path.display(),
        csv = %csv_path.display(),
        history_file = history,
        "Reports written"
    );

    info!(
        domain = %result.domain,
        records = result.sentiment.len(),
        mean_polarity = result.statistics.mean,
        overall_score = result.quality.overall,
        grade = %result.quality.grade,
        "Analysis finished"
    );

    Ok(())
}
