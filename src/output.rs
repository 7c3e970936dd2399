//! Report writing and run-history persistence.
//!
//! Supports pretty-printed JSON reports, the dashboard-format sentiment CSV,
//! and an append-only history CSV of one row per completed run.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::types::{Sentiment, SentimentResult};
use crate::error::RaterResult;
use crate::pipeline::AnalysisResult;

/// Renders sentiment rows in the dashboard export format: a fixed header,
/// then one row per record with the text always double-quoted (inner quotes
/// doubled), polarity and subjectivity to four decimals, confidence to two.
///
/// The other fields never need quoting, so the format is written by hand
/// rather than through a CSV writer that would quote all-or-nothing.
pub fn sentiment_csv(results: &[SentimentResult]) -> String {
    let mut csv = String::from("Text,Sentiment,Polarity,Confidence,Subjectivity\n");

    for r in results {
        csv.push_str(&format!(
            "\"{}\",{},{:.4},{:.2},{:.4}\n",
            r.text.replace('"', "\"\""),
            r.sentiment,
            r.polarity,
            r.confidence,
            r.subjectivity
        ));
    }

    csv
}

/// Writes the sentiment CSV export to `path`.
pub fn write_sentiment_csv(path: &Path, results: &[SentimentResult]) -> RaterResult<()> {
    fs::write(path, sentiment_csv(results))?;
    info!(path = %path.display(), rows = results.len(), "Sentiment CSV written");

    Ok(())
}

/// Writes the full analysis result as pretty-printed JSON.
pub fn write_json_report(path: &Path, result: &AnalysisResult) -> RaterResult<()> {
    fs::write(path, serde_json::to_string_pretty(result)?)?;
    info!(path = %path.display(), "Report written");

    Ok(())
}

/// One completed run, flattened to a row of the history CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub completed_at: DateTime<Utc>,
    pub source_url: String,
    pub domain: String,
    pub records: usize,
    pub mean_polarity: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub overall_score: f64,
    pub grade: String,
}

impl From<&AnalysisResult> for RunRecord {
    fn from(result: &AnalysisResult) -> Self {
        let count = |wanted: Sentiment| {
            result
                .sentiment
                .iter()
                .filter(|r| r.sentiment == wanted)
                .count()
        };

        Self {
            completed_at: result.completed_at,
            source_url: result.source_url.clone(),
            domain: result.domain.clone(),
            records: result.sentiment.len(),
            mean_polarity: result.statistics.mean,
            positive: count(Sentiment::Positive),
            negative: count(Sentiment::Negative),
            neutral: count(Sentiment::Neutral),
            overall_score: result.quality.overall,
            grade: result.quality.grade.clone(),
        }
    }
}

/// Appends one run to the history CSV.
///
/// Creates the file with headers if it does not already exist.
pub fn append_history(path: &Path, record: &RunRecord) -> RaterResult<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending history record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Reads every run in the history CSV, oldest first.
pub fn read_history(path: &Path) -> RaterResult<Vec<RunRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let record: RunRecord = row?;
        rows.push(record);
    }

    Ok(rows)
}
