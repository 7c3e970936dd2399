//! Result and metric types produced by the analysis modules.

use serde::Serialize;

/// Classified sentiment of a single text record.
///
/// Always derived from polarity through [`Sentiment::from_polarity`]; the
/// two never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Maps a polarity in `[-1, 1]` onto a class with fixed thresholds:
    /// above `0.1` positive, below `-0.1` negative, neutral otherwise.
    pub fn from_polarity(polarity: f64) -> Self {
        match polarity {
            p if p > 0.1 => Sentiment::Positive,
            p if p < -0.1 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Per-record scoring output.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentResult {
    pub text: String,
    pub sentiment: Sentiment,
    /// Signed sentiment strength in `[-1, 1]`.
    pub polarity: f64,
    /// Scoring confidence in `[0, 100]`, driven by matched-word count.
    pub confidence: f64,
    /// Fraction of tokens carrying sentiment signal, in `[0, 1]`.
    pub subjectivity: f64,
}

/// Descriptive statistics over the polarity sample of one batch.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticalMetrics {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub std_dev: f64,
    /// Population variance (divide by N). Always `std_dev` squared.
    pub variance: f64,
    pub range: f64,
    pub skewness: f64,
    /// Excess kurtosis (fourth standardized moment minus 3).
    pub kurtosis: f64,
}

/// One ranked keyword: occurrence count and the mean record-level polarity
/// over its occurrences.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordStat {
    pub word: String,
    pub count: usize,
    pub avg_sentiment: f64,
}

/// Five quality dimensions in `[0, 100]`, their unweighted mean, and the
/// letter grade derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct DataQualityMetrics {
    pub completeness: f64,
    pub accuracy: f64,
    pub consistency: f64,
    /// Fixed placeholder score; no temporal signal is measured.
    pub timeliness: f64,
    pub validity: f64,
    pub overall: f64,
    pub grade: String,
    pub details: QualityCounts,
}

/// Raw counts backing the quality dimension scores.
#[derive(Debug, Clone, Serialize)]
pub struct QualityCounts {
    pub missing_values: usize,
    pub duplicates: usize,
    pub outliers: usize,
    pub total_records: usize,
}
