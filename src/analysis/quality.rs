//! Data-quality scoring for a scored batch.

use std::collections::HashSet;

use crate::analysis::stats;
use crate::analysis::types::{DataQualityMetrics, QualityCounts, SentimentResult};
use crate::error::{RaterError, RaterResult};

/// Timeliness has no signal in a single-run batch (every record is fetched
/// moments before it is scored), so it is pinned to a fixed score for now.
const TIMELINESS_SCORE: f64 = 95.0;

/// Scores a batch on five quality dimensions, each 0-100:
///
/// - completeness: share of records with non-blank text
/// - accuracy: average scoring confidence, capped at 100
/// - consistency: share of polarities within two standard deviations of the mean
/// - timeliness: fixed at [`TIMELINESS_SCORE`]
/// - validity: share of records whose text is not a duplicate
///
/// The overall score is the plain average of the five, graded by [`grade`].
///
/// # Errors
///
/// Returns [`RaterError::EmptySample`] for an empty batch.
pub fn assess(results: &[SentimentResult]) -> RaterResult<DataQualityMetrics> {
    if results.is_empty() {
        return Err(RaterError::EmptySample("no records to assess"));
    }

    let total = results.len();
    let missing = results.iter().filter(|r| r.text.trim().is_empty()).count();

    let distinct: HashSet<&str> = results.iter().map(|r| r.text.as_str()).collect();
    let duplicates = total - distinct.len();

    let polarities: Vec<f64> = results.iter().map(|r| r.polarity).collect();
    let mean = stats::mean(&polarities);
    let stddev = stats::stddev(&polarities, mean);
    // A constant sample has stddev 0, so nothing clears the bar and the
    // batch counts as fully consistent.
    let outliers = polarities
        .iter()
        .filter(|p| (**p - mean).abs() > 2.0 * stddev)
        .count();

    let completeness = (total - missing) as f64 / total as f64 * 100.0;
    let accuracy = (results.iter().map(|r| r.confidence).sum::<f64>() / total as f64).min(100.0);
    let consistency = (total - outliers) as f64 / total as f64 * 100.0;
    let validity = (total - duplicates) as f64 / total as f64 * 100.0;
    let overall = (completeness + accuracy + consistency + TIMELINESS_SCORE + validity) / 5.0;

    Ok(DataQualityMetrics {
        completeness,
        accuracy,
        consistency,
        timeliness: TIMELINESS_SCORE,
        validity,
        overall,
        grade: grade(overall),
        details: QualityCounts {
            missing_values: missing,
            duplicates,
            outliers,
            total_records: total,
        },
    })
}

/// Converts an overall quality score (0-100) into a letter grade.
///
/// | Range   | Grade |
/// |---------|-------|
/// | >= 90   | A     |
/// | >= 80   | B     |
/// | >= 70   | C     |
/// | >= 60   | D     |
/// | < 60    | F     |
pub fn grade(score: f64) -> String {
    match score {
        s if s >= 90.0 => "A".into(),
        s if s >= 80.0 => "B".into(),
        s if s >= 70.0 => "C".into(),
        s if s >= 60.0 => "D".into(),
        _ => "F".into(),
    }
}
