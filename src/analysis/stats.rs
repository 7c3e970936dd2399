//! Descriptive statistics over a batch's polarity sample.

use crate::analysis::types::StatisticalMetrics;
use crate::error::{RaterError, RaterResult};

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Summarizes a nonempty sample into [`StatisticalMetrics`].
///
/// Variance is the population variance (divide by N): each run treats its
/// batch as the entire population of interest, not a draw from a larger one.
/// Skewness and kurtosis are the population third and fourth standardized
/// moments, kurtosis excess (minus 3). Both are undefined for a constant
/// sample and come back as 0.0 in that case; constancy is detected as
/// min == max on the sorted sample, so the summary stays exact when every
/// value is the same.
///
/// # Errors
///
/// Returns [`RaterError::EmptySample`] for an empty slice.
pub fn summarize(values: &[f64]) -> RaterResult<StatisticalMetrics> {
    if values.is_empty() {
        return Err(RaterError::EmptySample("no values to summarize"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;

    // Constant sample: summing and dividing can land the mean an ulp off
    // the constant, which would surface rounding noise as nonzero spread
    // and standardized moments.
    if sorted[0] == sorted[sorted.len() - 1] {
        let value = sorted[0];
        return Ok(StatisticalMetrics {
            mean: value,
            median: value,
            mode: value,
            std_dev: 0.0,
            variance: 0.0,
            range: 0.0,
            skewness: 0.0,
            kurtosis: 0.0,
        });
    }

    let mean = sorted.iter().sum::<f64>() / n;

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let mode = mode_of_sorted(&sorted);

    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let range = sorted[sorted.len() - 1] - sorted[0];

    let (skewness, kurtosis) = if std_dev == 0.0 {
        (0.0, 0.0)
    } else {
        let skewness = sorted
            .iter()
            .map(|v| ((v - mean) / std_dev).powi(3))
            .sum::<f64>()
            / n;
        let kurtosis = sorted
            .iter()
            .map(|v| ((v - mean) / std_dev).powi(4))
            .sum::<f64>()
            / n
            - 3.0;
        (skewness, kurtosis)
    };

    Ok(StatisticalMetrics {
        mean,
        median,
        mode,
        std_dev,
        variance,
        range,
        skewness,
        kurtosis,
    })
}

/// Most frequent value in an ascending-sorted sample. Ties keep the first
/// value reached while scanning, i.e. the smallest tied value.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_count = 0_usize;

    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        if j - i > best_count {
            best = sorted[i];
            best_count = j - i;
        }
        i = j;
    }

    best
}
