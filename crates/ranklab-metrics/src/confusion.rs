//! Confusion-matrix metrics, globally or truncated to each query's top-k.

use std::cmp::Ordering;

use ranklab_core::constants::DECISION_THRESHOLD;
use ranklab_core::errors::MetricsError;
use ranklab_core::results::ScoredResult;

use crate::ranks::group_by_query;

/// Raw confusion counts at the `confidence >= 0.5` decision threshold
/// against binary relevance (`relevant >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Accuracy, precision, recall, and F1 derived from the counts.
///
/// Precision, recall, and F1 are NaN when their respective denominators are
/// zero: no predicted positives, no actual positives, or both precision and
/// recall undefined.
#[derive(Debug, Clone, Copy)]
pub struct ConfusionMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Count the confusion matrix over a result set.
pub fn count(results: &[ScoredResult]) -> ConfusionCounts {
    let mut counts = ConfusionCounts {
        true_positives: 0,
        false_positives: 0,
        true_negatives: 0,
        false_negatives: 0,
    };
    for row in results {
        let predicted = row.confidence >= DECISION_THRESHOLD;
        let actual = row.relevant >= 1;
        match (predicted, actual) {
            (true, true) => counts.true_positives += 1,
            (true, false) => counts.false_positives += 1,
            (false, false) => counts.true_negatives += 1,
            (false, true) => counts.false_negatives += 1,
        }
    }
    counts
}

/// Confusion-matrix metrics, optionally truncated to the top `k` rows of
/// each query (confidence-descending, stable).
pub fn confusion(
    results: &[ScoredResult],
    k: Option<usize>,
) -> Result<ConfusionMetrics, MetricsError> {
    let truncated;
    let rows: &[ScoredResult] = match k {
        Some(0) => return Err(MetricsError::InvalidCutoff),
        Some(k) => {
            truncated = truncate_per_query(results, k);
            &truncated
        }
        None => results,
    };
    if rows.is_empty() {
        return Err(MetricsError::EmptyResults);
    }

    let counts = count(rows);
    let tp = counts.true_positives as f64;
    let fp = counts.false_positives as f64;
    let tn = counts.true_negatives as f64;
    let fn_ = counts.false_negatives as f64;

    let accuracy = (tp + tn) / counts.total() as f64;
    let precision = if tp + fp == 0.0 { f64::NAN } else { tp / (tp + fp) };
    let recall = if tp + fn_ == 0.0 { f64::NAN } else { tp / (tp + fn_) };
    // NaN precision or recall propagates into f1.
    let f1 = if precision + recall == 0.0 {
        f64::NAN
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    Ok(ConfusionMetrics {
        accuracy,
        precision,
        recall,
        f1,
    })
}

fn truncate_per_query(results: &[ScoredResult], k: usize) -> Vec<ScoredResult> {
    let mut kept = Vec::new();
    for (_, mut rows) in group_by_query(results) {
        rows.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        rows.truncate(k);
        kept.extend(rows);
    }
    kept
}
