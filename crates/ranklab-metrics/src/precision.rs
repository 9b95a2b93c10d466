//! Average precision and its per-query mean.

use ranklab_core::errors::MetricsError;
use ranklab_core::results::ScoredResult;

use crate::ranks::{calculate_ranks, group_by_query};

/// Average precision over one result set.
///
/// ```text
/// AP = (1 / R) * sum_i (position_i / rank_i)
/// ```
///
/// over the retained relevant rows, i.e. the mean of precision-at-rank at
/// every relevant document retrieved. The number of relevant documents is
/// taken to be R, the count retrieved in the candidate set — a deliberate
/// modeling choice that keeps AP computable without corpus-wide judgment
/// counts.
///
/// Returns `None` when no relevant row was retrieved.
pub fn average_precision(results: &[ScoredResult]) -> Option<f64> {
    let ranks = calculate_ranks(results);
    if ranks.is_empty() {
        return None;
    }
    let sum: f64 = ranks
        .iter()
        .map(|r| r.position as f64 / r.rank as f64)
        .sum();
    Some(sum / ranks.len() as f64)
}

/// Mean average precision: AP averaged over distinct qids.
///
/// A query with no relevant candidate contributes 0.0; the divisor is always
/// the full distinct-query count. Errors on an empty result set.
pub fn mean_average_precision(results: &[ScoredResult]) -> Result<f64, MetricsError> {
    let queries = group_by_query(results);
    if queries.is_empty() {
        return Err(MetricsError::EmptyResults);
    }
    let total: f64 = queries
        .iter()
        .map(|(_, rows)| average_precision(rows).unwrap_or(0.0))
        .sum();
    Ok(total / queries.len() as f64)
}
