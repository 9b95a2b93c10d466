//! Mean reciprocal rank with graded-relevance thresholding.

use ranklab_core::errors::MetricsError;
use ranklab_core::results::ScoredResult;

use crate::ranks::{calculate_ranks, group_by_query};

/// Mean reciprocal rank over distinct qids.
///
/// Per query, ranks are derived within that query's candidates only. Rows
/// with `relevant >= threshold` form the preferred tier; when the tier is
/// empty the query falls back to `relevant >= threshold - 1`. The reciprocal
/// of the best (lowest) rank in the selected tier is accumulated; the
/// fallback order must not be reordered — it is what makes the metric usable
/// on graded corpora where few queries carry a top-grade judgment.
///
/// A query where both tiers are empty contributes 0.0. The divisor is the
/// full distinct-query count. Errors on an empty result set.
pub fn mean_reciprocal_rank(results: &[ScoredResult], threshold: u8) -> Result<f64, MetricsError> {
    let queries = group_by_query(results);
    if queries.is_empty() {
        return Err(MetricsError::EmptyResults);
    }

    let mut total = 0.0;
    for (_, rows) in &queries {
        let ranks = calculate_ranks(rows);
        let preferred: Vec<usize> = ranks
            .iter()
            .filter(|r| r.relevant >= threshold)
            .map(|r| r.rank)
            .collect();
        let tier = if preferred.is_empty() {
            ranks
                .iter()
                .filter(|r| r.relevant >= threshold.saturating_sub(1))
                .map(|r| r.rank)
                .collect()
        } else {
            preferred
        };
        if let Some(best) = tier.into_iter().min() {
            total += 1.0 / best as f64;
        }
    }

    Ok(total / queries.len() as f64)
}
