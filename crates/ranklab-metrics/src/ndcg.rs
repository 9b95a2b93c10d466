//! Normalized discounted cumulative gain with graded relevance.

use ranklab_core::errors::MetricsError;
use ranklab_core::results::ScoredResult;

use crate::ranks::{calculate_ranks, group_by_query};

/// Exponential gain: `2^grade - 1`, so grade 0 contributes nothing.
fn gain(grade: u8) -> f64 {
    2f64.powi(grade as i32) - 1.0
}

/// Logarithmic discount at a 1-based rank: `log2(rank + 1)`.
fn discount(rank: usize) -> f64 {
    ((rank + 1) as f64).log2()
}

/// nDCG over one result set.
///
/// DCG sums `gain / discount(rank)` over the retained relevant rows at their
/// actual retrieved ranks; IDCG re-scores the same rows at their ideal
/// (grade-descending) positions. Irrelevant rows carry zero gain and are
/// excluded from both sums.
///
/// Returns `None` when no relevant row was retrieved (IDCG would be zero).
pub fn ndcg(results: &[ScoredResult]) -> Option<f64> {
    let ranks = calculate_ranks(results);
    if ranks.is_empty() {
        return None;
    }

    let dcg: f64 = ranks.iter().map(|r| gain(r.relevant) / discount(r.rank)).sum();

    let mut grades: Vec<u8> = ranks.iter().map(|r| r.relevant).collect();
    grades.sort_unstable_by(|a, b| b.cmp(a));
    let idcg: f64 = grades
        .iter()
        .enumerate()
        .map(|(i, &grade)| gain(grade) / discount(i + 1))
        .sum();

    Some(dcg / idcg)
}

/// Mean nDCG: per-qid average with the same degenerate-query policy as
/// [`mean_average_precision`](crate::mean_average_precision).
pub fn mean_ndcg(results: &[ScoredResult]) -> Result<f64, MetricsError> {
    let queries = group_by_query(results);
    if queries.is_empty() {
        return Err(MetricsError::EmptyResults);
    }
    let total: f64 = queries
        .iter()
        .map(|(_, rows)| ndcg(rows).unwrap_or(0.0))
        .sum();
    Ok(total / queries.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(confidence: f64, pid: &str, relevant: u8) -> ScoredResult {
        ScoredResult::new(confidence, "q1", pid, relevant)
    }

    #[test]
    fn ideal_order_scores_one() {
        let results = vec![row(0.9, "a", 3), row(0.8, "b", 2), row(0.7, "c", 1)];
        assert!((ndcg(&results).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_order_scores_below_one() {
        let results = vec![row(0.9, "a", 1), row(0.8, "b", 2), row(0.7, "c", 3)];
        let score = ndcg(&results).unwrap();
        assert!(score < 1.0);
        assert!(score > 0.0);
    }

    #[test]
    fn irrelevant_rows_shift_ranks_but_add_no_gain() {
        // Relevant doc at rank 2 behind an irrelevant one:
        // DCG = 3/log2(3), IDCG = 3/log2(2).
        let results = vec![row(0.9, "junk", 0), row(0.8, "a", 2)];
        let expected = (3.0 / 3f64.log2()) / 3.0;
        assert!((ndcg(&results).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn single_relevant_row_is_ideal() {
        let results = vec![row(0.9, "a", 2), row(0.1, "b", 0)];
        assert!((ndcg(&results).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn none_without_relevant_rows() {
        let results = vec![row(0.9, "a", 0)];
        assert_eq!(ndcg(&results), None);
    }

    #[test]
    fn mean_ndcg_averages_per_query() {
        let results = vec![
            ScoredResult::new(0.9, "q1", "a", 3),
            ScoredResult::new(0.1, "q1", "b", 0),
            ScoredResult::new(0.8, "q2", "c", 2),
            ScoredResult::new(0.4, "q2", "d", 0),
        ];
        // Both queries already rank their relevant document first.
        assert!((mean_ndcg(&results).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_errors() {
        assert!(matches!(mean_ndcg(&[]), Err(MetricsError::EmptyResults)));
    }
}
