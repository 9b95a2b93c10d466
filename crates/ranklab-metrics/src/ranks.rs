//! Rank derivation: confidence-ordered positions for the relevant subset of
//! a result set.

use std::cmp::Ordering;
use std::collections::HashMap;

use ranklab_core::results::ScoredResult;

/// A relevant row together with its retrieved rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    /// 1-based index among the retained relevant rows, in retrieval order.
    pub position: usize,
    /// 1-based rank in the full confidence-descending candidate list.
    pub rank: usize,
    /// Relevance grade; >= 1 by construction.
    pub relevant: u8,
    pub confidence: f64,
    pub qid: String,
    pub pid: String,
}

/// Sort all rows by confidence descending (stable, so equal confidences keep
/// their input order), assign rank 1..N, retain only rows with
/// `relevant >= 1`, and re-index the retained rows 1..R.
///
/// R may be zero — callers must handle the degenerate no-relevant case.
pub fn calculate_ranks(results: &[ScoredResult]) -> Vec<RankedResult> {
    let mut order: Vec<&ScoredResult> = results.iter().collect();
    order.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    order
        .iter()
        .enumerate()
        .filter(|(_, row)| row.relevant >= 1)
        .enumerate()
        .map(|(retained, (idx, row))| RankedResult {
            position: retained + 1,
            rank: idx + 1,
            relevant: row.relevant,
            confidence: row.confidence,
            qid: row.qid.clone(),
            pid: row.pid.clone(),
        })
        .collect()
}

/// Group rows per query, preserving first-encounter qid order so that
/// floating-point accumulation over queries is reproducible.
pub(crate) fn group_by_query(results: &[ScoredResult]) -> Vec<(String, Vec<ScoredResult>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ScoredResult>> = HashMap::new();
    for row in results {
        if !groups.contains_key(&row.qid) {
            order.push(row.qid.clone());
        }
        groups.entry(row.qid.clone()).or_default().push(row.clone());
    }
    order
        .into_iter()
        .map(|qid| {
            let rows = groups.remove(&qid).unwrap_or_default();
            (qid, rows)
        })
        .collect()
}
