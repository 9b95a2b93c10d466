//! Core result types: query-document pairs, relevance judgments, and the
//! scored rows the metrics engine consumes.

use serde::{Deserialize, Serialize};

/// One query-candidate pair. Many pairs share a `qid` (one query, many
/// candidate documents).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryDocPair {
    pub qid: String,
    pub pid: String,
}

impl QueryDocPair {
    pub fn new(qid: impl Into<String>, pid: impl Into<String>) -> Self {
        Self {
            qid: qid.into(),
            pid: pid.into(),
        }
    }
}

/// Ground-truth relevance judgment (qrel) for one pair. Pairs without a
/// judgment default to grade 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceJudgment {
    pub qid: String,
    pub pid: String,
    /// Ordinal relevance grade, typically 0 (irrelevant) to 3 (highly
    /// relevant).
    pub grade: u8,
}

impl RelevanceJudgment {
    pub fn new(qid: impl Into<String>, pid: impl Into<String>, grade: u8) -> Self {
        Self {
            qid: qid.into(),
            pid: pid.into(),
            grade,
        }
    }
}

/// One scored test row: classifier confidence joined with the relevance
/// grade for its pair. The unit the metrics engine operates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Positive-class probability in [0, 1].
    pub confidence: f64,
    pub qid: String,
    pub pid: String,
    /// Relevance grade joined from the judgments; 0 when unjudged.
    pub relevant: u8,
}

impl ScoredResult {
    pub fn new(
        confidence: f64,
        qid: impl Into<String>,
        pid: impl Into<String>,
        relevant: u8,
    ) -> Self {
        Self {
            confidence,
            qid: qid.into(),
            pid: pid.into(),
            relevant,
        }
    }
}
