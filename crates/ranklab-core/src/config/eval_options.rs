use serde::{Deserialize, Serialize};

use crate::constants;

/// Options for a single harness evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Per-query cutoff for the truncated confusion metrics.
    pub top_k: usize,
    /// Principal-component count recorded with the run; 0 = no reduction.
    pub pca_components: usize,
    /// Re-ranking width handed to the pairwise stage, when one is supplied.
    pub pairwise_top_k: usize,
    /// Whether the pairwise stage should train itself before re-ranking.
    pub pairwise_train: bool,
    /// Label stored with the persisted record.
    pub name: Option<String>,
    /// Append an [`EvaluationRecord`](crate::EvaluationRecord) to the result
    /// log and flush it to disk.
    pub persist: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            top_k: constants::DEFAULT_TOP_K,
            pca_components: 0,
            pairwise_top_k: constants::DEFAULT_TOP_K,
            pairwise_train: true,
            name: None,
            persist: false,
        }
    }
}
