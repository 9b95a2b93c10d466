use serde::{Deserialize, Serialize};

use crate::constants;

/// Options for greedy forward feature selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    /// Per-query cutoff passed through to each trial evaluation.
    pub top_k: usize,
    /// Persist every trial evaluation to the result log.
    pub persist_trials: bool,
    /// Label stored with persisted trial records.
    pub name: Option<String>,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            top_k: constants::DEFAULT_TOP_K,
            persist_trials: false,
            name: None,
        }
    }
}

/// Options for the Gaussian-process hyperparameter search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Total trial budget, random warmup included.
    pub trials: usize,
    /// Random trials before the surrogate starts proposing points.
    pub initial_points: usize,
    /// Sampled candidates per surrogate-guided proposal.
    pub candidates: usize,
    /// Seed for the trial sampler; a fixed seed makes the search
    /// reproducible.
    pub seed: u64,
    /// Per-query cutoff passed through to each trial evaluation.
    pub top_k: usize,
    /// Persist the final held-out test evaluation.
    pub persist_final: bool,
    /// Label stored with the persisted final record.
    pub name: Option<String>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            trials: constants::DEFAULT_TRIALS,
            initial_points: constants::DEFAULT_INITIAL_POINTS,
            candidates: constants::DEFAULT_EI_CANDIDATES,
            seed: 0,
            top_k: constants::DEFAULT_TOP_K,
            persist_final: false,
            name: None,
        }
    }
}
