//! Shared model types: hyperparameter values, evaluation outcomes, and the
//! persisted evaluation record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hyperparameter value. Untagged so the persisted log stays a plain JSON
/// table; `Int` is tried before `Float` so whole numbers round-trip as
/// integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// The canonical objective surface returned by every evaluation: both search
/// loops consume one of these two numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalOutcome {
    /// Mean reciprocal rank over all queries.
    pub mrr: f64,
    /// Mean normalized discounted cumulative gain over all queries.
    pub mean_ndcg: f64,
}

/// One persisted row summarizing an evaluation run. Append-only: created
/// once per persisting evaluation, never mutated afterward.
///
/// Confusion metrics that are undefined (zero denominator) are stored as
/// `None` so the JSON log round-trips; in-memory computation uses NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub name: Option<String>,
    /// Classifier identity.
    pub model: String,
    pub hyperparameters: BTreeMap<String, ParamValue>,
    pub pairwise_model: Option<String>,
    /// Re-ranking width; only set when a pairwise stage ran.
    pub pairwise_k: Option<usize>,
    pub features: Vec<String>,
    pub sampling_training: usize,
    pub sampling_test: usize,
    /// Principal-component count; 0 when reduction was disabled.
    pub pca: usize,
    /// Cutoff used for the `*_at_k` metrics below.
    pub k: usize,
    pub mrr: f64,
    pub map: f64,
    pub ndcg: f64,
    pub accuracy: f64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
    pub accuracy_at_k: f64,
    pub precision_at_k: Option<f64>,
    pub recall_at_k: Option<f64>,
    pub f1_at_k: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}
