//! # ranklab-core
//!
//! Foundation crate for the ranklab evaluation workbench.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod results;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EvalOptions, OptimizeOptions, SelectionOptions};
pub use errors::{RanklabError, RanklabResult};
pub use models::{EvalOutcome, EvaluationRecord, ParamValue};
pub use results::{QueryDocPair, RelevanceJudgment, ScoredResult};
pub use traits::{Classifier, PairwiseReranker};
