//! # ranklab-eval
//!
//! The evaluation harness: fits a pluggable classifier, scores the test
//! candidates, joins relevance judgments, optionally delegates to a pairwise
//! re-ranking stage, computes the full metric suite, and appends to a
//! persisted result log. Data preparation (scaling, PCA) and the Gaussian NB
//! reference classifier live here as the harness's collaborators.

pub mod harness;
pub mod naive_bayes;
pub mod preprocess;
pub mod store;

pub use harness::{EvalData, EvaluationHarness};
pub use naive_bayes::GaussianNb;
pub use preprocess::{split_and_scale, DataTable, Prepared};
pub use store::ResultLog;
