//! # ranklab-metrics
//!
//! Pure, stateless ranking-quality metrics over scored query-document
//! candidates: rank derivation, average precision, normalized discounted
//! cumulative gain, confusion-matrix metrics, and graded mean reciprocal
//! rank. Rankings are derived from confidences on every call, never stored.

pub mod confusion;
pub mod ndcg;
pub mod precision;
pub mod ranks;
pub mod reciprocal;

pub use confusion::{confusion, ConfusionCounts, ConfusionMetrics};
pub use ndcg::{mean_ndcg, ndcg};
pub use precision::{average_precision, mean_average_precision};
pub use ranks::{calculate_ranks, RankedResult};
pub use reciprocal::mean_reciprocal_rank;
