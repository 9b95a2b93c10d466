/// Ranklab system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decision threshold for confusion-matrix metrics: a candidate is predicted
/// relevant when `confidence >= 0.5` (ties classify as positive).
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Default top-k cutoff for per-query truncated metrics.
pub const DEFAULT_TOP_K: usize = 50;

/// Default graded-relevance threshold for mean reciprocal rank. Rows with
/// `relevant >= 3` form the preferred tier; `relevant >= 2` is the fallback.
pub const DEFAULT_MRR_THRESHOLD: u8 = 3;

/// Default trial budget for hyperparameter search.
pub const DEFAULT_TRIALS: usize = 50;

/// Default number of random trials before the surrogate takes over.
pub const DEFAULT_INITIAL_POINTS: usize = 10;

/// Default number of sampled candidates per surrogate-guided proposal.
pub const DEFAULT_EI_CANDIDATES: usize = 256;

/// Default variance-smoothing term for the Gaussian NB reference classifier.
pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;
