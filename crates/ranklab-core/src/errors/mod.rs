//! Error types for the ranklab workspace: one enum per subsystem, unified
//! into [`RanklabError`] for cross-crate propagation.

mod eval_error;
mod metrics_error;
mod search_error;

pub use eval_error::EvalError;
pub use metrics_error::MetricsError;
pub use search_error::SearchError;

/// Top-level error for the ranklab workspace.
#[derive(Debug, thiserror::Error)]
pub enum RanklabError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type RanklabResult<T> = Result<T, RanklabError>;
