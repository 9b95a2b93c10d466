/// Search-loop errors (feature selection, hyperparameter optimization).
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search space has no dimensions")]
    EmptySpace,

    #[error("dimension {name}: {reason}")]
    InvalidDimension { name: String, reason: String },

    #[error("trial budget must be at least 1")]
    NoTrials,

    #[error("hyperparameter search requires a validation split")]
    MissingValidationSplit,
}
