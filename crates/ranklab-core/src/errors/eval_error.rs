/// Evaluation-harness and data-preparation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("row count mismatch in {context}: expected {expected}, got {actual}")]
    RowMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("column mismatch in {context}: expected {expected} features, got {actual}")]
    ColumnMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("training table has no labels")]
    LabelsMissing,

    #[error("candidate table has no query-document pairs")]
    PairsMissing,

    #[error("classifier produced {classes} probability column(s), need at least 2")]
    MissingPositiveClass { classes: usize },

    #[error("cannot reduce {features} feature(s) to {requested} principal component(s)")]
    InvalidComponents { requested: usize, features: usize },

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("classifier used before fit")]
    NotFitted,

    #[error("unknown hyperparameter: {name}")]
    UnknownParameter { name: String },

    #[error("invalid value for hyperparameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}
