/// Ranking-metrics errors.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("empty result set: metrics are undefined over zero rows")]
    EmptyResults,

    #[error("top-k cutoff must be at least 1")]
    InvalidCutoff,
}
