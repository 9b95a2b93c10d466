use ndarray::ArrayView2;

use crate::errors::RanklabResult;
use crate::results::ScoredResult;

/// External pairwise re-ranking stage.
///
/// Takes the scored result set plus the training and test features, adjusts
/// confidences within each query's top `top_k` candidates, and returns a
/// result set of the same shape. Consumed as an opaque capability; the
/// harness only invokes it when one is supplied.
pub trait PairwiseReranker {
    /// Stable identity used in persisted records.
    fn name(&self) -> &str;

    #[allow(clippy::too_many_arguments)]
    fn rerank(
        &mut self,
        results: Vec<ScoredResult>,
        x_train: ArrayView2<'_, f64>,
        y_train: &[u8],
        x_test: ArrayView2<'_, f64>,
        top_k: usize,
        train: bool,
    ) -> RanklabResult<Vec<ScoredResult>>;
}
