use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};

use crate::errors::RanklabResult;
use crate::models::ParamValue;

/// A pluggable binary classifier over feature matrices.
///
/// Any model exposing fit / per-class probability prediction / named
/// hyperparameter access is acceptable; the harness treats it as a black
/// box. Probability columns are ordered by ascending class label, so the
/// positive-class (label 1) probability is column 1.
pub trait Classifier {
    /// Stable identity used in persisted records and logs.
    fn name(&self) -> &str;

    /// Fit the model on `x` (rows) against binary labels `y`.
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[u8]) -> RanklabResult<()>;

    /// Per-row, per-class probabilities (rows x classes).
    fn predict_probability(&self, x: ArrayView2<'_, f64>) -> RanklabResult<Array2<f64>>;

    /// Current hyperparameter values, keyed by name.
    fn params(&self) -> BTreeMap<String, ParamValue>;

    /// Set a single named hyperparameter.
    fn set_param(&mut self, name: &str, value: &ParamValue) -> RanklabResult<()>;

    /// Set several hyperparameters at once.
    fn set_params(&mut self, params: &BTreeMap<String, ParamValue>) -> RanklabResult<()> {
        for (name, value) in params {
            self.set_param(name, value)?;
        }
        Ok(())
    }
}
