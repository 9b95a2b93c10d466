//! Gaussian Naive Bayes — the reference classifier behind the
//! [`Classifier`] capability.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView2};

use ranklab_core::constants::DEFAULT_VAR_SMOOTHING;
use ranklab_core::errors::{EvalError, RanklabResult};
use ranklab_core::models::ParamValue;
use ranklab_core::traits::Classifier;

/// Gaussian Naive Bayes with variance smoothing.
///
/// Per class: empirical prior, per-feature mean and variance. Prediction
/// evaluates the joint Gaussian log-likelihood per class and normalizes with
/// log-sum-exp. `var_smoothing` scales the largest per-feature variance into
/// a floor added to every variance, keeping degenerate features finite.
#[derive(Debug, Clone)]
pub struct GaussianNb {
    var_smoothing: f64,
    fitted: Option<Fitted>,
}

#[derive(Debug, Clone)]
struct Fitted {
    /// Class labels in ascending order; probability columns follow this.
    classes: Vec<u8>,
    log_priors: Vec<f64>,
    /// class x feature.
    means: Array2<f64>,
    variances: Array2<f64>,
}

impl GaussianNb {
    pub fn new() -> Self {
        Self {
            var_smoothing: DEFAULT_VAR_SMOOTHING,
            fitted: None,
        }
    }

    pub fn with_var_smoothing(var_smoothing: f64) -> Self {
        Self {
            var_smoothing,
            fitted: None,
        }
    }
}

impl Default for GaussianNb {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GaussianNb {
    fn name(&self) -> &str {
        "GaussianNb"
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[u8]) -> RanklabResult<()> {
        if x.nrows() == 0 {
            return Err(EvalError::EmptyTrainingSet.into());
        }
        if x.nrows() != y.len() {
            return Err(EvalError::RowMismatch {
                context: "training labels",
                expected: x.nrows(),
                actual: y.len(),
            }
            .into());
        }

        let mut classes: Vec<u8> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let d = x.ncols();
        let n = x.nrows() as f64;
        let mut means = Array2::zeros((classes.len(), d));
        let mut variances = Array2::zeros((classes.len(), d));
        let mut log_priors = Vec::with_capacity(classes.len());

        for (c, &class) in classes.iter().enumerate() {
            let rows: Vec<usize> = y
                .iter()
                .enumerate()
                .filter(|(_, &label)| label == class)
                .map(|(i, _)| i)
                .collect();
            let count = rows.len() as f64;
            log_priors.push((count / n).ln());

            for j in 0..d {
                let mean = rows.iter().map(|&i| x[[i, j]]).sum::<f64>() / count;
                let var = rows.iter().map(|&i| (x[[i, j]] - mean).powi(2)).sum::<f64>() / count;
                means[[c, j]] = mean;
                variances[[c, j]] = var;
            }
        }

        // Smoothing floor: var_smoothing scaled by the largest total
        // per-feature variance, as the sklearn reference does.
        let mut max_var = 0.0f64;
        for j in 0..d {
            let mean = x.column(j).sum() / n;
            let var = x.column(j).iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            max_var = max_var.max(var);
        }
        let epsilon = if max_var > 0.0 {
            self.var_smoothing * max_var
        } else {
            // All-constant input: fall back to the raw smoothing term.
            self.var_smoothing
        };
        variances += epsilon;

        self.fitted = Some(Fitted {
            classes,
            log_priors,
            means,
            variances,
        });
        Ok(())
    }

    fn predict_probability(&self, x: ArrayView2<'_, f64>) -> RanklabResult<Array2<f64>> {
        let fitted = self.fitted.as_ref().ok_or(EvalError::NotFitted)?;
        if x.ncols() != fitted.means.ncols() {
            return Err(EvalError::ColumnMismatch {
                context: "prediction features",
                expected: fitted.means.ncols(),
                actual: x.ncols(),
            }
            .into());
        }

        let classes = fitted.classes.len();
        let mut proba = Array2::zeros((x.nrows(), classes));
        let mut joint = Array1::zeros(classes);

        for (i, row) in x.rows().into_iter().enumerate() {
            for c in 0..classes {
                let mut ll = fitted.log_priors[c];
                for j in 0..row.len() {
                    let mean = fitted.means[[c, j]];
                    let var = fitted.variances[[c, j]];
                    ll -= 0.5 * (2.0 * std::f64::consts::PI * var).ln();
                    ll -= (row[j] - mean).powi(2) / (2.0 * var);
                }
                joint[c] = ll;
            }

            // log-sum-exp normalization.
            let max = joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let denom = joint.iter().map(|ll| (ll - max).exp()).sum::<f64>().ln();
            for c in 0..classes {
                proba[[i, c]] = (joint[c] - max - denom).exp();
            }
        }

        Ok(proba)
    }

    fn params(&self) -> BTreeMap<String, ParamValue> {
        [(
            "var_smoothing".to_string(),
            ParamValue::Float(self.var_smoothing),
        )]
        .into_iter()
        .collect()
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> RanklabResult<()> {
        match name {
            "var_smoothing" => {
                let v = value.as_f64().ok_or_else(|| EvalError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("expected a number, got {value}"),
                })?;
                if v <= 0.0 {
                    return Err(EvalError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must be positive".to_string(),
                    }
                    .into());
                }
                self.var_smoothing = v;
                Ok(())
            }
            _ => Err(EvalError::UnknownParameter {
                name: name.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable() -> (Array2<f64>, Vec<u8>) {
        let x = array![
            [0.0, 0.1],
            [0.2, 0.0],
            [0.1, 0.2],
            [1.0, 0.9],
            [0.9, 1.1],
            [1.1, 1.0]
        ];
        (x, vec![0, 0, 0, 1, 1, 1])
    }

    #[test]
    fn separates_two_gaussian_clusters() {
        let (x, y) = separable();
        let mut nb = GaussianNb::new();
        nb.fit(x.view(), &y).unwrap();

        let probe = array![[0.05, 0.1], [1.0, 1.0]];
        let proba = nb.predict_probability(probe.view()).unwrap();
        assert_eq!(proba.dim(), (2, 2));
        assert!(proba[[0, 0]] > 0.9);
        assert!(proba[[1, 1]] > 0.9);
    }

    #[test]
    fn rows_sum_to_one() {
        let (x, y) = separable();
        let mut nb = GaussianNb::new();
        nb.fit(x.view(), &y).unwrap();

        let proba = nb.predict_probability(x.view()).unwrap();
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn predict_before_fit_errors() {
        let nb = GaussianNb::new();
        let x = array![[0.0]];
        assert!(nb.predict_probability(x.view()).is_err());
    }

    #[test]
    fn label_count_mismatch_errors() {
        let (x, _) = separable();
        let mut nb = GaussianNb::new();
        assert!(nb.fit(x.view(), &[0, 1]).is_err());
    }

    #[test]
    fn var_smoothing_is_tunable() {
        let mut nb = GaussianNb::new();
        nb.set_param("var_smoothing", &ParamValue::Float(1e-3)).unwrap();
        assert_eq!(
            nb.params().get("var_smoothing"),
            Some(&ParamValue::Float(1e-3))
        );
    }

    #[test]
    fn rejects_unknown_and_invalid_params() {
        let mut nb = GaussianNb::new();
        assert!(nb.set_param("depth", &ParamValue::Int(3)).is_err());
        assert!(nb
            .set_param("var_smoothing", &ParamValue::Float(-1.0))
            .is_err());
        assert!(nb
            .set_param("var_smoothing", &ParamValue::Text("x".into()))
            .is_err());
    }

    #[test]
    fn constant_features_stay_finite() {
        let x = array![[1.0, 5.0], [1.0, 5.0], [1.0, 5.0], [1.0, 5.0]];
        let mut nb = GaussianNb::new();
        nb.fit(x.view(), &[0, 0, 1, 1]).unwrap();
        let proba = nb.predict_probability(x.view()).unwrap();
        assert!(proba.iter().all(|p| p.is_finite()));
    }
}
