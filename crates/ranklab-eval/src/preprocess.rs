//! Data preparation: feature/label separation, per-column standardization
//! with training statistics, and optional PCA reduction.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use ranklab_core::errors::{EvalError, RanklabResult};
use ranklab_core::results::QueryDocPair;

const POWER_ITERATIONS: usize = 100;

/// One raw data table: a feature matrix plus, depending on its role, binary
/// labels (training) or query-document pairs (test/validation).
#[derive(Debug, Clone)]
pub struct DataTable {
    pub feature_names: Vec<String>,
    pub features: Array2<f64>,
    pub labels: Option<Vec<u8>>,
    pub pairs: Option<Vec<QueryDocPair>>,
}

impl DataTable {
    pub fn new(feature_names: Vec<String>, features: Array2<f64>) -> Self {
        Self {
            feature_names,
            features,
            labels: None,
            pairs: None,
        }
    }

    pub fn with_labels(mut self, labels: Vec<u8>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_pairs(mut self, pairs: Vec<QueryDocPair>) -> Self {
        self.pairs = Some(pairs);
        self
    }
}

/// Prepared train/test (and optionally validation) matrices, scaled with
/// training statistics and reduced when PCA was requested.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub feature_names: Vec<String>,
    pub x_train: Array2<f64>,
    pub y_train: Vec<u8>,
    pub x_test: Array2<f64>,
    pub test_pairs: Vec<QueryDocPair>,
    pub x_val: Option<Array2<f64>>,
    pub val_pairs: Option<Vec<QueryDocPair>>,
    /// Component count applied; 0 when reduction was disabled.
    pub pca_components: usize,
}

impl Prepared {
    /// Validation matrix and pairs, when a validation table was prepared.
    pub fn validation(&self) -> Option<(ArrayView2<'_, f64>, &[QueryDocPair])> {
        match (&self.x_val, &self.val_pairs) {
            (Some(x), Some(pairs)) => Some((x.view(), pairs.as_slice())),
            _ => None,
        }
    }
}

/// Separate features from labels/pairs, standardize every column with the
/// training mean and standard deviation, and optionally project onto the
/// top `pca_components` principal components of the training set.
pub fn split_and_scale(
    train: &DataTable,
    test: &DataTable,
    val: Option<&DataTable>,
    pca_components: usize,
) -> RanklabResult<Prepared> {
    let labels = train.labels.as_ref().ok_or(EvalError::LabelsMissing)?;
    let test_pairs = test.pairs.as_ref().ok_or(EvalError::PairsMissing)?;

    let features = train.features.ncols();
    check_rows("training labels", train.features.nrows(), labels.len())?;
    check_rows("test pairs", test.features.nrows(), test_pairs.len())?;
    check_columns("training feature names", features, train.feature_names.len())?;
    check_columns("test features", features, test.features.ncols())?;
    if let Some(v) = val {
        let pairs = v.pairs.as_ref().ok_or(EvalError::PairsMissing)?;
        check_rows("validation pairs", v.features.nrows(), pairs.len())?;
        check_columns("validation features", features, v.features.ncols())?;
    }
    if train.features.nrows() == 0 {
        return Err(EvalError::EmptyTrainingSet.into());
    }

    let (means, stds) = column_stats(&train.features);
    let mut x_train = standardize(&train.features, &means, &stds);
    let mut x_test = standardize(&test.features, &means, &stds);
    let mut x_val = val.map(|v| standardize(&v.features, &means, &stds));

    let feature_names = if pca_components > 0 {
        if pca_components > features {
            return Err(EvalError::InvalidComponents {
                requested: pca_components,
                features,
            }
            .into());
        }
        let axes = principal_axes(&x_train, pca_components);
        x_train = x_train.dot(&axes);
        x_test = x_test.dot(&axes);
        x_val = x_val.map(|x| x.dot(&axes));
        (1..=pca_components).map(|i| format!("pc{i}")).collect()
    } else {
        train.feature_names.clone()
    };

    Ok(Prepared {
        feature_names,
        x_train,
        y_train: labels.clone(),
        x_test,
        test_pairs: test_pairs.clone(),
        x_val,
        val_pairs: val.and_then(|v| v.pairs.clone()),
        pca_components,
    })
}

fn check_rows(context: &'static str, expected: usize, actual: usize) -> Result<(), EvalError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvalError::RowMismatch {
            context,
            expected,
            actual,
        })
    }
}

fn check_columns(context: &'static str, expected: usize, actual: usize) -> Result<(), EvalError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvalError::ColumnMismatch {
            context,
            expected,
            actual,
        })
    }
}

/// Per-column mean and population standard deviation. Zero-variance columns
/// get a unit std so they pass through unscaled.
fn column_stats(x: &Array2<f64>) -> (Array1<f64>, Array1<f64>) {
    let n = x.nrows() as f64;
    let means = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(x.ncols()));
    let mut stds = Array1::zeros(x.ncols());
    for (j, col) in x.columns().into_iter().enumerate() {
        let var = col.iter().map(|v| (v - means[j]).powi(2)).sum::<f64>() / n;
        let std = var.sqrt();
        stds[j] = if std > 0.0 { std } else { 1.0 };
    }
    (means, stds)
}

fn standardize(x: &Array2<f64>, means: &Array1<f64>, stds: &Array1<f64>) -> Array2<f64> {
    let mut out = x.clone();
    for mut row in out.rows_mut() {
        row -= means;
        row /= stds;
    }
    out
}

/// Top-k principal axes of the (already standardized) training matrix via
/// power iteration with deflation. Deterministic: the start vector depends
/// only on the component index.
fn principal_axes(x: &Array2<f64>, k: usize) -> Array2<f64> {
    let n = x.nrows() as f64;
    let denominator = if n > 1.0 { n - 1.0 } else { 1.0 };
    let mut cov = x.t().dot(x) / denominator;
    let d = cov.nrows();

    let mut axes = Array2::zeros((d, k));
    for c in 0..k {
        let v = dominant_eigenvector(&cov, c);
        let lambda = v.dot(&cov.dot(&v));
        axes.column_mut(c).assign(&v);

        // Deflate the captured direction before extracting the next axis.
        let column = v.insert_axis(Axis(1));
        let outer = column.dot(&column.t());
        cov = &cov - &(outer * lambda);
    }
    axes
}

fn dominant_eigenvector(cov: &Array2<f64>, component: usize) -> Array1<f64> {
    let d = cov.nrows();
    let mut v = Array1::from_elem(d, 1.0 / d as f64);
    v[component % d] += 1.0;
    let norm = v.dot(&v).sqrt();
    v /= norm;

    for _ in 0..POWER_ITERATIONS {
        let next = cov.dot(&v);
        let norm = next.dot(&next).sqrt();
        if norm < 1e-12 {
            // No variance left along any remaining direction.
            break;
        }
        v = next / norm;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ranklab_core::errors::RanklabError;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    fn pairs(n: usize) -> Vec<QueryDocPair> {
        (0..n).map(|i| QueryDocPair::new("q1", format!("p{i}"))).collect()
    }

    #[test]
    fn scales_with_training_statistics() {
        let train = DataTable::new(
            names(2),
            array![[0.0, 10.0], [2.0, 30.0], [4.0, 50.0]],
        )
        .with_labels(vec![0, 1, 1]);
        let test = DataTable::new(names(2), array![[2.0, 30.0]]).with_pairs(pairs(1));

        let prepared = split_and_scale(&train, &test, None, 0).unwrap();

        // Train columns are centered; the test row sits at the train mean.
        for j in 0..2 {
            let mean: f64 = prepared.x_train.column(j).sum() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!(prepared.x_test[[0, j]].abs() < 1e-12);
        }
        assert_eq!(prepared.feature_names, names(2));
        assert_eq!(prepared.pca_components, 0);
    }

    #[test]
    fn zero_variance_column_passes_through() {
        let train = DataTable::new(names(1), array![[5.0], [5.0]]).with_labels(vec![0, 1]);
        let test = DataTable::new(names(1), array![[5.0]]).with_pairs(pairs(1));
        let prepared = split_and_scale(&train, &test, None, 0).unwrap();
        assert!(prepared.x_train.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn pca_reduces_width_and_renames_features() {
        let train = DataTable::new(
            names(3),
            array![
                [1.0, 2.0, 0.1],
                [2.0, 4.0, 0.2],
                [3.0, 6.0, 0.1],
                [4.0, 8.0, 0.3]
            ],
        )
        .with_labels(vec![0, 0, 1, 1]);
        let test =
            DataTable::new(names(3), array![[2.0, 4.0, 0.2], [3.0, 6.0, 0.1]]).with_pairs(pairs(2));

        let prepared = split_and_scale(&train, &test, None, 2).unwrap();
        assert_eq!(prepared.x_train.ncols(), 2);
        assert_eq!(prepared.x_test.ncols(), 2);
        assert_eq!(prepared.feature_names, vec!["pc1", "pc2"]);
        assert_eq!(prepared.pca_components, 2);
    }

    #[test]
    fn pca_is_deterministic() {
        let train = DataTable::new(
            names(3),
            array![[1.0, 0.0, 2.0], [0.0, 1.0, 1.0], [2.0, 1.0, 0.0], [1.0, 2.0, 1.0]],
        )
        .with_labels(vec![0, 1, 0, 1]);
        let test = DataTable::new(names(3), array![[1.0, 1.0, 1.0]]).with_pairs(pairs(1));

        let a = split_and_scale(&train, &test, None, 2).unwrap();
        let b = split_and_scale(&train, &test, None, 2).unwrap();
        assert_eq!(a.x_train, b.x_train);
        assert_eq!(a.x_test, b.x_test);
    }

    #[test]
    fn validation_table_is_prepared_alongside() {
        let train = DataTable::new(names(1), array![[1.0], [3.0]]).with_labels(vec![0, 1]);
        let test = DataTable::new(names(1), array![[2.0]]).with_pairs(pairs(1));
        let val = DataTable::new(names(1), array![[1.0], [2.0]]).with_pairs(pairs(2));

        let prepared = split_and_scale(&train, &test, Some(&val), 0).unwrap();
        let (x_val, val_pairs) = prepared.validation().unwrap();
        assert_eq!(x_val.nrows(), 2);
        assert_eq!(val_pairs.len(), 2);
    }

    #[test]
    fn missing_labels_is_an_error() {
        let train = DataTable::new(names(1), array![[1.0]]);
        let test = DataTable::new(names(1), array![[1.0]]).with_pairs(pairs(1));
        assert!(matches!(
            split_and_scale(&train, &test, None, 0),
            Err(RanklabError::Eval(EvalError::LabelsMissing))
        ));
    }

    #[test]
    fn mismatched_pair_count_is_an_error() {
        let train = DataTable::new(names(1), array![[1.0]]).with_labels(vec![1]);
        let test = DataTable::new(names(1), array![[1.0]]).with_pairs(pairs(2));
        assert!(matches!(
            split_and_scale(&train, &test, None, 0),
            Err(RanklabError::Eval(EvalError::RowMismatch { .. }))
        ));
    }

    #[test]
    fn too_many_components_is_an_error() {
        let train = DataTable::new(names(2), array![[1.0, 2.0], [2.0, 1.0]]).with_labels(vec![0, 1]);
        let test = DataTable::new(names(2), array![[1.0, 1.0]]).with_pairs(pairs(1));
        assert!(matches!(
            split_and_scale(&train, &test, None, 3),
            Err(RanklabError::Eval(EvalError::InvalidComponents { .. }))
        ));
    }
}
