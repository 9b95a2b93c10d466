//! The evaluation harness: fit, score, join judgments, re-rank, measure,
//! persist.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;
use ndarray::ArrayView2;
use tracing::{debug, info};

use ranklab_core::config::EvalOptions;
use ranklab_core::constants::DEFAULT_MRR_THRESHOLD;
use ranklab_core::errors::{EvalError, RanklabResult};
use ranklab_core::models::{EvalOutcome, EvaluationRecord};
use ranklab_core::results::{QueryDocPair, RelevanceJudgment, ScoredResult};
use ranklab_core::traits::{Classifier, PairwiseReranker};
use ranklab_metrics::{confusion, mean_average_precision, mean_ndcg, mean_reciprocal_rank};

use crate::preprocess::{self, DataTable, Prepared};
use crate::store::ResultLog;

/// Borrowed views over one train/test evaluation split.
#[derive(Debug, Clone, Copy)]
pub struct EvalData<'a> {
    pub x_train: ArrayView2<'a, f64>,
    pub y_train: &'a [u8],
    pub x_test: ArrayView2<'a, f64>,
    pub test_pairs: &'a [QueryDocPair],
    pub feature_names: &'a [String],
}

impl<'a> EvalData<'a> {
    /// Train/test views over a prepared dataset.
    pub fn from_prepared(prepared: &'a Prepared) -> Self {
        Self {
            x_train: prepared.x_train.view(),
            y_train: &prepared.y_train,
            x_test: prepared.x_test.view(),
            test_pairs: &prepared.test_pairs,
            feature_names: &prepared.feature_names,
        }
    }

    /// Train/validation views, when the dataset carries a validation split.
    pub fn from_prepared_validation(prepared: &'a Prepared) -> Option<Self> {
        let (x_val, val_pairs) = prepared.validation()?;
        Some(Self {
            x_train: prepared.x_train.view(),
            y_train: &prepared.y_train,
            x_test: x_val,
            test_pairs: val_pairs,
            feature_names: &prepared.feature_names,
        })
    }

    fn validate(&self) -> Result<(), EvalError> {
        if self.x_train.nrows() != self.y_train.len() {
            return Err(EvalError::RowMismatch {
                context: "training labels",
                expected: self.x_train.nrows(),
                actual: self.y_train.len(),
            });
        }
        if self.x_test.nrows() != self.test_pairs.len() {
            return Err(EvalError::RowMismatch {
                context: "test pairs",
                expected: self.x_test.nrows(),
                actual: self.test_pairs.len(),
            });
        }
        if self.x_train.ncols() != self.x_test.ncols() {
            return Err(EvalError::ColumnMismatch {
                context: "test features",
                expected: self.x_train.ncols(),
                actual: self.x_test.ncols(),
            });
        }
        if self.feature_names.len() != self.x_train.ncols() {
            return Err(EvalError::ColumnMismatch {
                context: "feature names",
                expected: self.x_train.ncols(),
                actual: self.feature_names.len(),
            });
        }
        Ok(())
    }
}

/// Drives classifier evaluations and owns the persisted result log.
#[derive(Debug)]
pub struct EvaluationHarness {
    log: ResultLog,
}

impl EvaluationHarness {
    /// Open a harness whose result log lives at `log_path`. Prior results
    /// are loaded eagerly.
    pub fn open(log_path: impl Into<PathBuf>) -> RanklabResult<Self> {
        Ok(Self {
            log: ResultLog::open(log_path)?,
        })
    }

    pub fn log(&self) -> &ResultLog {
        &self.log
    }

    /// Prepare raw tables and evaluate in one step — the everyday entry
    /// point for a single evaluation run.
    pub fn run(
        &mut self,
        classifier: &mut dyn Classifier,
        train: &DataTable,
        test: &DataTable,
        qrels: &[RelevanceJudgment],
        opts: &EvalOptions,
    ) -> RanklabResult<EvalOutcome> {
        let prepared = preprocess::split_and_scale(train, test, None, opts.pca_components)?;
        let outcome = self.evaluate(
            classifier,
            EvalData::from_prepared(&prepared),
            qrels,
            None,
            opts,
        )?;
        info!(mrr = outcome.mrr, ndcg = outcome.mean_ndcg, "evaluation run complete");
        Ok(outcome)
    }

    /// Fit the classifier, score the test candidates, join judgments,
    /// optionally delegate to the pairwise stage, compute the metric suite,
    /// and persist a record when requested.
    ///
    /// Pure (no side effects) when `opts.persist` is false.
    pub fn evaluate(
        &mut self,
        classifier: &mut dyn Classifier,
        data: EvalData<'_>,
        qrels: &[RelevanceJudgment],
        pairwise: Option<&mut (dyn PairwiseReranker + '_)>,
        opts: &EvalOptions,
    ) -> RanklabResult<EvalOutcome> {
        data.validate()?;

        classifier.fit(data.x_train, data.y_train)?;

        let proba = classifier.predict_probability(data.x_test)?;
        if proba.ncols() < 2 {
            return Err(EvalError::MissingPositiveClass {
                classes: proba.ncols(),
            }
            .into());
        }
        if proba.nrows() != data.test_pairs.len() {
            return Err(EvalError::RowMismatch {
                context: "probability rows",
                expected: data.test_pairs.len(),
                actual: proba.nrows(),
            }
            .into());
        }

        let confidences = proba.column(1);
        let mut results = join_judgments(confidences.iter(), data.test_pairs, qrels);

        let pairwise_name = pairwise.as_ref().map(|p| p.name().to_string());
        if let Some(reranker) = pairwise {
            let expected = results.len();
            results = reranker.rerank(
                results,
                data.x_train,
                data.y_train,
                data.x_test,
                opts.pairwise_top_k,
                opts.pairwise_train,
            )?;
            if results.len() != expected {
                return Err(EvalError::RowMismatch {
                    context: "pairwise result set",
                    expected,
                    actual: results.len(),
                }
                .into());
            }
        }

        let mrr = mean_reciprocal_rank(&results, DEFAULT_MRR_THRESHOLD)?;
        let map = mean_average_precision(&results)?;
        let ndcg = mean_ndcg(&results)?;
        let global = confusion(&results, None)?;
        let at_k = confusion(&results, Some(opts.top_k))?;
        debug!(mrr, map, ndcg, "metrics computed");

        if opts.persist {
            self.log.append(EvaluationRecord {
                name: opts.name.clone(),
                model: classifier.name().to_string(),
                hyperparameters: classifier.params(),
                pairwise_model: pairwise_name.clone(),
                pairwise_k: pairwise_name.is_some().then_some(opts.pairwise_top_k),
                features: data.feature_names.to_vec(),
                sampling_training: data.x_train.nrows(),
                sampling_test: data.x_test.nrows(),
                pca: opts.pca_components,
                k: opts.top_k,
                mrr,
                map,
                ndcg,
                accuracy: global.accuracy,
                precision: finite(global.precision),
                recall: finite(global.recall),
                f1: finite(global.f1),
                accuracy_at_k: at_k.accuracy,
                precision_at_k: finite(at_k.precision),
                recall_at_k: finite(at_k.recall),
                f1_at_k: finite(at_k.f1),
                recorded_at: Utc::now(),
            });
            self.log.flush()?;
        }

        Ok(EvalOutcome {
            mrr,
            mean_ndcg: ndcg,
        })
    }
}

/// Pair each scored test row with its qid/pid and relevance grade. Unjudged
/// pairs default to grade 0; duplicate judgments resolve to the last one.
fn join_judgments<'a>(
    confidences: impl Iterator<Item = &'a f64>,
    pairs: &[QueryDocPair],
    qrels: &[RelevanceJudgment],
) -> Vec<ScoredResult> {
    let grades: HashMap<(&str, &str), u8> = qrels
        .iter()
        .map(|j| ((j.qid.as_str(), j.pid.as_str()), j.grade))
        .collect();

    confidences
        .zip(pairs)
        .map(|(&confidence, pair)| ScoredResult {
            confidence,
            qid: pair.qid.clone(),
            pid: pair.pid.clone(),
            relevant: grades
                .get(&(pair.qid.as_str(), pair.pid.as_str()))
                .copied()
                .unwrap_or(0),
        })
        .collect()
}

fn finite(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
