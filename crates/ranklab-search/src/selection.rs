//! Greedy forward feature selection maximizing mean nDCG.

use ndarray::Axis;
use tracing::{debug, info};

use ranklab_core::config::{EvalOptions, SelectionOptions};
use ranklab_core::errors::RanklabResult;
use ranklab_core::results::RelevanceJudgment;
use ranklab_core::traits::Classifier;
use ranklab_eval::{EvalData, EvaluationHarness, Prepared};

/// Outcome of a forward-selection run: the committed features in selection
/// order and the parallel (non-decreasing) performance sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSelection {
    pub selected: Vec<String>,
    pub performances: Vec<f64>,
}

/// Grow a feature subset one feature at a time.
///
/// Each round evaluates every not-yet-selected feature appended to the
/// current subset and commits the single best candidate — but only when its
/// mean nDCG exceeds both the committed performance and the round floor of
/// zero. The loop stops when no candidate qualifies or every feature is
/// selected; that is the sole stopping condition. Worst case this costs
/// O(features²) harness evaluations, each re-fitting the classifier.
pub fn forward_select(
    harness: &mut EvaluationHarness,
    classifier: &mut dyn Classifier,
    prepared: &Prepared,
    qrels: &[RelevanceJudgment],
    opts: &SelectionOptions,
) -> RanklabResult<FeatureSelection> {
    let total = prepared.feature_names.len();
    let mut selected: Vec<usize> = Vec::new();
    let mut performances: Vec<f64> = Vec::new();
    let mut current_performance = -1.0f64;

    let eval_opts = EvalOptions {
        top_k: opts.top_k,
        pca_components: prepared.pca_components,
        name: opts.name.clone(),
        persist: opts.persist_trials,
        ..Default::default()
    };

    while selected.len() < total {
        let mut round_best: Option<(usize, f64)> = None;

        for candidate in 0..total {
            if selected.contains(&candidate) {
                continue;
            }
            let columns: Vec<usize> = selected.iter().copied().chain([candidate]).collect();
            let x_train = prepared.x_train.select(Axis(1), &columns);
            let x_test = prepared.x_test.select(Axis(1), &columns);
            let names: Vec<String> = columns
                .iter()
                .map(|&i| prepared.feature_names[i].clone())
                .collect();
            debug!(candidate = %prepared.feature_names[candidate], "evaluating feature subset");

            let outcome = harness.evaluate(
                classifier,
                EvalData {
                    x_train: x_train.view(),
                    y_train: &prepared.y_train,
                    x_test: x_test.view(),
                    test_pairs: &prepared.test_pairs,
                    feature_names: &names,
                },
                qrels,
                None,
                &eval_opts,
            )?;

            // The candidate must beat the committed performance and the
            // round's best so far; the round floor starts at zero.
            let floor = round_best.map_or(0.0, |(_, best)| best);
            if outcome.mean_ndcg > current_performance && outcome.mean_ndcg > floor {
                round_best = Some((candidate, outcome.mean_ndcg));
            }
        }

        match round_best {
            Some((feature, performance)) => {
                selected.push(feature);
                performances.push(performance);
                current_performance = performance;
                info!(
                    feature = %prepared.feature_names[feature],
                    ndcg = performance,
                    committed = selected.len(),
                    "feature committed"
                );
            }
            // No remaining feature improves performance.
            None => break,
        }
    }

    Ok(FeatureSelection {
        selected: selected
            .into_iter()
            .map(|i| prepared.feature_names[i].clone())
            .collect(),
        performances,
    })
}
