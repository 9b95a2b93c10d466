//! Gaussian-process black-box hyperparameter optimization.
//!
//! The objective is negative validation MRR (the search minimizes), which
//! needs no gradient and tolerates a noisy, expensive evaluation — every
//! trial re-fits the classifier. Trials run strictly sequentially.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use ranklab_core::config::{EvalOptions, OptimizeOptions};
use ranklab_core::errors::{RanklabResult, SearchError};
use ranklab_core::results::RelevanceJudgment;
use ranklab_core::traits::{Classifier, PairwiseReranker};
use ranklab_eval::{EvalData, EvaluationHarness, Prepared};

use crate::space::SearchSpace;
use crate::surrogate::Surrogate;

/// Search the space for the configuration maximizing validation MRR, then
/// refit with the best configuration and evaluate once on the held-out test
/// split. Returns the test-set MRR.
///
/// The first `initial_points` trials sample uniformly; after that each
/// proposal maximizes expected improvement over sampled candidates. The
/// best unit point maps back to named values strictly by dimension order.
/// A classifier failure in any trial aborts the whole search — a
/// misconfigured space should fail loudly, not skip trials.
#[allow(clippy::too_many_arguments)]
pub fn optimize(
    harness: &mut EvaluationHarness,
    classifier: &mut dyn Classifier,
    space: &SearchSpace,
    prepared: &Prepared,
    qrels: &[RelevanceJudgment],
    qrels_val: &[RelevanceJudgment],
    mut pairwise: Option<&mut dyn PairwiseReranker>,
    opts: &OptimizeOptions,
) -> RanklabResult<f64> {
    if opts.trials == 0 {
        return Err(SearchError::NoTrials.into());
    }
    let val_data = EvalData::from_prepared_validation(prepared)
        .ok_or(SearchError::MissingValidationSplit)?;

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut surrogate = Surrogate::new();
    let mut best: Option<(Vec<f64>, f64)> = None;

    let trial_opts = EvalOptions {
        top_k: opts.top_k,
        pca_components: prepared.pca_components,
        persist: false,
        ..Default::default()
    };

    for trial in 0..opts.trials {
        let point = if trial < opts.initial_points || surrogate.is_empty() {
            space.sample_unit(&mut rng)
        } else {
            propose(&surrogate, space, &mut rng, opts.candidates)
        };

        let params = space.decode(&point);
        for (name, value) in &params {
            classifier.set_param(name, value)?;
        }

        let outcome = harness.evaluate(
            classifier,
            val_data,
            qrels_val,
            pairwise.as_deref_mut(),
            &trial_opts,
        )?;
        // The search minimizes, so ranking quality enters negated.
        let objective = -outcome.mrr;
        debug!(trial, objective, mrr = outcome.mrr, "trial evaluated");

        if best.as_ref().map_or(true, |(_, incumbent)| objective < *incumbent) {
            best = Some((point.clone(), objective));
        }
        surrogate.observe(point, objective);
    }

    let (best_point, best_objective) = best.ok_or(SearchError::NoTrials)?;
    let best_params = space.decode(&best_point);
    info!(
        best_mrr = -best_objective,
        params = ?best_params,
        "validation search complete"
    );

    for (name, value) in &best_params {
        classifier.set_param(name, value)?;
    }
    let final_opts = EvalOptions {
        top_k: opts.top_k,
        pca_components: prepared.pca_components,
        name: opts.name.clone(),
        persist: opts.persist_final,
        ..Default::default()
    };
    let outcome = harness.evaluate(
        classifier,
        EvalData::from_prepared(prepared),
        qrels,
        pairwise.as_deref_mut(),
        &final_opts,
    )?;
    info!(
        test_mrr = outcome.mrr,
        test_ndcg = outcome.mean_ndcg,
        "held-out evaluation complete"
    );
    Ok(outcome.mrr)
}

/// Pick the sampled candidate with the highest expected improvement.
fn propose(
    surrogate: &Surrogate,
    space: &SearchSpace,
    rng: &mut StdRng,
    candidates: usize,
) -> Vec<f64> {
    let mut best_point = space.sample_unit(rng);
    let (mean, std) = surrogate.predict(&best_point);
    let mut best_ei = surrogate.expected_improvement(mean, std);

    for _ in 1..candidates.max(1) {
        let point = space.sample_unit(rng);
        let (mean, std) = surrogate.predict(&point);
        let ei = surrogate.expected_improvement(mean, std);
        if ei > best_ei {
            best_ei = ei;
            best_point = point;
        }
    }
    best_point
}
