use proptest::prelude::*;
use ranklab_core::constants::DEFAULT_MRR_THRESHOLD;
use ranklab_core::results::ScoredResult;
use ranklab_metrics::{
    calculate_ranks, confusion, mean_average_precision, mean_ndcg, mean_reciprocal_rank,
};

fn arb_results() -> impl Strategy<Value = Vec<ScoredResult>> {
    prop::collection::vec((0.0f64..=1.0, 0u8..4, 0usize..4), 1..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (confidence, relevant, q))| {
                ScoredResult::new(confidence, format!("q{q}"), format!("p{i}"), relevant)
            })
            .collect()
    })
}

/// Every generated query carries at least one relevant row.
fn arb_nondegenerate() -> impl Strategy<Value = Vec<ScoredResult>> {
    prop::collection::vec(
        (
            prop::collection::vec((0.0f64..=1.0, 0u8..4), 0..6),
            0.0f64..=1.0,
            1u8..4,
        ),
        1..4,
    )
    .prop_map(|queries| {
        let mut out = Vec::new();
        for (q, (rows, anchor_confidence, anchor_grade)) in queries.into_iter().enumerate() {
            let qid = format!("q{q}");
            for (i, (confidence, relevant)) in rows.into_iter().enumerate() {
                out.push(ScoredResult::new(
                    confidence,
                    qid.as_str(),
                    format!("p{i}"),
                    relevant,
                ));
            }
            out.push(ScoredResult::new(
                anchor_confidence,
                qid.as_str(),
                "anchor",
                anchor_grade,
            ));
        }
        out
    })
}

// ── Rank derivation ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ranks_are_positive_and_ordered(results in arb_results()) {
        let ranks = calculate_ranks(&results);
        let relevant_count = results.iter().filter(|r| r.relevant >= 1).count();
        prop_assert_eq!(ranks.len(), relevant_count);

        for (i, r) in ranks.iter().enumerate() {
            prop_assert_eq!(r.position, i + 1);
            prop_assert!(r.rank >= r.position);
            prop_assert!(r.rank <= results.len());
        }
        // Ranks strictly increase over the retained order.
        for pair in ranks.windows(2) {
            prop_assert!(pair[0].rank < pair[1].rank);
        }
    }
}

// ── Confusion metrics ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn counts_partition_the_result_set(results in arb_results()) {
        let counts = ranklab_metrics::confusion::count(&results);
        prop_assert_eq!(counts.total(), results.len());
    }

    #[test]
    fn metrics_bounded_or_nan(results in arb_results()) {
        let m = confusion(&results, None).unwrap();
        prop_assert!((0.0..=1.0).contains(&m.accuracy));
        for value in [m.precision, m.recall, m.f1] {
            prop_assert!(value.is_nan() || (0.0..=1.0).contains(&value));
        }
    }
}

// ── Ranking means ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn map_and_ndcg_bounded_on_nondegenerate_input(results in arb_nondegenerate()) {
        let map = mean_average_precision(&results).unwrap();
        prop_assert!(map > 0.0 && map <= 1.0 + 1e-12);

        let ndcg = mean_ndcg(&results).unwrap();
        prop_assert!(ndcg > 0.0 && ndcg <= 1.0 + 1e-12);
    }

    #[test]
    fn mrr_bounded(results in arb_results()) {
        let mrr = mean_reciprocal_rank(&results, DEFAULT_MRR_THRESHOLD).unwrap();
        prop_assert!((0.0..=1.0).contains(&mrr));
    }

    #[test]
    fn means_are_deterministic(results in arb_nondegenerate()) {
        // Stable sorting and fixed query order make re-evaluation exact.
        prop_assert_eq!(
            mean_average_precision(&results).unwrap(),
            mean_average_precision(&results).unwrap()
        );
        prop_assert_eq!(mean_ndcg(&results).unwrap(), mean_ndcg(&results).unwrap());
        prop_assert_eq!(
            mean_reciprocal_rank(&results, DEFAULT_MRR_THRESHOLD).unwrap(),
            mean_reciprocal_rank(&results, DEFAULT_MRR_THRESHOLD).unwrap()
        );
    }
}
