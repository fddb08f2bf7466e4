use proptest::prelude::*;
use revrec_signals::{mean_reciprocal_rank, top_k_accuracy, EvaluationCase};

fn arb_case() -> impl Strategy<Value = EvaluationCase> {
    (
        proptest::collection::vec("[a-e]@x\\.com", 0..6),
        proptest::collection::vec("[a-e]@x\\.com", 0..3),
    )
        .prop_map(|(ranked, actual)| EvaluationCase::new(ranked, actual))
}

proptest! {
    #[test]
    fn metrics_stay_in_unit_interval(cases in proptest::collection::vec(arb_case(), 0..20), k in 0usize..8) {
        let accuracy = top_k_accuracy(&cases, k);
        let mrr = mean_reciprocal_rank(&cases);
        prop_assert!((0.0..=1.0).contains(&accuracy));
        prop_assert!((0.0..=1.0).contains(&mrr));
    }

    #[test]
    fn top_k_accuracy_is_monotone_in_k(cases in proptest::collection::vec(arb_case(), 1..20), k in 0usize..8) {
        prop_assert!(top_k_accuracy(&cases, k) <= top_k_accuracy(&cases, k + 1));
    }

    #[test]
    fn mrr_bounded_by_top_1_and_full_accuracy(cases in proptest::collection::vec(arb_case(), 1..20)) {
        let mrr = mean_reciprocal_rank(&cases);
        prop_assert!(top_k_accuracy(&cases, 1) <= mrr + 1e-12);
        prop_assert!(mrr <= top_k_accuracy(&cases, usize::MAX) + 1e-12);
    }
}
