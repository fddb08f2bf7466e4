use proptest::prelude::*;
use revrec_registry::{Identity, Registry};

fn arb_name() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z ]{0,8}")
}

fn arb_email() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z]{0,5}@[a-z]{1,4}\\.com")
}

// ── Construction: an identity always has an email or a name ──────────────

proptest! {
    #[test]
    fn identity_has_email_or_name(email in arb_email(), name in arb_name(), score in -50.0f64..50.0) {
        let names: Vec<String> = name.into_iter().collect();
        match Identity::new(email.as_deref(), names, score, None) {
            Ok(identity) => prop_assert!(identity.email().is_some() || !identity.names().is_empty()),
            Err(_) => {}
        }
    }
}

// ── Ranking: non-increasing and correctly sized ──────────────────────────

proptest! {
    #[test]
    fn ordered_by_score_is_non_increasing(scores in proptest::collection::vec(-1000.0f64..1000.0, 0..40)) {
        let mut registry = Registry::new();
        for (i, score) in scores.iter().enumerate() {
            let identity = if i % 2 == 0 {
                Identity::new(None, [format!("person {i}")], *score, None).unwrap()
            } else {
                Identity::new(Some(&format!("p{i}@x.com")), Vec::<String>::new(), *score, None).unwrap()
            };
            registry.add(identity).unwrap();
        }

        let ordered = registry.ordered_by_score(false);
        prop_assert_eq!(ordered.len(), scores.len());
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn top_n_returns_min_of_n_and_count(count in 0usize..30, n in 0usize..40) {
        let mut registry = Registry::new();
        for i in 0..count {
            registry
                .add(Identity::new(None, [format!("person {i}")], i as f64, None).unwrap())
                .unwrap();
        }
        prop_assert_eq!(registry.top_n(n, false).len(), n.min(count));
    }

    #[test]
    fn merge_rights_filter_only_keeps_true(flags in proptest::collection::vec(proptest::option::of(any::<bool>()), 0..20)) {
        let mut registry = Registry::new();
        for (i, flag) in flags.iter().enumerate() {
            registry
                .add(Identity::new(None, [format!("person {i}")], i as f64, *flag).unwrap())
                .unwrap();
        }
        let filtered = registry.ordered_by_score(true);
        prop_assert_eq!(filtered.len(), flags.iter().filter(|f| **f == Some(true)).count());
        prop_assert!(filtered.iter().all(|i| i.has_merge_rights() == Some(true)));
    }
}

// ── Merge: averaging and idempotence ─────────────────────────────────────

proptest! {
    #[test]
    fn merge_twice_changes_nothing(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let mut registry = Registry::new();
        let x = registry.add(Identity::new(None, ["x"], a, None).unwrap()).unwrap();
        let y = registry.add(Identity::new(None, ["y"], b, None).unwrap()).unwrap();

        prop_assert!(registry.merge(x, y));
        let score = registry.get(x).unwrap().score();
        let names = registry.get(x).unwrap().names().to_vec();
        prop_assert!((score - (a + b) / 2.0).abs() < 1e-9);

        prop_assert!(!registry.merge(x, y));
        prop_assert_eq!(registry.get(x).unwrap().score(), score);
        prop_assert_eq!(registry.get(x).unwrap().names().to_vec(), names);
        prop_assert_eq!(registry.len(), 1);
    }

    #[test]
    fn name_then_email_scenario_averages(name_score in 0.0f64..100.0, email_score in 0.0f64..100.0) {
        let mut registry = Registry::new();
        registry.add(Identity::new(None, ["Alice"], name_score, None).unwrap()).unwrap();
        registry
            .add(Identity::new(Some("a@x.com"), ["Alice"], email_score, None).unwrap())
            .unwrap();

        prop_assert_eq!(registry.len(), 1);
        let identity = registry.get_by_name("Alice").unwrap();
        prop_assert_eq!(identity.email(), Some("a@x.com"));
        prop_assert!((identity.score() - (name_score + email_score) / 2.0).abs() < 1e-9);
    }
}

// ── Aliasing: shared names merge people, nobody is lost ──────────────────

proptest! {
    #[test]
    fn shared_aliases_never_lose_a_person(
        scores in proptest::collection::vec(0.1f64..100.0, 1..12),
        aliases in proptest::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        let count = scores.len();
        let names: Vec<String> = (0..count).map(|i| format!("person {i}")).collect();
        let mut registry = Registry::new();
        for (name, score) in names.iter().zip(&scores) {
            registry.add(Identity::new(None, [name.as_str()], *score, None).unwrap()).unwrap();
        }
        let floor = scores.iter().copied().fold(f64::INFINITY, f64::min);

        for (from, to) in aliases {
            let owner = registry.get_by_name(&names[from % count]).unwrap().id().unwrap();
            let len_before = registry.len();
            registry.identity_mut(owner).unwrap().add_name(&names[to % count]);
            prop_assert!(registry.len() <= len_before);
        }

        prop_assert_eq!(registry.len() + registry.merge_count(), count);
        for name in &names {
            prop_assert!(registry.get_by_name(name).is_some(), "{} unreachable", name);
        }
        for identity in registry.ordered_by_score(false) {
            prop_assert!(identity.score() >= floor - 1e-9);
        }
        prop_assert!(registry.warnings().is_empty());
    }
}
