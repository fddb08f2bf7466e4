//! End-to-end recommendation passes over in-memory review history.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use revrec_core::events::handler::RegistryEventHandler;
use revrec_core::events::types::IdentitiesMergedEvent;
use revrec_core::traits::WeightTable;
use revrec_core::{PassError, RevrecConfig, RevrecErrorCode, SignalError};
use revrec_registry::Registry;
use revrec_signals::{
    AuthorLines, BlameStats, CommentSignal, ContributionSummary, MergeRightsSignal,
    OwnershipSignal, PersonCount, PersonRef, RecommendationPass, ReviewVoteSignal, SignalSource,
    SignalStage,
};

fn blame() -> BlameStats {
    let mut stats = BlameStats::new();
    stats
        .push_period(vec![
            AuthorLines::new(PersonRef::new(Some("owner@x.com"), Some("Olivia Owner")), 60),
            AuthorLines::new(PersonRef::by_name("Alice"), 30),
            AuthorLines::new(PersonRef::by_email("bob@x.com"), 10),
        ])
        .push_period(vec![AuthorLines::new(PersonRef::by_email("carol@x.com"), 40)]);
    stats
}

fn votes() -> ReviewVoteSignal {
    ReviewVoteSignal::new(vec![vec![
        // Alice's email becomes known here and joins her blame record.
        PersonCount::new(PersonRef::new(Some("alice@x.com"), Some("Alice")), 4),
        PersonCount::new(PersonRef::by_email("bob@x.com"), 2),
    ]])
}

fn comments() -> CommentSignal {
    CommentSignal::new(vec![vec![
        PersonCount::new(PersonRef::by_name("Dave"), 6),
        PersonCount::new(PersonRef::by_email("carol@x.com"), 2),
    ]])
}

fn members() -> MergeRightsSignal {
    MergeRightsSignal::new(vec![
        PersonRef::by_email("alice@x.com"),
        PersonRef::by_email("carol@x.com"),
        PersonRef::by_email("owner@x.com"),
    ])
}

fn full_pass(config: &RevrecConfig) -> RecommendationPass {
    RecommendationPass::from_config(config)
        .unwrap()
        .with_source(members())
        .with_source(comments())
        .with_source(votes())
        .with_source(OwnershipSignal::new(blame()))
}

#[test]
fn test_full_pass_ranks_and_excludes_owner() {
    let pass = full_pass(&RevrecConfig::default());
    assert_eq!(
        pass.source_order(),
        vec!["ownership", "review_votes", "comments", "merge_rights"]
    );

    let result = pass.run(Some(&PersonRef::by_name("Olivia Owner"))).unwrap();
    let output = &result.data;

    // owner, alice, bob, carol, dave
    assert_eq!(output.identity_count, 5);
    assert_eq!(output.merge_count, 1);
    assert_eq!(output.summaries.len(), 4);

    // carol: 100% × 0.5 + 2 × 0.5 = 51; alice: (0 + 30) / 2 + 4 = 19;
    // bob: 10 + 2 = 12; dave: 6 × 0.5 = 3.
    let ranked: Vec<(Option<&str>, f64)> = output
        .reviewers
        .iter()
        .map(|i| (i.email(), i.score()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (Some("carol@x.com"), 51.0),
            (Some("alice@x.com"), 19.0),
            (Some("bob@x.com"), 12.0),
            (None, 3.0),
        ]
    );
    assert!(output.reviewers.iter().all(|i| !i.is_attached()));
}

#[test]
fn test_merge_rights_filter_and_top_n_from_config() {
    let config = RevrecConfig::from_toml(
        r#"
        [ranking]
        top_n = 1
        filter_merge_rights = true
        "#,
    )
    .unwrap();

    let result = full_pass(&config).run(Some(&PersonRef::by_email("owner@x.com"))).unwrap();
    assert_eq!(result.data.reviewer_emails(), vec!["carol@x.com"]);
    assert_eq!(result.data.reviewers[0].has_merge_rights(), Some(true));
}

#[test]
fn test_weights_from_config_change_ranking() {
    let config = RevrecConfig::from_toml(
        r#"
        [weights]
        comments = 10.0
        "#,
    )
    .unwrap();

    let result = full_pass(&config).run(None).unwrap();
    // dave: 6 × 10 = 60 ties the owner, so find the record by name.
    let dave = result
        .data
        .reviewers
        .iter()
        .find(|i| i.names().contains("Dave"))
        .unwrap();
    assert_eq!(dave.score(), 60.0);
    assert_eq!(result.data.reviewers.len(), 5);
}

#[test]
fn test_invalid_config_rejected() {
    let config = RevrecConfig::from_toml(
        r#"
        [ranking]
        top_n = 0
        "#,
    )
    .unwrap();
    let err = RecommendationPass::from_config(&config).err().unwrap();
    assert!(matches!(err, PassError::Config(_)));
}

#[test]
fn test_invalid_person_aborts_pass() {
    let pass = RecommendationPass::with_defaults().with_source(CommentSignal::new(vec![vec![
        PersonCount::new(PersonRef::default(), 3),
    ]]));
    let err = pass.run(None).unwrap_err();
    assert!(matches!(err, PassError::Signal(SignalError::InvalidInput { .. })));
    assert_eq!(err.error_code(), "SIGNAL_ERROR");
}

#[test]
fn test_alias_merge_across_sources_is_clean() {
    let pass = RecommendationPass::with_defaults().with_source(ReviewVoteSignal::new(vec![vec![
        PersonCount::new(PersonRef::by_name("Alice"), 1),
        PersonCount::new(PersonRef::by_name("Alice"), 1),
    ]]))
    .with_source(ReviewVoteSignal::new(vec![vec![PersonCount::new(
        PersonRef::new(Some("a@x.com"), Some("Alice")),
        1,
    )]]));

    let result = pass.run(None).unwrap();
    assert!(result.is_clean());
    assert_eq!(result.data.identity_count, 1);
    // Alice: 2 name-only, averaged with the fresh emailed 0, then +1.
    assert_eq!(result.data.reviewers[0].score(), 2.0);
}

struct NegativeSource;

impl SignalSource for NegativeSource {
    fn name(&self) -> &str {
        "penalty"
    }

    fn stage(&self) -> SignalStage {
        SignalStage::Comments
    }

    fn contribute(
        &self,
        registry: &mut Registry,
        weights: &WeightTable,
    ) -> Result<ContributionSummary, SignalError> {
        let weight = weights.get_weight(self.name());
        registry
            .get_or_create_by_email("noisy@x.com")?
            .add_score(-5.0, &[weight])
            .add_score(f64::NAN, &[weight]);
        Ok(ContributionSummary {
            contributions: 1,
            ..ContributionSummary::new(self.name())
        })
    }
}

#[test]
fn test_custom_source_penalty_and_non_finite_warning() {
    let pass = RecommendationPass::with_defaults()
        .with_source(NegativeSource)
        .with_source(OwnershipSignal::new(blame()));
    assert_eq!(pass.source_order(), vec!["ownership", "penalty"]);

    let result = pass.run(None).unwrap();
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.warnings[0].kind(), "non_finite_contribution");
    let last = result.data.reviewers.last().unwrap();
    assert_eq!(last.email(), Some("noisy@x.com"));
    assert_eq!(last.score(), -5.0);
}

#[derive(Default)]
struct MergeCounter(AtomicUsize);

impl RegistryEventHandler for MergeCounter {
    fn on_identities_merged(&self, _event: &IdentitiesMergedEvent) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn test_handlers_observe_every_run() {
    let counter = Arc::new(MergeCounter::default());
    let mut pass = full_pass(&RevrecConfig::default());
    pass.register_handler(counter.clone());

    pass.run(None).unwrap();
    pass.run(None).unwrap();
    assert_eq!(counter.0.load(Ordering::Relaxed), 2);
}
