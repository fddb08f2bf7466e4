//! One recommendation pass: fresh registry, every source in stage order,
//! then the ranking cut.

use std::sync::Arc;

use revrec_core::config::RankingConfig;
use revrec_core::errors::PassResult;
use revrec_core::events::RegistryEventHandler;
use revrec_core::traits::{ConfigWeightProvider, StaticWeightProvider, WeightProvider, WeightTable};
use revrec_core::{PassError, RevrecConfig};
use revrec_registry::{Identity, IndexWarning, Registry};
use serde::Serialize;

use crate::person::PersonRef;
use crate::source::{ContributionSummary, SignalSource};

/// Ranked reviewers plus what each source contributed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationOutput {
    /// Detached identity snapshots, best first.
    pub reviewers: Vec<Identity>,
    /// One summary per source, in the order the sources ran.
    pub summaries: Vec<ContributionSummary>,
    /// Distinct people in the registry before the cut.
    pub identity_count: usize,
    pub merge_count: usize,
}

impl RecommendationOutput {
    /// Emails of the recommended reviewers, skipping name-only identities.
    pub fn reviewer_emails(&self) -> Vec<String> {
        self.reviewers
            .iter()
            .filter_map(|identity| identity.email().map(str::to_owned))
            .collect()
    }
}

/// Runs signal sources against a registry and cuts the ranking.
///
/// Each call to [`run`](Self::run) builds its own registry, so a pass object
/// can be reused for many changes.
pub struct RecommendationPass {
    ranking: RankingConfig,
    weights: WeightTable,
    sources: Vec<Box<dyn SignalSource>>,
    handlers: Vec<Arc<dyn RegistryEventHandler>>,
}

impl RecommendationPass {
    pub fn new(ranking: RankingConfig, provider: &dyn WeightProvider) -> Self {
        Self {
            ranking,
            weights: provider.weights(),
            sources: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Default ranking and compiled-in weights.
    pub fn with_defaults() -> Self {
        Self::new(RankingConfig::default(), &StaticWeightProvider)
    }

    /// Build from a resolved configuration, rejecting invalid values.
    pub fn from_config(config: &RevrecConfig) -> Result<Self, PassError> {
        RevrecConfig::validate(config)?;
        Ok(Self::new(
            config.ranking.clone(),
            &ConfigWeightProvider::new(&config.weights),
        ))
    }

    pub fn with_source(mut self, source: impl SignalSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn add_source(&mut self, source: Box<dyn SignalSource>) {
        self.sources.push(source);
    }

    /// Observer attached to the registry of every subsequent run.
    pub fn register_handler(&mut self, handler: Arc<dyn RegistryEventHandler>) {
        self.handlers.push(handler);
    }

    /// Source names in the order they will run.
    pub fn source_order(&self) -> Vec<&str> {
        self.ordered_sources().into_iter().map(|s| s.name()).collect()
    }

    /// Stable by stage, so sources of the same stage keep insertion order.
    fn ordered_sources(&self) -> Vec<&dyn SignalSource> {
        let mut ordered: Vec<&dyn SignalSource> = self.sources.iter().map(|s| s.as_ref()).collect();
        ordered.sort_by_key(|s| s.stage());
        ordered
    }

    /// Run every source and return the top reviewers for one change.
    ///
    /// `change_owner` is dropped from the result when the ranking config
    /// excludes change owners. Index warnings raised along the way are
    /// returned with the result rather than failing the pass.
    pub fn run(
        &self,
        change_owner: Option<&PersonRef>,
    ) -> Result<PassResult<RecommendationOutput, IndexWarning>, PassError> {
        let span = tracing::info_span!("recommendation_pass", sources = self.sources.len());
        let _guard = span.enter();

        let mut registry = Registry::new();
        for handler in &self.handlers {
            registry.register_handler(Arc::clone(handler));
        }

        let mut output = RecommendationOutput::default();
        for source in self.ordered_sources() {
            let summary = source.contribute(&mut registry, &self.weights)?;
            tracing::info!(
                signal = source.name(),
                contributions = summary.contributions,
                skipped = summary.skipped,
                "signal applied"
            );
            output.summaries.push(summary);
        }

        let owner = if self.ranking.effective_exclude_change_owner() {
            change_owner.and_then(|owner| owner.find(&registry))
        } else {
            None
        };

        output.reviewers = registry
            .ordered_by_score(self.ranking.effective_filter_merge_rights())
            .into_iter()
            .filter(|identity| owner.is_none() || identity.id() != owner)
            .take(self.ranking.effective_top_n())
            .map(Identity::detached)
            .collect();
        output.identity_count = registry.len();
        output.merge_count = registry.merge_count();

        let mut result = PassResult::new(output);
        for warning in registry.take_warnings() {
            result.add_warning(warning);
        }

        tracing::info!(
            identity_count = result.data.identity_count,
            merge_count = result.data.merge_count,
            warning_count = result.warning_count(),
            reviewers = result.data.reviewers.len(),
            "recommendation pass complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{CommentSignal, PersonCount};
    use crate::merge_rights::MergeRightsSignal;
    use crate::ownership::{AuthorLines, BlameStats, OwnershipSignal};

    #[test]
    fn test_sources_run_in_stage_order() {
        let pass = RecommendationPass::with_defaults()
            .with_source(MergeRightsSignal::default())
            .with_source(CommentSignal::default())
            .with_source(OwnershipSignal::default());
        assert_eq!(pass.source_order(), vec!["ownership", "comments", "merge_rights"]);
    }

    #[test]
    fn test_empty_pass_is_clean() {
        let result = RecommendationPass::with_defaults().run(None).unwrap();
        assert!(result.is_clean());
        assert!(result.data.reviewers.is_empty());
        assert_eq!(result.data.identity_count, 0);
    }

    #[test]
    fn test_owner_kept_when_not_excluded() {
        let mut stats = BlameStats::new();
        stats.push_period(vec![AuthorLines::new(PersonRef::by_email("owner@x.com"), 10)]);
        let ranking = RankingConfig {
            exclude_change_owner: Some(false),
            ..Default::default()
        };

        let pass = RecommendationPass::new(ranking, &StaticWeightProvider)
            .with_source(OwnershipSignal::new(stats))
            .with_source(CommentSignal::new(vec![vec![PersonCount::new(
                PersonRef::by_email("other@x.com"),
                1,
            )]]));
        let result = pass.run(Some(&PersonRef::by_email("owner@x.com"))).unwrap();
        assert_eq!(result.data.reviewer_emails(), vec!["owner@x.com", "other@x.com"]);
    }
}
