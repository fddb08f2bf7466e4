//! Scoring protocol: how producers contribute to a registry.
//!
//! A producer resolves each person it has evidence for (email preferred,
//! names attached as aliases) and then adds `raw value × weights` to that
//! person's score. The registry only aggregates; it never interprets scores.

use revrec_core::constants::{
    SIGNAL_COMMENTS, SIGNAL_MERGE_RIGHTS, SIGNAL_OWNERSHIP, SIGNAL_REVIEW_VOTES,
};
use revrec_core::traits::WeightTable;
use revrec_core::SignalError;
use revrec_registry::Registry;
use serde::{Deserialize, Serialize};

/// Position of a producer in a recommendation pass.
///
/// Sources run in ascending stage order. Merge rights come last because they
/// also flag everyone who is not a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStage {
    Ownership,
    ReviewVotes,
    Comments,
    MergeRights,
}

impl SignalStage {
    pub fn all() -> &'static [SignalStage] {
        &[
            Self::Ownership,
            Self::ReviewVotes,
            Self::Comments,
            Self::MergeRights,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ownership => SIGNAL_OWNERSHIP,
            Self::ReviewVotes => SIGNAL_REVIEW_VOTES,
            Self::Comments => SIGNAL_COMMENTS,
            Self::MergeRights => SIGNAL_MERGE_RIGHTS,
        }
    }
}

/// What one source did to the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionSummary {
    /// Name of the source.
    pub signal: String,
    /// Score contributions applied.
    pub contributions: usize,
    /// Input records ignored (zero weight, empty period, unknown person).
    pub skipped: usize,
    /// Identities whose merge-rights flag was set.
    pub flagged: usize,
}

impl ContributionSummary {
    pub fn new(signal: &str) -> Self {
        Self {
            signal: signal.to_string(),
            ..Default::default()
        }
    }
}

/// Trait every signal producer implements.
pub trait SignalSource: Send + Sync {
    /// Unique name, also the key of this source's weight.
    fn name(&self) -> &str;

    /// Where in the pass this source runs.
    fn stage(&self) -> SignalStage;

    /// Push this source's evidence into `registry`.
    fn contribute(
        &self,
        registry: &mut Registry,
        weights: &WeightTable,
    ) -> Result<ContributionSummary, SignalError>;
}
