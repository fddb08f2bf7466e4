//! Code-ownership contributions from blame statistics.

use revrec_core::constants::SIGNAL_OWNERSHIP;
use revrec_core::traits::WeightTable;
use revrec_core::SignalError;
use revrec_registry::Registry;
use serde::{Deserialize, Serialize};

use crate::person::PersonRef;
use crate::source::{ContributionSummary, SignalSource, SignalStage};

/// Lines of the touched files last changed by one person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorLines {
    pub person: PersonRef,
    pub lines: u64,
}

impl AuthorLines {
    pub fn new(person: PersonRef, lines: u64) -> Self {
        Self { person, lines }
    }
}

/// Per-author line counts, one entry per history period, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlameStats {
    pub periods: Vec<Vec<AuthorLines>>,
}

impl BlameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next (older) period.
    pub fn push_period(&mut self, authors: Vec<AuthorLines>) -> &mut Self {
        self.periods.push(authors);
        self
    }

    /// Total blamed lines of period `index`.
    pub fn period_total(&self, index: usize) -> u64 {
        self.periods
            .get(index)
            .map(|authors| authors.iter().fold(0u64, |acc, a| acc.saturating_add(a.lines)))
            .unwrap_or(0)
    }
}

/// Adds each author's line share (percent) × ownership weight × period weight.
#[derive(Debug, Clone, Default)]
pub struct OwnershipSignal {
    stats: BlameStats,
}

impl OwnershipSignal {
    pub fn new(stats: BlameStats) -> Self {
        Self { stats }
    }
}

impl SignalSource for OwnershipSignal {
    fn name(&self) -> &str {
        SIGNAL_OWNERSHIP
    }

    fn stage(&self) -> SignalStage {
        SignalStage::Ownership
    }

    fn contribute(
        &self,
        registry: &mut Registry,
        weights: &WeightTable,
    ) -> Result<ContributionSummary, SignalError> {
        let weight = weights.get_weight(SIGNAL_OWNERSHIP);
        let mut summary = ContributionSummary::new(self.name());

        for (index, authors) in self.stats.periods.iter().enumerate() {
            let period_weight = weights.period_weight(index);
            let total = self.stats.period_total(index);
            if total == 0 || period_weight == 0.0 {
                tracing::debug!(period = index, total, period_weight, "skipping ownership period");
                summary.skipped += authors.len();
                continue;
            }

            for author in authors {
                if author.lines == 0 {
                    summary.skipped += 1;
                    continue;
                }
                let share = author.lines as f64 / total as f64 * 100.0;
                let id = author.person.resolve(registry, self.name())?;
                if let Some(mut identity) = registry.identity_mut(id) {
                    identity.add_score(share, &[weight, period_weight]);
                }
                summary.contributions += 1;
            }
        }

        tracing::debug!(
            signal = self.name(),
            contributions = summary.contributions,
            skipped = summary.skipped,
            "ownership contributed"
        );
        Ok(summary)
    }
}
