//! Review-history contributions: votes and comments per period.

use revrec_core::constants::{SIGNAL_COMMENTS, SIGNAL_REVIEW_VOTES};
use revrec_core::traits::WeightTable;
use revrec_core::SignalError;
use revrec_registry::Registry;
use serde::{Deserialize, Serialize};

use crate::person::PersonRef;
use crate::source::{ContributionSummary, SignalSource, SignalStage};

/// A count attributed to one person. Negative vote totals are penalties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonCount {
    pub person: PersonRef,
    pub count: i64,
}

impl PersonCount {
    pub fn new(person: PersonRef, count: i64) -> Self {
        Self { person, count }
    }
}

/// Adds `count × signal weight × period weight` for every record.
fn contribute_counts(
    signal: &str,
    periods: &[Vec<PersonCount>],
    registry: &mut Registry,
    weights: &WeightTable,
) -> Result<ContributionSummary, SignalError> {
    let weight = weights.get_weight(signal);
    let mut summary = ContributionSummary::new(signal);

    for (index, records) in periods.iter().enumerate() {
        let period_weight = weights.period_weight(index);
        for record in records {
            if record.count == 0 || period_weight == 0.0 {
                summary.skipped += 1;
                continue;
            }
            let id = record.person.resolve(registry, signal)?;
            if let Some(mut identity) = registry.identity_mut(id) {
                identity.add_score(record.count as f64, &[weight, period_weight]);
            }
            summary.contributions += 1;
        }
    }

    tracing::debug!(
        signal,
        contributions = summary.contributions,
        skipped = summary.skipped,
        "activity contributed"
    );
    Ok(summary)
}

/// Historical review votes, one list per period, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewVoteSignal {
    periods: Vec<Vec<PersonCount>>,
}

impl ReviewVoteSignal {
    pub fn new(periods: Vec<Vec<PersonCount>>) -> Self {
        Self { periods }
    }
}

impl SignalSource for ReviewVoteSignal {
    fn name(&self) -> &str {
        SIGNAL_REVIEW_VOTES
    }

    fn stage(&self) -> SignalStage {
        SignalStage::ReviewVotes
    }

    fn contribute(
        &self,
        registry: &mut Registry,
        weights: &WeightTable,
    ) -> Result<ContributionSummary, SignalError> {
        contribute_counts(self.name(), &self.periods, registry, weights)
    }
}

/// Comment activity on related changes, one list per period, newest first.
#[derive(Debug, Clone, Default)]
pub struct CommentSignal {
    periods: Vec<Vec<PersonCount>>,
}

impl CommentSignal {
    pub fn new(periods: Vec<Vec<PersonCount>>) -> Self {
        Self { periods }
    }
}

impl SignalSource for CommentSignal {
    fn name(&self) -> &str {
        SIGNAL_COMMENTS
    }

    fn stage(&self) -> SignalStage {
        SignalStage::Comments
    }

    fn contribute(
        &self,
        registry: &mut Registry,
        weights: &WeightTable,
    ) -> Result<ContributionSummary, SignalError> {
        contribute_counts(self.name(), &self.periods, registry, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(email: &str, count: i64) -> PersonCount {
        PersonCount::new(PersonRef::by_email(email), count)
    }

    #[test]
    fn test_votes_weighted_by_period() {
        let signal = ReviewVoteSignal::new(vec![
            vec![count("a@x.com", 2)],
            vec![count("a@x.com", 4), count("b@x.com", -2)],
        ]);
        let mut registry = Registry::new();
        let summary = signal
            .contribute(&mut registry, &WeightTable::static_defaults())
            .unwrap();

        assert_eq!(summary.signal, "review_votes");
        assert_eq!(summary.contributions, 3);
        assert_eq!(registry.get_by_email("a@x.com").unwrap().score(), 4.0);
        assert_eq!(registry.get_by_email("b@x.com").unwrap().score(), -1.0);
    }

    #[test]
    fn test_comments_use_comment_weight() {
        let signal = CommentSignal::new(vec![vec![count("a@x.com", 10), count("b@x.com", 0)]]);
        let mut registry = Registry::new();
        let summary = signal
            .contribute(&mut registry, &WeightTable::static_defaults())
            .unwrap();

        assert_eq!(summary.contributions, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(registry.get_by_email("a@x.com").unwrap().score(), 5.0);
        assert!(registry.get_by_email("b@x.com").is_none());
    }

    #[test]
    fn test_zero_signal_weight_adds_nothing() {
        let mut weights = WeightTable::static_defaults();
        weights.weights.insert(SIGNAL_COMMENTS.to_string(), 0.0);

        let signal = CommentSignal::new(vec![vec![count("a@x.com", 10)]]);
        let mut registry = Registry::new();
        signal.contribute(&mut registry, &weights).unwrap();
        assert_eq!(registry.get_by_email("a@x.com").unwrap().score(), 0.0);
    }
}
