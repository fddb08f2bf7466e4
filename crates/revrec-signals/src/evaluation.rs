//! Offline quality metrics against held-out historical changes.
//!
//! A case pairs the ranked emails produced for a change with the people who
//! actually reviewed it. Emails compare case-insensitively.

use serde::{Deserialize, Serialize};

use revrec_registry::Identity;

/// Ranked recommendations for one change and its actual reviewers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCase {
    pub ranked: Vec<String>,
    pub actual: Vec<String>,
}

impl EvaluationCase {
    pub fn new<R, A>(ranked: R, actual: A) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            ranked: ranked.into_iter().map(Into::into).collect(),
            actual: actual.into_iter().map(Into::into).collect(),
        }
    }

    /// Case from ranked identity snapshots; name-only identities are skipped.
    pub fn from_snapshot<A>(reviewers: &[Identity], actual: A) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self::new(reviewers.iter().filter_map(Identity::email), actual)
    }

    /// 1-based rank of the first recommendation that actually reviewed.
    pub fn first_hit(&self) -> Option<usize> {
        self.ranked
            .iter()
            .position(|email| self.actual.iter().any(|a| a.eq_ignore_ascii_case(email)))
            .map(|index| index + 1)
    }
}

/// Fraction of cases with an actual reviewer among the first `k`
/// recommendations. No cases (or `k == 0`) scores 0.
pub fn top_k_accuracy(cases: &[EvaluationCase], k: usize) -> f64 {
    if cases.is_empty() {
        return 0.0;
    }
    let hits = cases
        .iter()
        .filter(|case| case.first_hit().is_some_and(|rank| rank <= k))
        .count();
    hits as f64 / cases.len() as f64
}

/// Mean of `1 / rank` of the first hit; a case without a hit counts 0.
pub fn mean_reciprocal_rank(cases: &[EvaluationCase]) -> f64 {
    if cases.is_empty() {
        return 0.0;
    }
    let total: f64 = cases
        .iter()
        .filter_map(EvaluationCase::first_hit)
        .map(|rank| 1.0 / rank as f64)
        .sum();
    total / cases.len() as f64
}
