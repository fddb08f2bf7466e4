//! Signal weight configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COMMENTS_WEIGHT, DEFAULT_OWNERSHIP_WEIGHT, DEFAULT_PERIOD_WEIGHTS,
    DEFAULT_REVIEW_VOTES_WEIGHT,
};

/// Per-signal and per-period weights applied to raw contributions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeightsConfig {
    /// Weight of blame line shares. Default: 1.0.
    pub ownership: Option<f64>,
    /// Weight of historical review votes. Default: 1.0.
    pub review_votes: Option<f64>,
    /// Weight of historical comments. Default: 0.5.
    pub comments: Option<f64>,
    /// Weight per history period, newest first. Default: [1.0, 0.5, 0.25].
    #[serde(default)]
    pub period_weights: Vec<f64>,
}

impl WeightsConfig {
    pub fn effective_ownership(&self) -> f64 {
        self.ownership.unwrap_or(DEFAULT_OWNERSHIP_WEIGHT)
    }

    pub fn effective_review_votes(&self) -> f64 {
        self.review_votes.unwrap_or(DEFAULT_REVIEW_VOTES_WEIGHT)
    }

    pub fn effective_comments(&self) -> f64 {
        self.comments.unwrap_or(DEFAULT_COMMENTS_WEIGHT)
    }

    /// Returns the configured period weights, or the defaults when empty.
    pub fn effective_period_weights(&self) -> Vec<f64> {
        if self.period_weights.is_empty() {
            DEFAULT_PERIOD_WEIGHTS.to_vec()
        } else {
            self.period_weights.clone()
        }
    }
}
