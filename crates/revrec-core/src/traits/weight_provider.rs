//! WeightProvider trait.
//!
//! Static weights are used unless a provider supplies a tuned table
//! (e.g. one derived from the project config).

use crate::config::WeightsConfig;
use crate::constants::{
    DEFAULT_COMMENTS_WEIGHT, DEFAULT_OWNERSHIP_WEIGHT, DEFAULT_PERIOD_WEIGHTS,
    DEFAULT_REVIEW_VOTES_WEIGHT, SIGNAL_COMMENTS, SIGNAL_OWNERSHIP, SIGNAL_REVIEW_VOTES,
};
use crate::types::FxHashMap;

/// Weights applied by signal producers to raw contributions.
#[derive(Debug, Clone)]
pub struct WeightTable {
    /// Per-signal weights (signal name → weight).
    pub weights: FxHashMap<String, f64>,
    /// Per-period weights, newest period first.
    pub period_weights: Vec<f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl WeightTable {
    /// Compiled-in default weights.
    pub fn static_defaults() -> Self {
        let mut weights = FxHashMap::default();
        weights.insert(SIGNAL_OWNERSHIP.to_string(), DEFAULT_OWNERSHIP_WEIGHT);
        weights.insert(SIGNAL_REVIEW_VOTES.to_string(), DEFAULT_REVIEW_VOTES_WEIGHT);
        weights.insert(SIGNAL_COMMENTS.to_string(), DEFAULT_COMMENTS_WEIGHT);

        Self {
            weights,
            period_weights: DEFAULT_PERIOD_WEIGHTS.to_vec(),
        }
    }

    /// Build a table from resolved configuration.
    pub fn from_config(config: &WeightsConfig) -> Self {
        let mut weights = FxHashMap::default();
        weights.insert(SIGNAL_OWNERSHIP.to_string(), config.effective_ownership());
        weights.insert(SIGNAL_REVIEW_VOTES.to_string(), config.effective_review_votes());
        weights.insert(SIGNAL_COMMENTS.to_string(), config.effective_comments());

        Self {
            weights,
            period_weights: config.effective_period_weights(),
        }
    }

    /// Get weight for a signal, falling back to 1.0 if not found.
    /// Clamps negative weights to 0.0, replaces NaN with static default.
    pub fn get_weight(&self, signal: &str) -> f64 {
        let raw = self.weights.get(signal).copied().unwrap_or(1.0);
        if raw.is_nan() {
            Self::static_defaults()
                .weights
                .get(signal)
                .copied()
                .unwrap_or(1.0)
        } else if raw < 0.0 {
            0.0
        } else {
            raw
        }
    }

    /// Weight of the `index`-th history period (0 = newest).
    /// Periods beyond the table contribute nothing.
    pub fn period_weight(&self, index: usize) -> f64 {
        match self.period_weights.get(index).copied() {
            Some(w) if w.is_nan() || w < 0.0 => 0.0,
            Some(w) => w,
            None => 0.0,
        }
    }

    /// Number of history periods that carry weight.
    pub fn period_count(&self) -> usize {
        self.period_weights.len()
    }
}

/// Provider of signal weights for a recommendation pass.
pub trait WeightProvider: Send + Sync {
    /// Returns the weight table to use. Defaults to static weights.
    fn weights(&self) -> WeightTable {
        WeightTable::static_defaults()
    }
}

/// Provider returning the compiled-in defaults.
pub struct StaticWeightProvider;

impl WeightProvider for StaticWeightProvider {}

/// Provider backed by a resolved `WeightsConfig`.
pub struct ConfigWeightProvider {
    table: WeightTable,
}

impl ConfigWeightProvider {
    pub fn new(config: &WeightsConfig) -> Self {
        Self {
            table: WeightTable::from_config(config),
        }
    }
}

impl WeightProvider for ConfigWeightProvider {
    fn weights(&self) -> WeightTable {
        self.table.clone()
    }
}
