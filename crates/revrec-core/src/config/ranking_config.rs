//! Ranking configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXCLUDE_CHANGE_OWNER, DEFAULT_FILTER_MERGE_RIGHTS, DEFAULT_TOP_N};

/// Configuration for how the final recommendation list is cut.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of reviewers to recommend. Default: 5.
    pub top_n: Option<usize>,
    /// Only recommend people with merge rights. Default: false.
    pub filter_merge_rights: Option<bool>,
    /// Drop the change owner from the result. Default: true.
    pub exclude_change_owner: Option<bool>,
}

impl RankingConfig {
    /// Returns the effective result size, defaulting to 5.
    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    /// Returns whether to filter on merge rights, defaulting to false.
    pub fn effective_filter_merge_rights(&self) -> bool {
        self.filter_merge_rights.unwrap_or(DEFAULT_FILTER_MERGE_RIGHTS)
    }

    /// Returns whether the change owner is excluded, defaulting to true.
    pub fn effective_exclude_change_owner(&self) -> bool {
        self.exclude_change_owner
            .unwrap_or(DEFAULT_EXCLUDE_CHANGE_OWNER)
    }
}
