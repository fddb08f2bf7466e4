//! Shared constants for the reviewer recommender.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of recommendations returned by a pass.
pub const DEFAULT_TOP_N: usize = 5;

/// Default for restricting recommendations to people with merge rights.
pub const DEFAULT_FILTER_MERGE_RIGHTS: bool = false;

/// Default for dropping the change owner from the recommendations.
pub const DEFAULT_EXCLUDE_CHANGE_OWNER: bool = true;

// ---- Signal Names ----

/// Code ownership derived from blame line shares.
pub const SIGNAL_OWNERSHIP: &str = "ownership";

/// Historical review votes.
pub const SIGNAL_REVIEW_VOTES: &str = "review_votes";

/// Historical comment activity.
pub const SIGNAL_COMMENTS: &str = "comments";

/// Repository membership (merge rights). Carries no score.
pub const SIGNAL_MERGE_RIGHTS: &str = "merge_rights";

// ---- Default Weights ----

/// Default weight for the ownership signal.
pub const DEFAULT_OWNERSHIP_WEIGHT: f64 = 1.0;

/// Default weight for the review vote signal.
pub const DEFAULT_REVIEW_VOTES_WEIGHT: f64 = 1.0;

/// Default weight for the comment signal.
pub const DEFAULT_COMMENTS_WEIGHT: f64 = 0.5;

/// Default per-period weights, newest period first.
pub const DEFAULT_PERIOD_WEIGHTS: [f64; 3] = [1.0, 0.5, 0.25];

// ---- Environment ----

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "REVREC_LOG";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "revrec.toml";
