//! # revrec-signals
//!
//! Producers that turn review history into weighted score contributions, and
//! the pass that runs them against a fresh registry and cuts the ranking.
//!
//! ## Modules
//! - **person**: identity hints (email and/or name) and their resolution
//! - **source**: the `SignalSource` trait and the canonical stage order
//! - **ownership**: line-share contributions from blame statistics
//! - **activity**: review-vote and comment-count contributions
//! - **merge_rights**: repository membership flags
//! - **pass**: `RecommendationPass`, the per-change orchestrator
//! - **evaluation**: top-k accuracy and mean reciprocal rank

pub mod activity;
pub mod evaluation;
pub mod merge_rights;
pub mod ownership;
pub mod pass;
pub mod person;
pub mod source;

pub use activity::{CommentSignal, PersonCount, ReviewVoteSignal};
pub use evaluation::{mean_reciprocal_rank, top_k_accuracy, EvaluationCase};
pub use merge_rights::MergeRightsSignal;
pub use ownership::{AuthorLines, BlameStats, OwnershipSignal};
pub use pass::{RecommendationOutput, RecommendationPass};
pub use person::PersonRef;
pub use source::{ContributionSummary, SignalSource, SignalStage};
