//! Configuration system for the reviewer recommender.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod ranking_config;
pub mod revrec_config;
pub mod weights_config;

pub use ranking_config::RankingConfig;
pub use revrec_config::{CliOverrides, RevrecConfig};
pub use weights_config::WeightsConfig;
