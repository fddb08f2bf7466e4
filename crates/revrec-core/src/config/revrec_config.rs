//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{RankingConfig, WeightsConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`REVREC_*`)
/// 3. Project config (`revrec.toml` in project root)
/// 4. User config (`~/.revrec/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RevrecConfig {
    pub ranking: RankingConfig,
    pub weights: WeightsConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub top_n: Option<usize>,
    pub filter_merge_rights: Option<bool>,
    pub exclude_change_owner: Option<bool>,
}

impl RevrecConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RevrecConfig) -> Result<(), ConfigError> {
        if config.ranking.top_n == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "ranking.top_n".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let weights = [
            ("weights.ownership", config.weights.ownership),
            ("weights.review_votes", config.weights.review_votes),
            ("weights.comments", config.weights.comments),
        ];
        for (field, value) in weights {
            if let Some(v) = value {
                check_weight(field, v)?;
            }
        }
        for (i, v) in config.weights.period_weights.iter().enumerate() {
            check_weight(&format!("weights.period_weights[{i}]"), *v)?;
        }
        Ok(())
    }

    /// Returns the user config path: `~/.revrec/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RevrecConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RevrecConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut RevrecConfig, other: &RevrecConfig) {
        // Ranking
        if other.ranking.top_n.is_some() {
            base.ranking.top_n = other.ranking.top_n;
        }
        if other.ranking.filter_merge_rights.is_some() {
            base.ranking.filter_merge_rights = other.ranking.filter_merge_rights;
        }
        if other.ranking.exclude_change_owner.is_some() {
            base.ranking.exclude_change_owner = other.ranking.exclude_change_owner;
        }

        // Weights
        if other.weights.ownership.is_some() {
            base.weights.ownership = other.weights.ownership;
        }
        if other.weights.review_votes.is_some() {
            base.weights.review_votes = other.weights.review_votes;
        }
        if other.weights.comments.is_some() {
            base.weights.comments = other.weights.comments;
        }
        if !other.weights.period_weights.is_empty() {
            base.weights.period_weights = other.weights.period_weights.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `REVREC_RANKING_TOP_N`, `REVREC_WEIGHTS_OWNERSHIP`, etc.
    /// Values that fail to parse are an error, not a silent fallback.
    fn apply_env_overrides(config: &mut RevrecConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<usize>("REVREC_RANKING_TOP_N")? {
            config.ranking.top_n = Some(v);
        }
        if let Some(v) = env_parse::<bool>("REVREC_RANKING_FILTER_MERGE_RIGHTS")? {
            config.ranking.filter_merge_rights = Some(v);
        }
        if let Some(v) = env_parse::<bool>("REVREC_RANKING_EXCLUDE_CHANGE_OWNER")? {
            config.ranking.exclude_change_owner = Some(v);
        }
        if let Some(v) = env_parse::<f64>("REVREC_WEIGHTS_OWNERSHIP")? {
            config.weights.ownership = Some(v);
        }
        if let Some(v) = env_parse::<f64>("REVREC_WEIGHTS_REVIEW_VOTES")? {
            config.weights.review_votes = Some(v);
        }
        if let Some(v) = env_parse::<f64>("REVREC_WEIGHTS_COMMENTS")? {
            config.weights.comments = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RevrecConfig, cli: &CliOverrides) {
        if let Some(v) = cli.top_n {
            config.ranking.top_n = Some(v);
        }
        if let Some(v) = cli.filter_merge_rights {
            config.ranking.filter_merge_rights = Some(v);
        }
        if let Some(v) = cli.exclude_change_owner {
            config.ranking.exclude_change_owner = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn check_weight(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a finite, non-negative number".to_string(),
        });
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("cannot parse {val:?}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Returns the user-level config directory: `~/.revrec/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".revrec"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
