//! Tunable thresholds of the matching and analytics engine.
//!
//! Every value here was chosen empirically against one season of cutoffs and
//! may need recalibration; they live in one TOML-loadable struct so that can
//! happen without touching the algorithms.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::MAX_LIMIT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchingConfig,
    pub prospects: ProspectConfig,
    pub popularity: PopularityConfig,
    pub comparison: ComparisonConfig,
    /// Largest page size accepted by listing operations.
    pub max_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// College names must score strictly above this to be returned.
    pub name_min_score: f64,
    /// Branch names must score strictly above this to be returned.
    pub branch_min_score: f64,
    pub name_substring_base: f64,
    pub name_substring_weight: f64,
    pub branch_substring_base: f64,
    pub branch_substring_weight: f64,
    pub initials_floor: f64,
    pub initials_max_query_len: usize,
    pub word_overlap_weight: f64,
    /// A lone match at or above this score resolves without confirmation.
    pub auto_resolve_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProspectConfig {
    /// Assumed maximum candidate rank for the percentile estimate.
    pub percentile_ceiling: u32,
    pub best_margin: u32,
    pub good_margin: u32,
    pub moderate_margin: u32,
    pub preview_limit: usize,
    pub reach_preview_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopularityConfig {
    /// Best cutoff strictly below this is `High`.
    pub high_below: u32,
    /// Best cutoff strictly below this (and not `High`) is `Medium`.
    pub medium_below: u32,
    pub top_colleges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub min_colleges: usize,
    pub max_colleges: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            prospects: ProspectConfig::default(),
            popularity: PopularityConfig::default(),
            comparison: ComparisonConfig::default(),
            max_limit: MAX_LIMIT,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            name_min_score: 0.3,
            branch_min_score: 0.4,
            name_substring_base: 0.9,
            name_substring_weight: 0.1,
            branch_substring_base: 0.8,
            branch_substring_weight: 0.2,
            initials_floor: 0.95,
            initials_max_query_len: 5,
            word_overlap_weight: 0.9,
            auto_resolve_score: 0.8,
        }
    }
}

impl Default for ProspectConfig {
    fn default() -> Self {
        Self {
            percentile_ceiling: 200_000,
            best_margin: 2_000,
            good_margin: 5_000,
            moderate_margin: 10_000,
            preview_limit: 10,
            reach_preview_limit: 5,
        }
    }
}

impl Default for PopularityConfig {
    fn default() -> Self {
        Self {
            high_below: 5_000,
            medium_below: 20_000,
            top_colleges: 10,
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            min_colleges: 2,
            max_colleges: 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

impl EngineConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No engine config found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        tracing::debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default()).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.matching;
        let scores = [
            ("name_min_score", m.name_min_score),
            ("branch_min_score", m.branch_min_score),
            ("name_substring_base", m.name_substring_base),
            ("name_substring_weight", m.name_substring_weight),
            ("branch_substring_base", m.branch_substring_base),
            ("branch_substring_weight", m.branch_substring_weight),
            ("initials_floor", m.initials_floor),
            ("word_overlap_weight", m.word_overlap_weight),
            ("auto_resolve_score", m.auto_resolve_score),
        ];
        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "matching.{name} must be within [0.0, 1.0], got {value}"
                )));
            }
        }
        if m.name_substring_base + m.name_substring_weight > 1.0
            || m.branch_substring_base + m.branch_substring_weight > 1.0
        {
            return Err(ConfigError::Validation(
                "substring base + weight must not exceed 1.0".into(),
            ));
        }

        let p = &self.prospects;
        if p.percentile_ceiling == 0 {
            return Err(ConfigError::Validation(
                "prospects.percentile_ceiling must be > 0".into(),
            ));
        }
        if !(p.best_margin < p.good_margin && p.good_margin < p.moderate_margin) {
            return Err(ConfigError::Validation(
                "prospect margins must be strictly increasing (best < good < moderate)".into(),
            ));
        }

        if self.popularity.high_below >= self.popularity.medium_below {
            return Err(ConfigError::Validation(
                "popularity.high_below must be < popularity.medium_below".into(),
            ));
        }

        let c = &self.comparison;
        if c.min_colleges < 2 || c.max_colleges < c.min_colleges {
            return Err(ConfigError::Validation(
                "comparison requires 2 <= min_colleges <= max_colleges".into(),
            ));
        }

        if self.max_limit == 0 || self.max_limit > MAX_LIMIT {
            return Err(ConfigError::Validation(format!(
                "max_limit must be within [1, {MAX_LIMIT}], got {}",
                self.max_limit
            )));
        }

        Ok(())
    }
}
