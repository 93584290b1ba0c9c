//! Configuration system for loadout.
//!
//! Load solver configuration from TOML or YAML to control strictness, grouping
//! and tier weights without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use loadout_config::{GroupingMode, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     strict_sub_component_matching = false
//!     grouping = "exclusive"
//!
//!     [weights]
//!     member_count_cap = 10
//!
//!     [secondary]
//!     iteration_buffer = 25
//! "#).unwrap();
//!
//! assert!(!config.strict_sub_component_matching);
//! assert_eq!(config.grouping, GroupingMode::Exclusive);
//! assert_eq!(config.weights.member_count_cap, Some(10));
//! assert_eq!(config.secondary.iteration_buffer, 25);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use loadout_config::SolverConfig;
//!
//! let config = SolverConfig::load("loadout.toml").unwrap_or_default();
//! assert!(config.strict_sub_component_matching);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Reject units whose sub-components do not cover a group's requirement.
    #[serde(default = "default_strict")]
    pub strict_sub_component_matching: bool,

    /// How entries from different configurations are grouped.
    #[serde(default)]
    pub grouping: GroupingMode,

    /// Let currently collected locked entries hold on to a unit.
    #[serde(default)]
    pub reserve_locked_items: bool,

    /// Direct slot tier weights.
    #[serde(default)]
    pub weights: DirectWeightsConfig,

    /// Procurement tier weights.
    #[serde(default)]
    pub procurement_weights: ProcurementWeightsConfig,

    /// Procurement engine settings.
    #[serde(default)]
    pub secondary: SecondaryConfig,

    /// Solve queue settings.
    #[serde(default)]
    pub queue: QueueConfig,
}

fn default_strict() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strict_sub_component_matching: default_strict(),
            grouping: GroupingMode::default(),
            reserve_locked_items: false,
            weights: DirectWeightsConfig::default(),
            procurement_weights: ProcurementWeightsConfig::default(),
            secondary: SecondaryConfig::default(),
            queue: QueueConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue.backlog == 0 {
            return Err(ConfigError::Invalid(
                "queue.backlog must be at least 1".to_string(),
            ));
        }
        if let Some(offset) = self.procurement_weights.offset {
            if offset > 0 {
                return Err(ConfigError::Invalid(format!(
                    "procurement_weights.offset must not be positive, got {}",
                    offset
                )));
            }
        }
        let multipliers = [
            ("weights.manual_override", self.weights.manual_override),
            ("weights.common_sub_component", self.weights.common_sub_component),
            ("weights.member_count", self.weights.member_count),
            ("weights.origin_priority", self.weights.origin_priority),
            ("procurement_weights.completion", self.procurement_weights.completion),
            ("procurement_weights.depth", self.procurement_weights.depth),
            ("procurement_weights.group_size", self.procurement_weights.group_size),
            ("procurement_weights.remaining", self.procurement_weights.remaining),
            (
                "procurement_weights.origin_priority",
                self.procurement_weights.origin_priority,
            ),
        ];
        for (name, value) in multipliers {
            if let Some(v) = value {
                if v < 0 {
                    return Err(ConfigError::Invalid(format!(
                        "{} must not be negative, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }

    /// Sets strict sub-component matching.
    pub fn with_strict_matching(mut self, strict: bool) -> Self {
        self.strict_sub_component_matching = strict;
        self
    }

    /// Sets the grouping mode.
    pub fn with_grouping(mut self, grouping: GroupingMode) -> Self {
        self.grouping = grouping;
        self
    }

    /// Lets collected locked entries reserve their unit.
    pub fn with_reserved_locked_items(mut self, reserve: bool) -> Self {
        self.reserve_locked_items = reserve;
        self
    }

    /// Sets the fixed part of the procurement iteration budget.
    pub fn with_iteration_buffer(mut self, buffer: u64) -> Self {
        self.secondary.iteration_buffer = buffer;
        self
    }

    /// Sets how many pending solves the queue holds.
    pub fn with_queue_backlog(mut self, backlog: usize) -> Self {
        self.queue.backlog = backlog;
        self
    }

    pub fn with_weights(mut self, weights: DirectWeightsConfig) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_procurement_weights(mut self, weights: ProcurementWeightsConfig) -> Self {
        self.procurement_weights = weights;
        self
    }
}

/// How demand entries from different configurations are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// One unit may serve one entry from each configuration.
    #[default]
    Shared,

    /// Every configuration needs its own unit; no relaxation.
    Exclusive,
}

/// Direct slot tier weights. Unset values fall back to the solver defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DirectWeightsConfig {
    pub manual_override: Option<i64>,
    pub common_sub_component: Option<i64>,
    pub member_count: Option<i64>,
    pub member_count_cap: Option<usize>,
    pub origin_priority: Option<i64>,
}

/// Procurement tier weights. Unset values fall back to the solver defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcurementWeightsConfig {
    pub offset: Option<i64>,
    pub completion: Option<i64>,
    pub depth: Option<i64>,
    pub group_size: Option<i64>,
    pub group_size_cap: Option<usize>,
    pub remaining: Option<i64>,
    pub origin_priority: Option<i64>,
}

/// Procurement engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SecondaryConfig {
    /// Added to `n(n+1)/2` to form the iteration budget.
    #[serde(default = "default_iteration_buffer")]
    pub iteration_buffer: u64,
}

fn default_iteration_buffer() -> u64 {
    10
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            iteration_buffer: default_iteration_buffer(),
        }
    }
}

/// Solve queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QueueConfig {
    /// Pending requests kept before the oldest is superseded.
    #[serde(default = "default_backlog")]
    pub backlog: usize,
}

fn default_backlog() -> usize {
    4
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            backlog: default_backlog(),
        }
    }
}
