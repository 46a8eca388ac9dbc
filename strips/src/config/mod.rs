//! Search configuration
//!
//! Read from TOML and optionally overridden from `STRIPS_*` environment
//! variables. The defaults place no limit on the search.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StripsError, StripsResult};

/// Limits and logging switches for the breadth-first search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Nodes at this level are goal-tested but not expanded. Hitting the cap only
    /// counts as a limit when a capped node had applicable actions.
    pub max_level: Option<usize>,
    /// Stop after this many node expansions
    pub max_expansions: Option<usize>,
    /// Log every change of exploration level
    pub log_progress: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_level: None,
            max_expansions: None,
            log_progress: true,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(content: &str) -> StripsResult<Self> {
        toml::from_str(content).map_err(|e| StripsError::Config(e.to_string()))
    }

    /// Create a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> StripsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Override fields from `STRIPS_MAX_LEVEL`, `STRIPS_MAX_EXPANSIONS` and
    /// `STRIPS_LOG_PROGRESS`
    pub fn with_env_overrides(self) -> StripsResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> StripsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("STRIPS_MAX_LEVEL") {
            self.max_level = Some(parse_var("STRIPS_MAX_LEVEL", &value)?);
        }
        if let Some(value) = lookup("STRIPS_MAX_EXPANSIONS") {
            self.max_expansions = Some(parse_var("STRIPS_MAX_EXPANSIONS", &value)?);
        }
        if let Some(value) = lookup("STRIPS_LOG_PROGRESS") {
            self.log_progress = parse_var("STRIPS_LOG_PROGRESS", &value)?;
        }
        Ok(self)
    }

    pub fn with_max_level(mut self, level: usize) -> Self {
        self.max_level = Some(level);
        self
    }

    pub fn with_max_expansions(mut self, expansions: usize) -> Self {
        self.max_expansions = Some(expansions);
        self
    }

    pub fn with_log_progress(mut self, log: bool) -> Self {
        self.log_progress = log;
        self
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> StripsResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| StripsError::Config(format!("invalid value for {}: '{}'", key, value)))
}
