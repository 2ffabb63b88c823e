//! Matching configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file at all) yields the standard behavior.

use std::path::Path;

use serde::Deserialize;

use crate::error::{InsolvencyError, Result};

/// Confidence attached to every exact match.
pub const EXACT_MATCH_CONFIDENCE: f64 = 100.0;

/// Minimum hybrid score for a soft match unless configured otherwise.
pub const DEFAULT_SCORE_CUTOFF: f64 = 80.0;

/// Tunables for the matching engine.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Minimum hybrid score (inclusive) a client needs to be reported as a soft match.
    pub score_cutoff: f64,
    /// Keep at most this many soft candidates per announcement. `None` keeps all.
    pub soft_match_limit: Option<usize>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            soft_match_limit: None,
        }
    }
}

impl MatchConfig {
    /// Default configuration with a different cutoff.
    pub fn with_cutoff(score_cutoff: f64) -> Self {
        Self {
            score_cutoff,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| InsolvencyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.score_cutoff) {
            return Err(InsolvencyError::InvalidConfig(format!(
                "score_cutoff must be between 0 and 100, got {}",
                self.score_cutoff
            )));
        }
        if self.soft_match_limit == Some(0) {
            return Err(InsolvencyError::InvalidConfig(
                "soft_match_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
