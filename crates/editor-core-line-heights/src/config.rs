//! Line height configuration.
//!
//! Hosts usually forward their editor `lineHeight` setting here. The payload is JSON, e.g.
//! `{"default_height": 22}`; missing fields fall back to their defaults.

use crate::error::LineHeightError;
use serde::{Deserialize, Serialize};

/// Default line height (in pixels) used when a host does not specify one.
pub const DEFAULT_LINE_HEIGHT: u32 = 20;

/// Configuration of a [`LineHeightIndex`](crate::LineHeightIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineHeightConfig {
    /// Height of every line without an override.
    pub default_height: u32,
}

impl LineHeightConfig {
    /// Create a config with the given default line height.
    pub fn new(default_height: u32) -> Self {
        Self { default_height }
    }

    /// Parse and validate a JSON config payload.
    pub fn from_json_str(json: &str) -> Result<Self, LineHeightError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config can drive an index.
    pub fn validate(&self) -> Result<(), LineHeightError> {
        if self.default_height == 0 {
            return Err(LineHeightError::ZeroDefaultHeight);
        }
        Ok(())
    }
}

impl Default for LineHeightConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_HEIGHT)
    }
}
