// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlatscanError, Result};
use crate::types::{EnhancementOptions, OutputSize};

/// Default inset used when no corner estimate is available.
pub const DEFAULT_CORNER_PADDING: f64 = 0.1;

/// Persistent scan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Size of the rectified page.
    pub output: OutputSize,
    /// Fractional inset for default corners (0.1 = 10% of each dimension).
    pub corner_padding: f64,
    /// Contrast/brightness applied after rectification.
    pub enhancement: EnhancementOptions,
    /// Whether the enhancer runs at all.
    pub enhance: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output: OutputSize::default(),
            corner_padding: DEFAULT_CORNER_PADDING,
            enhancement: EnhancementOptions::default(),
            enhance: true,
        }
    }
}

impl ScanConfig {
    /// Check every field a caller could have typed in.
    pub fn validate(&self) -> Result<()> {
        self.output.validate()?;
        self.enhancement.validate()?;
        if !(0.0..0.5).contains(&self.corner_padding) {
            return Err(FlatscanError::InvalidOption(format!(
                "corner_padding must be in [0, 0.5) (got {})",
                self.corner_padding
            )));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
