//! TOML configuration for the aligner binary.
//!
//! ```toml
//! [scoring]
//! match_score = 1.0
//! mismatch = -1.0
//! gap_open = -2.0
//! gap_extend = -1.0
//! mode = "local"
//!
//! [output]
//! line_width = 60
//! threads = 4
//! ```

use crate::{AlignerError, ScoringConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Alignment columns per wrapped block.
    pub line_width: usize,
    /// Worker threads for batch alignment.
    pub threads: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            threads: 1,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, AlignerError> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| AlignerError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, AlignerError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AlignerError::ConfigFile(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, AlignerError> {
        toml::to_string_pretty(self).map_err(|e| AlignerError::ConfigFile(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AlignerError> {
        self.scoring.validate()?;
        if self.output.line_width == 0 {
            return Err(AlignerError::ConfigFile(
                "output.line_width must be at least 1".to_string(),
            ));
        }
        if self.output.threads == 0 {
            return Err(AlignerError::ConfigFile(
                "output.threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
