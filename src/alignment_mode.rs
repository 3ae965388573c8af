use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    #[default]
    Global, // Needleman-Wunsch
    Local,  // Smith-Waterman
}

impl AlignmentMode {
    pub fn is_local(self) -> bool {
        matches!(self, AlignmentMode::Local)
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentMode::Global => f.write_str("global"),
            AlignmentMode::Local => f.write_str("local"),
        }
    }
}

impl FromStr for AlignmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" | "nw" | "needleman-wunsch" => Ok(AlignmentMode::Global),
            "local" | "sw" | "smith-waterman" => Ok(AlignmentMode::Local),
            other => Err(format!("unknown alignment mode '{}'", other)),
        }
    }
}
