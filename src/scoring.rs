use crate::alignment_mode::AlignmentMode;
use crate::{AlignerError, DEFAULT_GAP_EXTEND, DEFAULT_GAP_OPEN, DEFAULT_MATCH, DEFAULT_MISMATCH};
use log::warn;
use serde::{Deserialize, Serialize};

/// Match/mismatch scores, affine gap penalties and the alignment mode.
///
/// Penalties are expressed as signed scores and added as-is: a gap of
/// length `k` contributes `gap_open + (k - 1) * gap_extend`.
///
/// ```
/// use pairwise_aligner::{AlignmentMode, ScoringConfig};
///
/// let config = ScoringConfig::new(1.0, -1.0, -2.0, -1.0).with_mode(AlignmentMode::Local);
/// assert_eq!(config.substitution(b'A', b'A'), 1.0);
/// assert_eq!(config.gap_cost(3), -4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub match_score: f64,
    pub mismatch: f64,
    pub gap_open: f64,
    pub gap_extend: f64,
    pub mode: AlignmentMode,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            gap_open: DEFAULT_GAP_OPEN,
            gap_extend: DEFAULT_GAP_EXTEND,
            mode: AlignmentMode::Global,
        }
    }
}

impl ScoringConfig {
    pub fn new(match_score: f64, mismatch: f64, gap_open: f64, gap_extend: f64) -> Self {
        Self {
            match_score,
            mismatch,
            gap_open,
            gap_extend,
            mode: AlignmentMode::Global,
        }
    }

    pub fn with_mode(mut self, mode: AlignmentMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }

    /// Total contribution of a gap run of `len` positions.
    pub fn gap_cost(&self, len: usize) -> f64 {
        match len {
            0 => 0.0,
            k => self.gap_open + (k - 1) as f64 * self.gap_extend,
        }
    }

    /// Rejects non-finite parameters.
    ///
    /// The relative severity of `gap_open` and `gap_extend` is left to the
    /// caller; an extension harsher than an opening is only reported.
    pub fn validate(&self) -> Result<(), AlignerError> {
        let fields = [
            ("match_score", self.match_score),
            ("mismatch", self.mismatch),
            ("gap_open", self.gap_open),
            ("gap_extend", self.gap_extend),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(AlignerError::InvalidScoring { field, value });
            }
        }

        if self.gap_extend < self.gap_open {
            warn!(
                "gap_extend ({}) is more severe than gap_open ({}); long gaps will be fragmented",
                self.gap_extend, self.gap_open
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_interactive_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.match_score, 2.0);
        assert_eq!(config.mismatch, -1.0);
        assert_eq!(config.gap_open, -5.0);
        assert_eq!(config.gap_extend, -1.0);
        assert_eq!(config.mode, AlignmentMode::Global);
    }

    #[test]
    fn test_substitution() {
        let config = ScoringConfig::new(5.0, -4.0, -10.0, -1.0);
        assert_eq!(config.substitution(b'G', b'G'), 5.0);
        assert_eq!(config.substitution(b'G', b'C'), -4.0);
    }

    #[test]
    fn test_gap_cost_is_affine() {
        let config = ScoringConfig::new(1.0, -1.0, -2.0, -1.0);
        assert_eq!(config.gap_cost(0), 0.0);
        assert_eq!(config.gap_cost(1), -2.0);
        assert_eq!(config.gap_cost(4), -5.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = ScoringConfig::new(1.0, f64::NAN, -2.0, -1.0);
        match config.validate() {
            Err(AlignerError::InvalidScoring { field, .. }) => assert_eq!(field, "mismatch"),
            other => panic!("expected InvalidScoring, got {:?}", other),
        }

        let config = ScoringConfig::new(1.0, -1.0, -2.0, f64::NEG_INFINITY);
        assert!(matches!(
            config.validate(),
            Err(AlignerError::InvalidScoring { field: "gap_extend", .. })
        ));
    }

    #[test]
    fn test_validate_allows_unusual_gap_ordering() {
        // Extension harsher than opening is unusual but permitted.
        let config = ScoringConfig::new(1.0, -1.0, -1.0, -3.0);
        assert!(config.validate().is_ok());
    }
}
