//! Pairwise sequence alignment with affine gap penalties.
//!
//! Global (Needleman-Wunsch) and local (Smith-Waterman) alignment over
//! three DP state matrices (Gotoh), one reproducible traceback per call and
//! column statistics over the aligned pair.
//!
//! ```
//! use pairwise_aligner::{align, compute_stats, AlignmentMode, ScoringConfig, Sequence};
//!
//! let a = Sequence::from("AAAGATTACAAA");
//! let b = Sequence::from("gattaca");
//! let config = ScoringConfig::default().with_mode(AlignmentMode::Local);
//!
//! let result = align(&a, &b, &config).unwrap();
//! assert_eq!(result.aligned_a(), "GATTACA");
//! assert_eq!(result.bounds_a(), Some((3, 9)));
//!
//! let stats = compute_stats(&result);
//! assert_eq!(stats.percent_identity_no_gaps, 100.0);
//! ```

use log::debug;
use thiserror::Error;

pub mod alignment_mode;
pub mod batch;
pub mod config;
pub mod matrix;
pub mod report;
pub mod scoring;
pub mod sequence;
pub mod stats;
pub mod traceback;

pub use alignment_mode::AlignmentMode;
pub use batch::{pair_records, BatchAligner};
pub use config::{AppConfig, OutputConfig};
pub use scoring::ScoringConfig;
pub use sequence::Sequence;
pub use stats::{compute_stats, AlignmentStats, ColumnClass};
pub use traceback::{AlignmentResult, Position, TracebackOperation};

use matrix::{best_of, DpMatrices, State};
use traceback::Traceback;

// Scoring defaults of the interactive aligner
pub const DEFAULT_MATCH: f64 = 2.0;
pub const DEFAULT_MISMATCH: f64 = -1.0;
pub const DEFAULT_GAP_OPEN: f64 = -5.0;
pub const DEFAULT_GAP_EXTEND: f64 = -1.0;

pub const GAP_SYMBOL: u8 = b'-';

/// Upper bound on `(n + 1) * (m + 1)` cells allocated per alignment.
pub const MAX_MATRIX_CELLS: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Sequence {0} is empty after normalization")]
    EmptySequence(&'static str),
    #[error("Sequence too large: {0}")]
    SequenceTooLarge(usize),
    #[error("Cannot pair {0} records of A with {1} records of B")]
    RecordCountMismatch(usize, usize),
    #[error("Invalid scoring parameter {field}: {value}")]
    InvalidScoring { field: &'static str, value: f64 },
    #[error("Configuration error: {0}")]
    ConfigFile(String),
    #[error("Traceback error: {0}")]
    TracebackError(String),
    #[error("Worker error: {0}")]
    WorkerError(String),
}

impl AlignerError {
    /// True for errors caused by the input sequences rather than the
    /// configuration or the engine itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AlignerError::EmptySequence(_)
                | AlignerError::SequenceTooLarge(_)
                | AlignerError::RecordCountMismatch(..)
        )
    }
}

/// Aligns `seq_a` against `seq_b` under `config`.
pub fn align(
    seq_a: &Sequence,
    seq_b: &Sequence,
    config: &ScoringConfig,
) -> Result<AlignmentResult, AlignerError> {
    Aligner::new(*config)?.align(seq_a, seq_b)
}

/// A validated scoring configuration ready to align any number of pairs.
#[derive(Debug, Clone)]
pub struct Aligner {
    config: ScoringConfig,
}

impl Aligner {
    pub fn new(config: ScoringConfig) -> Result<Self, AlignerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_mode(mut self, mode: AlignmentMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn align(&self, seq_a: &Sequence, seq_b: &Sequence) -> Result<AlignmentResult, AlignerError> {
        if seq_a.is_empty() {
            return Err(AlignerError::EmptySequence("A"));
        }
        if seq_b.is_empty() {
            return Err(AlignerError::EmptySequence("B"));
        }

        let a = seq_a.as_bytes();
        let b = seq_b.as_bytes();
        debug!(
            "{} alignment of {}x{} ({} cells)",
            self.config.mode,
            a.len(),
            b.len(),
            (a.len() + 1).saturating_mul(b.len() + 1)
        );

        let result = match self.config.mode {
            AlignmentMode::Global => self.align_global(a, b),
            AlignmentMode::Local => self.align_local(a, b),
        }?;

        debug!(
            "score {} over {} columns, A[{}..{}] B[{}..{}]",
            result.score,
            result.len(),
            result.start_position.i,
            result.end_position.i,
            result.start_position.j,
            result.end_position.j
        );
        Ok(result)
    }

    fn align_global(&self, a: &[u8], b: &[u8]) -> Result<AlignmentResult, AlignerError> {
        let (n, m) = (a.len(), b.len());
        let mut dp = DpMatrices::new(n, m, f64::NEG_INFINITY)?;

        // Leading gap runs along row and column 0
        dp.set(State::Diagonal, 0, 0, 0.0);
        for i in 1..=n {
            dp.set(State::GapInB, i, 0, self.config.gap_cost(i));
            dp.set_ix_extended(i, 0, i > 1);
        }
        for j in 1..=m {
            dp.set(State::GapInA, 0, j, self.config.gap_cost(j));
            dp.set_iy_extended(0, j, j > 1);
        }

        self.fill(&mut dp, a, b, false);

        let (score, state) = dp.best_at(n, m);
        Traceback::new(&dp, a, b, AlignmentMode::Global).reconstruct_alignment(
            Position::new(n, m),
            state,
            score,
        )
    }

    fn align_local(&self, a: &[u8], b: &[u8]) -> Result<AlignmentResult, AlignerError> {
        let (n, m) = (a.len(), b.len());
        let mut dp = DpMatrices::new(n, m, 0.0)?;
        let best = self.fill(&mut dp, a, b, true);

        match best {
            Some((score, end, state)) => Traceback::new(&dp, a, b, AlignmentMode::Local)
                .reconstruct_alignment(end, state, score),
            None => {
                debug!("no positive-scoring local alignment");
                Ok(AlignmentResult::empty(AlignmentMode::Local))
            }
        }
    }

    /// Runs the three-state recurrence over every interior cell.
    ///
    /// With `floor` set every state is clamped at zero and the first
    /// strictly best positive cell (row-major, M before Ix before Iy) is
    /// returned.
    fn fill(
        &self,
        dp: &mut DpMatrices,
        a: &[u8],
        b: &[u8],
        floor: bool,
    ) -> Option<(f64, Position, State)> {
        let ScoringConfig {
            gap_open,
            gap_extend,
            ..
        } = self.config;
        let mut best: Option<(f64, Position, State)> = None;

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let (diag, from) = dp.best_at(i - 1, j - 1);
                let mut m = diag + self.config.substitution(a[i - 1], b[j - 1]);

                let open = dp.get(State::Diagonal, i - 1, j) + gap_open;
                let extend = dp.get(State::GapInB, i - 1, j) + gap_extend;
                let ix_extended = extend > open;
                let mut ix = if ix_extended { extend } else { open };

                let open = dp.get(State::Diagonal, i, j - 1) + gap_open;
                let extend = dp.get(State::GapInA, i, j - 1) + gap_extend;
                let iy_extended = extend > open;
                let mut iy = if iy_extended { extend } else { open };

                if floor {
                    m = m.max(0.0);
                    ix = ix.max(0.0);
                    iy = iy.max(0.0);
                }

                dp.set(State::Diagonal, i, j, m);
                dp.set(State::GapInB, i, j, ix);
                dp.set(State::GapInA, i, j, iy);
                dp.set_m_origin(i, j, from);
                dp.set_ix_extended(i, j, ix_extended);
                dp.set_iy_extended(i, j, iy_extended);

                if floor {
                    let (value, state) = best_of(m, ix, iy);
                    let current = best.map_or(0.0, |(score, _, _)| score);
                    if value > current {
                        best = Some((value, Position::new(i, j), state));
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> ScoringConfig {
        ScoringConfig::new(1.0, -1.0, -2.0, -1.0)
    }

    #[test]
    fn test_empty_sequence_is_input_error() {
        let empty = Sequence::from("");
        let other = Sequence::from("ACGT");
        for mode in [AlignmentMode::Global, AlignmentMode::Local] {
            let config = textbook().with_mode(mode);
            let err = align(&empty, &other, &config).unwrap_err();
            assert!(matches!(err, AlignerError::EmptySequence("A")));
            assert!(err.is_input_error());
            let err = align(&other, &empty, &config).unwrap_err();
            assert!(matches!(err, AlignerError::EmptySequence("B")));
        }
    }

    #[test]
    fn test_non_finite_config_rejected_before_alignment() {
        let config = ScoringConfig::new(f64::INFINITY, -1.0, -2.0, -1.0);
        let err = align(&Sequence::from("A"), &Sequence::from("A"), &config).unwrap_err();
        assert!(matches!(err, AlignerError::InvalidScoring { .. }));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_global_gattaca() {
        let result = align(
            &Sequence::from("GATTACA"),
            &Sequence::from("GCATGCU"),
            &textbook(),
        )
        .unwrap();
        assert_eq!(result.score, -1.0);
        assert_eq!(result.aligned_a(), "GATTACA");
        assert_eq!(result.aligned_b(), "GCATGCU");
        assert_eq!(result.bounds_a(), Some((0, 6)));
        assert_eq!(result.bounds_b(), Some((0, 6)));
    }

    #[test]
    fn test_global_opens_single_gap_run() {
        let config = ScoringConfig::default();
        let result = align(
            &Sequence::from("ACGTTTACGT"),
            &Sequence::from("ACGTACGT"),
            &config,
        )
        .unwrap();
        assert_eq!(result.aligned_a(), "ACGTTTACGT");
        assert_eq!(result.aligned_b(), "ACG--TACGT");
        // 8 matches, one gap of length 2
        assert_eq!(result.score, 8.0 * 2.0 + config.gap_cost(2));
    }

    #[test]
    fn test_global_trailing_gap() {
        let result = align(&Sequence::from("A"), &Sequence::from("ACGT"), &ScoringConfig::default())
            .unwrap();
        assert_eq!(result.aligned_a(), "A---");
        assert_eq!(result.aligned_b(), "ACGT");
        assert_eq!(result.score, -5.0);
        assert_eq!(
            result.operations,
            vec![
                TracebackOperation::Match,
                TracebackOperation::Insertion,
                TracebackOperation::Insertion,
                TracebackOperation::Insertion,
            ]
        );
    }

    #[test]
    fn test_local_recovers_embedded_region() {
        let config = textbook().with_mode(AlignmentMode::Local);
        let result = align(
            &Sequence::from("AAAGATTACAAA"),
            &Sequence::from("GATTACA"),
            &config,
        )
        .unwrap();
        assert_eq!(result.score, 7.0);
        assert_eq!(result.aligned_a(), "GATTACA");
        assert_eq!(result.aligned_b(), "GATTACA");
        assert_eq!(result.bounds_a(), Some((3, 9)));
        assert_eq!(result.bounds_b(), Some((0, 6)));
    }

    #[test]
    fn test_local_without_positive_cell_is_empty() {
        let config = ScoringConfig::default().with_mode(AlignmentMode::Local);
        let result = align(&Sequence::from("AAA"), &Sequence::from("CCC"), &config).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.bounds_a(), None);
    }

    #[test]
    fn test_local_protein_fragment() {
        let config = ScoringConfig::default().with_mode(AlignmentMode::Local);
        let result = align(
            &Sequence::from("HEAGAWGHEE"),
            &Sequence::from("PAWHEAE"),
            &config,
        )
        .unwrap();
        assert_eq!(result.score, 6.0);
        assert_eq!(result.aligned_a(), "HEA");
        assert_eq!(result.bounds_a(), Some((0, 2)));
        assert_eq!(result.bounds_b(), Some((3, 5)));
    }

    #[test]
    fn test_aligner_with_mode_switches_recurrence() {
        let aligner = Aligner::new(ScoringConfig::default()).unwrap();
        let a = Sequence::from("TTTTACGTACGTTTTT");
        let b = Sequence::from("GGACGTACGTGG");

        let global = aligner.align(&a, &b).unwrap();
        assert_eq!(global.aligned_a().replace('-', ""), a.to_string());

        let aligner = aligner.with_mode(AlignmentMode::Local);
        assert_eq!(aligner.config().mode, AlignmentMode::Local);
        assert_eq!(aligner.config().gap_open, DEFAULT_GAP_OPEN);
        let local = aligner.align(&a, &b).unwrap();
        assert_eq!(local.score, 16.0);
        assert_eq!(local.aligned_a(), "ACGTACGT");
        assert_eq!(local.bounds_a(), Some((4, 11)));
        assert_eq!(local.bounds_b(), Some((2, 9)));
    }
}
