use crate::alignment_mode::AlignmentMode;
use crate::matrix::{DpMatrices, State};
use crate::{AlignerError, GAP_SYMBOL};

/// A 0-based cell coordinate: `i` indexes sequence A, `j` sequence B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Symbol of B against a gap in A.
    Insertion,
    /// Symbol of A against a gap in B.
    Deletion,
}

/// One optimal alignment of two sequences.
///
/// `start_position` is the first aligned index of A and B and
/// `end_position` is one past the last; for global alignments they span
/// both full sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    pub score: f64,
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
    pub start_position: Position,
    pub end_position: Position,
    pub mode: AlignmentMode,
}

impl AlignmentResult {
    pub(crate) fn empty(mode: AlignmentMode) -> Self {
        Self {
            score: 0.0,
            aligned_seq1: Vec::new(),
            aligned_seq2: Vec::new(),
            operations: Vec::new(),
            start_position: Position::default(),
            end_position: Position::default(),
            mode,
        }
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.aligned_seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_seq1.is_empty()
    }

    /// Inclusive `(start, end)` offsets of the aligned region of A.
    pub fn bounds_a(&self) -> Option<(usize, usize)> {
        inclusive(self.start_position.i, self.end_position.i)
    }

    /// Inclusive `(start, end)` offsets of the aligned region of B.
    pub fn bounds_b(&self) -> Option<(usize, usize)> {
        inclusive(self.start_position.j, self.end_position.j)
    }

    pub fn aligned_a(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq1).into_owned()
    }

    pub fn aligned_b(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq2).into_owned()
    }
}

fn inclusive(start: usize, end: usize) -> Option<(usize, usize)> {
    (end > start).then(|| (start, end - 1))
}

/// Walks the origin tags of a filled [`DpMatrices`] back from an end cell.
pub struct Traceback<'a> {
    matrix: &'a DpMatrices,
    seq1: &'a [u8],
    seq2: &'a [u8],
    mode: AlignmentMode,
}

impl<'a> Traceback<'a> {
    pub fn new(matrix: &'a DpMatrices, seq1: &'a [u8], seq2: &'a [u8], mode: AlignmentMode) -> Self {
        Self {
            matrix,
            seq1,
            seq2,
            mode,
        }
    }

    /// Rebuilds the path ending at `end` in `state`.
    ///
    /// Global traceback stops at the origin; local traceback stops once the
    /// next cell on the path holds a non-positive score.
    pub fn reconstruct_alignment(
        &self,
        end: Position,
        state: State,
        score: f64,
    ) -> Result<AlignmentResult, AlignerError> {
        if end.i >= self.matrix.rows() || end.j >= self.matrix.cols() {
            return Err(AlignerError::TracebackError(format!(
                "end cell ({}, {}) outside a {}x{} matrix",
                end.i,
                end.j,
                self.matrix.rows(),
                self.matrix.cols()
            )));
        }

        let local = self.mode.is_local();
        let capacity = end.i + end.j;
        let mut aligned_seq1 = Vec::with_capacity(capacity);
        let mut aligned_seq2 = Vec::with_capacity(capacity);
        let mut operations = Vec::with_capacity(capacity);

        let mut current = end;
        let mut state = state;

        loop {
            if !local && current.i == 0 && current.j == 0 {
                break;
            }

            let previous = self.matrix.predecessor(state, current.i, current.j)?;
            match state {
                State::Diagonal => {
                    if current.i == 0 || current.j == 0 {
                        return Err(self.unreachable(state, current));
                    }
                    let a = self.seq1[current.i - 1];
                    let b = self.seq2[current.j - 1];
                    aligned_seq1.push(a);
                    aligned_seq2.push(b);
                    operations.push(if a == b {
                        TracebackOperation::Match
                    } else {
                        TracebackOperation::Mismatch
                    });
                    current.i -= 1;
                    current.j -= 1;
                }
                State::GapInB => {
                    if current.i == 0 {
                        return Err(self.unreachable(state, current));
                    }
                    aligned_seq1.push(self.seq1[current.i - 1]);
                    aligned_seq2.push(GAP_SYMBOL);
                    operations.push(TracebackOperation::Deletion);
                    current.i -= 1;
                }
                State::GapInA => {
                    if current.j == 0 {
                        return Err(self.unreachable(state, current));
                    }
                    aligned_seq1.push(GAP_SYMBOL);
                    aligned_seq2.push(self.seq2[current.j - 1]);
                    operations.push(TracebackOperation::Insertion);
                    current.j -= 1;
                }
            }
            state = previous;

            if local && self.matrix.get(state, current.i, current.j) <= 0.0 {
                break;
            }
        }

        // Built backwards
        aligned_seq1.reverse();
        aligned_seq2.reverse();
        operations.reverse();

        Ok(AlignmentResult {
            score,
            aligned_seq1,
            aligned_seq2,
            operations,
            start_position: current,
            end_position: end,
            mode: self.mode,
        })
    }

    fn unreachable(&self, state: State, at: Position) -> AlignerError {
        AlignerError::TracebackError(format!(
            "{:?} step out of matrix bounds at ({}, {})",
            state, at.i, at.j
        ))
    }
}
