use crate::{AlignerError, MAX_MATRIX_CELLS};

/// DP state a cell value (or a predecessor) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// `M`: ends with A[i] aligned to B[j].
    Diagonal,
    /// `Ix`: ends with A[i] against a gap.
    GapInB,
    /// `Iy`: ends with B[j] against a gap.
    GapInA,
}

// Per-cell origin tag layout:
//   bits 0-1  predecessor state of M
//   bit  2    Ix extended from Ix (else opened from M)
//   bit  3    Iy extended from Iy (else opened from M)
const M_FROM_MASK: u8 = 0b0011;
const IX_EXTEND: u8 = 0b0100;
const IY_EXTEND: u8 = 0b1000;

fn encode_state(state: State) -> u8 {
    match state {
        State::Diagonal => 0,
        State::GapInB => 1,
        State::GapInA => 2,
    }
}

/// Three score arenas of `(n + 1) x (m + 1)` cells stored row-major in flat
/// vectors, plus one origin byte per cell so traceback never recomputes
/// the recurrence.
pub struct DpMatrices {
    rows: usize,
    cols: usize,
    m: Vec<f64>,
    ix: Vec<f64>,
    iy: Vec<f64>,
    origin: Vec<u8>,
}

impl DpMatrices {
    /// Pre-sizes all arenas for sequences of length `n` and `m`, filled with
    /// `fill`.
    pub fn new(n: usize, m: usize, fill: f64) -> Result<Self, AlignerError> {
        let too_large = || AlignerError::SequenceTooLarge(n.max(m));
        let rows = n.checked_add(1).ok_or_else(too_large)?;
        let cols = m.checked_add(1).ok_or_else(too_large)?;
        let cells = rows
            .checked_mul(cols)
            .filter(|&cells| cells <= MAX_MATRIX_CELLS)
            .ok_or_else(too_large)?;

        Ok(Self {
            rows,
            cols,
            m: vec![fill; cells],
            ix: vec![fill; cells],
            iy: vec![fill; cells],
            origin: vec![0; cells],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, state: State, row: usize, col: usize) -> f64 {
        let idx = self.index(row, col);
        match state {
            State::Diagonal => self.m[idx],
            State::GapInB => self.ix[idx],
            State::GapInA => self.iy[idx],
        }
    }

    #[inline]
    pub fn set(&mut self, state: State, row: usize, col: usize, value: f64) {
        let idx = self.index(row, col);
        match state {
            State::Diagonal => self.m[idx] = value,
            State::GapInB => self.ix[idx] = value,
            State::GapInA => self.iy[idx] = value,
        }
    }

    /// Best of the three states at a cell, preferring M, then Ix, then Iy.
    #[inline]
    pub fn best_at(&self, row: usize, col: usize) -> (f64, State) {
        let idx = self.index(row, col);
        best_of(self.m[idx], self.ix[idx], self.iy[idx])
    }

    pub fn set_m_origin(&mut self, row: usize, col: usize, from: State) {
        let idx = self.index(row, col);
        self.origin[idx] = (self.origin[idx] & !M_FROM_MASK) | encode_state(from);
    }

    pub fn set_ix_extended(&mut self, row: usize, col: usize, extended: bool) {
        let idx = self.index(row, col);
        if extended {
            self.origin[idx] |= IX_EXTEND;
        } else {
            self.origin[idx] &= !IX_EXTEND;
        }
    }

    pub fn set_iy_extended(&mut self, row: usize, col: usize, extended: bool) {
        let idx = self.index(row, col);
        if extended {
            self.origin[idx] |= IY_EXTEND;
        } else {
            self.origin[idx] &= !IY_EXTEND;
        }
    }

    /// State of the predecessor cell the value of `state` at `(row, col)`
    /// was derived from.
    pub fn predecessor(&self, state: State, row: usize, col: usize) -> Result<State, AlignerError> {
        let tag = self.origin[self.index(row, col)];
        match state {
            State::Diagonal => match tag & M_FROM_MASK {
                0 => Ok(State::Diagonal),
                1 => Ok(State::GapInB),
                2 => Ok(State::GapInA),
                other => Err(AlignerError::TracebackError(format!(
                    "invalid origin tag {} at ({}, {})",
                    other, row, col
                ))),
            },
            State::GapInB if tag & IX_EXTEND != 0 => Ok(State::GapInB),
            State::GapInA if tag & IY_EXTEND != 0 => Ok(State::GapInA),
            State::GapInB | State::GapInA => Ok(State::Diagonal),
        }
    }
}

/// Maximum of three state values with the fixed preference M > Ix > Iy.
#[inline]
pub fn best_of(m: f64, ix: f64, iy: f64) -> (f64, State) {
    let mut best = (m, State::Diagonal);
    if ix > best.0 {
        best = (ix, State::GapInB);
    }
    if iy > best.0 {
        best = (iy, State::GapInA);
    }
    best
}
