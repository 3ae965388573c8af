use crate::traceback::AlignmentResult;
use crate::GAP_SYMBOL;

pub const MATCH_MARKER: char = '|';
pub const MISMATCH_MARKER: char = '.';
pub const GAP_MARKER: char = ' ';

/// Classification of a single alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Match,
    Mismatch,
    Gap,
}

impl ColumnClass {
    pub fn classify(a: u8, b: u8) -> Self {
        if a == GAP_SYMBOL || b == GAP_SYMBOL {
            ColumnClass::Gap
        } else if a == b {
            ColumnClass::Match
        } else {
            ColumnClass::Mismatch
        }
    }

    pub fn marker(self) -> char {
        match self {
            ColumnClass::Match => MATCH_MARKER,
            ColumnClass::Mismatch => MISMATCH_MARKER,
            ColumnClass::Gap => GAP_MARKER,
        }
    }

    /// 1 for a match, 0 for a mismatch, nothing for a gap column.
    pub fn profile_value(self) -> Option<u8> {
        match self {
            ColumnClass::Match => Some(1),
            ColumnClass::Mismatch => Some(0),
            ColumnClass::Gap => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignmentStats {
    pub alignment_length: usize,
    pub matches: usize,
    pub mismatches: usize,
    /// Gap-bearing columns.
    pub gap_count: usize,
    pub percent_identity_with_gaps: f64,
    pub percent_identity_no_gaps: f64,
    pub per_position_profile: Vec<Option<u8>>,
    pub match_line: String,
}

impl AlignmentStats {
    /// Profile with gap columns removed, in alignment order.
    pub fn comparable_positions(&self) -> Vec<u8> {
        self.per_position_profile.iter().flatten().copied().collect()
    }
}

/// Column statistics of an aligned pair.
pub fn compute_stats(result: &AlignmentResult) -> AlignmentStats {
    stats_for_columns(&result.aligned_seq1, &result.aligned_seq2)
}

/// Column statistics of two gap-padded strands.
///
/// Columns past the end of the shorter strand are ignored.
pub fn stats_for_columns(aligned_a: &[u8], aligned_b: &[u8]) -> AlignmentStats {
    let mut stats = AlignmentStats::default();
    let columns = aligned_a.len().min(aligned_b.len());
    stats.per_position_profile.reserve(columns);
    stats.match_line.reserve(columns);

    for (&a, &b) in aligned_a.iter().zip(aligned_b) {
        let class = ColumnClass::classify(a, b);
        match class {
            ColumnClass::Match => stats.matches += 1,
            ColumnClass::Mismatch => stats.mismatches += 1,
            ColumnClass::Gap => stats.gap_count += 1,
        }
        stats.per_position_profile.push(class.profile_value());
        stats.match_line.push(class.marker());
    }

    stats.alignment_length = columns;
    stats.percent_identity_with_gaps = percent(stats.matches, columns);
    stats.percent_identity_no_gaps = percent(stats.matches, columns - stats.gap_count);
    stats
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
