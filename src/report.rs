use crate::stats::AlignmentStats;
use crate::traceback::AlignmentResult;

/// Wraps the aligned pair and its match line into blocks of `width`
/// columns: strand A, match line, strand B, then a blank separator line
/// between blocks.
pub fn alignment_blocks(result: &AlignmentResult, stats: &AlignmentStats, width: usize) -> Vec<String> {
    let width = width.max(1);
    let markers: Vec<char> = stats.match_line.chars().collect();
    let mut lines = Vec::new();

    for (block, (a, b)) in result
        .aligned_seq1
        .chunks(width)
        .zip(result.aligned_seq2.chunks(width))
        .enumerate()
    {
        if block > 0 {
            lines.push(String::new());
        }
        let start = block * width;
        let end = (start + a.len()).min(markers.len());
        lines.push(String::from_utf8_lossy(a).into_owned());
        lines.push(markers[start.min(end)..end].iter().collect());
        lines.push(String::from_utf8_lossy(b).into_owned());
    }
    lines
}

/// Plain-text record of the aligned pair and its score, suitable for
/// saving next to the inputs.
pub fn export_record(result: &AlignmentResult) -> String {
    format!(
        ">seq1_aligned\n{}\n>seq2_aligned\n{}\n# score={}\n",
        result.aligned_a(),
        result.aligned_b(),
        result.score
    )
}

pub fn summary_lines(result: &AlignmentResult, stats: &AlignmentStats) -> Vec<String> {
    let comparable = stats.comparable_positions();
    let identical = comparable.iter().filter(|&&value| value == 1).count();
    let mut lines = vec![
        format!("Mode:                   {}", result.mode),
        format!("Alignment length:       {}", stats.alignment_length),
        format!("% Identity (no gaps):   {:.2}%", stats.percent_identity_no_gaps),
        format!("% Identity (with gaps): {:.2}%", stats.percent_identity_with_gaps),
        format!("Gaps:                   {}", stats.gap_count),
        format!(
            "Matches / mismatches:   {} / {}",
            identical,
            comparable.len() - identical
        ),
        format!("Score:                  {:.2}", result.score),
    ];
    if let (Some((a_start, a_end)), Some((b_start, b_end))) = (result.bounds_a(), result.bounds_b()) {
        lines.push(format!(
            "Region:                 A {}-{}, B {}-{}",
            a_start + 1,
            a_end + 1,
            b_start + 1,
            b_end + 1
        ));
    }
    lines
}
