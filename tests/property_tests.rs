//! Property-based tests for alignment invariants.

use pairwise_aligner::{align, compute_stats, AlignmentMode, ScoringConfig, Sequence, GAP_SYMBOL};
use proptest::prelude::*;

fn dna() -> impl Strategy<Value = String> {
    "[ACGT]{1,30}"
}

fn protein() -> impl Strategy<Value = String> {
    "[ACDEFGHIKLMNPQRSTVWY]{1,25}"
}

fn mode() -> impl Strategy<Value = AlignmentMode> {
    prop_oneof![Just(AlignmentMode::Global), Just(AlignmentMode::Local)]
}

/// Integer-valued scores with the usual signs.
fn scoring() -> impl Strategy<Value = ScoringConfig> {
    (1..=5i32, -5..=0i32, -10..=-1i32, -5..=-1i32).prop_map(|(m, x, o, e)| {
        ScoringConfig::new(m as f64, x as f64, o as f64, e as f64)
    })
}

fn ungapped(aligned: &[u8]) -> Vec<u8> {
    aligned.iter().copied().filter(|&b| b != GAP_SYMBOL).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn strands_are_equal_length_and_reconstruct_inputs(
        a in dna(),
        b in dna(),
        mode in mode(),
        config in scoring(),
    ) {
        let (a, b) = (Sequence::from(a.as_str()), Sequence::from(b.as_str()));
        let result = align(&a, &b, &config.with_mode(mode)).unwrap();

        prop_assert_eq!(result.aligned_seq1.len(), result.aligned_seq2.len());
        prop_assert_eq!(result.operations.len(), result.len());

        let (sa, sb) = (result.start_position, result.end_position);
        prop_assert_eq!(ungapped(&result.aligned_seq1), a.as_bytes()[sa.i..sb.i].to_vec());
        prop_assert_eq!(ungapped(&result.aligned_seq2), b.as_bytes()[sa.j..sb.j].to_vec());

        if mode == AlignmentMode::Global {
            prop_assert_eq!((sa.i, sa.j), (0, 0));
            prop_assert_eq!((sb.i, sb.j), (a.len(), b.len()));
            prop_assert!(result.len() >= a.len().max(b.len()));
        } else {
            prop_assert!(result.score >= 0.0);
        }
    }

    #[test]
    fn no_column_pairs_two_gaps(a in protein(), b in protein(), mode in mode()) {
        let config = ScoringConfig::default().with_mode(mode);
        let result = align(&a.as_str().into(), &b.as_str().into(), &config).unwrap();
        for (x, y) in result.aligned_seq1.iter().zip(&result.aligned_seq2) {
            prop_assert!(!(*x == GAP_SYMBOL && *y == GAP_SYMBOL));
        }
    }

    #[test]
    fn identities_are_bounded_and_ordered(
        a in dna(),
        b in dna(),
        mode in mode(),
        config in scoring(),
    ) {
        let result = align(&a.as_str().into(), &b.as_str().into(), &config.with_mode(mode)).unwrap();
        let stats = compute_stats(&result);

        prop_assert!((0.0..=100.0).contains(&stats.percent_identity_with_gaps));
        prop_assert!((0.0..=100.0).contains(&stats.percent_identity_no_gaps));
        if stats.gap_count > 0 {
            prop_assert!(stats.percent_identity_with_gaps <= stats.percent_identity_no_gaps);
        }
        prop_assert_eq!(stats.match_line.chars().count(), result.len());
        prop_assert_eq!(stats.matches + stats.mismatches + stats.gap_count, result.len());
    }

    #[test]
    fn identical_global_pair_is_perfect(a in dna(), config in scoring()) {
        let seq = Sequence::from(a.as_str());
        let result = align(&seq, &seq, &config).unwrap();
        let stats = compute_stats(&result);

        prop_assert_eq!(result.score, config.match_score * seq.len() as f64);
        prop_assert_eq!(stats.percent_identity_with_gaps, 100.0);
        prop_assert_eq!(stats.percent_identity_no_gaps, 100.0);
    }

    #[test]
    fn swapping_inputs_keeps_the_score(
        a in dna(),
        b in dna(),
        mode in mode(),
        config in scoring(),
    ) {
        let config = config.with_mode(mode);
        let (a, b) = (Sequence::from(a.as_str()), Sequence::from(b.as_str()));
        let forward = align(&a, &b, &config).unwrap();
        let reverse = align(&b, &a, &config).unwrap();
        prop_assert_eq!(forward.score, reverse.score);
        prop_assert_eq!(forward.len() == 0, reverse.len() == 0);
    }

    #[test]
    fn normalization_is_idempotent(raw in "[ -~\\n\\t]{0,60}") {
        let once = Sequence::from(raw.as_str());
        let twice = Sequence::from(once.to_string().as_str());
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.as_bytes().iter().all(u8::is_ascii_uppercase));
    }
}
