use pairwise_aligner::{AlignmentMode, BatchAligner, ScoringConfig, Sequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sequences = vec![
        (Sequence::from("ACGTACGT"), Sequence::from("ACGTAGCT")),
        (Sequence::from("GGTTAACC"), Sequence::from("GGTTAACT")),
        (Sequence::from("HEAGAWGHEE"), Sequence::from("PAWHEAE")),
    ];

    let config = ScoringConfig::default().with_mode(AlignmentMode::Global);
    let mut batch = BatchAligner::new(4, config)?;

    let results = batch.align_all(sequences)?;

    for (i, result) in results.iter().enumerate() {
        println!("Alignment {}: Score = {}", i, result.score);
        println!("Sequence 1: {}", result.aligned_a());
        println!("Sequence 2: {}", result.aligned_b());
        println!();
    }

    Ok(())
}
