use pairwise_aligner::report::alignment_blocks;
use pairwise_aligner::{compute_stats, Aligner, AlignmentMode, ScoringConfig, Sequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seq1 = Sequence::from("AAAGATTACAAA");
    let seq2 = Sequence::from("GATTACA");

    let aligner = Aligner::new(ScoringConfig::new(1.0, -1.0, -2.0, -1.0))?;

    for mode in [AlignmentMode::Global, AlignmentMode::Local] {
        let result = aligner.clone().with_mode(mode).align(&seq1, &seq2)?;
        let stats = compute_stats(&result);

        println!("{} alignment, score {}", mode, result.score);
        for line in alignment_blocks(&result, &stats, 60) {
            println!("{}", line);
        }
        println!("Operations: {:?}", result.operations);
        println!();
    }

    Ok(())
}
