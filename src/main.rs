use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use pairwise_aligner::report::{alignment_blocks, export_record, summary_lines};
use pairwise_aligner::{
    compute_stats, pair_records, Aligner, AlignmentMode, AlignmentResult, AppConfig, BatchAligner,
    Sequence,
};

/// Pairwise global (Needleman-Wunsch) or local (Smith-Waterman) alignment
/// with affine gap penalties.
#[derive(Debug, Parser)]
#[command(name = "pairwise-align", version, allow_negative_numbers = true)]
struct Cli {
    /// First sequence as literal text (DNA, RNA or protein)
    #[arg(
        long,
        conflicts_with = "file_a",
        required_unless_present_any = ["file_a", "dump_config"]
    )]
    seq_a: Option<String>,

    /// Second sequence as literal text
    #[arg(
        long,
        conflicts_with = "file_b",
        required_unless_present_any = ["file_b", "dump_config"]
    )]
    seq_b: Option<String>,

    /// FASTA or plain-text file holding one or more first sequences
    #[arg(long)]
    file_a: Option<PathBuf>,

    /// FASTA or plain-text file holding one or more second sequences
    #[arg(long)]
    file_b: Option<PathBuf>,

    /// TOML configuration file ([scoring] and [output] sections)
    #[arg(long)]
    config: Option<PathBuf>,

    /// global or local
    #[arg(long)]
    mode: Option<AlignmentMode>,

    #[arg(long)]
    match_score: Option<f64>,

    #[arg(long)]
    mismatch: Option<f64>,

    #[arg(long)]
    gap_open: Option<f64>,

    #[arg(long)]
    gap_extend: Option<f64>,

    /// Alignment columns per output block
    #[arg(long)]
    width: Option<usize>,

    /// Worker threads when the inputs hold several record pairs
    #[arg(long)]
    threads: Option<usize>,

    /// Write the aligned pairs and scores to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        let scoring = &mut config.scoring;
        if let Some(mode) = self.mode {
            scoring.mode = mode;
        }
        if let Some(value) = self.match_score {
            scoring.match_score = value;
        }
        if let Some(value) = self.mismatch {
            scoring.mismatch = value;
        }
        if let Some(value) = self.gap_open {
            scoring.gap_open = value;
        }
        if let Some(value) = self.gap_extend {
            scoring.gap_extend = value;
        }
        if let Some(width) = self.width {
            config.output.line_width = width;
        }
        if let Some(threads) = self.threads {
            config.output.threads = threads;
        }
        config.validate()?;
        Ok(config)
    }
}

fn read_records(
    literal: Option<&str>,
    path: Option<&PathBuf>,
) -> Result<Vec<Sequence>, Box<dyn std::error::Error>> {
    match (literal, path) {
        (Some(text), _) => Ok(vec![Sequence::from(text)]),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
            Ok(Sequence::records_from_fasta_text(&text))
        }
        (None, None) => Err("no sequence given".into()),
    }
}

fn print_result(result: &AlignmentResult, line_width: usize) {
    let stats = compute_stats(result);
    for line in summary_lines(result, &stats) {
        println!("{}", line);
    }
    println!();
    for line in alignment_blocks(result, &stats, line_width) {
        println!("{}", line);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.app_config()?;
    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let records_a = read_records(cli.seq_a.as_deref(), cli.file_a.as_ref())?;
    let records_b = read_records(cli.seq_b.as_deref(), cli.file_b.as_ref())?;
    info!(
        "loaded {} record(s) for A and {} for B",
        records_a.len(),
        records_b.len()
    );
    let pairs = pair_records(records_a, records_b)?;

    let aligner = Aligner::new(config.scoring)?;
    info!("scoring: {:?}", aligner.config());
    let results = if pairs.len() == 1 {
        let (seq_a, seq_b) = &pairs[0];
        vec![aligner.align(seq_a, seq_b)?]
    } else {
        let mut batch = BatchAligner::new(config.output.threads, *aligner.config())?;
        info!("aligning {} pairs on {} worker(s)", pairs.len(), batch.workers());
        batch.align_all(pairs)?
    };

    for (index, result) in results.iter().enumerate() {
        if results.len() > 1 {
            if index > 0 {
                println!();
            }
            println!("== Pair {} ==", index + 1);
        }
        print_result(result, config.output.line_width);
    }

    if let Some(path) = &cli.export {
        let records: String = results.iter().map(export_record).collect();
        fs::write(path, records)?;
        info!("wrote {} aligned pair(s) to {}", results.len(), path.display());
    }

    Ok(())
}
