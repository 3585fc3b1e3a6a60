use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::info;

use wavealign::{
    Config, Engine, FillReport, ScoreMatrix, Scoring, SequenceContext, Strategy, io,
    traceback::Alignment,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Every strategy, verifying the parallel outputs against the sequential one
    All,
    Sequential,
    Taskloop,
    Tasks,
}

impl Mode {
    fn strategies(self) -> &'static [Strategy] {
        match self {
            Mode::All => &Strategy::ALL,
            Mode::Sequential => &[Strategy::Sequential],
            Mode::Taskloop => &[Strategy::Taskloop],
            Mode::Tasks => &[Strategy::Tasks],
        }
    }
}

/// Global pairwise alignment with sequential and wavefront-parallel matrix fills
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File holding the first sequence
    #[arg(short, long, default_value = "data/X.txt")]
    x_file: PathBuf,

    /// File holding the second sequence
    #[arg(short, long, default_value = "data/Y.txt")]
    y_file: PathBuf,

    /// Output of the sequential run. Parallel runs write `aligned-<strategy>.txt` next to it.
    #[arg(short, long, default_value = "output/aligned-sequential.txt")]
    output: PathBuf,

    /// Side length of the blocks scheduled as one parallel task
    #[arg(short, long, default_value_t = 1)]
    grain_size: usize,

    #[arg(short, long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Only print the time taken by each strategy
    #[arg(short, long)]
    runtime_only: bool,

    /// Worker threads, defaults to one per logical CPU
    #[arg(short, long)]
    threads: Option<usize>,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    match_score: f32,

    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    mismatch_score: f32,

    #[arg(long, default_value_t = -2.0, allow_negative_numbers = true)]
    gap_penalty: f32,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            scoring: Scoring {
                match_score: self.match_score,
                mismatch_score: self.mismatch_score,
                gap_penalty: self.gap_penalty,
            },
            grain_size: self.grain_size,
            threads: self.threads,
        }
    }

    fn output_for(&self, strategy: Strategy) -> PathBuf {
        match strategy {
            Strategy::Sequential => self.output.clone(),
            _ => self
                .output
                .with_file_name(format!("aligned-{}.txt", strategy.name())),
        }
    }
}

fn print_run(report: &FillReport, alignment: &Alignment, verified: Option<bool>) {
    println!("\n{report}");
    println!(
        "   Score: {}, Similarity Score: {}, Identity Score: {}, Gaps: {}, Length (with gaps): {}",
        alignment.score,
        alignment.similarity(),
        alignment.identity(),
        alignment.gaps,
        alignment.len()
    );
    if let Some(verified) = verified {
        println!(
            "   Checking results: {}",
            if verified { "OK" } else { "NOT OK" }
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config();

    let x = io::read_sequence(&args.x_file)?;
    let y = io::read_sequence(&args.y_file)?;
    let ctx = SequenceContext::new(x, y, &config.scoring);
    let engine = Engine::new(&config)?;

    if !args.runtime_only {
        println!(
            "Loaded X and Y sequences with sizes {} and {}",
            ctx.x().len(),
            ctx.y().len()
        );
        println!(
            "Scoring scheme: match: {}, mismatch {}, gap_penalty: {}",
            config.scoring.match_score, config.scoring.mismatch_score, config.scoring.gap_penalty
        );
        println!("Matrix S size: [{}x{}]", ctx.rows(), ctx.cols());
    }
    info!(
        "grain size {}, {} worker threads",
        config.grain_size,
        engine.threads()
    );

    let mut matrix = ScoreMatrix::for_context(&ctx);
    let reference: &Path = &args.output;

    for &strategy in args.mode.strategies() {
        matrix.reset();

        let report = engine.fill(strategy, &ctx, &mut matrix)?;
        if args.runtime_only {
            println!("{strategy}: {}", report.elapsed.as_secs_f32());
            continue;
        }

        let alignment = Alignment::from_matrix(&ctx, &matrix)?;
        let output = args.output_for(strategy);
        io::write_alignment(&output, &alignment)?;

        let verified = match (args.mode, strategy) {
            (Mode::All, Strategy::Taskloop | Strategy::Tasks) => {
                Some(io::verify(reference, &output)?)
            }
            _ => None,
        };
        print_run(&report, &alignment, verified);
    }

    Ok(())
}
