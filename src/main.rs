use anyhow::Context as _;
use clap::Parser;
use percolation::{ExperimentConfig, PercolationStats, SiteSampler};

/// Estimate the site-percolation threshold of an n-by-n grid by Monte Carlo
/// simulation.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid side length
    size: usize,
    /// Number of independent trials
    trials: usize,
    /// Master seed for reproducible runs (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// How each trial picks the next site to open
    #[arg(long, default_value_t = SiteSampler::Shuffled)]
    sampler: SiteSampler,
    /// Run trials in parallel
    #[arg(long)]
    parallel: bool,
    /// Confidence level of the reported interval
    #[arg(long, default_value_t = 0.95)]
    confidence: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = ExperimentConfig::new(args.size, args.trials)
        .with_sampler(args.sampler)
        .parallel(args.parallel);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let stats = PercolationStats::run(&config).context("percolation experiment failed")?;
    let (lo, hi) = stats.confidence_interval(args.confidence)?;
    let percent = (args.confidence * 1000.0).round() / 10.0;

    println!("mean                    = {}", stats.mean());
    println!("stddev                  = {}", stats.stddev());
    println!("{percent}% confidence interval = [{lo}, {hi}]");
    Ok(())
}
