//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial builds a fresh [`Percolation`] grid, opens blocked sites in
//! uniformly random order until the grid percolates, and records the
//! fraction of open sites at that moment. The sample mean of those
//! fractions estimates the threshold p* (≈ 0.5927 for large square grids).
//!
//! # Reproducibility
//!
//! A master RNG seeded from [`ExperimentConfig::seed`] draws one seed per
//! trial before any trial runs. Each trial owns an RNG built from its seed,
//! so sequential and parallel runs with the same master seed produce the
//! same samples in the same order.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use crate::error::PercolationError;
use crate::percolation::Percolation;
use crate::random::{create_rng, entropy_seed, shuffle};
use crate::stats;

/// How a trial picks the next blocked site to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteSampler {
    /// Shuffle all n² sites once and open them in that order.
    #[default]
    Shuffled,
    /// Draw uniform `(row, col)` pairs, skipping sites that are already open.
    /// Slows down as the grid fills.
    Rejection,
}

impl SiteSampler {
    fn as_str(self) -> &'static str {
        match self {
            SiteSampler::Shuffled => "shuffled",
            SiteSampler::Rejection => "rejection",
        }
    }
}

impl fmt::Display for SiteSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteSampler {
    type Err = PercolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shuffled" => Ok(SiteSampler::Shuffled),
            "rejection" => Ok(SiteSampler::Rejection),
            other => Err(PercolationError::InvalidArgument(format!(
                "unknown site sampler {other:?}, expected \"shuffled\" or \"rejection\""
            ))),
        }
    }
}

/// Parameters of one Monte Carlo experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Grid side length `n`.
    pub size: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Master seed; drawn from OS entropy when `None`.
    pub seed: Option<u64>,
    /// Order in which each trial opens sites.
    pub sampler: SiteSampler,
    /// Run trials on the rayon thread pool.
    pub parallel: bool,
}

impl ExperimentConfig {
    /// Sequential, entropy-seeded, shuffled-order experiment.
    pub fn new(size: usize, trials: usize) -> Self {
        Self {
            size,
            trials,
            seed: None,
            sampler: SiteSampler::default(),
            parallel: false,
        }
    }

    /// Fixes the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Selects how trials pick sites.
    pub fn with_sampler(mut self, sampler: SiteSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Enables or disables parallel trials.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the grid size and trial count are positive.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] otherwise.
    pub fn validate(&self) -> Result<(), PercolationError> {
        if self.size == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size must be positive, got 0".into(),
            ));
        }
        if self.trials == 0 {
            return Err(PercolationError::InvalidArgument(
                "trial count must be positive, got 0".into(),
            ));
        }
        Ok(())
    }
}

/// Threshold samples of a finished experiment and their summary statistics.
///
/// # Examples
/// ```
/// use percolation::PercolationStats;
///
/// let stats = PercolationStats::with_seed(20, 10, 42)?;
/// assert_eq!(stats.thresholds().len(), 10);
/// assert!(stats.confidence_lo() <= stats.mean());
/// assert!(stats.mean() <= stats.confidence_hi());
/// # Ok::<(), percolation::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PercolationStats {
    size: usize,
    seed: u64,
    thresholds: Vec<f64>,
    mean: f64,
    stddev: f64,
}

impl PercolationStats {
    /// Runs `trials` independent trials on an n-by-n grid with an
    /// entropy-drawn seed.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `n == 0` or
    /// `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self, PercolationError> {
        Self::run(&ExperimentConfig::new(n, trials))
    }

    /// Like [`PercolationStats::new`], with a fixed master seed.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `n == 0` or
    /// `trials == 0`.
    pub fn with_seed(n: usize, trials: usize, seed: u64) -> Result<Self, PercolationError> {
        Self::run(&ExperimentConfig::new(n, trials).with_seed(seed))
    }

    /// Runs the experiment described by `config`.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if the configuration
    /// fails [`ExperimentConfig::validate`] or the grid cannot be allocated.
    pub fn run(config: &ExperimentConfig) -> Result<Self, PercolationError> {
        config.validate()?;
        let ExperimentConfig {
            size,
            trials,
            sampler,
            parallel,
            ..
        } = *config;
        let seed = config.seed.unwrap_or_else(entropy_seed);
        info!(
            "running {trials} trials on a {size}x{size} grid \
             (seed {seed}, sampler {sampler}, parallel {parallel})"
        );

        let mut master = create_rng(seed);
        let trial_seeds: Vec<u64> = (0..trials).map(|_| master.random()).collect();

        let thresholds = if parallel {
            trial_seeds
                .par_iter()
                .enumerate()
                .map(|(index, &trial_seed)| run_seeded_trial(size, sampler, index, trial_seed))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            trial_seeds
                .iter()
                .enumerate()
                .map(|(index, &trial_seed)| run_seeded_trial(size, sampler, index, trial_seed))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mean = stats::mean(&thresholds).unwrap_or(f64::NAN);
        let stddev = stats::std_dev(&thresholds).unwrap_or(f64::NAN);
        info!("mean threshold {mean:.6}, stddev {stddev:.6}");

        Ok(Self {
            size,
            seed,
            thresholds,
            mean,
            stddev,
        })
    }

    /// Grid side length the trials ran on.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Master seed; passing it back via [`ExperimentConfig::with_seed`]
    /// reproduces this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Per-trial open-site fractions, in trial order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the percolation threshold.
    ///
    /// NaN for a single trial.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.interval(stats::Z_95).0
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.interval(stats::Z_95).1
    }

    /// Confidence interval `(lo, hi)` at an arbitrary `level` in `(0, 1)`.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `level` is not
    /// strictly between 0 and 1.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64), PercolationError> {
        let z = stats::z_score(level).ok_or_else(|| {
            PercolationError::InvalidArgument(format!(
                "confidence level must be in (0, 1), got {level}"
            ))
        })?;
        Ok(self.interval(z))
    }

    fn interval(&self, z: f64) -> (f64, f64) {
        stats::confidence_interval(self.mean, self.stddev, self.trials(), z)
    }
}

fn run_seeded_trial(
    n: usize,
    sampler: SiteSampler,
    index: usize,
    seed: u64,
) -> Result<f64, PercolationError> {
    let threshold = run_trial(n, sampler, &mut create_rng(seed))?;
    debug!("trial {index}: threshold {threshold:.6}");
    Ok(threshold)
}

/// Opens random blocked sites on a fresh grid until it percolates and
/// returns the open fraction at that point.
fn run_trial<R: Rng>(n: usize, sampler: SiteSampler, rng: &mut R) -> Result<f64, PercolationError> {
    let mut grid = Percolation::new(n)?;
    match sampler {
        SiteSampler::Shuffled => {
            let mut sites: Vec<(usize, usize)> = (1..=n)
                .flat_map(|row| (1..=n).map(move |col| (row, col)))
                .collect();
            shuffle(&mut sites, rng);
            // A fully open grid always percolates, so the loop breaks early.
            for (row, col) in sites {
                grid.open(row, col)?;
                if grid.percolates() {
                    break;
                }
            }
        }
        SiteSampler::Rejection => {
            while !grid.percolates() {
                let row = rng.random_range(1..=n);
                let col = rng.random_range(1..=n);
                if !grid.is_open(row, col)? {
                    grid.open(row, col)?;
                }
            }
        }
    }
    Ok(grid.open_fraction())
}
