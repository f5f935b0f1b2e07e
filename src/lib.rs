//! # percolation
//!
//! Monte Carlo estimation of the site-percolation threshold of n-by-n grids.
//!
//! ## Modules
//!
//! - [`percolation`] — the grid model: open sites, "full" and "percolates"
//!   queries in amortized near-constant time via two virtual anchors
//! - [`experiment`] — the Monte Carlo driver and its summary statistics
//! - [`collections`] — weighted union-find backing the grid
//! - [`stats`] — mean, sample standard deviation, confidence intervals
//! - [`random`] — seeded RNG construction and Fisher-Yates shuffling
//! - [`special`] — normal CDF and quantile approximations
//!
//! ## Example
//!
//! ```
//! use percolation::{ExperimentConfig, PercolationStats};
//!
//! let config = ExperimentConfig::new(50, 20).with_seed(7);
//! let stats = PercolationStats::run(&config)?;
//! assert!((stats.mean() - 0.5927).abs() < 0.05);
//! # Ok::<(), percolation::PercolationError>(())
//! ```

pub mod collections;
pub mod error;
pub mod experiment;
pub mod percolation;
pub mod random;
pub mod special;
pub mod stats;

pub use error::PercolationError;
pub use experiment::{ExperimentConfig, PercolationStats, SiteSampler};
pub use percolation::Percolation;
