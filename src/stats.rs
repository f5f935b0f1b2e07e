//! Summary statistics for threshold samples.
//!
//! All functions reject empty or non-finite input by returning `None`
//! rather than producing NaN silently.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier-compensated summation, O(ε) error independent of n.
//! - **Variance/StdDev**: Welford's online algorithm with Bessel's
//!   correction. Reference: Welford (1962), "Note on a Method for
//!   Calculating Corrected Sums of Squares and Products",
//!   *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation,
//!   `mean ± z · s / √n`.

use crate::special;

/// Two-sided critical value of the standard normal at 95% confidence.
pub const Z_95: f64 = 1.96;

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// let v = [0.5, 0.6, 0.7];
/// assert!((mean(&v).unwrap() - 0.6).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Neumaier's improved Kahan summation.
///
/// Keeps a running compensation term so that low-order bits lost in each
/// addition are added back at the end, including when the addend is larger
/// than the running sum.
///
/// Reference: Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Two-sided standard normal critical value for a confidence `level`.
///
/// `0.95` maps to exactly [`Z_95`]; other levels use
/// [`special::inverse_normal_cdf`] at `(1 + level) / 2`.
///
/// # Returns
/// - `None` if `level` is not strictly inside `(0, 1)`.
///
/// # Examples
/// ```
/// use percolation::stats::z_score;
/// assert_eq!(z_score(0.95), Some(1.96));
/// assert!((z_score(0.99).unwrap() - 2.576).abs() < 1e-2);
/// assert_eq!(z_score(1.0), None);
/// ```
pub fn z_score(level: f64) -> Option<f64> {
    if !(level > 0.0 && level < 1.0) {
        return None;
    }
    if level == 0.95 {
        return Some(Z_95);
    }
    Some(special::inverse_normal_cdf((1.0 + level) / 2.0))
}

/// Normal-approximation confidence interval `mean ± z · std_dev / √n`.
///
/// Returns `(lo, hi)`. A NaN `std_dev` propagates to both bounds.
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize, z: f64) -> (f64, f64) {
    let half_width = z * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Streaming accumulator for mean and variance.
///
/// Single pass, O(1) memory, numerically stable.
///
/// # Examples
/// ```
/// use percolation::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, or `None` before the first sample.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Sample variance (n − 1 denominator), or `None` with fewer than 2
    /// samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation, or `None` with fewer than 2 samples.
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}
