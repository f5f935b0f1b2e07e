//! Site percolation on an n-by-n grid.
//!
//! Sites are addressed by 1-based `(row, col)`, row 1 at the top. Each
//! site is either blocked or open; sites only ever go from blocked to open.
//! The grid *percolates* when an open path of orthogonally adjacent sites
//! joins row 1 to row n. A site is *full* when it is open and shares a
//! component with the top anchor (see below).
//!
//! # Algorithm
//!
//! Site `(row, col)` owns id `(row - 1) * n + (col - 1)` in a
//! [`UnionFind`] of `n² + 2` elements. The two extra ids are virtual
//! anchors: `top = n²` is joined to every opened site in row 1 and
//! `bottom = n² + 1` to every opened site in row n. Both predicates then
//! reduce to a single root comparison:
//!
//! - `percolates()` ⇔ `find(top) == find(bottom)`
//! - `is_full(r, c)` ⇔ open and `find(id) == find(top)`
//!
//! Opening a site unions it with *every* open neighbor, so components are
//! never split by a missed link.
//!
//! Both anchors live in one structure, so once the grid percolates every
//! open bottom-row site is joined to `top` through `bottom` and reports
//! full even without its own path to row 1 ("backwash"). The threshold
//! estimate only reads `percolates()`, which is unaffected.
//!
//! # Complexity
//! `open`, `is_full` and `percolates` are amortized O(α(n²)); the other
//! queries are O(1).

use crate::collections::UnionFind;
use crate::error::PercolationError;

/// An n-by-n grid of sites with incremental connectivity tracking.
///
/// # Examples
/// ```
/// use percolation::Percolation;
///
/// let mut grid = Percolation::new(3)?;
/// grid.open(1, 2)?;
/// grid.open(2, 2)?;
/// assert!(grid.is_full(2, 2)?);
/// assert!(!grid.percolates());
///
/// grid.open(3, 2)?;
/// assert!(grid.percolates());
/// assert_eq!(grid.number_of_open_sites(), 3);
/// # Ok::<(), percolation::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    uf: UnionFind,
    open_count: usize,
}

impl Percolation {
    /// Creates an n-by-n grid with every site blocked.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `n == 0`, or if
    /// `n² + 2` does not fit in `usize`.
    pub fn new(n: usize) -> Result<Self, PercolationError> {
        if n == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size must be positive, got 0".into(),
            ));
        }
        let sites = n
            .checked_mul(n)
            .filter(|sites| sites.checked_add(2).is_some())
            .ok_or_else(|| {
                PercolationError::InvalidArgument(format!("grid size {n} is too large"))
            })?;

        Ok(Self {
            n,
            open: vec![false; sites],
            uf: UnionFind::new(sites + 2),
            open_count: 0,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Total number of sites, `n²`.
    pub fn site_count(&self) -> usize {
        self.open.len()
    }

    /// Opens site `(row, col)` and links it to its open neighbors.
    ///
    /// Opening an already open site does nothing.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `row` or `col` is
    /// outside `1..=n`. The grid is left untouched in that case.
    pub fn open(&mut self, row: usize, col: usize) -> Result<(), PercolationError> {
        let id = self.site_id(row, col)?;
        if self.open[id] {
            return Ok(());
        }
        self.open[id] = true;
        self.open_count += 1;

        let n = self.n;
        let neighbors = [
            (row > 1).then(|| id - n),
            (row < n).then(|| id + n),
            (col > 1).then(|| id - 1),
            (col < n).then(|| id + 1),
        ];
        for neighbor in neighbors.into_iter().flatten() {
            if self.open[neighbor] {
                self.uf.union(id, neighbor);
            }
        }

        // A 1x1 grid touches both anchors.
        let (top, bottom) = (self.top(), self.bottom());
        if row == 1 {
            self.uf.union(id, top);
        }
        if row == n {
            self.uf.union(id, bottom);
        }
        Ok(())
    }

    /// Returns whether site `(row, col)` is open.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] on out-of-range indices.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool, PercolationError> {
        let id = self.site_id(row, col)?;
        Ok(self.open[id])
    }

    /// Returns whether site `(row, col)` is open and connected to the top
    /// anchor.
    ///
    /// After percolation this includes open sites reachable only through
    /// the bottom row. Takes `&mut self` because root lookups compress paths.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] on out-of-range indices.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool, PercolationError> {
        let id = self.site_id(row, col)?;
        let top = self.top();
        Ok(self.open[id] && self.uf.connected(id, top))
    }

    /// Number of sites opened so far.
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Fraction of sites that are open, in `[0, 1]`.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.site_count() as f64
    }

    /// Returns whether some open path joins row 1 to row n.
    pub fn percolates(&mut self) -> bool {
        let (top, bottom) = (self.top(), self.bottom());
        self.uf.connected(top, bottom)
    }

    fn top(&self) -> usize {
        self.open.len()
    }

    fn bottom(&self) -> usize {
        self.open.len() + 1
    }

    fn site_id(&self, row: usize, col: usize) -> Result<usize, PercolationError> {
        let n = self.n;
        if !(1..=n).contains(&row) || !(1..=n).contains(&col) {
            return Err(PercolationError::InvalidArgument(format!(
                "site ({row}, {col}) is outside the {n}x{n} grid"
            )));
        }
        Ok((row - 1) * n + (col - 1))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Flood fill over open sites, starting from `seeds`.
    fn flood_fill(n: usize, open: &[bool], seeds: impl IntoIterator<Item = usize>) -> Vec<bool> {
        let mut seen = vec![false; n * n];
        let mut queue = VecDeque::new();
        for id in seeds {
            if open[id] && !seen[id] {
                seen[id] = true;
                queue.push_back(id);
            }
        }
        while let Some(id) = queue.pop_front() {
            let (row, col) = (id / n, id % n);
            let mut neighbors = Vec::with_capacity(4);
            if row > 0 {
                neighbors.push(id - n);
            }
            if row + 1 < n {
                neighbors.push(id + n);
            }
            if col > 0 {
                neighbors.push(id - 1);
            }
            if col + 1 < n {
                neighbors.push(id + 1);
            }
            for next in neighbors {
                if open[next] && !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Sites connected to the top anchor, and whether the grid percolates.
    ///
    /// Row 1 sites hang off the top anchor and row n sites off the bottom
    /// anchor. Once the two anchors meet, every open bottom-row site shares
    /// the top anchor's component too.
    fn anchored_full(n: usize, open: &[bool]) -> (Vec<bool>, bool) {
        let top_row = 0..n;
        let bottom_row = (n - 1) * n..n * n;
        let from_top = flood_fill(n, open, top_row.clone());
        let percolates = bottom_row.clone().any(|id| from_top[id]);
        if percolates {
            (flood_fill(n, open, top_row.chain(bottom_row)), true)
        } else {
            (from_top, false)
        }
    }

    fn sites_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1_usize..8).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((1..=n, 1..=n), 0..(n * n * 2)),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn matches_flood_fill((n, sites) in sites_strategy()) {
            let mut grid = Percolation::new(n).unwrap();
            let mut open = vec![false; n * n];
            for &(row, col) in &sites {
                grid.open(row, col).unwrap();
                open[(row - 1) * n + (col - 1)] = true;
            }

            let (full, percolates) = anchored_full(n, &open);
            prop_assert_eq!(grid.percolates(), percolates);
            for row in 1..=n {
                for col in 1..=n {
                    let id = (row - 1) * n + (col - 1);
                    prop_assert_eq!(grid.is_open(row, col).unwrap(), open[id]);
                    prop_assert_eq!(grid.is_full(row, col).unwrap(), full[id]);
                }
            }
        }

        #[test]
        fn open_count_is_monotone_and_exact((n, sites) in sites_strategy()) {
            let mut grid = Percolation::new(n).unwrap();
            let mut previous = 0;
            for &(row, col) in &sites {
                let was_open = grid.is_open(row, col).unwrap();
                grid.open(row, col).unwrap();
                let count = grid.number_of_open_sites();
                prop_assert_eq!(count, previous + usize::from(!was_open));
                previous = count;
            }
        }

        #[test]
        fn percolation_is_order_independent(
            (n, sites, shuffled) in sites_strategy().prop_flat_map(|(n, sites)| {
                let shuffled = Just(sites.clone()).prop_shuffle();
                (Just(n), Just(sites), shuffled)
            })
        ) {
            let mut forward = Percolation::new(n).unwrap();
            let mut permuted = Percolation::new(n).unwrap();
            for &(row, col) in &sites {
                forward.open(row, col).unwrap();
            }
            for &(row, col) in &shuffled {
                permuted.open(row, col).unwrap();
            }
            prop_assert_eq!(forward.percolates(), permuted.percolates());
            prop_assert_eq!(forward.number_of_open_sites(), permuted.number_of_open_sites());
        }

        #[test]
        fn percolation_implies_full_bottom_site((n, sites) in sites_strategy()) {
            let mut grid = Percolation::new(n).unwrap();
            for &(row, col) in &sites {
                grid.open(row, col).unwrap();
            }
            if grid.percolates() {
                let any_full = (1..=n).any(|col| grid.is_full(n, col).unwrap());
                prop_assert!(any_full, "percolating grid has no full bottom site");
            }
        }

        #[test]
        fn rejected_open_changes_nothing(
            (n, sites) in sites_strategy(),
            row in 0_usize..12,
            col in 0_usize..12,
        ) {
            prop_assume!(row == 0 || col == 0 || row > n || col > n);
            let mut grid = Percolation::new(n).unwrap();
            for &(r, c) in &sites {
                grid.open(r, c).unwrap();
            }
            let count = grid.number_of_open_sites();
            let percolated = grid.percolates();

            prop_assert!(grid.open(row, col).is_err());
            prop_assert_eq!(grid.number_of_open_sites(), count);
            prop_assert_eq!(grid.percolates(), percolated);
        }
    }
}
