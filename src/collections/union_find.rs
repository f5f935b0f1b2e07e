//! Weighted disjoint-set (Union-Find) forest.
//!
//! Tracks a partition of the elements `0..n` into disjoint components and
//! answers "are these two elements connected" queries.
//!
//! # Algorithm
//!
//! **Union by size**: the root of the smaller tree is attached under the
//! root of the larger one, bounding every tree's height by log₂(n).
//! **Path halving** during `find` points every other node on the search
//! path at its grandparent, which flattens trees over time without
//! recursion. Together they give amortized O(α(n)) per operation.
//!
//! # References
//!
//! - Tarjan & van Leeuwen (1984), "Worst-Case Analysis of Set Union Algorithms"
//! - Sedgewick & Wayne, *Algorithms* (4th ed.), §1.5 "Weighted quick-union"

/// Disjoint-set forest with union by size and path halving.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(6);
/// uf.union(0, 1);
/// uf.union(4, 5);
/// assert_eq!(uf.component_count(), 4);
///
/// assert!(uf.connected(1, 0));
/// assert!(!uf.connected(1, 4));
///
/// uf.union(0, 5);
/// assert!(uf.connected(1, 4));
/// assert_eq!(uf.component_size(4), 4);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates `n` singleton components `{0}, {1}, ..., {n-1}`.
    ///
    /// # Complexity
    /// O(n)
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Returns the number of elements in the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the universe has no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the component containing `x`.
    ///
    /// Applies **path halving** on the way up.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the components containing `x` and `y`.
    ///
    /// The smaller component's root is linked under the larger one's root;
    /// ties link `y`'s root under `x`'s.
    ///
    /// # Returns
    /// `true` if a merge happened, `false` if `x` and `y` were already
    /// connected. Repeated unions are therefore harmless.
    ///
    /// # Panics
    /// Panics if `x >= len()` or `y >= len()`.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        let (big, small) = if self.size[root_x] < self.size[root_y] {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];

        self.components -= 1;
        true
    }

    /// Returns `true` if `x` and `y` belong to the same component.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Returns the number of disjoint components.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the number of elements in the component containing `x`.
    pub fn component_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let uf = UnionFind::new(7);
        assert_eq!(uf.len(), 7);
        assert!(!uf.is_empty());
        assert_eq!(uf.component_count(), 7);
    }

    #[test]
    fn test_new_empty() {
        let uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.component_count(), 0);
    }

    #[test]
    fn test_every_element_is_its_own_root() {
        let mut uf = UnionFind::new(4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
        }
    }

    #[test]
    fn test_union_reports_merge() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 2));
        assert!(!uf.union(2, 0));
        assert!(!uf.union(0, 0));
        assert_eq!(uf.component_count(), 2);
    }

    #[test]
    fn test_smaller_component_goes_under_larger() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(0, 2);
        // {3} joins {0, 1, 2}; the larger tree keeps its root.
        let big_root = uf.find(0);
        uf.union(3, 0);
        assert_eq!(uf.find(3), big_root);
        assert_eq!(uf.component_size(3), 4);
    }

    #[test]
    fn test_disjoint_chains_stay_apart() {
        let mut uf = UnionFind::new(6);
        uf.union(0, 1);
        uf.union(1, 2);
        uf.union(3, 4);
        uf.union(4, 5);
        assert!(uf.connected(0, 2));
        assert!(uf.connected(3, 5));
        assert!(!uf.connected(2, 3));
        assert_eq!(uf.component_count(), 2);
    }

    #[test]
    fn test_long_chain_compresses() {
        let n = 10_000;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.union(i - 1, i);
        }
        assert_eq!(uf.component_count(), 1);
        assert_eq!(uf.component_size(n - 1), n);
        assert!(uf.connected(0, n - 1));
    }
}
