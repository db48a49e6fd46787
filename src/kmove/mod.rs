//! Exhaustive enumeration of k-item removal sets.
//!
//! A [`KMove`] snapshots the items included in a solution and walks every
//! size-k subset of them exactly once. Positions are marked in a bit
//! vector over the snapshot; each [`advance`](KMove::advance) slides the
//! leftmost movable mark one step right and packs the marks it passed
//! back to the front. Starting from `1..10..0` the walk ends at
//! `0..01..1`, after `C(s, k)` subsets.
//!
//! # Examples
//!
//! ```
//! use mkp_metaheur::kmove::KMove;
//! use mkp_metaheur::problem::Problem;
//! use mkp_metaheur::solution::Solution;
//!
//! let p = Problem::new(vec![1, 1, 1, 1], vec![vec![1, 1, 1, 1]], vec![4], 0).unwrap();
//! let s = Solution::from_items(&p, [0, 2, 3]);
//!
//! let mut mv = KMove::new(2, &s).unwrap();
//! let mut seen = vec![mv.removed_items().collect::<Vec<_>>()];
//! while mv.advance() {
//!     seen.push(mv.removed_items().collect());
//! }
//! assert_eq!(seen, vec![vec![0, 2], vec![0, 3], vec![2, 3]]);
//! ```

use crate::solution::Solution;

/// Cursor over the size-k subsets of a solution's included items.
#[derive(Debug, Clone)]
pub struct KMove {
    k: usize,
    /// Included items at creation, increasing.
    indexes: Vec<usize>,
    /// Removal marks over `indexes`.
    marks: Vec<bool>,
    /// Removal marks over all items.
    removed: Vec<bool>,
}

impl KMove {
    /// Starts an enumeration with the first `k` included items marked.
    ///
    /// Returns `None` when `k` is zero or exceeds the number of included
    /// items.
    pub fn new(k: usize, solution: &Solution<'_>) -> Option<Self> {
        let indexes: Vec<usize> = solution.included_items().collect();
        if k == 0 || k > indexes.len() {
            return None;
        }
        let marks: Vec<bool> = (0..indexes.len()).map(|i| i < k).collect();
        let mut removed = vec![false; solution.problem().n()];
        for &item in &indexes[..k] {
            removed[item] = true;
        }
        Some(Self {
            k,
            indexes,
            marks,
            removed,
        })
    }

    /// Subset size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The included items this enumeration ranges over.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Whether `item` is in the current removal set.
    #[inline]
    pub fn is_removed(&self, item: usize) -> bool {
        self.removed[item]
    }

    /// Items of the current removal set, increasing.
    pub fn removed_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexes
            .iter()
            .zip(&self.marks)
            .filter_map(|(&item, &marked)| marked.then_some(item))
    }

    /// Moves to the next subset. Returns `false`, leaving the cursor on the
    /// last subset, once every subset has been produced.
    pub fn advance(&mut self) -> bool {
        let s = self.marks.len();
        let mut passed = 0usize;
        let mut pivot = None;
        for i in 0..s.saturating_sub(1) {
            if self.marks[i] {
                if !self.marks[i + 1] {
                    pivot = Some(i);
                    break;
                }
                passed += 1;
            }
        }
        let Some(pivot) = pivot else {
            return false;
        };

        self.marks[pivot] = false;
        self.marks[pivot + 1] = true;
        for (i, mark) in self.marks[..pivot].iter_mut().enumerate() {
            *mark = i < passed;
        }
        for (&item, &mark) in self.indexes[..=pivot + 1].iter().zip(&self.marks) {
            self.removed[item] = mark;
        }
        true
    }
}
