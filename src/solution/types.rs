//! Solution state and bulk operations.

use crate::problem::Problem;

/// A candidate subset of items with cached usage and value.
#[derive(Debug)]
pub struct Solution<'p> {
    pub(super) problem: &'p Problem,
    pub(super) included: Vec<bool>,
    pub(super) resources_used: Vec<i64>,
    pub(super) value: i64,
}

impl<'p> Solution<'p> {
    /// Creates the empty solution for `problem`.
    pub fn empty(problem: &'p Problem) -> Self {
        Self {
            problem,
            included: vec![false; problem.n()],
            resources_used: vec![0; problem.m()],
            value: 0,
        }
    }

    /// Creates a solution containing exactly `items`.
    ///
    /// # Panics
    ///
    /// Panics if an item index is out of range.
    pub fn from_items<I: IntoIterator<Item = usize>>(problem: &'p Problem, items: I) -> Self {
        let mut s = Self::empty(problem);
        for item in items {
            s.add(item);
        }
        s
    }

    /// The instance this solution is bound to.
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    /// Objective value.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Per-dimension resource usage.
    pub fn resources_used(&self) -> &[i64] {
        &self.resources_used
    }

    /// Usage of one dimension.
    #[inline]
    pub fn total_weight(&self, dim: usize) -> i64 {
        self.resources_used[dim]
    }

    /// The inclusion vector.
    pub fn included(&self) -> &[bool] {
        &self.included
    }

    /// Whether `item` is in the solution.
    #[inline]
    pub fn is_included(&self, item: usize) -> bool {
        self.included[item]
    }

    /// Number of included items. O(n).
    pub fn num_selected(&self) -> usize {
        self.included.iter().filter(|&&x| x).count()
    }

    /// Included item indices in increasing order.
    pub fn included_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.included
            .iter()
            .enumerate()
            .filter_map(|(j, &x)| x.then_some(j))
    }

    /// Excluded item indices in increasing order.
    pub fn excluded_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.included
            .iter()
            .enumerate()
            .filter_map(|(j, &x)| (!x).then_some(j))
    }

    /// Whether every dimension is within capacity.
    pub fn is_feasible(&self) -> bool {
        self.resources_used
            .iter()
            .zip(self.problem.capacities())
            .all(|(used, cap)| used <= cap)
    }

    /// Structural equality of inclusion vectors.
    ///
    /// Value and usage are not compared; they follow from the inclusion
    /// vector whenever the invariants hold.
    pub fn identical_to(&self, other: &Solution<'_>) -> bool {
        self.included == other.included
    }

    /// Flips the inclusion bit of `item` without touching value or usage.
    ///
    /// Call [`recompute`](Self::recompute) before reading them again.
    #[inline]
    pub fn flip(&mut self, item: usize) {
        self.included[item] = !self.included[item];
    }

    /// Sets the inclusion bit of `item` without touching value or usage.
    ///
    /// Call [`recompute`](Self::recompute) before reading them again.
    #[inline]
    pub fn set_included(&mut self, item: usize, included: bool) {
        self.included[item] = included;
    }

    /// Rebuilds value and resource usage from the inclusion vector. O(n·m).
    pub fn recompute(&mut self) {
        let p = self.problem;
        self.value = 0;
        self.resources_used.iter_mut().for_each(|r| *r = 0);
        for (item, _) in self.included.iter().enumerate().filter(|(_, &x)| x) {
            self.value += p.profit(item);
            for (used, &w) in self.resources_used.iter_mut().zip(p.item_weights(item)) {
                *used += w;
            }
        }
    }
}

impl Clone for Solution<'_> {
    fn clone(&self) -> Self {
        Self {
            problem: self.problem,
            included: self.included.clone(),
            resources_used: self.resources_used.clone(),
            value: self.value,
        }
    }

    /// Copies `source` into `self`, reusing the existing buffers.
    fn clone_from(&mut self, source: &Self) {
        self.problem = source.problem;
        self.included.clone_from(&source.included);
        self.resources_used.clone_from(&source.resources_used);
        self.value = source.value;
    }
}

impl PartialEq for Solution<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.problem, other.problem)
            && self.value == other.value
            && self.included == other.included
            && self.resources_used == other.resources_used
    }
}

impl Eq for Solution<'_> {}

impl std::fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.included.iter().any(|&x| x) {
            writeln!(f, "Items in solution:")?;
            write!(f, "[ ")?;
            for j in self.included_items() {
                write!(f, "{j} ")?;
            }
            writeln!(f, "]")?;
        } else {
            writeln!(f, "No items selected in the solution!")?;
        }

        write!(f, "[ ")?;
        for j in self.included_items() {
            write!(f, "{j} ")?;
        }
        write!(f, "] :: [ ")?;
        for j in self.excluded_items() {
            write!(f, "{j} ")?;
        }
        writeln!(f, "]")?;
        writeln!(f)
    }
}
