//! Single-item moves with O(m) delta evaluation.

use super::types::Solution;

impl Solution<'_> {
    /// Includes `item`, updating value and usage. No capacity check.
    ///
    /// No-op if `item` is already included.
    #[inline]
    pub fn add(&mut self, item: usize) {
        if self.included[item] {
            return;
        }
        self.included[item] = true;
        self.value += self.problem.profit(item);
        for (used, &w) in self
            .resources_used
            .iter_mut()
            .zip(self.problem.item_weights(item))
        {
            *used += w;
        }
    }

    /// Excludes `item`, updating value and usage.
    ///
    /// No-op if `item` is not included.
    #[inline]
    pub fn remove(&mut self, item: usize) {
        if !self.included[item] {
            return;
        }
        self.included[item] = false;
        self.value -= self.problem.profit(item);
        for (used, &w) in self
            .resources_used
            .iter_mut()
            .zip(self.problem.item_weights(item))
        {
            *used -= w;
        }
    }

    /// Returns `true` if `item` is already included, or if including it
    /// would push some dimension over its capacity.
    #[inline]
    pub fn violates_capacity(&self, item: usize) -> bool {
        if self.included[item] {
            return true;
        }
        self.resources_used
            .iter()
            .zip(self.problem.item_weights(item))
            .zip(self.problem.capacities())
            .any(|((&used, &w), &cap)| used + w > cap)
    }

    /// Adds `item` if that keeps every dimension within capacity.
    ///
    /// Returns whether the item was added.
    #[inline]
    pub fn try_add(&mut self, item: usize) -> bool {
        if self.violates_capacity(item) {
            return false;
        }
        self.add(item);
        true
    }
}
