//! Fixed-size population stored as an arena of solution slots.

use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::Rng;

/// A fixed-size set of solutions addressed by slot index.
///
/// Replacement overwrites a slot in place; slots are never added or
/// removed.
#[derive(Debug, Clone)]
pub struct Population<'p> {
    members: Vec<Solution<'p>>,
    order: Vec<usize>,
}

impl<'p> Population<'p> {
    /// Wraps `members`.
    pub fn new(members: Vec<Solution<'p>>) -> Self {
        let order = (0..members.len()).collect();
        Self { members, order }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The solution in `slot`.
    pub fn get(&self, slot: usize) -> &Solution<'p> {
        &self.members[slot]
    }

    pub fn members(&self) -> &[Solution<'p>] {
        &self.members
    }

    /// Slot of the highest-valued member among `slots`; the first one
    /// on ties.
    pub fn tournament(&self, slots: &[usize]) -> usize {
        let mut best = slots[0];
        for &slot in &slots[1..] {
            if self.members[slot].value() > self.members[best].value() {
                best = slot;
            }
        }
        best
    }

    /// Slot of the highest-valued member; the first one on ties.
    pub fn best_slot(&self) -> usize {
        let mut best = 0;
        for (slot, member) in self.members.iter().enumerate().skip(1) {
            if member.value() > self.members[best].value() {
                best = slot;
            }
        }
        best
    }

    /// Slot of the lowest-valued member; the first one on ties.
    pub fn worst_slot(&self) -> usize {
        let mut worst = 0;
        for (slot, member) in self.members.iter().enumerate().skip(1) {
            if member.value() < self.members[worst].value() {
                worst = slot;
            }
        }
        worst
    }

    /// Draws two disjoint random pools of `pool_size` slots and returns
    /// the tournament winner of each.
    pub fn select_parents<R: Rng>(&mut self, pool_size: usize, rng: &mut R) -> (usize, usize) {
        self.order.shuffle(rng);
        let first = self.tournament(&self.order[..pool_size]);
        let second = self.tournament(&self.order[pool_size..2 * pool_size]);
        (first, second)
    }

    /// Whether some member has the same inclusion vector as `solution`.
    pub fn contains(&self, solution: &Solution<'_>) -> bool {
        self.members.iter().any(|m| m.identical_to(solution))
    }

    /// Overwrites `slot` with a copy of `solution`.
    pub fn replace(&mut self, slot: usize, solution: &Solution<'p>) {
        self.members[slot].clone_from(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::random::create_rng;

    fn problem() -> Problem {
        Problem::new(vec![10, 20, 15, 7], vec![vec![5, 8, 6, 3]], vec![10], 0).unwrap()
    }

    #[test]
    fn test_best_and_worst_first_on_ties() {
        let p = problem();
        let pop = Population::new(vec![
            Solution::from_items(&p, [3]),    // 7
            Solution::from_items(&p, [1]),    // 20
            Solution::from_items(&p, [0]),    // 10
            Solution::from_items(&p, [2, 3]), // 22
            Solution::from_items(&p, [3]),    // 7
            Solution::from_items(&p, [2, 3]), // 22
        ]);
        assert_eq!(pop.best_slot(), 3);
        assert_eq!(pop.worst_slot(), 0);
        assert_eq!(pop.tournament(&[4, 2, 0]), 2);
    }

    #[test]
    fn test_select_parents_from_disjoint_pools() {
        let p = problem();
        let mut pop = Population::new((0..4).map(|j| Solution::from_items(&p, [j])).collect());
        let mut rng = create_rng(8);
        for _ in 0..100 {
            let (a, b) = pop.select_parents(2, &mut rng);
            assert_ne!(a, b, "pools are disjoint");
        }
    }

    #[test]
    fn test_contains_and_replace() {
        let p = problem();
        let mut pop = Population::new(vec![Solution::from_items(&p, [0]), Solution::from_items(&p, [1])]);
        let child = Solution::from_items(&p, [2, 3]);
        assert!(!pop.contains(&child));
        pop.replace(0, &child);
        assert!(pop.contains(&child));
        assert_eq!(pop.get(0).value(), 22);
        assert_eq!(pop.len(), 2);
    }
}
