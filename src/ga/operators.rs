//! Bit-string operators for knapsack children.
//!
//! [`uniform_crossover`] and [`mutate`] edit the inclusion vector directly
//! and finish with a full recompute. [`repair`] restores feasibility with
//! incremental moves.

use crate::construct::PseudoUtility;
use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::Rng;

/// Writes into `child` a uniform crossover of the two parents: every bit
/// comes from either parent with probability 1/2.
pub fn uniform_crossover<'p, R: Rng>(
    parent1: &Solution<'p>,
    parent2: &Solution<'p>,
    child: &mut Solution<'p>,
    rng: &mut R,
) {
    child.clone_from(parent1);
    for (item, &bit) in parent2.included().iter().enumerate() {
        if !rng.random_bool(0.5) {
            child.set_included(item, bit);
        }
    }
    child.recompute();
}

/// Flips `rate` distinct random bits of `child` (all of them when `rate`
/// exceeds the item count).
///
/// `order` is scratch space.
pub fn mutate<R: Rng>(child: &mut Solution<'_>, rate: usize, order: &mut Vec<usize>, rng: &mut R) {
    let n = child.problem().n();
    order.clear();
    order.extend(0..n);
    order.shuffle(rng);
    for &item in &order[..rate.min(n)] {
        child.flip(item);
    }
    child.recompute();
}

/// Makes an infeasible `solution` feasible and then fills it.
///
/// Items are ranked by pseudo-utility against the infeasible solution.
/// The drop phase walks the ranking from the worst end and removes
/// included items while some capacity is exceeded; the add phase walks
/// it from the best end and adds whatever fits.
///
/// Feasible solutions are left untouched. Returns whether a repair
/// happened.
pub fn repair(solution: &mut Solution<'_>, pseudo: &mut PseudoUtility, order: &mut Vec<usize>) -> bool {
    if solution.is_feasible() {
        return false;
    }
    pseudo.rank(solution, order);

    for &item in order.iter().rev() {
        if solution.is_feasible() {
            break;
        }
        solution.remove(item);
    }
    for &item in order.iter() {
        solution.try_add(item);
    }
    true
}
