//! Constructive heuristics: build a feasible solution from empty.

use super::ranking::{rank_descending, PseudoUtility, Ranking};
use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::Rng;

/// Initial-solution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Construction {
    /// One pass over a random permutation.
    Random,
    /// One pass in descending profit order.
    Greedy,
    /// Repeated passes in pseudo-utility order, reranked after each
    /// rejection.
    Toyoda,
}

impl Construction {
    /// Builds a solution with this strategy.
    pub fn build<'p, R: Rng>(self, problem: &'p Problem, rng: &mut R) -> Solution<'p> {
        match self {
            Construction::Random => random_insertion(problem, rng),
            Construction::Greedy => greedy_insertion(problem),
            Construction::Toyoda => toyoda(problem),
        }
    }

    /// The refill ranking that matches this construction.
    pub fn ranking(self) -> Ranking {
        match self {
            Construction::Random => Ranking::Random,
            Construction::Greedy => Ranking::Greedy,
            Construction::Toyoda => Ranking::PseudoUtility,
        }
    }
}

/// Tries every item once, in a random order.
pub fn random_insertion<'p, R: Rng>(problem: &'p Problem, rng: &mut R) -> Solution<'p> {
    let mut order: Vec<usize> = (0..problem.n()).collect();
    order.shuffle(rng);
    fill(Solution::empty(problem), &order)
}

/// Tries every item once, most profitable first.
pub fn greedy_insertion(problem: &Problem) -> Solution<'_> {
    let profits: Vec<f64> = problem.profits().iter().map(|&p| p as f64).collect();
    let mut order = Vec::with_capacity(problem.n());
    rank_descending(&profits, &mut order);
    fill(Solution::empty(problem), &order)
}

/// Toyoda's adaptive construction.
///
/// Each pass ranks the items by pseudo-utility against the current
/// partial solution and adds them in that order. The first rejection
/// after a successful addition ends the pass and triggers a rerank.
/// Construction stops when a whole pass adds nothing.
pub fn toyoda(problem: &Problem) -> Solution<'_> {
    let mut solution = Solution::empty(problem);
    let mut pseudo = PseudoUtility::new(problem);
    let mut order = Vec::with_capacity(problem.n());

    loop {
        pseudo.rank(&solution, &mut order);
        let mut added = 0usize;
        for &item in &order {
            if solution.is_included(item) {
                continue;
            }
            if solution.try_add(item) {
                added += 1;
            } else if added > 0 {
                break;
            }
        }
        if added == 0 {
            break;
        }
    }
    solution
}

fn fill<'p>(mut solution: Solution<'p>, order: &[usize]) -> Solution<'p> {
    for &item in order {
        solution.try_add(item);
    }
    solution
}
