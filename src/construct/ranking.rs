//! Item orderings: plain profit order, Toyoda pseudo-utilities and the
//! refill strategy shared by local search and VND.
//!
//! # Pseudo-utility (Toyoda, 1975)
//!
//! Given the current solution `x`:
//!
//! 1. `u[i] = Σ_j (w[i][j] / c[i]) · x[j]`, then `u ← u / ‖u‖₂`
//!    (every component set to 1 when `‖u‖₂ = 0`)
//! 2. `v[j] = Σ_i (w[i][j] / c[i]) · u[i]`
//! 3. `pu[j] = p[j] / v[j]`
//!
//! Dimensions that are already heavily used weigh more in `v`, so the
//! ranking adapts to the partial solution it is computed against.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::Rng;

/// Writes into `order` the indices of `values` sorted by descending value.
///
/// The sort is stable: equal values keep increasing index order.
///
/// # Examples
///
/// ```
/// use mkp_metaheur::construct::rank_descending;
///
/// let mut order = Vec::new();
/// rank_descending(&[3.0, 7.0, 3.0, 9.0], &mut order);
/// assert_eq!(order, vec![3, 1, 0, 2]);
/// ```
pub fn rank_descending(values: &[f64], order: &mut Vec<usize>) {
    order.clear();
    order.extend(0..values.len());
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
}

/// Scratch buffers for pseudo-utility computation.
///
/// Sized once per instance and reused for every evaluation.
#[derive(Debug, Clone)]
pub struct PseudoUtility {
    m: usize,
    /// `ratios[j * m + i] = w[i][j] / c[i]`.
    ratios: Vec<f64>,
    profits: Vec<f64>,
    u: Vec<f64>,
    scores: Vec<f64>,
}

impl PseudoUtility {
    /// Allocates buffers for `problem`.
    ///
    /// Zero capacities are treated as one, so the ratio of an item in a
    /// dimension with no room is its raw coefficient.
    pub fn new(problem: &Problem) -> Self {
        let (n, m) = (problem.n(), problem.m());
        let mut ratios = Vec::with_capacity(n * m);
        for j in 0..n {
            for (i, &w) in problem.item_weights(j).iter().enumerate() {
                ratios.push(w as f64 / problem.capacity(i).max(1) as f64);
            }
        }
        Self {
            m,
            ratios,
            profits: problem.profits().iter().map(|&p| p as f64).collect(),
            u: vec![0.0; m],
            scores: vec![0.0; n],
        }
    }

    /// Computes the pseudo-utility of every item against `solution`.
    pub fn compute(&mut self, solution: &Solution<'_>) -> &[f64] {
        let m = self.m;

        self.u.iter_mut().for_each(|x| *x = 0.0);
        for j in solution.included_items() {
            for (u, r) in self.u.iter_mut().zip(&self.ratios[j * m..(j + 1) * m]) {
                *u += r;
            }
        }

        let norm = self.u.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            self.u.iter_mut().for_each(|x| *x = 1.0);
        } else {
            self.u.iter_mut().for_each(|x| *x /= norm);
        }

        for (j, score) in self.scores.iter_mut().enumerate() {
            let v: f64 = self.ratios[j * m..(j + 1) * m]
                .iter()
                .zip(&self.u)
                .map(|(r, u)| r * u)
                .sum();
            let pu = self.profits[j] / v;
            // 0 / 0: a free item with no profit
            *score = if pu.is_nan() { 0.0 } else { pu };
        }
        &self.scores
    }

    /// Ranks every item by descending pseudo-utility against `solution`.
    pub fn rank(&mut self, solution: &Solution<'_>, order: &mut Vec<usize>) {
        self.compute(solution);
        rank_descending(&self.scores, order);
    }
}

/// Order in which items are offered when refilling a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ranking {
    /// A fresh random permutation for every refill.
    Random,

    /// Descending profit; computed once.
    Greedy,

    /// Descending pseudo-utility, recomputed against the solution being
    /// refilled.
    #[default]
    PseudoUtility,
}

/// Reusable refill-order generator for one [`Ranking`].
#[derive(Debug, Clone)]
pub struct Ranker {
    ranking: Ranking,
    order: Vec<usize>,
    pseudo: Option<PseudoUtility>,
}

impl Ranker {
    /// Prepares buffers for `ranking` on `problem`.
    pub fn new(problem: &Problem, ranking: Ranking) -> Self {
        let mut order: Vec<usize> = (0..problem.n()).collect();
        let mut pseudo = None;
        match ranking {
            Ranking::Random => {}
            Ranking::Greedy => {
                let profits: Vec<f64> = problem.profits().iter().map(|&p| p as f64).collect();
                rank_descending(&profits, &mut order);
            }
            Ranking::PseudoUtility => pseudo = Some(PseudoUtility::new(problem)),
        }
        Self {
            ranking,
            order,
            pseudo,
        }
    }

    /// The ranking this ranker produces.
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    /// Produces the refill order for `solution`.
    pub fn order<R: Rng>(&mut self, solution: &Solution<'_>, rng: &mut R) -> &[usize] {
        match (self.ranking, self.pseudo.as_mut()) {
            (Ranking::Random, _) => self.order.shuffle(rng),
            (Ranking::PseudoUtility, Some(pseudo)) => pseudo.rank(solution, &mut self.order),
            _ => {}
        }
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn problem() -> Problem {
        Problem::new(
            vec![10, 20, 15, 7],
            vec![vec![5, 8, 6, 3], vec![4, 1, 1, 4]],
            vec![10, 5],
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_rank_descending_stable_ties() {
        let mut order = Vec::new();
        rank_descending(&[1.0, 5.0, 5.0, 0.5, 5.0], &mut order);
        assert_eq!(order, vec![1, 2, 4, 0, 3]);

        rank_descending(&[], &mut order);
        assert!(order.is_empty());
    }

    #[test]
    fn test_pseudo_utility_empty_solution() {
        // u = (1, 1): v[j] = w0/10 + w1/5
        let p = problem();
        let s = Solution::empty(&p);
        let mut pu = PseudoUtility::new(&p);
        let scores = pu.compute(&s).to_vec();
        let expected = [
            10.0 / (0.5 + 0.8),
            20.0 / (0.8 + 0.2),
            15.0 / (0.6 + 0.2),
            7.0 / (0.3 + 0.8),
        ];
        for (got, want) in scores.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_pseudo_utility_adapts_to_partial_solution() {
        // With item 3 inside, dimension 1 is tight (4/5) and dimension 0 loose (3/10),
        // so items heavy in dimension 1 lose ground.
        let p = problem();
        let mut pu = PseudoUtility::new(&p);
        let mut order = Vec::new();

        let empty = Solution::empty(&p);
        pu.rank(&empty, &mut order);
        assert_eq!(order, vec![1, 2, 0, 3]);

        let partial = Solution::from_items(&p, [3]);
        let norm = (0.3f64 * 0.3 + 0.8 * 0.8).sqrt();
        let (u0, u1) = (0.3 / norm, 0.8 / norm);
        let scores = pu.compute(&partial).to_vec();
        let v0 = 0.5 * u0 + 0.8 * u1;
        assert!((scores[0] - 10.0 / v0).abs() < 1e-9);
    }

    #[test]
    fn test_pseudo_utility_zero_weight_item() {
        let p = Problem::new(vec![5, 0, 3], vec![vec![0, 0, 2]], vec![4], 0).unwrap();
        let mut pu = PseudoUtility::new(&p);
        let scores = pu.compute(&Solution::empty(&p)).to_vec();
        assert!(scores[0].is_infinite());
        assert_eq!(scores[1], 0.0);
        assert!((scores[2] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranker_greedy_is_profit_order() {
        let p = problem();
        let s = Solution::empty(&p);
        let mut rng = create_rng(1);
        let mut ranker = Ranker::new(&p, Ranking::Greedy);
        assert_eq!(ranker.order(&s, &mut rng), &[1, 2, 0, 3]);
    }

    #[test]
    fn test_ranker_random_is_permutation() {
        let p = problem();
        let s = Solution::empty(&p);
        let mut rng = create_rng(7);
        let mut ranker = Ranker::new(&p, Ranking::Random);
        let mut order = ranker.order(&s, &mut rng).to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
