//! 1-item local search.

use super::config::{Acceptance, LocalSearchConfig};
use crate::construct::{Ranker, Ranking};
use crate::deadline::Deadline;
use crate::problem::Problem;
use crate::random::rng_from;
use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::Rng;

/// Counters from one descent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescentStats {
    /// Sweeps started.
    pub sweeps: usize,

    /// Sweeps that committed an improvement.
    pub improvements: usize,

    /// Neighbors built and evaluated.
    pub evaluations: usize,

    /// Whether the deadline stopped the descent.
    pub timed_out: bool,
}

/// Reusable local search state for one instance.
///
/// Buffers are allocated once; [`improve`](Self::improve) can be called
/// on any number of solutions of the same instance.
#[derive(Debug, Clone)]
pub struct LocalSearch<'p> {
    acceptance: Acceptance,
    ranker: Ranker,
    order: Vec<usize>,
    candidate: Solution<'p>,
    best: Solution<'p>,
    history: Vec<i64>,
}

impl<'p> LocalSearch<'p> {
    /// Prepares a workspace for solutions of `problem`.
    pub fn new(problem: &'p Problem, acceptance: Acceptance, ranking: Ranking) -> Self {
        Self {
            acceptance,
            ranker: Ranker::new(problem, ranking),
            order: Vec::with_capacity(problem.n()),
            candidate: Solution::empty(problem),
            best: Solution::empty(problem),
            history: Vec::new(),
        }
    }

    /// Committed values of the last [`improve`](Self::improve), starting
    /// with the input value.
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Improves `solution` in place until a sweep finds nothing better or
    /// `deadline` expires.
    ///
    /// A neighbor drops one included item and refills with every other
    /// item in ranking order. Improvements found in a sweep cut short by
    /// the deadline are still committed.
    pub fn improve<R: Rng>(
        &mut self,
        solution: &mut Solution<'p>,
        deadline: &Deadline,
        rng: &mut R,
    ) -> DescentStats {
        let mut stats = DescentStats::default();
        self.history.clear();
        self.history.push(solution.value());

        while !stats.timed_out {
            if deadline.expired() {
                stats.timed_out = true;
                break;
            }
            stats.sweeps += 1;

            self.order.clear();
            self.order.extend(solution.included_items());
            self.order.shuffle(rng);

            self.best.clone_from(solution);
            let mut improved = false;

            for &removed in &self.order {
                if deadline.expired() {
                    stats.timed_out = true;
                    break;
                }
                stats.evaluations += 1;

                self.candidate.clone_from(solution);
                self.candidate.remove(removed);
                for &item in self.ranker.order(&self.candidate, rng) {
                    if item != removed {
                        self.candidate.try_add(item);
                    }
                }

                if self.candidate.value() > self.best.value() {
                    tracing::trace!(removed, value = self.candidate.value(), "improving neighbor");
                    self.best.clone_from(&self.candidate);
                    improved = true;
                    if self.acceptance == Acceptance::FirstImprovement {
                        break;
                    }
                }
            }

            if !improved {
                break;
            }
            solution.clone_from(&self.best);
            stats.improvements += 1;
            self.history.push(solution.value());
            tracing::debug!(sweep = stats.sweeps, value = solution.value(), "local search improved");
        }
        stats
    }
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult<'p> {
    /// The local optimum reached.
    pub best: Solution<'p>,

    /// Value of `best`.
    pub best_value: i64,

    /// Sweeps started.
    pub sweeps: usize,

    /// Sweeps that committed an improvement.
    pub improvements: usize,

    /// Neighbors evaluated.
    pub evaluations: usize,

    /// Whether the time limit stopped the search.
    pub timed_out: bool,

    /// Value after each committed sweep, starting with the input.
    pub value_history: Vec<i64>,
}

/// Executes a standalone local search.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Improves `initial` under `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<'p>(initial: Solution<'p>, config: &LocalSearchConfig) -> LocalSearchResult<'p> {
        config.validate().expect("invalid LocalSearchConfig");

        let mut rng = rng_from(config.seed);
        let deadline = Deadline::from_millis(config.time_limit_ms);
        Self::run_with(initial, config.acceptance, config.ranking, &deadline, &mut rng)
    }

    /// Improves `initial` against an external deadline and generator.
    pub fn run_with<'p, R: Rng>(
        mut initial: Solution<'p>,
        acceptance: Acceptance,
        ranking: Ranking,
        deadline: &Deadline,
        rng: &mut R,
    ) -> LocalSearchResult<'p> {
        let mut ls = LocalSearch::new(initial.problem(), acceptance, ranking);
        let stats = ls.improve(&mut initial, deadline, rng);

        tracing::info!(
            value = initial.value(),
            sweeps = stats.sweeps,
            timed_out = stats.timed_out,
            "local search finished"
        );

        LocalSearchResult {
            best_value: initial.value(),
            best: initial,
            sweeps: stats.sweeps,
            improvements: stats.improvements,
            evaluations: stats.evaluations,
            timed_out: stats.timed_out,
            value_history: ls.history().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{greedy_insertion, random_insertion};
    use crate::random::create_rng;

    fn problem() -> Problem {
        Problem::new(vec![10, 20, 15, 7], vec![vec![5, 8, 6, 3]], vec![10], 0).unwrap()
    }

    fn two_dimensions() -> Problem {
        Problem::new(
            vec![12, 9, 7, 5, 14, 3, 8, 6],
            vec![vec![4, 3, 2, 1, 6, 1, 3, 2], vec![2, 5, 1, 3, 4, 1, 2, 3]],
            vec![11, 9],
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_escapes_weak_start() {
        // Dropping item 0 frees room for item 2: {2, 3} weighs 9 and is worth 22.
        let p = problem();
        let start = Solution::from_items(&p, [0, 3]);
        let result = LocalSearchRunner::run(
            start,
            &LocalSearchConfig::default()
                .with_ranking(Ranking::Greedy)
                .with_seed(1),
        );
        assert_eq!(result.best_value, 22);
        assert!(result.best.is_feasible());
        assert_eq!(result.value_history.first(), Some(&17));
        assert_eq!(result.value_history.last(), Some(&22));
        assert!(!result.timed_out);
    }

    #[test]
    fn test_never_worsens() {
        let p = two_dimensions();
        let mut rng = create_rng(5);
        for acceptance in [Acceptance::FirstImprovement, Acceptance::BestImprovement] {
            for ranking in [Ranking::Random, Ranking::Greedy, Ranking::PseudoUtility] {
                let start = random_insertion(&p, &mut rng);
                let before = start.value();
                let result =
                    LocalSearchRunner::run_with(start, acceptance, ranking, &Deadline::unbounded(), &mut rng);
                assert!(result.best_value >= before, "{acceptance:?}/{ranking:?} worsened");
                assert!(result.best.is_feasible());
                assert!(result.value_history.windows(2).all(|w| w[1] > w[0]));
            }
        }
    }

    #[test]
    fn test_first_improvement_stops_sweep_early() {
        // From {0, 1, 2}, dropping any one item frees room for item 3, so
        // every neighbor is worth 12. First improvement commits after one
        // evaluation; best improvement evaluates all three.
        let p = Problem::new(vec![1, 1, 1, 10], vec![vec![3, 3, 3, 4]], vec![10], 0).unwrap();
        let run = |acceptance| {
            let mut rng = create_rng(4);
            let mut ls = LocalSearch::new(&p, acceptance, Ranking::Greedy);
            let mut s = Solution::from_items(&p, [0, 1, 2]);
            let stats = ls.improve(&mut s, &Deadline::unbounded(), &mut rng);
            (stats, s.value())
        };

        let (first, first_value) = run(Acceptance::FirstImprovement);
        let (best, best_value) = run(Acceptance::BestImprovement);
        assert_eq!((first_value, best_value), (12, 12));
        assert_eq!((first.sweeps, first.improvements), (2, 1));
        assert_eq!((best.sweeps, best.improvements), (2, 1));
        assert_eq!(first.evaluations, 1 + 3);
        assert_eq!(best.evaluations, 3 + 3);
        assert!(first.evaluations < best.evaluations);
    }

    #[test]
    fn test_best_improvement_takes_largest_step() {
        // Dropping item 0, 1 or 2 gives 15, 14 or 13. Best improvement
        // commits 15 in its first sweep; first improvement takes whichever
        // improving neighbor it meets first.
        let p = Problem::new(vec![1, 2, 3, 10], vec![vec![3, 3, 3, 4]], vec![10], 0).unwrap();
        let run = |acceptance, seed| {
            let mut rng = create_rng(seed);
            let mut ls = LocalSearch::new(&p, acceptance, Ranking::Greedy);
            let mut s = Solution::from_items(&p, [0, 1, 2]);
            ls.improve(&mut s, &Deadline::unbounded(), &mut rng);
            (ls.history().to_vec(), s.value())
        };

        for seed in 0..8 {
            let (best, best_value) = run(Acceptance::BestImprovement, seed);
            assert_eq!(best, vec![6, 15]);
            assert_eq!(best_value, 15);

            let (first, first_value) = run(Acceptance::FirstImprovement, seed);
            assert!([13, 14, 15].contains(&first[1]), "{first:?}");
            assert!(first[1] <= best[1]);
            assert_eq!(first_value, 15);
        }
    }

    #[test]
    fn test_local_optimum_is_stable() {
        let p = two_dimensions();
        let mut rng = create_rng(9);
        let mut ls = LocalSearch::new(&p, Acceptance::BestImprovement, Ranking::Greedy);
        let mut s = greedy_insertion(&p);
        ls.improve(&mut s, &Deadline::unbounded(), &mut rng);
        let settled = s.clone();
        let stats = ls.improve(&mut s, &Deadline::unbounded(), &mut rng);
        assert_eq!(stats.improvements, 0);
        assert_eq!(stats.sweeps, 1);
        assert_eq!(s, settled);
    }

    #[test]
    fn test_expired_deadline_returns_input() {
        let p = problem();
        let mut rng = create_rng(2);
        let start = Solution::from_items(&p, [0, 3]);
        let result = LocalSearchRunner::run_with(
            start.clone(),
            Acceptance::BestImprovement,
            Ranking::PseudoUtility,
            &Deadline::after(std::time::Duration::ZERO),
            &mut rng,
        );
        assert!(result.timed_out);
        assert_eq!(result.best, start);
        assert_eq!(result.sweeps, 0);
    }

    #[test]
    fn test_empty_solution_has_no_neighbors() {
        let p = problem();
        let result = LocalSearchRunner::run(Solution::empty(&p), &LocalSearchConfig::default().with_seed(0));
        assert_eq!(result.best_value, 0);
        assert_eq!(result.evaluations, 0);
    }

    #[test]
    fn test_config_validation() {
        assert!(LocalSearchConfig::default().validate().is_ok());
        assert!(LocalSearchConfig::default().with_time_limit_ms(0).validate().is_err());
    }
}
