//! VND execution loop.

use super::config::VndConfig;
use crate::construct::{Ranker, Ranking};
use crate::deadline::Deadline;
use crate::kmove::KMove;
use crate::local::DescentStats;
use crate::problem::Problem;
use crate::random::rng_from;
use crate::solution::Solution;
use rand::Rng;

/// Reusable VND state for one instance.
#[derive(Debug, Clone)]
pub struct Vnd<'p> {
    k_max: usize,
    ranker: Ranker,
    candidate: Solution<'p>,
    best: Solution<'p>,
    history: Vec<i64>,
}

impl<'p> Vnd<'p> {
    /// Prepares a workspace for solutions of `problem`.
    pub fn new(problem: &'p Problem, k_max: usize, ranking: Ranking) -> Self {
        Self {
            k_max,
            ranker: Ranker::new(problem, ranking),
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

    /// Improves `solution` in place.
    ///
    /// A sweep evaluates every k-subset removal for `k = 1..=k_max`
    /// against the solution at the start of the sweep, then commits the
    /// best candidate. Sweeps repeat while one improves.
    pub fn improve<R: Rng>(
        &mut self,
        solution: &mut Solution<'p>,
        deadline: &Deadline,
        rng: &mut R,
    ) -> DescentStats {
        let mut stats = DescentStats::default();
        self.history.clear();
        self.history.push(solution.value());

        'sweeps: while !stats.timed_out {
            if deadline.expired() {
                stats.timed_out = true;
                break;
            }
            stats.sweeps += 1;
            self.best.clone_from(solution);
            let mut improved = false;

            for k in 1..=self.k_max {
                let Some(mut mv) = KMove::new(k, solution) else {
                    break;
                };
                loop {
                    if deadline.expired() {
                        stats.timed_out = true;
                        break;
                    }
                    stats.evaluations += 1;

                    self.candidate.clone_from(solution);
                    for item in mv.removed_items() {
                        self.candidate.remove(item);
                    }
                    for &item in self.ranker.order(&self.candidate, rng) {
                        if !mv.is_removed(item) {
                            self.candidate.try_add(item);
                        }
                    }

                    if self.candidate.value() > self.best.value() {
                        self.best.clone_from(&self.candidate);
                        improved = true;
                    }
                    if !mv.advance() {
                        break;
                    }
                }
                if stats.timed_out {
                    break;
                }
                tracing::trace!(k, best = self.best.value(), "neighborhood exhausted");
            }

            if !improved {
                break 'sweeps;
            }
            solution.clone_from(&self.best);
            stats.improvements += 1;
            self.history.push(solution.value());
            tracing::debug!(sweep = stats.sweeps, value = solution.value(), "vnd improved");
        }
        stats
    }
}

/// Result of a VND run.
#[derive(Debug, Clone)]
pub struct VndResult<'p> {
    /// The solution reached.
    pub best: Solution<'p>,

    /// Value of `best`.
    pub best_value: i64,

    /// Full `1..=k_max` sweeps started.
    pub sweeps: usize,

    /// Sweeps that committed an improvement.
    pub improvements: usize,

    /// Candidates evaluated across all neighborhoods.
    pub evaluations: usize,

    /// Whether the time limit stopped the search.
    pub timed_out: bool,

    /// Value after each committed sweep, starting with the input.
    pub value_history: Vec<i64>,
}

/// Executes a standalone VND.
pub struct VndRunner;

impl VndRunner {
    /// Improves `initial` under `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<'p>(initial: Solution<'p>, config: &VndConfig) -> VndResult<'p> {
        config.validate().expect("invalid VndConfig");

        let mut rng = rng_from(config.seed);
        let deadline = Deadline::from_millis(config.time_limit_ms);
        Self::run_with(initial, config.k_max, config.ranking, &deadline, &mut rng)
    }

    /// Improves `initial` against an external deadline and generator.
    pub fn run_with<'p, R: Rng>(
        mut initial: Solution<'p>,
        k_max: usize,
        ranking: Ranking,
        deadline: &Deadline,
        rng: &mut R,
    ) -> VndResult<'p> {
        let mut vnd = Vnd::new(initial.problem(), k_max, ranking);
        let stats = vnd.improve(&mut initial, deadline, rng);

        tracing::info!(
            value = initial.value(),
            sweeps = stats.sweeps,
            evaluations = stats.evaluations,
            timed_out = stats.timed_out,
            "vnd finished"
        );

        VndResult {
            best_value: initial.value(),
            best: initial,
            sweeps: stats.sweeps,
            improvements: stats.improvements,
            evaluations: stats.evaluations,
            timed_out: stats.timed_out,
            value_history: vnd.history().to_vec(),
        }
    }
}
