//! GA execution loop.

use super::config::GaConfig;
use super::operators::{mutate, repair, uniform_crossover};
use super::population::Population;
use crate::construct::{random_insertion, PseudoUtility, Ranking};
use crate::deadline::Deadline;
use crate::local::{Acceptance, LocalSearch};
use crate::problem::Problem;
use crate::random::rng_from;
use crate::solution::Solution;
use rand::Rng;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<'p> {
    /// The best solution found.
    pub best: Solution<'p>,

    /// Value of the best solution.
    pub best_value: i64,

    /// Children generated.
    pub iterations: usize,

    /// Children that entered the population.
    pub replacements: usize,

    /// Children discarded as copies of a member.
    pub duplicates: usize,

    /// Whether the time limit stopped the run.
    pub timed_out: bool,

    /// Best value each time it improved, starting with the initial
    /// population's best.
    pub value_history: Vec<i64>,
}

/// Executes the steady-state Genetic Algorithm.
///
/// # Algorithm
///
/// 1. Fill the population with random-insertion solutions
/// 2. Each iteration: pick two parents by tournament over disjoint random
///    pools, cross them uniformly, mutate, repair if infeasible, polish
///    with best-improvement local search
/// 3. A child that duplicates a member is dropped; otherwise it replaces
///    the worst member
/// 4. Stop after `iteration_factor * n` children or on timeout
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn run<'p>(problem: &'p Problem, config: &GaConfig) -> GaResult<'p> {
        config.validate().expect("invalid GaConfig");

        let mut rng = rng_from(config.seed);
        let deadline = Deadline::from_millis(config.time_limit_ms);
        Self::run_with(problem, config, &deadline, &mut rng)
    }

    /// Runs the GA against an external deadline and generator.
    ///
    /// `config.time_limit_ms` and `config.seed` are ignored.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_with<'p, R: Rng>(
        problem: &'p Problem,
        config: &GaConfig,
        deadline: &Deadline,
        rng: &mut R,
    ) -> GaResult<'p> {
        config.validate().expect("invalid GaConfig");

        let max_iterations = config.max_iterations(problem.n());
        let mut population = Population::new(
            (0..config.population_size)
                .map(|_| random_insertion(problem, &mut *rng))
                .collect(),
        );
        let mut best = population.get(population.best_slot()).clone();
        let mut value_history = vec![best.value()];

        let mut child = Solution::empty(problem);
        let mut pseudo = PseudoUtility::new(problem);
        let mut order = Vec::with_capacity(problem.n());
        let mut polish = LocalSearch::new(problem, Acceptance::BestImprovement, Ranking::Greedy);

        let mut iterations = 0usize;
        let mut replacements = 0usize;
        let mut duplicates = 0usize;
        let mut timed_out = false;

        tracing::debug!(initial = best.value(), max_iterations, "evolution started");

        while iterations < max_iterations {
            if deadline.expired() {
                timed_out = true;
                break;
            }
            iterations += 1;

            let (p1, p2) = population.select_parents(config.pool_size, rng);
            uniform_crossover(population.get(p1), population.get(p2), &mut child, rng);
            mutate(&mut child, config.mutation_rate, &mut order, rng);
            repair(&mut child, &mut pseudo, &mut order);
            polish.improve(&mut child, deadline, rng);

            if population.contains(&child) {
                duplicates += 1;
                continue;
            }
            population.replace(population.worst_slot(), &child);
            replacements += 1;

            if child.value() > best.value() {
                best.clone_from(&child);
                value_history.push(best.value());
                tracing::debug!(iteration = iterations, value = best.value(), "new best");
            }
        }

        tracing::info!(
            value = best.value(),
            iterations,
            replacements,
            timed_out,
            "evolution finished"
        );

        GaResult {
            best_value: best.value(),
            best,
            iterations,
            replacements,
            duplicates,
            timed_out,
            value_history,
        }
    }
}
