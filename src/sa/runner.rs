//! SA execution loop.

use super::config::SaConfig;
use crate::construct::{toyoda, Ranking};
use crate::deadline::Deadline;
use crate::local::{Acceptance, LocalSearch};
use crate::problem::Problem;
use crate::random::rng_from;
use crate::solution::Solution;
use rand::Rng;

/// Steps a level may spend per acceptance it still owes before it is
/// closed anyway. Bounds levels where almost every candidate is rejected.
const STEPS_PER_ACCEPTANCE: usize = 100;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<'p> {
    /// The best solution found.
    pub best: Solution<'p>,

    /// Value of the best solution.
    pub best_value: i64,

    /// Total chain steps (candidates generated), accepted or not.
    pub iterations: usize,

    /// Temperature levels entered.
    pub levels: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that raised the current value.
    pub improving_moves: usize,

    /// Whether the time limit stopped the run.
    pub timed_out: bool,

    /// Best value each time it improved, starting with the initial
    /// solution.
    pub value_history: Vec<i64>,
}

/// The Metropolis acceptance rule for maximization.
///
/// A candidate at least as good as the current solution is always
/// accepted. A worse one is accepted with probability
/// `exp((new_value - current_value) / temperature)`.
pub fn metropolis<R: Rng>(new_value: i64, current_value: i64, temperature: f64, rng: &mut R) -> bool {
    let delta = new_value - current_value;
    if delta >= 0 {
        return true;
    }
    rng.random::<f64>() < (delta as f64 / temperature).exp()
}

/// Executes simulated annealing.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from a Toyoda start.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn run<'p>(problem: &'p Problem, config: &SaConfig) -> SaResult<'p> {
        config.validate().expect("invalid SaConfig");

        let mut rng = rng_from(config.seed);
        let deadline = Deadline::from_millis(config.time_limit_ms);
        Self::run_with(problem, config, &deadline, &mut rng)
    }

    /// Runs SA against an external deadline and generator.
    ///
    /// `config.time_limit_ms` and `config.seed` are ignored; `deadline`
    /// decides whether levels run on a time slice or a fixed chain
    /// length.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_with<'p, R: Rng>(
        problem: &'p Problem,
        config: &SaConfig,
        deadline: &Deadline,
        rng: &mut R,
    ) -> SaResult<'p> {
        config.validate().expect("invalid SaConfig");

        let n = problem.n();
        let total_levels = config.levels();
        let level_slice = deadline.budget().map(|b| b / total_levels as u32);
        let (chain_length, step_cap) = match level_slice {
            Some(_) => (usize::MAX, usize::MAX),
            None => {
                let length = config.chain_length.unwrap_or(n);
                (length, length.saturating_mul(STEPS_PER_ACCEPTANCE))
            }
        };

        let mut current = toyoda(problem);
        let mut best = current.clone();
        let mut candidate = Solution::empty(problem);
        let mut included = Vec::with_capacity(n);
        let mut polish = LocalSearch::new(problem, Acceptance::BestImprovement, Ranking::PseudoUtility);

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut levels = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut timed_out = false;
        let mut value_history = vec![best.value()];

        tracing::debug!(initial = current.value(), total_levels, "annealing started");

        'levels: while temperature >= config.freeze_temperature {
            if deadline.expired() {
                timed_out = true;
                break;
            }
            levels += 1;
            let level = match level_slice {
                Some(slice) => deadline.sub(slice),
                None => Deadline::unbounded(),
            };

            let mut steps = 0usize;
            let mut accepted = 0usize;
            while accepted < chain_length && steps < step_cap && !level.expired() {
                if deadline.expired() {
                    timed_out = true;
                    break 'levels;
                }
                steps += 1;
                iterations += 1;

                perturb(&current, &mut candidate, &mut included, rng);
                polish.improve(&mut candidate, deadline, rng);

                if metropolis(candidate.value(), current.value(), temperature, rng) {
                    accepted += 1;
                    accepted_moves += 1;
                    if candidate.value() > current.value() {
                        improving_moves += 1;
                    }
                    std::mem::swap(&mut current, &mut candidate);
                    tracing::trace!(value = current.value(), temperature, "move accepted");

                    if current.value() > best.value() {
                        best.clone_from(&current);
                        value_history.push(best.value());
                    }
                }
            }

            tracing::debug!(level = levels, temperature, steps, accepted, best = best.value(), "level done");
            temperature *= config.alpha;
        }

        tracing::info!(
            value = best.value(),
            iterations,
            levels,
            timed_out,
            "annealing finished"
        );

        SaResult {
            best_value: best.value(),
            best,
            iterations,
            levels,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            timed_out,
            value_history,
        }
    }
}

/// Writes into `candidate` a random neighbor of `current`, repaired to
/// feasibility.
///
/// One random item is flipped. When that removes it, a second random item
/// (possibly the same one) is put in. Random included items are then
/// dropped until every capacity holds.
fn perturb<'p, R: Rng>(
    current: &Solution<'p>,
    candidate: &mut Solution<'p>,
    included: &mut Vec<usize>,
    rng: &mut R,
) {
    let n = current.problem().n();
    candidate.clone_from(current);

    let item = rng.random_range(0..n);
    if candidate.is_included(item) {
        candidate.set_included(item, false);
        let other = rng.random_range(0..n);
        candidate.set_included(other, true);
    } else {
        candidate.set_included(item, true);
    }
    candidate.recompute();

    if candidate.is_feasible() {
        return;
    }
    included.clear();
    included.extend(candidate.included_items());
    while !candidate.is_feasible() && !included.is_empty() {
        let pick = included.swap_remove(rng.random_range(0..included.len()));
        candidate.remove(pick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn problem() -> Problem {
        Problem::new(vec![10, 20, 15, 7], vec![vec![5, 8, 6, 3]], vec![10], 0).unwrap()
    }

    fn medium() -> Problem {
        let mut rng = create_rng(99);
        let n = 30;
        let profits: Vec<i64> = (0..n).map(|_| rng.random_range(10..100)).collect();
        let rows: Vec<Vec<i64>> = (0..3)
            .map(|_| (0..n).map(|_| rng.random_range(5..40)).collect())
            .collect();
        let capacities = rows.iter().map(|r| r.iter().sum::<i64>() / 2).collect();
        Problem::new(profits, rows, capacities, 0).unwrap()
    }

    #[test]
    fn test_metropolis_accepts_non_worsening() {
        let mut rng = create_rng(0);
        for _ in 0..1000 {
            assert!(metropolis(10, 10, 1e-9, &mut rng));
            assert!(metropolis(11, 10, 1e-9, &mut rng));
        }
    }

    #[test]
    fn test_metropolis_frequency() {
        let mut rng = create_rng(42);
        let trials = 200_000;
        for (delta, t) in [(-1i64, 1.0f64), (-5, 10.0), (-20, 8.0)] {
            let expected = (delta as f64 / t).exp();
            let hits = (0..trials)
                .filter(|_| metropolis(100 + delta, 100, t, &mut rng))
                .count();
            let freq = hits as f64 / trials as f64;
            let sigma = (expected * (1.0 - expected) / trials as f64).sqrt();
            assert!(
                (freq - expected).abs() < 5.0 * sigma + 1e-4,
                "delta {delta}, t {t}: expected {expected}, got {freq}"
            );
        }
    }

    #[test]
    fn test_perturb_keeps_invariants_and_feasibility() {
        let p = medium();
        let mut rng = create_rng(3);
        let current = toyoda(&p);
        let mut candidate = Solution::empty(&p);
        let mut buf = Vec::new();
        for _ in 0..500 {
            perturb(&current, &mut candidate, &mut buf, &mut rng);
            assert!(candidate.is_feasible());
            let mut fresh = candidate.clone();
            fresh.recompute();
            assert_eq!(fresh, candidate);
        }
    }

    #[test]
    fn test_sa_reaches_optimum_small() {
        let p = problem();
        let result = SaRunner::run(&p, &SaConfig::default().with_seed(7));
        assert_eq!(result.best_value, 22);
        assert!(result.best.is_feasible());
        assert!(!result.timed_out);
        assert_eq!(result.levels, 346);
    }

    #[test]
    fn test_sa_chain_counts_acceptances() {
        // Every polished neighbor of this instance is worth 22, so every
        // candidate is accepted and each level closes after exactly n
        // acceptances.
        let p = problem();
        let result = SaRunner::run(&p, &SaConfig::default().with_seed(7));
        assert_eq!(result.levels, 346);
        assert_eq!(result.accepted_moves, result.levels * p.n());
        assert_eq!(result.iterations, result.accepted_moves);

        let longer = SaRunner::run(&p, &SaConfig::default().with_chain_length(9).with_seed(7));
        assert_eq!(longer.accepted_moves, longer.levels * 9);
    }

    #[test]
    fn test_sa_rejecting_level_is_capped() {
        // At a near-zero temperature only non-worsening candidates pass,
        // so levels may run out of steps before their acceptance quota.
        let p = medium();
        let config = SaConfig::default()
            .with_initial_temperature(1e-3)
            .with_freeze_temperature(1e-4)
            .with_alpha(0.5)
            .with_chain_length(5)
            .with_seed(11);
        let result = SaRunner::run(&p, &config);
        assert!(result.accepted_moves <= result.levels * 5);
        assert!(result.iterations <= result.levels * 5 * STEPS_PER_ACCEPTANCE);
        assert!(result.iterations >= result.accepted_moves);
    }

    #[test]
    fn test_sa_deterministic() {
        let p = medium();
        let config = SaConfig::default()
            .with_alpha(0.8)
            .with_chain_length(10)
            .with_seed(1234);
        let a = SaRunner::run(&p, &config);
        let b = SaRunner::run(&p, &config);
        assert_eq!(a.best, b.best);
        assert_eq!(a.value_history, b.value_history);
        assert_eq!(a.accepted_moves, b.accepted_moves);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_sa_history_non_decreasing() {
        let p = medium();
        let result = SaRunner::run(&p, &SaConfig::default().with_alpha(0.7).with_seed(5));
        assert!(result.best.is_feasible());
        assert!(result.best_value >= toyoda(&p).value());
        for w in result.value_history.windows(2) {
            assert!(w[1] > w[0], "best value history must increase: {w:?}");
        }
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_sa_respects_time_limit() {
        let p = medium();
        let start = std::time::Instant::now();
        let result = SaRunner::run(&p, &SaConfig::default().with_time_limit_ms(50).with_seed(2));
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
        assert!(result.best.is_feasible());
    }
}
