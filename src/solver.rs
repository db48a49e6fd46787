//! One-shot entry point: run a driver, then an optional polish pass.

use crate::construct::{Construction, Ranking};
use crate::deadline::Deadline;
use crate::ga::{GaConfig, GaRunner};
use crate::local::{Acceptance, DescentStats, LocalSearch};
use crate::problem::Problem;
use crate::random::rng_from;
use crate::sa::{SaConfig, SaRunner};
use crate::solution::Solution;
use crate::vnd::Vnd;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// The driver producing the initial solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Random insertion.
    Random,
    /// Profit-greedy insertion.
    Greedy,
    /// Toyoda pseudo-utility construction.
    Toyoda,
    /// Simulated annealing.
    Annealing,
    /// Genetic algorithm.
    Genetic,
}

impl Heuristic {
    /// All heuristics, in command-line order.
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Random,
        Heuristic::Greedy,
        Heuristic::Toyoda,
        Heuristic::Annealing,
        Heuristic::Genetic,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Random => "random",
            Heuristic::Greedy => "greedy",
            Heuristic::Toyoda => "toyoda",
            Heuristic::Annealing => "sa",
            Heuristic::Genetic => "ga",
        }
    }

    /// The constructive strategy behind this heuristic, if it is one.
    pub fn construction(self) -> Option<Construction> {
        match self {
            Heuristic::Random => Some(Construction::Random),
            Heuristic::Greedy => Some(Construction::Greedy),
            Heuristic::Toyoda => Some(Construction::Toyoda),
            Heuristic::Annealing | Heuristic::Genetic => None,
        }
    }

    /// Refill ranking used when polishing this heuristic's output.
    ///
    /// Constructive heuristics polish with their own ranking; the
    /// metaheuristics use pseudo-utility.
    pub fn polish_ranking(self) -> Ranking {
        self.construction()
            .map(Construction::ranking)
            .unwrap_or(Ranking::PseudoUtility)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| format!("unknown heuristic `{s}`"))
    }
}

/// The polish pass applied to the driver's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Improvement {
    /// Report the driver's solution as is.
    #[default]
    None,
    /// 1-item local search, first improvement.
    FirstImprovement,
    /// 1-item local search, best improvement.
    BestImprovement,
    /// Variable neighborhood descent.
    Vnd,
}

/// Configuration for [`Solver::solve`].
///
/// # Examples
///
/// ```
/// use mkp_metaheur::problem::Problem;
/// use mkp_metaheur::solver::{Heuristic, Improvement, SolveConfig, Solver};
///
/// let p = Problem::new(vec![10, 20, 15, 7], vec![vec![5, 8, 6, 3]], vec![10], 0).unwrap();
/// let config = SolveConfig::new(Heuristic::Greedy)
///     .with_improvement(Improvement::Vnd)
///     .with_seed(1);
/// let outcome = Solver::solve(&p, &config);
/// assert!(outcome.feasible);
/// assert_eq!(outcome.solution.value(), 22);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveConfig {
    /// Driver.
    pub heuristic: Heuristic,

    /// Polish pass.
    pub improvement: Improvement,

    /// Largest neighborhood for [`Improvement::Vnd`].
    pub k_max: usize,

    /// Budget in milliseconds, applied to the driver and again to the
    /// polish pass. `None` = unbounded.
    pub time_limit_ms: Option<u64>,

    /// Random seed for the whole run. `None` = drawn from OS entropy.
    pub seed: Option<u64>,

    /// Annealing parameters; its own seed and time limit are ignored.
    pub sa: SaConfig,

    /// GA parameters; its own seed and time limit are ignored.
    pub ga: GaConfig,
}

impl SolveConfig {
    /// Defaults for `heuristic`: no polish, no time limit, k_max = 3.
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            improvement: Improvement::None,
            k_max: 3,
            time_limit_ms: None,
            seed: None,
            sa: SaConfig::default(),
            ga: GaConfig::default(),
        }
    }

    pub fn with_improvement(mut self, improvement: Improvement) -> Self {
        self.improvement = improvement;
        self
    }

    pub fn with_k_max(mut self, k_max: usize) -> Self {
        self.k_max = k_max;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Validates the configuration, including the nested driver configs.
    pub fn validate(&self) -> Result<(), String> {
        if self.k_max == 0 {
            return Err("k_max must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive".into());
        }
        self.sa.validate()?;
        self.ga.validate()
    }
}

/// What [`Solver::solve`] produced.
#[derive(Debug, Clone)]
pub struct SolveOutcome<'p> {
    /// Final solution.
    pub solution: Solution<'p>,

    /// Whether `solution` satisfies every capacity.
    pub feasible: bool,

    /// Value before the polish pass.
    pub driver_value: i64,

    /// Polish counters, when a polish pass ran.
    pub polish: Option<DescentStats>,

    /// Wall-clock time of driver and polish.
    pub elapsed: Duration,
}

/// Runs one heuristic end to end.
pub struct Solver;

impl Solver {
    /// Runs the configured driver and polish pass on `problem`.
    ///
    /// One generator, seeded once, feeds every random choice of the run.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[tracing::instrument(level = "debug", skip_all, fields(heuristic = %config.heuristic))]
    pub fn solve<'p>(problem: &'p Problem, config: &SolveConfig) -> SolveOutcome<'p> {
        config.validate().expect("invalid SolveConfig");

        let started = Instant::now();
        let mut rng = rng_from(config.seed);
        let deadline = Deadline::from_millis(config.time_limit_ms);

        let mut solution = if let Some(construction) = config.heuristic.construction() {
            construction.build(problem, &mut rng)
        } else if config.heuristic == Heuristic::Annealing {
            SaRunner::run_with(problem, &config.sa, &deadline, &mut rng).best
        } else {
            GaRunner::run_with(problem, &config.ga, &deadline, &mut rng).best
        };
        let driver_value = solution.value();
        tracing::debug!(value = driver_value, "driver done");

        let ranking = config.heuristic.polish_ranking();
        let polish_deadline = Deadline::from_millis(config.time_limit_ms);
        let polish = match config.improvement {
            Improvement::None => None,
            Improvement::FirstImprovement | Improvement::BestImprovement => {
                let acceptance = if config.improvement == Improvement::FirstImprovement {
                    Acceptance::FirstImprovement
                } else {
                    Acceptance::BestImprovement
                };
                let mut ls = LocalSearch::new(problem, acceptance, ranking);
                Some(ls.improve(&mut solution, &polish_deadline, &mut rng))
            }
            Improvement::Vnd => {
                let mut vnd = Vnd::new(problem, config.k_max, ranking);
                Some(vnd.improve(&mut solution, &polish_deadline, &mut rng))
            }
        };

        let feasible = solution.is_feasible();
        let elapsed = started.elapsed();
        tracing::info!(
            value = solution.value(),
            driver_value,
            feasible,
            elapsed_ms = elapsed.as_millis() as u64,
            "solve finished"
        );

        SolveOutcome {
            solution,
            feasible,
            driver_value,
            polish,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> Problem {
        Problem::new(vec![10, 20, 15, 7], vec![vec![5, 8, 6, 3]], vec![10], 0).unwrap()
    }

    fn brute_force(p: &Problem) -> i64 {
        (0u32..1 << p.n())
            .map(|mask| Solution::from_items(p, (0..p.n()).filter(|j| mask & (1 << j) != 0)))
            .filter(|s| s.is_feasible())
            .map(|s| s.value())
            .max()
            .unwrap_or(0)
    }

    fn fast(heuristic: Heuristic) -> SolveConfig {
        SolveConfig::new(heuristic)
            .with_seed(17)
            .with_ga(GaConfig::default().with_population_size(10).with_iteration_factor(50))
    }

    #[test]
    fn test_brute_force_optimum() {
        // {2, 3} weighs 9 and beats both {1} (20) and {0, 3} (17)
        assert_eq!(brute_force(&problem()), 22);
    }

    #[test]
    fn test_greedy_end_to_end() {
        let p = problem();
        let outcome = Solver::solve(&p, &fast(Heuristic::Greedy));
        assert!(outcome.feasible);
        assert!(outcome.solution.value() >= 17);
        assert!(outcome.polish.is_none());
        assert_eq!(outcome.driver_value, outcome.solution.value());
    }

    #[test]
    fn test_every_heuristic_and_polish_is_feasible() {
        let p = problem();
        let improvements = [
            Improvement::None,
            Improvement::FirstImprovement,
            Improvement::BestImprovement,
            Improvement::Vnd,
        ];
        for heuristic in Heuristic::ALL {
            for improvement in improvements {
                let outcome = Solver::solve(&p, &fast(heuristic).with_improvement(improvement));
                assert!(outcome.feasible, "{heuristic}/{improvement:?}");
                assert!(outcome.solution.value() >= outcome.driver_value);
                assert!(outcome.solution.value() <= 22);
            }
        }
    }

    #[test]
    fn test_metaheuristics_reach_optimum() {
        let p = problem();
        for heuristic in [Heuristic::Annealing, Heuristic::Genetic] {
            let outcome = Solver::solve(&p, &fast(heuristic).with_time_limit_ms(500));
            assert_eq!(outcome.solution.value(), 22, "{heuristic}");
        }
    }

    #[test]
    fn test_constructive_heuristics_build_their_construction() {
        let p = problem();
        for heuristic in [Heuristic::Random, Heuristic::Greedy, Heuristic::Toyoda] {
            let construction = heuristic.construction().unwrap();
            let outcome = Solver::solve(&p, &fast(heuristic));
            let built = construction.build(&p, &mut rng_from(Some(17)));
            assert_eq!(outcome.solution, built, "{heuristic}");
            assert_eq!(heuristic.polish_ranking(), construction.ranking());
        }
        assert!(Heuristic::Annealing.construction().is_none());
        assert!(Heuristic::Genetic.construction().is_none());
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let p = problem();
        let config = fast(Heuristic::Random).with_improvement(Improvement::FirstImprovement);
        let a = Solver::solve(&p, &config);
        let b = Solver::solve(&p, &config);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn test_heuristic_names_round_trip() {
        for h in Heuristic::ALL {
            assert_eq!(h.name().parse::<Heuristic>(), Ok(h));
        }
        assert!("tabu".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::Genetic.polish_ranking(), Ranking::PseudoUtility);
        assert_eq!(Heuristic::Random.polish_ranking(), Ranking::Random);
    }
}
