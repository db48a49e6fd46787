//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the steady-state loop.

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use mkp_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.mutation_rate, 2);
/// assert_eq!(config.pool_size, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use mkp_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_pool_size(3)
///     .with_iteration_factor(500)
///     .with_seed(9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Items whose bit is flipped in every child.
    pub mutation_rate: usize,

    /// Members per tournament. Two disjoint pools are drawn per iteration.
    pub pool_size: usize,

    /// Iteration cap per item: the run stops after
    /// `iteration_factor * n` children.
    pub iteration_factor: usize,

    /// Wall-clock budget in milliseconds. `None` = iteration cap only.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 2,
            pool_size: 2,
            iteration_factor: 1_000_000,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_mutation_rate(mut self, rate: usize) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    pub fn with_iteration_factor(mut self, factor: usize) -> Self {
        self.iteration_factor = factor;
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

    /// Iteration cap for an instance with `n` items.
    pub fn max_iterations(&self, n: usize) -> usize {
        self.iteration_factor.saturating_mul(n)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_size == 0 {
            return Err("pool_size must be at least 1".into());
        }
        if self.population_size < 2 * self.pool_size {
            return Err(format!(
                "population_size must hold two pools of {}, got {}",
                self.pool_size, self.population_size
            ));
        }
        if self.iteration_factor == 0 {
            return Err("iteration_factor must be positive".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive".into());
        }
        Ok(())
    }
}
