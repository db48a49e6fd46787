//! SA configuration.

/// Configuration for simulated annealing.
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `alpha` after every level until it drops below `freeze_temperature`.
///
/// # Examples
///
/// ```
/// use mkp_metaheur::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(200.0)
///     .with_alpha(0.9)
///     .with_time_limit_ms(2_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature `T0`.
    pub initial_temperature: f64,

    /// Geometric cooling ratio in (0, 1).
    pub alpha: f64,

    /// The run ends once the temperature is below this value.
    pub freeze_temperature: f64,

    /// Accepted moves per temperature level when no time limit is set.
    /// `None` = the number of items. Rejected candidates do not count,
    /// though a level also closes after 100 steps per owed acceptance.
    ///
    /// With a time limit, each level instead runs for an equal share of
    /// the budget.
    pub chain_length: Option<usize>,

    /// Wall-clock budget in milliseconds. `None` = run every level.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 500.0,
            alpha: 0.95,
            freeze_temperature: 1e-5,
            chain_length: None,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_freeze_temperature(mut self, t: f64) -> Self {
        self.freeze_temperature = t;
        self
    }

    pub fn with_chain_length(mut self, n: usize) -> Self {
        self.chain_length = Some(n);
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

    /// Number of temperature levels, `floor(ln(freeze / T0) / ln(alpha))`.
    ///
    /// The time budget is split evenly across this many levels.
    pub fn levels(&self) -> usize {
        let k = ((self.freeze_temperature / self.initial_temperature).ln() / self.alpha.ln()).floor();
        if k.is_finite() && k >= 1.0 {
            k as usize
        } else {
            1
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.freeze_temperature <= 0.0 {
            return Err("freeze_temperature must be positive".into());
        }
        if self.freeze_temperature >= self.initial_temperature {
            return Err("freeze_temperature must be less than initial_temperature".into());
        }
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }
        if self.chain_length == Some(0) {
            return Err("chain_length must be positive".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        // ln(2e-8) / ln(0.95) = 345.6
        assert_eq!(SaConfig::default().levels(), 345);
    }

    #[test]
    fn test_validation() {
        assert!(SaConfig::default().validate().is_ok());
        assert!(SaConfig::default().with_alpha(1.0).validate().is_err());
        assert!(SaConfig::default().with_alpha(0.0).validate().is_err());
        assert!(SaConfig::default()
            .with_freeze_temperature(600.0)
            .validate()
            .is_err());
        assert!(SaConfig::default().with_chain_length(0).validate().is_err());
    }
}
