//! Local search configuration.

use crate::construct::Ranking;

/// When a sweep commits an improving neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptance {
    /// Commit the first improving neighbor and start a new sweep.
    FirstImprovement,
    /// Evaluate the whole sweep and commit the best neighbor.
    #[default]
    BestImprovement,
}

/// Configuration for the 1-item local search.
///
/// # Examples
///
/// ```
/// use mkp_metaheur::construct::Ranking;
/// use mkp_metaheur::local::{Acceptance, LocalSearchConfig};
///
/// let config = LocalSearchConfig::default()
///     .with_acceptance(Acceptance::FirstImprovement)
///     .with_ranking(Ranking::Greedy)
///     .with_time_limit_ms(500)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// First or best improvement.
    pub acceptance: Acceptance,

    /// Order in which items are offered when refilling.
    pub ranking: Ranking,

    /// Wall-clock budget in milliseconds. `None` = until no sweep improves.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl LocalSearchConfig {
    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
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

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive".into());
        }
        Ok(())
    }
}
