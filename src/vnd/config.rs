//! VND configuration.

use crate::construct::Ranking;

/// Configuration for variable neighborhood descent.
///
/// # Examples
///
/// ```
/// use mkp_metaheur::vnd::VndConfig;
///
/// let config = VndConfig::default().with_k_max(2).with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VndConfig {
    /// Largest removal-set size. Neighborhoods `1..=k_max` are explored.
    pub k_max: usize,

    /// Order in which items are offered when refilling.
    pub ranking: Ranking,

    /// Wall-clock budget in milliseconds. `None` = until no sweep improves.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for VndConfig {
    fn default() -> Self {
        Self {
            k_max: 3,
            ranking: Ranking::default(),
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl VndConfig {
    pub fn with_k_max(mut self, k_max: usize) -> Self {
        self.k_max = k_max;
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
        if self.k_max == 0 {
            return Err("k_max must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive".into());
        }
        Ok(())
    }
}
