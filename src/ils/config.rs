//! ILS configuration.

use crate::best::BestImprovementConfig;
use crate::error::{BalanceError, Result};

/// Configuration for [`IlsRunner`](super::IlsRunner).
///
/// # Examples
///
/// ```
/// use u_balance::ils::IlsConfig;
///
/// let config = IlsConfig::default()
///     .with_perturbation_rate(0.05)
///     .with_max_non_improving(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_non_improving, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlsConfig {
    /// Fraction of all tasks relocated per perturbation, in `[0, 1]`.
    ///
    /// Any positive rate relocates at least one task. Zero disables
    /// perturbation, which makes every iteration after the first identical.
    pub perturbation_rate: f64,

    /// Iterations without improvement before stopping.
    pub max_non_improving: usize,

    /// Hard cap on iterations. 0 = no limit.
    pub max_iterations: usize,

    /// Whether to run Best-Improvement on the initial assignment before the
    /// first perturbation.
    pub optimize_initial: bool,

    /// Local search applied after each perturbation.
    pub local_search: BestImprovementConfig,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            perturbation_rate: 0.1,
            max_non_improving: 1000,
            max_iterations: 0,
            optimize_initial: false,
            local_search: BestImprovementConfig::default(),
            seed: None,
        }
    }
}

impl IlsConfig {
    /// Sets the perturbation rate.
    pub fn with_perturbation_rate(mut self, rate: f64) -> Self {
        self.perturbation_rate = rate;
        self
    }

    /// Sets the non-improvement budget.
    pub fn with_max_non_improving(mut self, n: usize) -> Self {
        self.max_non_improving = n;
        self
    }

    /// Sets the hard iteration cap (0 = none).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Enables or disables the initial local search.
    pub fn with_optimize_initial(mut self, optimize: bool) -> Self {
        self.optimize_initial = optimize;
        self
    }

    /// Sets the local search configuration.
    pub fn with_local_search(mut self, local_search: BestImprovementConfig) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let rate = self.perturbation_rate;
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(BalanceError::InvalidConfig(format!(
                "perturbation_rate must be in [0, 1], got {rate}"
            )));
        }
        if self.max_non_improving == 0 {
            return Err(BalanceError::InvalidConfig(
                "max_non_improving must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
