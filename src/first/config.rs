//! First-Improvement configuration.

/// Configuration for [`FirstImprovementRunner`](super::FirstImprovementRunner).
///
/// # Examples
///
/// ```
/// use u_balance::first::FirstImprovementConfig;
///
/// let config = FirstImprovementConfig::default().with_max_moves(10_000);
/// assert_eq!(config.max_moves, Some(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirstImprovementConfig {
    /// Upper bound on accepted moves. `None` runs until convergence.
    pub max_moves: Option<usize>,
}

impl FirstImprovementConfig {
    /// Caps the number of accepted moves.
    pub fn with_max_moves(mut self, n: usize) -> Self {
        self.max_moves = Some(n);
        self
    }
}
