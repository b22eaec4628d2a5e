//! Best-Improvement configuration and move policies.

/// Which relocations a round considers and how they are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovePolicy {
    /// Every task on every machine; rank by reduction of the load
    /// standard deviation.
    #[default]
    GlobalDispersion,

    /// Only tasks on the most-loaded machine (lowest index on ties); rank by
    /// `source.load − max(source.load − p, target.load + p)`.
    MaxLoadTargeted {
        /// Consider only the longest task of that machine.
        longest_task_only: bool,
    },
}

/// Configuration for [`BestImprovementRunner`](super::BestImprovementRunner).
///
/// # Examples
///
/// ```
/// use u_balance::best::{BestImprovementConfig, MovePolicy};
///
/// let config = BestImprovementConfig::default()
///     .with_policy(MovePolicy::MaxLoadTargeted { longest_task_only: true })
///     .with_max_rounds(500);
/// assert_eq!(config.max_rounds, Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestImprovementConfig {
    /// Candidate set and ranking.
    pub policy: MovePolicy,

    /// Upper bound on rounds. `None` runs until no move improves.
    pub max_rounds: Option<usize>,

    /// Whether to score source machines in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature.
    pub parallel: bool,
}

impl BestImprovementConfig {
    /// Sets the move policy.
    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Caps the number of rounds.
    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = Some(n);
        self
    }

    /// Enables or disables parallel candidate scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
