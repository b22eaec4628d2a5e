//! Objective functions over machine loads.
//!
//! | Function | Definition |
//! |----------|-----------|
//! | [`makespan`] | `max(load)` |
//! | [`load_std_dev`] | `sqrt(mean(load²) − mean(load)²)` (population) |
//!
//! Both are pure and O(machines). [`LoadStats`] keeps the exact integer
//! aggregates behind the standard deviation so the effect of a candidate
//! relocation can be computed without touching the assignment.

use crate::model::{Assignment, Machine};

/// Maximum machine load.
pub fn makespan(assignment: &Assignment) -> u64 {
    assignment
        .machines()
        .iter()
        .map(Machine::load)
        .max()
        .unwrap_or(0)
}

/// Population standard deviation of machine loads.
pub fn load_std_dev(assignment: &Assignment) -> f64 {
    LoadStats::of(assignment).std_dev()
}

/// Exact aggregates of a load vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of machines.
    pub count: usize,
    /// `Σ load`.
    pub sum: u128,
    /// `Σ load²`.
    pub sum_of_squares: u128,
}

impl LoadStats {
    /// Aggregates the current loads of an assignment.
    pub fn of(assignment: &Assignment) -> Self {
        Self::from_loads(assignment.machines().iter().map(Machine::load))
    }

    /// Aggregates an arbitrary sequence of loads.
    pub fn from_loads(loads: impl IntoIterator<Item = u64>) -> Self {
        let mut stats = Self {
            count: 0,
            sum: 0,
            sum_of_squares: 0,
        };
        for load in loads {
            let l = load as u128;
            stats.count += 1;
            stats.sum += l;
            stats.sum_of_squares += l * l;
        }
        stats
    }

    /// Population variance, clamped at zero against rounding.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum as f64 / n;
        (self.sum_of_squares as f64 / n - mean * mean).max(0.0)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Aggregates after moving `processing_time` from a machine with
    /// `source_load` to one with `target_load`.
    pub fn after_move(&self, source_load: u64, target_load: u64, processing_time: u64) -> Self {
        let delta = square_delta(source_load, target_load, processing_time);
        Self {
            sum_of_squares: (self.sum_of_squares as i128 + delta) as u128,
            ..*self
        }
    }
}

/// Change of `Σ load²` caused by moving `p` from load `s` to load `t`:
/// `(s − p)² + (t + p)² − s² − t² = 2p(t + p − s)`.
///
/// Negative means the loads become more even. Since `Σ load` is unchanged by
/// a relocation, a smaller `Σ load²` is exactly a smaller standard deviation.
pub fn square_delta(source_load: u64, target_load: u64, processing_time: u64) -> i128 {
    let p = processing_time as i128;
    2 * p * (target_load as i128 + p - source_load as i128)
}
