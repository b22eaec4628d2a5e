//! Iterated Local Search (ILS).
//!
//! Alternates two phases around a current-best assignment:
//!
//! - **Perturbing**: a copy of the best assignment has a fraction of its
//!   tasks relocated at random, to leave the current local optimum.
//! - **Optimizing**: Best-Improvement search runs on the copy until it
//!   converges.
//!
//! The copy replaces the best assignment only if its makespan is strictly
//! lower, so the reported best never regresses. The search ends after a
//! configurable number of iterations without improvement.
//!
//! # References
//!
//! - Lourenço, H. R., Martin, O. C. & Stützle, T. (2003). "Iterated Local
//!   Search", *Handbook of Metaheuristics*, 320-353.

mod config;
mod perturb;
mod runner;

pub use config::IlsConfig;
pub use perturb::{perturb, perturbation_count};
pub use runner::{IlsResult, IlsRunner};
