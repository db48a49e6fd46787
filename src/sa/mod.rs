//! Simulated Annealing (SA).
//!
//! Starts from a Toyoda construction. Every chain step flips one random
//! item, repairs the candidate by dropping random items, polishes it with
//! best-improvement local search, and accepts it by the Metropolis rule.
//! Temperature falls geometrically from `T0` until it freezes.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{metropolis, SaResult, SaRunner};
