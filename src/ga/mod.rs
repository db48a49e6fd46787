//! Steady-state Genetic Algorithm (GA) for the knapsack.
//!
//! Individuals are inclusion vectors. Each iteration produces one child
//! by tournament selection, uniform crossover and bit-flip mutation. The
//! child is repaired by pseudo-utility, polished by local search, and
//! replaces the worst member unless it duplicates an existing one.
//!
//! # References
//!
//! - Chu & Beasley (1998), "A Genetic Algorithm for the Multidimensional
//!   Knapsack Problem"

mod config;
mod operators;
mod population;
mod runner;

pub use config::GaConfig;
pub use operators::{mutate, repair, uniform_crossover};
pub use population::Population;
pub use runner::{GaResult, GaRunner};
