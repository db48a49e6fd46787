//! 1-item local search.
//!
//! Each sweep visits the included items in random order. A neighbor
//! drops one of them and refills greedily with all other items in the
//! configured [`Ranking`](crate::construct::Ranking) order. Under
//! [`Acceptance::FirstImprovement`] the first better neighbor is
//! committed at once; under [`Acceptance::BestImprovement`] the sweep
//! completes and its best neighbor is committed. The search stops after
//! a sweep with no improvement.

mod config;
mod runner;

pub use config::{Acceptance, LocalSearchConfig};
pub use runner::{DescentStats, LocalSearch, LocalSearchResult, LocalSearchRunner};
