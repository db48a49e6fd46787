//! Item rankings and constructive heuristics.
//!
//! Three ways to build a feasible solution from empty, all by repeated
//! capacity-checked insertion:
//!
//! - [`random_insertion`]: one pass over a random permutation
//! - [`greedy_insertion`]: one pass by descending profit
//! - [`toyoda`]: passes by descending pseudo-utility, reranked as the
//!   partial solution grows
//!
//! The same orderings drive the refill step of the improvement
//! procedures through [`Ranker`].
//!
//! # References
//!
//! - Toyoda (1975), "A Simplified Algorithm for Obtaining Approximate
//!   Solutions to Zero-One Programming Problems"

mod heuristics;
mod ranking;

pub use heuristics::{greedy_insertion, random_insertion, toyoda, Construction};
pub use ranking::{rank_descending, PseudoUtility, Ranker, Ranking};
