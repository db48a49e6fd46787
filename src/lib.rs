//! Metaheuristics for the 0/1 multidimensional knapsack problem (MKP).
//!
//! Choose a subset of `n` items maximizing total profit while every one of
//! `m` resource dimensions stays within its capacity.
//!
//! - **Construction** ([`construct`]): random, profit-greedy and Toyoda
//!   pseudo-utility insertion.
//! - **Local search** ([`local`]): drop one item and refill, with first-
//!   or best-improvement acceptance.
//! - **VND** ([`vnd`]): exhaustive k-item removal neighborhoods built on
//!   the [`kmove`] enumerator.
//! - **Simulated Annealing** ([`sa`]): geometric cooling over repaired,
//!   locally optimized flip moves.
//! - **Genetic Algorithm** ([`ga`]): steady-state evolution with uniform
//!   crossover, pseudo-utility repair and duplicate rejection.
//!
//! [`solver::Solver`] runs one driver plus an optional polish pass, which
//! is what the `mkp` binary does.
//!
//! # Architecture
//!
//! A [`problem::Problem`] is immutable. Every [`solution::Solution`]
//! borrows it and keeps value and per-dimension usage in step with its
//! inclusion vector, so single-item moves cost O(m). Randomness flows
//! through an explicit generator and time budgets through an explicit
//! [`deadline::Deadline`]; nothing is global.

pub mod construct;
pub mod deadline;
pub mod ga;
pub mod kmove;
pub mod local;
pub mod problem;
pub mod random;
pub mod sa;
pub mod solution;
pub mod solver;
pub mod vnd;
