//! Incrementally evaluated knapsack solutions.
//!
//! A [`Solution`] is bound to one [`Problem`](crate::problem::Problem) and
//! keeps three pieces of state in lockstep: the inclusion vector, the
//! per-dimension resource usage and the objective value.
//!
//! # Invariants
//!
//! After every public operation except the raw edits
//! [`flip`](Solution::flip) and [`set_included`](Solution::set_included):
//!
//! - `value == Σ profit(j)` over included `j`
//! - `resources_used[i] == Σ weight(i, j)` over included `j`
//!
//! Raw edits must be followed by [`recompute`](Solution::recompute).
//! Feasibility is not an invariant; use [`is_feasible`](Solution::is_feasible).

mod neighborhood;
mod types;

pub use types::Solution;
