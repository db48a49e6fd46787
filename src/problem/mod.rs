//! Multidimensional knapsack instances.
//!
//! A [`Problem`] holds `n` items, each with a profit and a resource
//! consumption in every one of `m` knapsack dimensions, together with
//! the capacity of each dimension. Instances are immutable once built
//! and are shared read-only by every [`Solution`](crate::solution::Solution)
//! bound to them.
//!
//! # Instance format
//!
//! Whitespace-separated integers, in this order:
//!
//! ```text
//! n m best_known
//! p_0 .. p_{n-1}
//! w_{0,0} .. w_{0,n-1}
//! ..
//! w_{m-1,0} .. w_{m-1,n-1}
//! c_0 .. c_{m-1}
//! ```
//!
//! A `best_known` of `0` means "unknown".

mod err;
mod loader;
mod types;

pub use err::ProblemError;
pub use loader::{from_path, parse};
pub use types::Problem;
