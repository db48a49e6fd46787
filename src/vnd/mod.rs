//! Variable Neighborhood Descent (VND).
//!
//! Explores the k-removal neighborhoods `N_1 .. N_kmax` exhaustively. A
//! neighbor of `N_k` drops k included items (enumerated by
//! [`KMove`](crate::kmove::KMove)) and refills in ranking order. Each
//! sweep scans every neighborhood before committing its best candidate,
//! and sweeps repeat while one improves.
//!
//! # References
//!
//! - Mladenović & Hansen (1997), "Variable neighborhood search"

mod config;
mod runner;

pub use config::VndConfig;
pub use runner::{Vnd, VndResult, VndRunner};
