//! Random number generator creation.
//!
//! Every stochastic routine takes `&mut R: Rng` explicitly; a driver owns
//! one generator per run, so a fixed seed reproduces the whole run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, drawing one from OS
/// entropy when absent.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    create_rng(seed.unwrap_or_else(rand::random))
}
