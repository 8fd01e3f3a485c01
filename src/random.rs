//! Random number generator construction.
//!
//! Every stochastic decision in the crate draws from an explicit generator
//! threaded through the engine and its strategies. There is no ambient
//! global randomness, so a fixed seed reproduces a run exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator type owned by the engine.
pub type EvolveRng = StdRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> EvolveRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> EvolveRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
