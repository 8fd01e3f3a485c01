//! Generic genetic algorithm engine.
//!
//! Evolves a fixed-size population of candidate solutions, each a genome of
//! user-chosen gene type, through repeated selection, crossover, mutation,
//! and full generational replacement:
//!
//! - **Strategies**: selection, crossover, mutation, and fitness are traits
//!   held as trait objects, so operators can be swapped per run.
//! - **Operator library**: roulette, tournament, rank, SUS, Boltzmann and
//!   more for selection; point, uniform, blend, PMX and OX crossovers;
//!   element, bit-flip, swap, Gaussian and other mutations.
//! - **Reproducibility**: one seedable generator is threaded through the
//!   engine and every strategy call.
//!
//! # Quick Start
//!
//! ```
//! use u_evolve::ga::{Dna, GaConfig, GenePool, GeneticAlgorithm, MaximizeOnesFitness};
//!
//! let pool = GenePool::new(vec![0u8, 1]).unwrap();
//! let dna = Dna::new(pool, MaximizeOnesFitness);
//! let config = GaConfig::default().with_genome_size(16).with_seed(7);
//!
//! let mut ga = GeneticAlgorithm::new(dna, config).unwrap();
//! let best = ga.run().unwrap();
//! assert_eq!(best.len(), 16);
//! ```
//!
//! # Architecture
//!
//! The crate contains no domain concepts. Problems are expressed entirely
//! through the gene alphabet and a fitness strategy supplied by the caller.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{EvolveError, Result};
