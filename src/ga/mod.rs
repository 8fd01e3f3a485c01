//! Genetic Algorithm framework.
//!
//! A generic GA engine over genomes of any gene type. A run is assembled
//! from a [`Dna`] bundle (gene alphabet plus one strategy of each kind) and
//! a [`GaConfig`], then driven by [`GeneticAlgorithm`].
//!
//! # Core Traits
//!
//! - [`FitnessStrategy`]: Scores a genome (higher is better); closures qualify
//! - [`SelectionStrategy`]: Draws two parents from an evaluated population
//! - [`CrossoverStrategy`]: Recombines two parents into two offspring
//! - [`MutationStrategy`]: Perturbs an offspring in place under a mutation rate
//!
//! # Key Types
//!
//! - [`Individual`]: A genome with its cached fitness
//! - [`Population`]: Fixed-size collection of individuals
//! - [`GenePool`] / [`Dna`]: Genome factory and strategy bundle
//! - [`GaConfig`]: Run parameters (sizes, generations, mutation rate, seed)
//! - [`GeneticAlgorithm`]: Executes the evolutionary loop
//! - [`GaResult`]: Outcome of a (possibly cancelled) run
//!
//! # Submodules
//!
//! - [`selection`]: Roulette, SUS, tournament, rank, Boltzmann, elitism, ...
//! - [`crossover`]: Half, one/two-point, uniform, BLX-α, arithmetic, PMX, OX
//! - [`mutation`]: Element, bit flip, swap, scramble, Gaussian, inversion, ...
//! - [`fitness`]: Ready-made objectives for bit strings and targets
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod crossover;
mod dna;
pub mod fitness;
pub mod mutation;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use crossover::{
    ArithmeticCrossover, BlendCrossover, HalfCrossover, OnePointCrossover, OrderCrossover,
    PartiallyMappedCrossover, TwoPointCrossover, UniformCrossover,
};
pub use dna::{Dna, GenePool};
pub use fitness::{
    CompareTargetFitness, MaximizeOnesFitness, MinimizeDistanceFitness, WeightedSumFitness,
};
pub use mutation::{
    BitFlipMutation, BoundaryMutation, ElementMutation, GaussianMutation, InsertMutation,
    InversionMutation, MultiElementMutation, PolynomialMutation, ScrambleMutation,
    SegmentSwapMutation, SwapMutation,
};
pub use population::Population;
pub use runner::{GaResult, GenerationStats, GeneticAlgorithm};
pub use selection::{
    BoltzmannSelection, ElitismSelection, RankBiasedSelection, RankSelection,
    RouletteWheelSelection, SteadyStateSelection, StochasticUniversalSampling,
    TournamentSelection, TruncationSelection,
};
pub use types::{
    check_same_length, CrossoverStrategy, FitnessStrategy, Gene, Individual, MutationStrategy,
    SelectionStrategy,
};
