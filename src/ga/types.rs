//! Core trait definitions for the GA engine.
//!
//! [`Individual`] is the unit the engine moves around. The strategy traits
//! [`FitnessStrategy`], [`SelectionStrategy`], [`CrossoverStrategy`] and
//! [`MutationStrategy`] define the contract between the generic engine and
//! concrete operators.
//!
//! Strategies receive the generator as `&mut dyn RngCore` so they can be
//! stored as trait objects and swapped per run.

use super::dna::GenePool;
use super::population::Population;
use crate::error::{EvolveError, Result};
use rand::RngCore;
use std::fmt::Debug;

/// Marker trait for gene types.
///
/// Blanket-implemented for any cloneable, comparable, thread-safe type, so
/// `bool`, `u8`, `i32`, `f64`, `char`, or a user enum all work as genes.
pub trait Gene: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Gene for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// A candidate solution: a genome plus its cached fitness.
///
/// The cached fitness is cleared whenever mutable access to the genome is
/// handed out, so a stale value is never observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G: Gene> {
    genome: Vec<G>,
    fitness: Option<f64>,
}

impl<G: Gene> Individual<G> {
    /// Creates an unevaluated individual owning `genome`.
    pub fn new(genome: Vec<G>) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// Returns the genome.
    pub fn genome(&self) -> &[G] {
        &self.genome
    }

    /// Returns the genome for in-place modification and invalidates the
    /// cached fitness.
    ///
    /// A slice is returned so the genome length cannot change.
    pub fn genome_mut(&mut self) -> &mut [G] {
        self.fitness = None;
        &mut self.genome
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genome(self) -> Vec<G> {
        self.genome
    }

    /// Genome length.
    pub fn len(&self) -> usize {
        self.genome.len()
    }

    /// Whether the genome is empty.
    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }

    /// Cached fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Cached fitness, or [`EvolveError::UnevaluatedPopulation`].
    pub fn try_fitness(&self) -> Result<f64> {
        self.fitness.ok_or(EvolveError::UnevaluatedPopulation)
    }

    /// Whether a fitness value is cached.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Evaluates the genome with `strategy`, caches and returns the value.
    pub fn calculate_fitness(&mut self, strategy: &dyn FitnessStrategy<G>) -> f64 {
        let f = strategy.evaluate(&self.genome);
        self.fitness = Some(f);
        f
    }
}

/// Scores a genome. Higher is better.
///
/// Must be a pure function of the genome and the strategy's own fixed
/// parameters. Minimization problems negate their objective.
///
/// Any `Fn(&[G]) -> f64` closure is a fitness strategy:
///
/// ```
/// use u_evolve::ga::Individual;
///
/// let sphere = |g: &[f64]| -g.iter().map(|x| x * x).sum::<f64>();
/// let mut ind = Individual::new(vec![1.0, 2.0]);
/// assert_eq!(ind.calculate_fitness(&sphere), -5.0);
/// ```
pub trait FitnessStrategy<G: Gene>: Send + Sync {
    /// Returns the fitness of `genome`.
    fn evaluate(&self, genome: &[G]) -> f64;
}

impl<G, F> FitnessStrategy<G> for F
where
    G: Gene,
    F: Fn(&[G]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genome: &[G]) -> f64 {
        self(genome)
    }
}

/// Chooses parents from an evaluated population.
///
/// Implementors provide [`select`](SelectionStrategy::select), which draws
/// one individual. The engine always calls
/// [`select_parents`](SelectionStrategy::select_parents), whose default
/// draws twice; strategies that naturally produce a pair (roulette wheel,
/// stochastic universal sampling) override it.
///
/// Implementations must not modify the population and must return
/// [`EvolveError::UnevaluatedPopulation`] if any fitness is missing.
pub trait SelectionStrategy<G: Gene>: Send + Sync {
    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;

    /// Checks the strategy's own parameters. Called once at engine
    /// construction.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Draws a single individual.
    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>>;

    /// Draws exactly two parents.
    fn select_parents<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(&'p Individual<G>, &'p Individual<G>)> {
        let first = self.select(population, rng)?;
        let second = self.select(population, rng)?;
        Ok((first, second))
    }
}

/// Recombines two parents into two offspring.
///
/// Offspring own freshly allocated genomes of the parents' length and carry
/// no fitness. Parents are left untouched.
pub trait CrossoverStrategy<G: Gene>: Send + Sync {
    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;

    /// Checks the strategy's own parameters.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Produces two offspring from `parent1` and `parent2`.
    ///
    /// Returns [`EvolveError::GenomeLengthMismatch`] if the parents differ
    /// in length.
    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)>;
}

/// Perturbs an individual in place.
///
/// Implementations change the genome only through
/// [`Individual::genome_mut`], which clears the cached fitness.
pub trait MutationStrategy<G: Gene>: Send + Sync {
    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;

    /// Checks the strategy's own parameters, excluding the mutation rate.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Mutates `individual`. `pool` supplies fresh genes for strategies
    /// that replace positions.
    fn mutate(
        &self,
        individual: &mut Individual<G>,
        pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()>;

    /// Current mutation rate in `[0, 1]`.
    fn mutation_rate(&self) -> f64;

    /// Replaces the mutation rate.
    fn set_mutation_rate(&mut self, rate: f64);
}

/// Returns [`EvolveError::GenomeLengthMismatch`] unless both parents share a
/// genome length.
pub fn check_same_length<G: Gene>(a: &Individual<G>, b: &Individual<G>) -> Result<usize> {
    if a.len() != b.len() {
        return Err(EvolveError::GenomeLengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.len())
}
