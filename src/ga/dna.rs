//! Genome factory and strategy bundle.
//!
//! [`GenePool`] owns the gene alphabet and creates genomes from it.
//! [`Dna`] pairs a pool with one instance of each strategy kind; this is
//! where a run's full configuration is assembled before the engine
//! validates it once.

use super::crossover::HalfCrossover;
use super::mutation::ElementMutation;
use super::selection::RouletteWheelSelection;
use super::types::{CrossoverStrategy, FitnessStrategy, Gene, MutationStrategy, SelectionStrategy};
use crate::error::{EvolveError, Result};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::fmt;

/// The allowed gene alphabet plus generation mode.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::GenePool;
/// use u_evolve::random::create_rng;
///
/// let pool = GenePool::new(vec![0, 1, 2, 3]).unwrap().with_duplicates(false);
/// let mut rng = create_rng(42);
/// let mut genome = pool.generate_genome(4, &mut rng).unwrap();
/// genome.sort();
/// assert_eq!(genome, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenePool<G: Gene> {
    genes: Vec<G>,
    target: Option<Vec<G>>,
    duplicate_genomes: bool,
}

impl<G: Gene> GenePool<G> {
    /// Creates a pool over `genes`, drawing with repetition by default.
    ///
    /// Fails if the alphabet is empty.
    pub fn new(genes: Vec<G>) -> Result<Self> {
        if genes.is_empty() {
            return Err(EvolveError::invalid("gene alphabet must not be empty"));
        }
        Ok(Self {
            genes,
            target: None,
            duplicate_genomes: true,
        })
    }

    /// Sets the target genome used by target-comparison fitness strategies.
    pub fn with_target(mut self, target: Vec<G>) -> Self {
        self.target = Some(target);
        self
    }

    /// Chooses between drawing with repetition (`true`) and permutation
    /// prefixes of the alphabet (`false`).
    pub fn with_duplicates(mut self, duplicate_genomes: bool) -> Self {
        self.duplicate_genomes = duplicate_genomes;
        self
    }

    /// The gene alphabet.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// The target genome, if any.
    pub fn target(&self) -> Option<&[G]> {
        self.target.as_deref()
    }

    /// Whether genomes may repeat genes.
    pub fn duplicate_genomes(&self) -> bool {
        self.duplicate_genomes
    }

    /// Generates a genome of exactly `size` genes.
    ///
    /// With repetition each position is an independent uniform draw.
    /// Without repetition the alphabet is shuffled and its first `size`
    /// genes are taken, which fails if `size` exceeds the alphabet.
    pub fn generate_genome(&self, size: usize, rng: &mut dyn RngCore) -> Result<Vec<G>> {
        if self.duplicate_genomes {
            return Ok(self.get_random_genes(size, rng));
        }
        if size > self.genes.len() {
            return Err(EvolveError::InvalidConfiguration(format!(
                "genome_size {size} exceeds alphabet length {} without duplicates",
                self.genes.len()
            )));
        }
        let mut genome = self.genes.clone();
        genome.shuffle(rng);
        genome.truncate(size);
        Ok(genome)
    }

    /// Draws `n` genes independently and uniformly, regardless of mode.
    pub fn get_random_genes(&self, n: usize, rng: &mut dyn RngCore) -> Vec<G> {
        (0..n).map(|_| self.random_gene(rng)).collect()
    }

    /// Draws one gene uniformly.
    pub fn random_gene(&self, rng: &mut dyn RngCore) -> G {
        self.genes[rng.random_range(0..self.genes.len())].clone()
    }

    /// Checks that genomes of `genome_size` can be produced and compared.
    pub fn validate(&self, genome_size: usize) -> Result<()> {
        if !self.duplicate_genomes && genome_size > self.genes.len() {
            return Err(EvolveError::InvalidConfiguration(format!(
                "genome_size {genome_size} exceeds alphabet length {} without duplicates",
                self.genes.len()
            )));
        }
        if let Some(target) = &self.target {
            if target.len() != genome_size {
                return Err(EvolveError::InvalidConfiguration(format!(
                    "target length {} does not match genome_size {genome_size}",
                    target.len()
                )));
            }
        }
        Ok(())
    }
}

/// A run's configuration bundle: gene pool plus the four strategies.
///
/// Selection, crossover, and mutation default to
/// [`RouletteWheelSelection`], [`HalfCrossover`], and [`ElementMutation`];
/// the fitness strategy is always supplied by the caller.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::{Dna, GenePool, OnePointCrossover, TournamentSelection};
///
/// let pool = GenePool::new(vec![0u8, 1]).unwrap();
/// let dna = Dna::new(pool, |g: &[u8]| g.iter().map(|&b| b as f64).sum::<f64>())
///     .with_selection(TournamentSelection::new(3))
///     .with_crossover(OnePointCrossover);
/// assert_eq!(dna.selection().name(), "tournament");
/// ```
pub struct Dna<G: Gene> {
    pool: GenePool<G>,
    selection: Box<dyn SelectionStrategy<G>>,
    crossover: Box<dyn CrossoverStrategy<G>>,
    mutation: Box<dyn MutationStrategy<G>>,
    fitness: Box<dyn FitnessStrategy<G>>,
}

impl<G: Gene> Dna<G> {
    /// Bundles `pool` and `fitness` with the default operators.
    pub fn new<F>(pool: GenePool<G>, fitness: F) -> Self
    where
        F: FitnessStrategy<G> + 'static,
    {
        Self {
            pool,
            selection: Box::new(RouletteWheelSelection),
            crossover: Box::new(HalfCrossover),
            mutation: Box::new(ElementMutation::default()),
            fitness: Box::new(fitness),
        }
    }

    /// Replaces the selection strategy.
    pub fn with_selection<S>(mut self, selection: S) -> Self
    where
        S: SelectionStrategy<G> + 'static,
    {
        self.selection = Box::new(selection);
        self
    }

    /// Replaces the crossover strategy.
    pub fn with_crossover<C>(mut self, crossover: C) -> Self
    where
        C: CrossoverStrategy<G> + 'static,
    {
        self.crossover = Box::new(crossover);
        self
    }

    /// Replaces the mutation strategy.
    pub fn with_mutation<M>(mut self, mutation: M) -> Self
    where
        M: MutationStrategy<G> + 'static,
    {
        self.mutation = Box::new(mutation);
        self
    }

    /// Replaces the fitness strategy.
    pub fn with_fitness<F>(mut self, fitness: F) -> Self
    where
        F: FitnessStrategy<G> + 'static,
    {
        self.fitness = Box::new(fitness);
        self
    }

    /// The gene pool.
    pub fn pool(&self) -> &GenePool<G> {
        &self.pool
    }

    /// The gene alphabet.
    pub fn genes(&self) -> &[G] {
        self.pool.genes()
    }

    /// The target genome, if any.
    pub fn target(&self) -> Option<&[G]> {
        self.pool.target()
    }

    /// The selection strategy.
    pub fn selection(&self) -> &dyn SelectionStrategy<G> {
        self.selection.as_ref()
    }

    /// The crossover strategy.
    pub fn crossover(&self) -> &dyn CrossoverStrategy<G> {
        self.crossover.as_ref()
    }

    /// The mutation strategy.
    pub fn mutation(&self) -> &dyn MutationStrategy<G> {
        self.mutation.as_ref()
    }

    /// The mutation strategy, for rate updates.
    pub fn mutation_mut(&mut self) -> &mut dyn MutationStrategy<G> {
        self.mutation.as_mut()
    }

    /// The fitness strategy.
    pub fn fitness(&self) -> &dyn FitnessStrategy<G> {
        self.fitness.as_ref()
    }

    /// See [`GenePool::generate_genome`].
    pub fn generate_genome(&self, size: usize, rng: &mut dyn RngCore) -> Result<Vec<G>> {
        self.pool.generate_genome(size, rng)
    }

    /// See [`GenePool::get_random_genes`].
    pub fn get_random_genes(&self, n: usize, rng: &mut dyn RngCore) -> Vec<G> {
        self.pool.get_random_genes(n, rng)
    }

    /// Validates the pool for genomes of `genome_size` and the parameters
    /// of every strategy.
    pub fn validate(&self, genome_size: usize) -> Result<()> {
        self.pool.validate(genome_size)?;
        self.selection.validate()?;
        self.crossover.validate()?;
        self.mutation.validate()
    }
}

impl<G: Gene> fmt::Debug for Dna<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dna")
            .field("pool", &self.pool)
            .field("selection", &self.selection.name())
            .field("crossover", &self.crossover.name())
            .field("mutation", &self.mutation.name())
            .finish_non_exhaustive()
    }
}
