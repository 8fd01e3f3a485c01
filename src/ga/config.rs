//! GA configuration.
//!
//! [`GaConfig`] holds the run parameters of the evolutionary loop; the
//! operators themselves live in [`Dna`](super::Dna).

use crate::error::{EvolveError, Result};

/// Configuration for a genetic algorithm run.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_genome_size(10)
///     .with_generations(50)
///     .with_mutation_rate(0.01)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals, fixed for the whole run.
    pub population_size: usize,

    /// Number of genes in every genome.
    pub genome_size: usize,

    /// Number of generations [`run`](super::GeneticAlgorithm::run) executes.
    ///
    /// Zero returns the best of the initial population.
    pub generations: usize,

    /// Mutation rate pushed into the mutation strategy at construction
    /// (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            genome_size: 10,
            generations: 100,
            mutation_rate: 0.01,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the genome length.
    pub fn with_genome_size(mut self, n: usize) -> Self {
        self.genome_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`EvolveError::InvalidConfiguration`] describing the first
    /// invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolveError::invalid("population_size must be at least 1"));
        }
        if self.genome_size == 0 {
            return Err(EvolveError::invalid("genome_size must be at least 1"));
        }
        validate_mutation_rate(self.mutation_rate)
    }
}

/// Rejects rates outside `[0, 1]`, including NaN.
pub(crate) fn validate_mutation_rate(rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(EvolveError::InvalidConfiguration(format!(
            "mutation_rate must be in [0, 1], got {rate}"
        )));
    }
    Ok(())
}
