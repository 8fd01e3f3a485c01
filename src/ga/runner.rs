//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates the generational process:
//! initialization → evaluation → selection → crossover → mutation →
//! replacement → evaluation → repeat.
//!
//! Replacement is total: every generation is rebuilt from offspring with no
//! implicit elitism. The best individual ever seen is tracked separately and
//! exposed through [`GeneticAlgorithm::best_overall`].

use super::config::{validate_mutation_rate, GaConfig};
use super::dna::Dna;
use super::population::Population;
use super::types::{Gene, Individual};
use crate::error::{EvolveError, Result};
use crate::random::{rng_from_seed, EvolveRng};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress report passed to the observer after every generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Index of the generation just completed (1-based).
    pub generation: usize,
    /// Best fitness in that generation.
    pub best_fitness: f64,
    /// Best fitness over all generations so far.
    pub best_overall_fitness: f64,
}

/// Result of a GA optimization run.
///
/// Contains the best solution of the final generation, the best solution
/// ever seen, and statistics about the evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<G: Gene> {
    /// Best individual of the final generation.
    pub best: Individual<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Best individual over all generations, including generation 0.
    pub best_overall: Individual<G>,

    /// Number of generations executed by this call.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness of every generation, starting with generation 0.
    pub fitness_history: Vec<f64>,
}

type Observer = Box<dyn FnMut(&GenerationStats) + Send>;

/// Executes the GA evolutionary loop.
///
/// Construction validates the configuration and the [`Dna`] bundle,
/// creates the initial population, and evaluates it (generation 0).
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{
///     Dna, GaConfig, GenePool, GeneticAlgorithm, MaximizeOnesFitness, OnePointCrossover,
/// };
///
/// let pool = GenePool::new(vec![0u8, 1]).unwrap();
/// let dna = Dna::new(pool, MaximizeOnesFitness).with_crossover(OnePointCrossover);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_genome_size(10)
///     .with_generations(50)
///     .with_seed(42);
///
/// let mut ga = GeneticAlgorithm::new(dna, config).unwrap();
/// let best = ga.run().unwrap();
/// assert_eq!(best.len(), 10);
/// assert!(ga.best_overall().fitness() >= best.fitness());
/// ```
pub struct GeneticAlgorithm<G: Gene> {
    dna: Dna<G>,
    config: GaConfig,
    population: Population<G>,
    rng: EvolveRng,
    generation: usize,
    generation_best: Individual<G>,
    all_time_best: Individual<G>,
    fitness_history: Vec<f64>,
    observer: Option<Observer>,
}

impl<G: Gene> GeneticAlgorithm<G> {
    /// Validates `config` and `dna`, then creates and evaluates the initial
    /// population.
    ///
    /// The configured mutation rate is pushed into the mutation strategy.
    pub fn new(mut dna: Dna<G>, config: GaConfig) -> Result<Self> {
        config.validate()?;
        dna.validate(config.genome_size)?;
        dna.mutation_mut().set_mutation_rate(config.mutation_rate);

        let mut rng = rng_from_seed(config.seed);
        let mut population =
            Population::new(&dna, config.population_size, config.genome_size, &mut rng)?;
        population.evaluate(dna.fitness());

        let best = population.best()?.clone();
        let best_fitness = best.try_fitness()?;

        log::debug!(
            "initialized GA: population {}, genome {}, selection {}, crossover {}, mutation {}, best fitness {}",
            config.population_size,
            config.genome_size,
            dna.selection().name(),
            dna.crossover().name(),
            dna.mutation().name(),
            best_fitness
        );

        Ok(Self {
            dna,
            population,
            rng,
            generation: 0,
            generation_best: best.clone(),
            all_time_best: best,
            fitness_history: vec![best_fitness],
            observer: None,
            config,
        })
    }

    /// Registers a callback invoked after every generation.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&GenerationStats) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Runs `config.generations` generations and returns the best
    /// individual of the final one.
    ///
    /// With zero generations this is the best of the current population.
    pub fn run(&mut self) -> Result<Individual<G>> {
        self.run_with_cancel(None).map(|result| result.best)
    }

    /// Runs up to `config.generations` generations with an optional
    /// cancellation token.
    ///
    /// The flag is checked between generations; once it reads `true` the
    /// run stops and returns what it has so far.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> Result<GaResult<G>> {
        let start = self.generation;
        let mut cancelled = false;

        for _ in 0..self.config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    log::info!("GA cancelled at generation {}", self.generation);
                    cancelled = true;
                    break;
                }
            }
            self.run_single_generation()?;
        }

        Ok(GaResult {
            best_fitness: self.generation_best.try_fitness()?,
            best: self.generation_best.clone(),
            best_overall: self.all_time_best.clone(),
            generations: self.generation - start,
            cancelled,
            fitness_history: self.fitness_history.clone(),
        })
    }

    /// Executes exactly one generation and returns its best individual.
    ///
    /// On error the population is left as it was before the call.
    pub fn run_single_generation(&mut self) -> Result<Individual<G>> {
        if !self.population.is_evaluated() {
            return Err(EvolveError::UnevaluatedPopulation);
        }

        let offspring = self.breed()?;
        self.population.replace(offspring)?;
        self.population.evaluate(self.dna.fitness());

        let best = self.population.best()?.clone();
        let best_fitness = best.try_fitness()?;
        let mut best_overall_fitness = self.all_time_best.try_fitness()?;
        if best_fitness > best_overall_fitness {
            log::debug!(
                "new best at generation {}: {} -> {}",
                self.generation + 1,
                best_overall_fitness,
                best_fitness
            );
            self.all_time_best = best.clone();
            best_overall_fitness = best_fitness;
        }

        self.generation += 1;
        self.generation_best = best.clone();
        self.fitness_history.push(best_fitness);

        log::info!(
            "generation {}: best fitness {}",
            self.generation,
            best_fitness
        );

        if let Some(observer) = self.observer.as_mut() {
            observer(&GenerationStats {
                generation: self.generation,
                best_fitness,
                best_overall_fitness,
            });
        }

        Ok(best)
    }

    /// Changes the mutation rate for subsequent generations.
    pub fn set_mutation_rate(&mut self, rate: f64) -> Result<()> {
        validate_mutation_rate(rate)?;
        self.dna.mutation_mut().set_mutation_rate(rate);
        self.config.mutation_rate = rate;
        Ok(())
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &Population<G> {
        &self.population
    }

    /// Best individual of the current generation.
    pub fn best_of_generation(&self) -> &Individual<G> {
        &self.generation_best
    }

    /// Best individual over all generations.
    pub fn best_overall(&self) -> &Individual<G> {
        &self.all_time_best
    }

    /// Best fitness of every generation, starting with generation 0.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// The strategy bundle.
    pub fn dna(&self) -> &Dna<G> {
        &self.dna
    }

    /// The run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Builds the next generation's individuals without touching the
    /// current population.
    fn breed(&mut self) -> Result<Vec<Individual<G>>> {
        let size = self.population.len();
        let genome_size = self.config.genome_size;
        let mut next = Vec::with_capacity(size + 1);

        while next.len() < size {
            let (p1, p2) = self
                .dna
                .selection()
                .select_parents(&self.population, &mut self.rng)?;
            let (c1, c2) = self.dna.crossover().crossover(p1, p2, &mut self.rng)?;

            for mut child in [c1, c2] {
                check_genome_length(&child, genome_size)?;
                self.dna
                    .mutation()
                    .mutate(&mut child, self.dna.pool(), &mut self.rng)?;
                check_genome_length(&child, genome_size)?;
                next.push(child);
            }
        }

        Ok(next)
    }
}

impl<G: Gene> fmt::Debug for GeneticAlgorithm<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("dna", &self.dna)
            .field("config", &self.config)
            .field("generation", &self.generation)
            .field("best_overall", &self.all_time_best.fitness())
            .finish_non_exhaustive()
    }
}

fn check_genome_length<G: Gene>(individual: &Individual<G>, expected: usize) -> Result<()> {
    if individual.len() != expected {
        return Err(EvolveError::GenomeLengthMismatch {
            expected,
            actual: individual.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
