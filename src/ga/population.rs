//! Fixed-size population of individuals.

use super::dna::Dna;
use super::types::{FitnessStrategy, Gene, Individual};
use crate::error::{EvolveError, Result};
use rand::RngCore;

/// An ordered collection of individuals whose size never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G: Gene> {
    individuals: Vec<Individual<G>>,
    size: usize,
}

impl<G: Gene> Population<G> {
    /// Creates `population_size` individuals with fresh random genomes of
    /// `genome_size` genes. The individuals are not yet evaluated.
    pub fn new(
        dna: &Dna<G>,
        population_size: usize,
        genome_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if population_size == 0 {
            return Err(EvolveError::invalid("population_size must be at least 1"));
        }
        let individuals = (0..population_size)
            .map(|_| dna.generate_genome(genome_size, rng).map(Individual::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            individuals,
            size: population_size,
        })
    }

    /// Wraps existing individuals. The population size is their count.
    pub fn from_individuals(individuals: Vec<Individual<G>>) -> Result<Self> {
        if individuals.is_empty() {
            return Err(EvolveError::invalid("population must not be empty"));
        }
        let size = individuals.len();
        Ok(Self { individuals, size })
    }

    /// The individuals, in order.
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Always `false` for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates every individual with `fitness`.
    pub fn evaluate(&mut self, fitness: &dyn FitnessStrategy<G>) {
        for ind in &mut self.individuals {
            ind.calculate_fitness(fitness);
        }
    }

    /// Whether every individual carries a fitness value.
    pub fn is_evaluated(&self) -> bool {
        self.individuals.iter().all(Individual::is_evaluated)
    }

    /// Fitness of every individual in order.
    ///
    /// Fails with [`EvolveError::UnevaluatedPopulation`] if any is missing.
    pub fn fitness_values(&self) -> Result<Vec<f64>> {
        self.individuals.iter().map(Individual::try_fitness).collect()
    }

    /// The individual with the highest fitness; ties go to the lowest index.
    pub fn best(&self) -> Result<&Individual<G>> {
        let mut best = &self.individuals[0];
        let mut best_fitness = best.try_fitness()?;
        for ind in &self.individuals[1..] {
            let f = ind.try_fitness()?;
            if f > best_fitness {
                best = ind;
                best_fitness = f;
            }
        }
        Ok(best)
    }

    /// Indices ordered by fitness, highest first. Equal fitness keeps
    /// population order.
    pub fn ranked_indices(&self) -> Result<Vec<usize>> {
        let fitness = self.fitness_values()?;
        let mut order: Vec<usize> = (0..fitness.len()).collect();
        order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
        Ok(order)
    }

    /// Replaces all individuals with `next`, resized to the population
    /// size: a surplus is truncated, a deficit is padded by cycling clones
    /// of `next` from its start. Fails only if `next` is empty.
    pub fn replace(&mut self, mut next: Vec<Individual<G>>) -> Result<()> {
        if next.is_empty() {
            return Err(EvolveError::invalid("replacement must not be empty"));
        }
        let supplied = next.len();
        for i in supplied..self.size {
            let filler = next[i % supplied].clone();
            next.push(filler);
        }
        next.truncate(self.size);
        self.individuals = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GenePool;
    use crate::random::create_rng;

    fn ones(g: &[u8]) -> f64 {
        g.iter().map(|&b| b as f64).sum()
    }

    fn make_population(fitnesses: &[f64]) -> Population<u8> {
        let individuals = fitnesses
            .iter()
            .map(|&f| {
                let mut ind = Individual::new(vec![0u8]);
                ind.calculate_fitness(&move |_: &[u8]| f);
                ind
            })
            .collect();
        Population::from_individuals(individuals).unwrap()
    }

    #[test]
    fn test_new_population_shape() {
        let dna = Dna::new(GenePool::new(vec![0u8, 1]).unwrap(), ones);
        let mut rng = create_rng(42);
        let pop = Population::new(&dna, 7, 12, &mut rng).unwrap();
        assert_eq!(pop.len(), 7);
        assert!(pop.individuals().iter().all(|i| i.len() == 12));
        assert!(!pop.is_evaluated());
        assert_eq!(pop.best(), Err(EvolveError::UnevaluatedPopulation));
    }

    #[test]
    fn test_zero_size_rejected() {
        let dna = Dna::new(GenePool::new(vec![0u8, 1]).unwrap(), ones);
        let mut rng = create_rng(42);
        assert!(Population::new(&dna, 0, 4, &mut rng).is_err());
    }

    #[test]
    fn test_evaluate_is_fresh() {
        let dna = Dna::new(GenePool::new(vec![0u8, 1]).unwrap(), ones);
        let mut rng = create_rng(9);
        let mut pop = Population::new(&dna, 10, 8, &mut rng).unwrap();
        pop.evaluate(dna.fitness());
        for ind in pop.individuals() {
            assert_eq!(ind.fitness(), Some(ones(ind.genome())));
        }
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let pop = make_population(&[1.0, 3.0, 3.0, 2.0]);
        let best = pop.best().unwrap();
        assert!(std::ptr::eq(best, &pop.individuals()[1]));
    }

    #[test]
    fn test_ranked_indices_stable() {
        let pop = make_population(&[1.0, 3.0, 3.0, 2.0]);
        assert_eq!(pop.ranked_indices().unwrap(), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_replace_truncates_surplus() {
        let mut pop = make_population(&[1.0, 2.0, 3.0]);
        let next = vec![Individual::new(vec![1u8]); 4];
        pop.replace(next).unwrap();
        assert_eq!(pop.len(), 3);
        assert!(!pop.is_evaluated());
    }

    #[test]
    fn test_replace_pads_deficit() {
        let mut pop = make_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let next = vec![Individual::new(vec![7u8]), Individual::new(vec![8u8])];
        pop.replace(next).unwrap();
        let genes: Vec<u8> = pop.individuals().iter().map(|i| i.genome()[0]).collect();
        assert_eq!(genes, vec![7, 8, 7, 8, 7]);
    }

    #[test]
    fn test_replace_rejects_empty() {
        let mut pop = make_population(&[1.0, 2.0, 3.0]);
        assert!(pop.replace(Vec::new()).is_err());
        assert_eq!(pop.len(), 3);
        assert!(pop.is_evaluated());
    }
}
