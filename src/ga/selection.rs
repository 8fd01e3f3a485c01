//! Selection strategies.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//! All strategies assume **maximization** (higher fitness = better).
//!
//! Single-draw strategies rely on the default
//! [`SelectionStrategy::select_parents`], which draws twice independently.
//! [`RouletteWheelSelection`] and [`StochasticUniversalSampling`] produce
//! their pair in one pass.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection Algorithm"

use super::population::Population;
use super::types::{Gene, Individual, SelectionStrategy};
use crate::error::{EvolveError, Result};
use rand::{Rng, RngCore};

// ============================================================================
// Fitness-proportional
// ============================================================================

/// Fitness-proportionate (roulette wheel) selection.
///
/// Probability of selection is proportional to raw fitness. Fails with
/// [`EvolveError::DegenerateDistribution`] when any fitness is negative or
/// the total is not positive.
///
/// # Complexity
/// O(n) per pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteWheelSelection;

impl<G: Gene> SelectionStrategy<G> for RouletteWheelSelection {
    fn name(&self) -> &str {
        "roulette_wheel"
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        let weights = proportional_weights(population)?;
        Ok(&population.individuals()[weighted_index(&weights, rng)])
    }

    fn select_parents<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(&'p Individual<G>, &'p Individual<G>)> {
        let weights = proportional_weights(population)?;
        let individuals = population.individuals();
        let first = weighted_index(&weights, rng);
        let second = weighted_index(&weights, rng);
        Ok((&individuals[first], &individuals[second]))
    }
}

/// Stochastic universal sampling.
///
/// Places two equally spaced pointers on the fitness wheel with a single
/// random offset, yielding both parents at once with lower variance than
/// two roulette spins.
///
/// # Complexity
/// O(n) per pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StochasticUniversalSampling;

impl<G: Gene> SelectionStrategy<G> for StochasticUniversalSampling {
    fn name(&self) -> &str {
        "stochastic_universal_sampling"
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        self.select_parents(population, rng).map(|(first, _)| first)
    }

    fn select_parents<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(&'p Individual<G>, &'p Individual<G>)> {
        let weights = proportional_weights(population)?;
        let total: f64 = weights.iter().sum();
        let spacing = total / 2.0;
        let start = rng.random_range(0.0..spacing);

        let individuals = population.individuals();
        let mut picks = [individuals.len() - 1; 2];
        let mut cumulative = 0.0;
        let mut next = 0;
        for (i, &w) in weights.iter().enumerate() {
            cumulative += w;
            while next < 2 && cumulative > start + next as f64 * spacing {
                picks[next] = i;
                next += 1;
            }
            if next == 2 {
                break;
            }
        }
        Ok((&individuals[picks[0]], &individuals[picks[1]]))
    }
}

/// Boltzmann selection: weight `exp(f / T)`.
///
/// High temperature flattens the distribution; low temperature approaches
/// greedy selection. Weights are shifted by the maximum fitness before
/// exponentiation so large fitness values do not overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannSelection {
    /// Temperature, must be positive.
    pub temperature: f64,
}

impl BoltzmannSelection {
    /// Creates a Boltzmann selection at `temperature`.
    pub fn new(temperature: f64) -> Self {
        Self { temperature }
    }
}

impl Default for BoltzmannSelection {
    fn default() -> Self {
        Self { temperature: 1.0 }
    }
}

impl<G: Gene> SelectionStrategy<G> for BoltzmannSelection {
    fn name(&self) -> &str {
        "boltzmann"
    }

    fn validate(&self) -> Result<()> {
        if !(self.temperature > 0.0 && self.temperature.is_finite()) {
            return Err(EvolveError::invalid(
                "boltzmann temperature must be positive and finite",
            ));
        }
        Ok(())
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        SelectionStrategy::<G>::validate(self)?;
        let fitness = population.fitness_values()?;
        if let Some(&f) = fitness.iter().find(|f| !f.is_finite()) {
            return Err(EvolveError::DegenerateDistribution(format!(
                "fitness {f} cannot be used as a boltzmann weight"
            )));
        }
        let max = fitness.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = fitness
            .iter()
            .map(|&f| ((f - max) / self.temperature).exp())
            .collect();
        Ok(&population.individuals()[weighted_index(&weights, rng)])
    }
}

// ============================================================================
// Rank-based
// ============================================================================

/// Tournament selection: pick `k` distinct individuals at random, select the
/// best.
///
/// Higher `k` = stronger selection pressure. A tournament larger than the
/// population is clamped to the population size.
///
/// # Complexity
/// O(k) per selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    /// Number of contestants per tournament.
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a tournament of `tournament_size` contestants.
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl<G: Gene> SelectionStrategy<G> for TournamentSelection {
    fn name(&self) -> &str {
        "tournament"
    }

    fn validate(&self) -> Result<()> {
        if self.tournament_size == 0 {
            return Err(EvolveError::invalid("tournament_size must be at least 1"));
        }
        Ok(())
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        let fitness = population.fitness_values()?;
        let n = fitness.len();
        let k = self.tournament_size.clamp(1, n);

        let contestants = rand::seq::index::sample(rng, n, k);
        let mut best_idx = contestants.index(0);
        for idx in contestants.iter().skip(1) {
            if fitness[idx] > fitness[best_idx] {
                best_idx = idx;
            }
        }
        Ok(&population.individuals()[best_idx])
    }
}

/// Rank-based selection with linear weights.
///
/// Individuals are sorted by fitness ascending and the i-th receives
/// weight `i + 1`, so the best has weight `n`. This avoids the scaling
/// problems of roulette wheel selection and accepts negative fitness.
///
/// # Complexity
/// O(n log n) per selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankSelection;

impl<G: Gene> SelectionStrategy<G> for RankSelection {
    fn name(&self) -> &str {
        "rank"
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        let ascending = ascending_indices(population)?;
        let n = ascending.len();
        let weights: Vec<f64> = (1..=n).map(|r| r as f64).collect();
        let rank = weighted_index(&weights, rng);
        Ok(&population.individuals()[ascending[rank]])
    }
}

/// Rank-biased selection with geometric weights.
///
/// Over the ascending ranking, position `i` gets weight
/// `bias_factor^(n - i)`, so with `bias_factor < 1` the best individual is
/// the most likely pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankBiasedSelection {
    /// Geometric bias in `(0, 1]`.
    pub bias_factor: f64,
}

impl RankBiasedSelection {
    /// Creates a rank-biased selection with `bias_factor`.
    pub fn new(bias_factor: f64) -> Self {
        Self { bias_factor }
    }
}

impl Default for RankBiasedSelection {
    fn default() -> Self {
        Self { bias_factor: 0.7 }
    }
}

impl<G: Gene> SelectionStrategy<G> for RankBiasedSelection {
    fn name(&self) -> &str {
        "rank_biased"
    }

    fn validate(&self) -> Result<()> {
        if !(self.bias_factor > 0.0 && self.bias_factor <= 1.0) {
            return Err(EvolveError::invalid("bias_factor must be in (0, 1]"));
        }
        Ok(())
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        let ascending = ascending_indices(population)?;
        let n = ascending.len();
        let weights: Vec<f64> = (0..n)
            .map(|i| self.bias_factor.powi((n - i) as i32))
            .collect();
        let rank = weighted_index(&weights, rng);
        Ok(&population.individuals()[ascending[rank]])
    }
}

// ============================================================================
// Top-k pools
// ============================================================================

/// Elitism selection: parents are drawn uniformly from the `num_elites`
/// fittest individuals.
///
/// With `num_elites = 1` both parents are the current best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElitismSelection {
    /// Size of the elite pool.
    pub num_elites: usize,
}

impl ElitismSelection {
    /// Creates an elitism selection over the `num_elites` best.
    pub fn new(num_elites: usize) -> Self {
        Self { num_elites }
    }
}

impl Default for ElitismSelection {
    fn default() -> Self {
        Self { num_elites: 1 }
    }
}

impl<G: Gene> SelectionStrategy<G> for ElitismSelection {
    fn name(&self) -> &str {
        "elitism"
    }

    fn validate(&self) -> Result<()> {
        if self.num_elites == 0 {
            return Err(EvolveError::invalid("num_elites must be at least 1"));
        }
        Ok(())
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        select_from_top(population, self.num_elites, rng)
    }
}

/// Truncation selection: parents are drawn uniformly from the top
/// `percentage` of the population (at least one individual).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncationSelection {
    /// Fraction of the population eligible, in `(0, 1]`.
    pub percentage: f64,
}

impl TruncationSelection {
    /// Creates a truncation selection keeping the top `percentage`.
    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }
}

impl Default for TruncationSelection {
    fn default() -> Self {
        Self { percentage: 0.5 }
    }
}

impl<G: Gene> SelectionStrategy<G> for TruncationSelection {
    fn name(&self) -> &str {
        "truncation"
    }

    fn validate(&self) -> Result<()> {
        if !(self.percentage > 0.0 && self.percentage <= 1.0) {
            return Err(EvolveError::invalid("truncation percentage must be in (0, 1]"));
        }
        Ok(())
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        let k = (population.len() as f64 * self.percentage) as usize;
        select_from_top(population, k.max(1), rng)
    }
}

/// Steady-state selection: the `num_replacements` fittest individuals
/// breed, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteadyStateSelection {
    /// Size of the breeding pool.
    pub num_replacements: usize,
}

impl SteadyStateSelection {
    /// Creates a steady-state selection over the `num_replacements` best.
    pub fn new(num_replacements: usize) -> Self {
        Self { num_replacements }
    }
}

impl Default for SteadyStateSelection {
    fn default() -> Self {
        Self {
            num_replacements: 2,
        }
    }
}

impl<G: Gene> SelectionStrategy<G> for SteadyStateSelection {
    fn name(&self) -> &str {
        "steady_state"
    }

    fn validate(&self) -> Result<()> {
        if self.num_replacements == 0 {
            return Err(EvolveError::invalid("num_replacements must be at least 1"));
        }
        Ok(())
    }

    fn select<'p>(
        &self,
        population: &'p Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<&'p Individual<G>> {
        select_from_top(population, self.num_replacements, rng)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Raw fitness as sampling weights, rejecting distributions that cannot be
/// sampled proportionally.
fn proportional_weights<G: Gene>(population: &Population<G>) -> Result<Vec<f64>> {
    let weights = population.fitness_values()?;
    if let Some(&w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(EvolveError::DegenerateDistribution(format!(
            "fitness {w} cannot be used as a sampling weight"
        )));
    }
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(EvolveError::DegenerateDistribution(format!(
            "total fitness {total} is not a positive finite number"
        )));
    }
    Ok(weights)
}

/// Picks an index with probability proportional to `weights`.
///
/// Weights must be non-negative with a positive sum.
fn weighted_index(weights: &[f64], rng: &mut dyn RngCore) -> usize {
    let total: f64 = weights.iter().sum();
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    weights.len() - 1 // floating-point fallback
}

/// Indices sorted by fitness ascending; equal fitness keeps population order.
fn ascending_indices<G: Gene>(population: &Population<G>) -> Result<Vec<usize>> {
    let fitness = population.fitness_values()?;
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
    Ok(order)
}

/// Uniform pick among the `k` fittest individuals.
fn select_from_top<'p, G: Gene>(
    population: &'p Population<G>,
    k: usize,
    rng: &mut dyn RngCore,
) -> Result<&'p Individual<G>> {
    let ranked = population.ranked_indices()?;
    let k = k.clamp(1, ranked.len());
    let pick = ranked[rng.random_range(0..k)];
    Ok(&population.individuals()[pick])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Population<usize> {
        let individuals = fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut ind = Individual::new(vec![i]);
                ind.calculate_fitness(&move |_: &[usize]| f);
                ind
            })
            .collect();
        Population::from_individuals(individuals).unwrap()
    }

    /// Tallies how often each slot is chosen by `select`.
    fn count_selections<S: SelectionStrategy<usize>>(
        strategy: &S,
        pop: &Population<usize>,
        n: usize,
    ) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..n {
            let ind = strategy.select(pop, &mut rng).unwrap();
            counts[ind.genome()[0]] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[1.0, 5.0, 10.0, 3.0]);
        let counts = count_selections(&TournamentSelection::new(3), &pop, 10000);
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/10000"
        );
    }

    #[test]
    fn test_tournament_full_size_is_deterministic() {
        let pop = make_population(&[1.0, 5.0, 10.0, 3.0]);
        let counts = count_selections(&TournamentSelection::new(10), &pop, 500);
        assert_eq!(counts[2], 500);
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = count_selections(&TournamentSelection::new(1), &pop, 10000);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[1.0, 50.0, 100.0, 20.0]);
        let counts = count_selections(&RouletteWheelSelection, &pop, 10000);
        assert!(
            counts[2] > counts[0],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_zero_weight_never_selected() {
        let pop = make_population(&[0.0, 1.0, 0.0, 1.0]);
        let counts = count_selections(&RouletteWheelSelection, &pop, 2000);
        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
    }

    #[test]
    fn test_roulette_degenerate() {
        let mut rng = create_rng(42);
        let zero = make_population(&[0.0, 0.0, 0.0]);
        assert!(matches!(
            RouletteWheelSelection.select_parents(&zero, &mut rng),
            Err(EvolveError::DegenerateDistribution(_))
        ));

        let negative = make_population(&[3.0, -1.0, 2.0]);
        assert!(matches!(
            RouletteWheelSelection.select_parents(&negative, &mut rng),
            Err(EvolveError::DegenerateDistribution(_))
        ));
    }

    #[test]
    fn test_roulette_overflowing_total_is_degenerate() {
        let mut rng = create_rng(42);
        let pop = make_population(&[f64::MAX, f64::MAX]);
        assert!(matches!(
            RouletteWheelSelection.select_parents(&pop, &mut rng),
            Err(EvolveError::DegenerateDistribution(_))
        ));
        assert!(matches!(
            StochasticUniversalSampling.select_parents(&pop, &mut rng),
            Err(EvolveError::DegenerateDistribution(_))
        ));
    }

    #[test]
    fn test_sus_zero_weight_never_selected() {
        let pop = make_population(&[0.0, 1.0, 0.0, 1.0]);
        let mut rng = create_rng(9);
        for _ in 0..2000 {
            let (a, b) = StochasticUniversalSampling
                .select_parents(&pop, &mut rng)
                .unwrap();
            assert_eq!(a.genome()[0] % 2, 1);
            assert_eq!(b.genome()[0] % 2, 1);
        }
    }

    #[test]
    fn test_sus_pair_from_wheel() {
        let pop = make_population(&[1.0, 1.0, 1.0, 1.0]);
        let mut rng = create_rng(5);
        for _ in 0..100 {
            let (a, b) = StochasticUniversalSampling
                .select_parents(&pop, &mut rng)
                .unwrap();
            // Pointers are half the wheel apart, so they land two slots apart.
            assert_eq!((a.genome()[0] + 2) % 4, b.genome()[0]);
        }
    }

    #[test]
    fn test_sus_degenerate() {
        let pop = make_population(&[0.0, 0.0]);
        let mut rng = create_rng(5);
        assert!(matches!(
            StochasticUniversalSampling.select_parents(&pop, &mut rng),
            Err(EvolveError::DegenerateDistribution(_))
        ));
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[-100.0, -50.0, -1.0, -80.0]);
        let counts = count_selections(&RankSelection, &pop, 10000);
        assert!(
            counts[2] > counts[0],
            "best should be selected more: {counts:?}"
        );
    }

    #[test]
    fn test_rank_biased_favors_best() {
        let pop = make_population(&[1.0, 2.0, 3.0, 4.0]);
        let counts = count_selections(&RankBiasedSelection::default(), &pop, 10000);
        assert!(counts[3] > counts[0], "got {counts:?}");
    }

    #[test]
    fn test_boltzmann_favors_best_and_handles_large_fitness() {
        let pop = make_population(&[1000.0, 1001.0, 1003.0]);
        let counts = count_selections(&BoltzmannSelection::new(1.0), &pop, 5000);
        assert!(counts[2] > counts[1] && counts[1] > counts[0], "got {counts:?}");
    }

    #[test]
    fn test_boltzmann_non_finite_fitness_is_degenerate() {
        let mut rng = create_rng(42);
        for fitness in [
            [f64::NEG_INFINITY, f64::NEG_INFINITY],
            [f64::INFINITY, 1.0],
            [f64::NAN, 1.0],
        ] {
            let pop = make_population(&fitness);
            assert!(matches!(
                BoltzmannSelection::default().select(&pop, &mut rng),
                Err(EvolveError::DegenerateDistribution(_))
            ));
        }
    }

    #[test]
    fn test_elitism_picks_only_elites() {
        let pop = make_population(&[1.0, 9.0, 4.0, 7.0]);
        let counts = count_selections(&ElitismSelection::new(2), &pop, 1000);
        assert_eq!(counts[0] + counts[2], 0);
        assert!(counts[1] > 0 && counts[3] > 0);
    }

    #[test]
    fn test_truncation_keeps_top_fraction() {
        let pop = make_population(&[1.0, 2.0, 3.0, 4.0]);
        let counts = count_selections(&TruncationSelection::new(0.5), &pop, 1000);
        assert_eq!(counts[0] + counts[1], 0);
    }

    #[test]
    fn test_steady_state_pool() {
        let pop = make_population(&[5.0, 2.0, 3.0, 4.0]);
        let counts = count_selections(&SteadyStateSelection::default(), &pop, 1000);
        assert_eq!(counts[1] + counts[2], 0);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        let strategies: Vec<Box<dyn SelectionStrategy<usize>>> = vec![
            Box::new(RouletteWheelSelection),
            Box::new(StochasticUniversalSampling),
            Box::new(TournamentSelection::new(3)),
            Box::new(RankSelection),
            Box::new(RankBiasedSelection::default()),
            Box::new(BoltzmannSelection::default()),
            Box::new(ElitismSelection::default()),
            Box::new(TruncationSelection::default()),
            Box::new(SteadyStateSelection::default()),
        ];
        for s in &strategies {
            let (a, b) = s.select_parents(&pop, &mut rng).unwrap();
            assert_eq!(a.genome(), &[0], "{}", s.name());
            assert_eq!(b.genome(), &[0], "{}", s.name());
        }
    }

    #[test]
    fn test_equal_fitness_tolerated() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let counts = count_selections(&RouletteWheelSelection, &pop, 10000);
        for &c in &counts {
            assert!(
                c > 1500,
                "expected roughly uniform with equal fitness, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_unevaluated_population_rejected() {
        let individuals = vec![Individual::new(vec![0usize]), Individual::new(vec![1])];
        let pop = Population::from_individuals(individuals).unwrap();
        let mut rng = create_rng(42);
        assert!(matches!(
            TournamentSelection::default().select_parents(&pop, &mut rng),
            Err(EvolveError::UnevaluatedPopulation)
        ));
        assert!(matches!(
            RouletteWheelSelection.select_parents(&pop, &mut rng),
            Err(EvolveError::UnevaluatedPopulation)
        ));
    }

    #[test]
    fn test_validate_parameters() {
        assert!(SelectionStrategy::<u8>::validate(&TournamentSelection::new(0)).is_err());
        assert!(SelectionStrategy::<u8>::validate(&BoltzmannSelection::new(0.0)).is_err());
        assert!(SelectionStrategy::<u8>::validate(&RankBiasedSelection::new(1.5)).is_err());
        assert!(SelectionStrategy::<u8>::validate(&TruncationSelection::new(0.0)).is_err());
        assert!(SelectionStrategy::<u8>::validate(&ElitismSelection::new(0)).is_err());
        assert!(SelectionStrategy::<u8>::validate(&SteadyStateSelection::new(2)).is_ok());
    }
}
