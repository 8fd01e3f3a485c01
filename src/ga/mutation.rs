//! Mutation operators.
//!
//! Every operator is gated by its `mutation_rate`: per individual for
//! structural moves (swap, insert, inversion, scramble, segment swap,
//! element) and per position for gene-wise perturbations (multi-element,
//! bit flip, Gaussian, boundary, polynomial). Genomes are changed through
//! [`Individual::genome_mut`], which clears the cached fitness; the length
//! never changes.
//!
//! # Operators
//!
//! - Any gene type: [`ElementMutation`], [`MultiElementMutation`],
//!   [`SwapMutation`], [`ScrambleMutation`], [`SegmentSwapMutation`],
//!   [`InsertMutation`], [`InversionMutation`]
//! - Numeric bits: [`BitFlipMutation`]
//! - Real-valued genes: [`GaussianMutation`], [`BoundaryMutation`],
//!   [`PolynomialMutation`]
//!
//! # References
//!
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)"

use super::crossover::random_segment;
use super::dna::GenePool;
use super::types::{Gene, Individual, MutationStrategy};
use crate::error::{EvolveError, Result};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::ops::Sub;

const DEFAULT_RATE: f64 = 0.01;

/// Whether a mutation with probability `rate` fires.
fn fires(rate: f64, rng: &mut dyn RngCore) -> bool {
    rng.random::<f64>() < rate
}

// ============================================================================
// Gene replacement
// ============================================================================

/// Replaces one random position with a fresh gene from the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementMutation {
    /// Probability the individual is mutated.
    pub mutation_rate: f64,
}

impl ElementMutation {
    /// Creates an element mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for ElementMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for ElementMutation {
    fn name(&self) -> &str {
        "element"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        if individual.is_empty() || !fires(self.mutation_rate, rng) {
            return Ok(());
        }
        let i = rng.random_range(0..individual.len());
        individual.genome_mut()[i] = pool.random_gene(rng);
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Replaces each position independently with a fresh gene from the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiElementMutation {
    /// Per-position probability.
    pub mutation_rate: f64,
}

impl MultiElementMutation {
    /// Creates a multi-element mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for MultiElementMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for MultiElementMutation {
    fn name(&self) -> &str {
        "multi_element"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        for gene in individual.genome_mut() {
            if fires(self.mutation_rate, rng) {
                *gene = pool.random_gene(rng);
            }
        }
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Flips each bit independently: `g ← 1 - g`.
///
/// Works for any numeric gene type convertible from `u8` (`u8`, `i32`,
/// `f64`, ...). Every gene must be 0 or 1; any other value is rejected
/// before the genome is touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitFlipMutation {
    /// Per-position probability.
    pub mutation_rate: f64,
}

impl BitFlipMutation {
    /// Creates a bit-flip mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for BitFlipMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G> MutationStrategy<G> for BitFlipMutation
where
    G: Gene + Copy + From<u8> + Sub<Output = G>,
{
    fn name(&self) -> &str {
        "bit_flip"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        _pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let (zero, one) = (G::from(0u8), G::from(1u8));
        if let Some(gene) = individual.genome().iter().find(|&&g| g != zero && g != one) {
            return Err(EvolveError::InvalidConfiguration(format!(
                "bit flip needs genes of 0 or 1, got {gene:?}"
            )));
        }
        for gene in individual.genome_mut() {
            if fires(self.mutation_rate, rng) {
                *gene = one - *gene;
            }
        }
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Replaces a random segment with shuffled fresh genes from the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrambleMutation {
    /// Probability the individual is mutated.
    pub mutation_rate: f64,
}

impl ScrambleMutation {
    /// Creates a scramble mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for ScrambleMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for ScrambleMutation {
    fn name(&self) -> &str {
        "scramble"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let n = individual.len();
        if n < 2 || !fires(self.mutation_rate, rng) {
            return Ok(());
        }
        let (start, end) = random_segment(n, rng);
        let mut fresh = pool.get_random_genes(end - start + 1, rng);
        fresh.shuffle(rng);
        individual.genome_mut()[start..=end].clone_from_slice(&fresh);
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

// ============================================================================
// Structural moves
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// # Complexity
/// O(1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutation {
    /// Probability the individual is mutated.
    pub mutation_rate: f64,
}

impl SwapMutation {
    /// Creates a swap mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for SwapMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for SwapMutation {
    fn name(&self) -> &str {
        "swap"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        _pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let n = individual.len();
        if n < 2 || !fires(self.mutation_rate, rng) {
            return Ok(());
        }
        let picks = rand::seq::index::sample(rng, n, 2);
        individual.genome_mut().swap(picks.index(0), picks.index(1));
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Exchanges two non-overlapping random segments of equal length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSwapMutation {
    /// Probability the individual is mutated.
    pub mutation_rate: f64,
}

impl SegmentSwapMutation {
    /// Creates a segment-swap mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for SegmentSwapMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for SegmentSwapMutation {
    fn name(&self) -> &str {
        "segment_swap"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        _pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let n = individual.len();
        if n < 2 || !fires(self.mutation_rate, rng) {
            return Ok(());
        }
        let len = rng.random_range(1..=n / 2);
        let first = rng.random_range(0..=n - 2 * len);
        let second = rng.random_range(first + len..=n - len);

        let genome = individual.genome_mut();
        let (head, tail) = genome.split_at_mut(second);
        head[first..first + len].swap_with_slice(&mut tail[..len]);
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Insert mutation: remove a gene and reinsert it at a random position.
///
/// Equivalent to a single "insert" move in local search.
///
/// # Complexity
/// O(n) due to shifting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertMutation {
    /// Probability the individual is mutated.
    pub mutation_rate: f64,
}

impl InsertMutation {
    /// Creates an insert mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for InsertMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for InsertMutation {
    fn name(&self) -> &str {
        "insert"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        _pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let n = individual.len();
        if n < 2 || !fires(self.mutation_rate, rng) {
            return Ok(());
        }
        let from = rng.random_range(0..n);
        let to = rng.random_range(0..n);
        let genome = individual.genome_mut();
        if from < to {
            genome[from..=to].rotate_left(1);
        } else {
            genome[to..=from].rotate_right(1);
        }
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Inversion mutation: reverse a random segment (2-opt move).
///
/// # Complexity
/// O(n) worst case for segment reversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionMutation {
    /// Probability the individual is mutated.
    pub mutation_rate: f64,
}

impl InversionMutation {
    /// Creates an inversion mutation with `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl Default for InversionMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl<G: Gene> MutationStrategy<G> for InversionMutation {
    fn name(&self) -> &str {
        "inversion"
    }

    fn mutate(
        &self,
        individual: &mut Individual<G>,
        _pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let n = individual.len();
        if n < 2 || !fires(self.mutation_rate, rng) {
            return Ok(());
        }
        let (start, end) = random_segment(n, rng);
        individual.genome_mut()[start..=end].reverse();
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

// ============================================================================
// Real-valued perturbations
// ============================================================================

/// Adds `N(0, sigma²)` noise to each position independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMutation {
    /// Per-position probability.
    pub mutation_rate: f64,
    /// Standard deviation of the noise.
    pub sigma: f64,
}

impl GaussianMutation {
    /// Creates a Gaussian mutation.
    pub fn new(mutation_rate: f64, sigma: f64) -> Self {
        Self {
            mutation_rate,
            sigma,
        }
    }

    fn distribution(&self) -> Result<Normal<f64>> {
        Normal::new(0.0, self.sigma)
            .map_err(|e| EvolveError::InvalidConfiguration(format!("gaussian sigma: {e}")))
    }
}

impl Default for GaussianMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE, 0.1)
    }
}

impl MutationStrategy<f64> for GaussianMutation {
    fn name(&self) -> &str {
        "gaussian"
    }

    fn validate(&self) -> Result<()> {
        self.distribution().map(|_| ())
    }

    fn mutate(
        &self,
        individual: &mut Individual<f64>,
        _pool: &GenePool<f64>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let normal = self.distribution()?;
        for gene in individual.genome_mut() {
            if fires(self.mutation_rate, rng) {
                *gene += normal.sample(rng);
            }
        }
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Resets each position independently to a uniform value in
/// `[min_value, max_value]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMutation {
    /// Per-position probability.
    pub mutation_rate: f64,
    /// Lower bound.
    pub min_value: f64,
    /// Upper bound.
    pub max_value: f64,
}

impl BoundaryMutation {
    /// Creates a boundary mutation over `[min_value, max_value]`.
    pub fn new(mutation_rate: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            mutation_rate,
            min_value,
            max_value,
        }
    }
}

impl Default for BoundaryMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE, -1.0, 1.0)
    }
}

impl MutationStrategy<f64> for BoundaryMutation {
    fn name(&self) -> &str {
        "boundary"
    }

    fn validate(&self) -> Result<()> {
        if !(self.min_value.is_finite()
            && self.max_value.is_finite()
            && self.min_value <= self.max_value)
        {
            return Err(EvolveError::invalid(
                "boundary mutation needs finite min_value <= max_value",
            ));
        }
        Ok(())
    }

    fn mutate(
        &self,
        individual: &mut Individual<f64>,
        _pool: &GenePool<f64>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        MutationStrategy::<f64>::validate(self)?;
        for gene in individual.genome_mut() {
            if fires(self.mutation_rate, rng) {
                *gene = rng.random_range(self.min_value..=self.max_value);
            }
        }
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

/// Polynomial-style perturbation controlled by the distribution index
/// `eta`; larger `eta` keeps offspring closer to the parent.
///
/// For a draw `u` in `[0, 1)`, a gene `g` moves towards 1 by
/// `(1 - g)·u^eta` when `u < 0.5`, otherwise towards 0 by `g·(1 - u)^eta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialMutation {
    /// Per-position probability.
    pub mutation_rate: f64,
    /// Distribution index, positive.
    pub eta: f64,
}

impl PolynomialMutation {
    /// Creates a polynomial mutation.
    pub fn new(mutation_rate: f64, eta: f64) -> Self {
        Self { mutation_rate, eta }
    }
}

impl Default for PolynomialMutation {
    fn default() -> Self {
        Self::new(DEFAULT_RATE, 20.0)
    }
}

impl MutationStrategy<f64> for PolynomialMutation {
    fn name(&self) -> &str {
        "polynomial"
    }

    fn validate(&self) -> Result<()> {
        if !(self.eta > 0.0 && self.eta.is_finite()) {
            return Err(EvolveError::invalid("polynomial eta must be positive"));
        }
        Ok(())
    }

    fn mutate(
        &self,
        individual: &mut Individual<f64>,
        _pool: &GenePool<f64>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        for gene in individual.genome_mut() {
            if fires(self.mutation_rate, rng) {
                let u: f64 = rng.random();
                if u < 0.5 {
                    *gene += (1.0 - *gene) * u.powf(self.eta);
                } else {
                    *gene -= *gene * (1.0 - u).powf(self.eta);
                }
            }
        }
        Ok(())
    }

    fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }
}

// ============================================================================
// Tests
// ============================================================================
