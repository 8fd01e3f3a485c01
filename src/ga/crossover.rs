//! Crossover operators.
//!
//! Every operator returns two offspring whose genomes are freshly allocated
//! copies of the parents' length; parents are never modified. Genomes
//! shorter than two genes cannot be cut, so their offspring are plain
//! copies of the parents.
//!
//! # Operators
//!
//! - Any gene type: [`HalfCrossover`], [`OnePointCrossover`],
//!   [`TwoPointCrossover`], [`UniformCrossover`]
//! - Real-valued genes: [`BlendCrossover`] (BLX-α), [`ArithmeticCrossover`]
//! - Permutations: [`PartiallyMappedCrossover`] (PMX), [`OrderCrossover`] (OX)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata"

use super::types::{check_same_length, CrossoverStrategy, Gene, Individual};
use crate::error::{EvolveError, Result};
use rand::{Rng, RngCore};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

// ============================================================================
// Cut-point operators
// ============================================================================

/// Cuts both parents at the midpoint and exchanges tails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HalfCrossover;

impl<G: Gene> CrossoverStrategy<G> for HalfCrossover {
    fn name(&self) -> &str {
        "half"
    }

    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        _rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)> {
        let n = check_same_length(parent1, parent2)?;
        Ok(exchange_segment(parent1, parent2, n / 2, n))
    }
}

/// Cuts both parents at one random point in `1..n` and exchanges tails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnePointCrossover;

impl<G: Gene> CrossoverStrategy<G> for OnePointCrossover {
    fn name(&self) -> &str {
        "one_point"
    }

    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)> {
        let n = check_same_length(parent1, parent2)?;
        if n < 2 {
            return Ok(copies(parent1, parent2));
        }
        let point = rng.random_range(1..n);
        Ok(exchange_segment(parent1, parent2, point, n))
    }
}

/// Exchanges the segment between two random cut points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPointCrossover;

impl<G: Gene> CrossoverStrategy<G> for TwoPointCrossover {
    fn name(&self) -> &str {
        "two_point"
    }

    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)> {
        let n = check_same_length(parent1, parent2)?;
        if n < 3 {
            return Ok(copies(parent1, parent2));
        }
        let first = rng.random_range(1..n - 1);
        let second = rng.random_range(first + 1..n);
        Ok(exchange_segment(parent1, parent2, first, second))
    }
}

/// Each position is inherited from either parent with equal probability;
/// the second offspring receives the complementary gene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformCrossover;

impl<G: Gene> CrossoverStrategy<G> for UniformCrossover {
    fn name(&self) -> &str {
        "uniform"
    }

    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)> {
        let n = check_same_length(parent1, parent2)?;
        let mut c1 = Vec::with_capacity(n);
        let mut c2 = Vec::with_capacity(n);
        for (a, b) in parent1.genome().iter().zip(parent2.genome()) {
            if rng.random_bool(0.5) {
                c1.push(a.clone());
                c2.push(b.clone());
            } else {
                c1.push(b.clone());
                c2.push(a.clone());
            }
        }
        Ok((Individual::new(c1), Individual::new(c2)))
    }
}

// ============================================================================
// Real-valued operators
// ============================================================================

/// Blend crossover (BLX-α) for real-valued genes.
///
/// Each offspring gene is drawn uniformly from the parents' interval
/// widened by `alpha` times its width on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendCrossover {
    /// Interval extension factor, non-negative. Typical: 0.5.
    pub alpha: f64,
}

impl BlendCrossover {
    /// Creates a BLX-α crossover.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for BlendCrossover {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

impl CrossoverStrategy<f64> for BlendCrossover {
    fn name(&self) -> &str {
        "blend"
    }

    fn validate(&self) -> Result<()> {
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(EvolveError::invalid("blend alpha must be non-negative"));
        }
        Ok(())
    }

    fn crossover(
        &self,
        parent1: &Individual<f64>,
        parent2: &Individual<f64>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<f64>, Individual<f64>)> {
        check_same_length(parent1, parent2)?;
        let mut draw = |a: f64, b: f64| -> f64 {
            let lo = a.min(b);
            let hi = a.max(b);
            let range = hi - lo;
            if range < 1e-15 {
                lo // genes are identical, no crossover needed
            } else {
                rng.random_range((lo - self.alpha * range)..(hi + self.alpha * range))
            }
        };
        let pairs: Vec<(f64, f64)> = parent1
            .genome()
            .iter()
            .zip(parent2.genome())
            .map(|(&a, &b)| (a, b))
            .collect();
        let c1: Vec<f64> = pairs.iter().map(|&(a, b)| draw(a, b)).collect();
        let c2: Vec<f64> = pairs.iter().map(|&(a, b)| draw(a, b)).collect();
        Ok((Individual::new(c1), Individual::new(c2)))
    }
}

/// Arithmetic crossover for real-valued genes.
///
/// Offspring are the convex combinations `α·p1 + (1-α)·p2` and
/// `α·p2 + (1-α)·p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticCrossover {
    /// Mixing weight in `[0, 1]`.
    pub alpha: f64,
}

impl ArithmeticCrossover {
    /// Creates an arithmetic crossover.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for ArithmeticCrossover {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

impl CrossoverStrategy<f64> for ArithmeticCrossover {
    fn name(&self) -> &str {
        "arithmetic"
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(EvolveError::invalid("arithmetic alpha must be in [0, 1]"));
        }
        Ok(())
    }

    fn crossover(
        &self,
        parent1: &Individual<f64>,
        parent2: &Individual<f64>,
        _rng: &mut dyn RngCore,
    ) -> Result<(Individual<f64>, Individual<f64>)> {
        check_same_length(parent1, parent2)?;
        let a = self.alpha;
        let (c1, c2): (Vec<f64>, Vec<f64>) = parent1
            .genome()
            .iter()
            .zip(parent2.genome())
            .map(|(&x, &y)| (a * x + (1.0 - a) * y, a * y + (1.0 - a) * x))
            .unzip();
        Ok((Individual::new(c1), Individual::new(c2)))
    }
}

// ============================================================================
// Permutation operators
// ============================================================================

/// Partially Mapped Crossover (PMX).
///
/// Preserves the **absolute position** of genes from both parents as much
/// as possible.
///
/// # Algorithm (Goldberg & Lingle, 1985)
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy the segment from the template parent
/// 3. For each gene in the donor's segment not yet placed, follow the
///    mapping chain to a free position outside the segment
/// 4. Fill the remaining positions from the donor
///
/// When the parents are permutations of each other the offspring are too.
/// Otherwise the chain may break and offspring can repeat genes.
///
/// # Complexity
/// O(n) expected time, O(n) space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartiallyMappedCrossover;

impl<G: Gene + Eq + Hash> CrossoverStrategy<G> for PartiallyMappedCrossover {
    fn name(&self) -> &str {
        "partially_mapped"
    }

    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)> {
        let n = check_same_length(parent1, parent2)?;
        if n < 2 {
            return Ok(copies(parent1, parent2));
        }
        let (start, end) = random_segment(n, rng);
        let c1 = pmx_build_child(parent1.genome(), parent2.genome(), start, end);
        let c2 = pmx_build_child(parent2.genome(), parent1.genome(), start, end);
        Ok((Individual::new(c1), Individual::new(c2)))
    }
}

/// Build one PMX child: copy segment from `template`, map from `donor`.
fn pmx_build_child<G: Gene + Eq + Hash>(
    template: &[G],
    donor: &[G],
    start: usize,
    end: usize,
) -> Vec<G> {
    let n = template.len();
    let donor_pos: HashMap<&G, usize> = donor.iter().enumerate().map(|(i, g)| (g, i)).collect();
    let mut child: Vec<Option<G>> = vec![None; n];
    let mut placed: HashSet<&G> = HashSet::with_capacity(end - start + 1);

    // Step 1: Copy segment from template
    for i in start..=end {
        child[i] = Some(template[i].clone());
        placed.insert(&template[i]);
    }

    // Step 2: For genes in donor's segment not yet placed,
    //         follow the mapping chain to find a free position
    for i in start..=end {
        let donor_val = &donor[i];
        if placed.contains(donor_val) {
            continue;
        }
        let mut pos = i;
        for _ in 0..n {
            let Some(&next) = donor_pos.get(&template[pos]) else {
                break;
            };
            if next < start || next > end {
                if child[next].is_none() {
                    child[next] = Some(donor_val.clone());
                    placed.insert(donor_val);
                }
                break;
            }
            pos = next;
        }
    }

    // Step 3: Fill remaining from donor
    child
        .into_iter()
        .zip(donor)
        .map(|(c, d)| c.unwrap_or_else(|| d.clone()))
        .collect()
}

/// Order Crossover (OX).
///
/// Preserves the **relative order** of genes from both parents.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from the template parent
/// 2. Copy the segment to the child at the same positions
/// 3. Fill the remaining positions with genes from the donor, in their
///    order starting after the segment, skipping genes already in the child
///
/// # Complexity
/// O(n) time, O(n) space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCrossover;

impl<G: Gene + Eq + Hash> CrossoverStrategy<G> for OrderCrossover {
    fn name(&self) -> &str {
        "order"
    }

    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<(Individual<G>, Individual<G>)> {
        let n = check_same_length(parent1, parent2)?;
        if n < 2 {
            return Ok(copies(parent1, parent2));
        }
        let (start, end) = random_segment(n, rng);
        let c1 = ox_build_child(parent1.genome(), parent2.genome(), start, end);
        let c2 = ox_build_child(parent2.genome(), parent1.genome(), start, end);
        Ok((Individual::new(c1), Individual::new(c2)))
    }
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child<G: Gene + Eq + Hash>(
    template: &[G],
    donor: &[G],
    start: usize,
    end: usize,
) -> Vec<G> {
    let n = template.len();
    let mut child: Vec<Option<G>> = vec![None; n];
    let in_segment: HashSet<&G> = template[start..=end].iter().collect();

    // Step 1: Copy segment from template
    for i in start..=end {
        child[i] = Some(template[i].clone());
    }

    // Step 2: Fill from donor, starting after segment end, wrapping around
    let free = n - (end - start + 1);
    let mut filled = 0;
    let mut pos = (end + 1) % n;
    for offset in 0..n {
        if filled == free {
            break;
        }
        let val = &donor[(end + 1 + offset) % n];
        if !in_segment.contains(val) {
            child[pos] = Some(val.clone());
            pos = (pos + 1) % n;
            filled += 1;
        }
    }

    // Only reached for non-permutation parents: pad from donor
    child
        .into_iter()
        .zip(donor)
        .map(|(c, d)| c.unwrap_or_else(|| d.clone()))
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

/// Offspring that swap `[from, to)` between the parents.
fn exchange_segment<G: Gene>(
    parent1: &Individual<G>,
    parent2: &Individual<G>,
    from: usize,
    to: usize,
) -> (Individual<G>, Individual<G>) {
    let mut c1 = parent1.genome().to_vec();
    let mut c2 = parent2.genome().to_vec();
    c1[from..to].clone_from_slice(&parent2.genome()[from..to]);
    c2[from..to].clone_from_slice(&parent1.genome()[from..to]);
    (Individual::new(c1), Individual::new(c2))
}

/// Unevaluated copies of both parents.
fn copies<G: Gene>(parent1: &Individual<G>, parent2: &Individual<G>) -> (Individual<G>, Individual<G>) {
    (
        Individual::new(parent1.genome().to_vec()),
        Individual::new(parent2.genome().to_vec()),
    )
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
pub(crate) fn random_segment(n: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
