//! Ready-made fitness strategies.
//!
//! All strategies maximize. Numeric ones accept any gene convertible to
//! `f64` (`bool`, `u8`, `i32`, `f64`, ...).

use super::types::{FitnessStrategy, Gene};

/// Sum of the genes. For bit genomes this counts the ones.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaximizeOnesFitness;

impl<G> FitnessStrategy<G> for MaximizeOnesFitness
where
    G: Gene + Copy + Into<f64>,
{
    fn evaluate(&self, genome: &[G]) -> f64 {
        genome.iter().map(|&g| g.into()).sum()
    }
}

/// Number of positions that equal the target genome.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareTargetFitness<G: Gene> {
    /// Genome to match.
    pub target: Vec<G>,
}

impl<G: Gene> CompareTargetFitness<G> {
    /// Creates a strategy scoring matches against `target`.
    pub fn new(target: Vec<G>) -> Self {
        Self { target }
    }
}

impl<G: Gene> FitnessStrategy<G> for CompareTargetFitness<G> {
    fn evaluate(&self, genome: &[G]) -> f64 {
        genome
            .iter()
            .zip(&self.target)
            .filter(|(g, t)| g == t)
            .count() as f64
    }
}

/// Negative distance between the genome, read as a big-endian binary
/// number, and `target_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeDistanceFitness {
    /// Value the decoded genome should approach.
    pub target_value: f64,
}

impl MinimizeDistanceFitness {
    /// Creates a strategy steering towards `target_value`.
    pub fn new(target_value: f64) -> Self {
        Self { target_value }
    }
}

impl<G> FitnessStrategy<G> for MinimizeDistanceFitness
where
    G: Gene + Copy + Into<f64>,
{
    fn evaluate(&self, genome: &[G]) -> f64 {
        let value = genome.iter().fold(0.0, |acc, &g| acc * 2.0 + g.into());
        -(self.target_value - value).abs()
    }
}

/// Weighted sum of the genes. Positions beyond `weights` contribute nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSumFitness {
    /// Weight per position.
    pub weights: Vec<f64>,
}

impl WeightedSumFitness {
    /// Creates a weighted-sum strategy.
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }
}

impl<G> FitnessStrategy<G> for WeightedSumFitness
where
    G: Gene + Copy + Into<f64>,
{
    fn evaluate(&self, genome: &[G]) -> f64 {
        genome
            .iter()
            .zip(&self.weights)
            .map(|(&g, w)| g.into() * w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximize_ones() {
        assert_eq!(MaximizeOnesFitness.evaluate(&[1u8, 0, 1, 1][..]), 3.0);
        assert_eq!(MaximizeOnesFitness.evaluate(&[true, false, true][..]), 2.0);
        assert_eq!(FitnessStrategy::<u8>::evaluate(&MaximizeOnesFitness, &[]), 0.0);
    }

    #[test]
    fn test_compare_target() {
        let f = CompareTargetFitness::new(vec!['h', 'i', '!']);
        assert_eq!(f.evaluate(&['h', 'o', '!'][..]), 2.0);
        assert_eq!(f.evaluate(&['h', 'i', '!'][..]), 3.0);
    }

    #[test]
    fn test_minimize_distance_decodes_big_endian() {
        let f = MinimizeDistanceFitness::new(5.0);
        // 0b101 == 5
        assert_eq!(f.evaluate(&[1u8, 0, 1][..]), 0.0);
        // 0b110 == 6
        assert_eq!(f.evaluate(&[1u8, 1, 0][..]), -1.0);
        assert_eq!(f.evaluate(&[0u8, 0, 0][..]), -5.0);
    }

    #[test]
    fn test_weighted_sum() {
        let f = WeightedSumFitness::new(vec![1.0, 2.0, 4.0]);
        assert_eq!(f.evaluate(&[1u8, 1, 0][..]), 3.0);
        assert_eq!(f.evaluate(&[0.5f64, 0.0, 1.0, 9.0][..]), 4.5);
    }
}
