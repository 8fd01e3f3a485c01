//! Error taxonomy for the evolutionary engine.
//!
//! Genetic algorithms have no notion of transient failure: every error
//! below is a configuration or contract violation and aborts the call
//! that raised it.

use thiserror::Error;

/// Errors raised while configuring or running a genetic algorithm.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolveError {
    /// Population size, genome size, rates, or alphabet/mode combination
    /// are self-contradictory. Raised at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Selection or best-tracking was attempted before every individual
    /// had a fitness value.
    #[error("population has not been evaluated")]
    UnevaluatedPopulation,

    /// An operator was given, or produced, a genome of the wrong length.
    #[error("genome length mismatch: expected {expected}, got {actual}")]
    GenomeLengthMismatch {
        /// Length required by the run.
        expected: usize,
        /// Length actually observed.
        actual: usize,
    },

    /// Fitness-proportional sampling is undefined for the population's
    /// fitness values (zero or negative total weight).
    #[error("degenerate selection distribution: {0}")]
    DegenerateDistribution(String),
}

impl EvolveError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EvolveError::InvalidConfiguration(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EvolveError::invalid("population_size must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: population_size must be at least 1"
        );

        let err = EvolveError::GenomeLengthMismatch {
            expected: 10,
            actual: 9,
        };
        assert_eq!(err.to_string(), "genome length mismatch: expected 10, got 9");

        assert_eq!(
            EvolveError::UnevaluatedPopulation.to_string(),
            "population has not been evaluated"
        );
    }
}
