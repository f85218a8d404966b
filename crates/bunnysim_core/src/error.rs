//! Error types for the simulation engine.
//!
//! Two families live here: configuration errors, which callers recover from
//! by falling back to defaults, and invariant violations, which mean the
//! engine itself has a bug.

use bunnysim_data::{Allele, GeneKind};
use thiserror::Error;
use uuid::Uuid;

/// Main error type for bunnysim_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Initial population could not be parsed.
    ///
    /// The model itself recovers from these with a fallback population; this
    /// variant is what a caller gets from `parse_initial_population(..)?` when
    /// it wants a rejected specifier to be fatal.
    #[error("Initial population error: {0}")]
    Initializer(#[from] InitializerError),

    /// A single clock step may not span a whole generation.
    #[error("step of {dt}s spans at least one generation ({seconds_per_generation}s)")]
    StepTooLarge { dt: f64, seconds_per_generation: f64 },

    /// The generation counter must advance by exactly one.
    #[error("generation jumped from {from} to {to}")]
    GenerationSkipped { from: u32, to: u32 },

    /// Dominance is assigned once per gene and run.
    #[error("dominance for {gene} is already {current}")]
    DominanceReassigned { gene: GeneKind, current: Allele },

    /// Lookup of a bunny that is not in the collection.
    #[error("unknown bunny {0}")]
    UnknownBunny(Uuid),
}

/// Result type alias for bunnysim_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors that indicate an engine bug rather than bad input.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::StepTooLarge { .. }
                | Self::GenerationSkipped { .. }
                | Self::DominanceReassigned { .. }
                | Self::UnknownBunny(_)
        )
    }
}

/// Reasons the mutations/population specifiers were rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitializerError {
    #[error("population is empty")]
    EmptyPopulation,

    #[error("without mutations the population must be a single positive integer, got '{0}'")]
    ExpectedCount(String),

    #[error("expression '{0}' does not start with a count")]
    MissingCount(String),

    #[error("count in '{0}' is out of range")]
    CountOutOfRange(String),

    #[error("total population must be greater than zero")]
    ZeroPopulation,

    #[error("population {total} must be less than the maximum of {max}")]
    TooManyBunnies { total: u64, max: u32 },

    #[error("'{letter}' in '{source_text}' is not an allele abbreviation")]
    UnknownAbbreviation { letter: char, source_text: String },

    #[error("mutations '{0}' names {1} as both dominant and recessive")]
    ConflictingDominance(String, GeneKind),

    #[error("mutations '{0}' names {1} more than once")]
    DuplicateGene(String, GeneKind),

    #[error("genotype '{genotype}' must have {expected} letters")]
    GenotypeLength { genotype: String, expected: usize },

    #[error("genotype '{genotype}' uses {gene}, which has no mutation")]
    GeneNotMutated { genotype: String, gene: GeneKind },

    #[error("genotype '{genotype}' pairs letters from different genes")]
    MixedPair { genotype: String },

    #[error("genotype '{genotype}' lists {gene} more than once")]
    RepeatedGene { genotype: String, gene: GeneKind },

    #[error("mutations make {requested} dominant for {gene}, but {current} already is")]
    DominanceConflict {
        gene: GeneKind,
        requested: Allele,
        current: Allele,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::config("bad window");
        assert_eq!(err.to_string(), "Configuration error: bad window");
    }

    #[test]
    fn test_initializer_error_wraps() {
        let err: SimError = InitializerError::ZeroPopulation.into();
        assert!(err.to_string().contains("greater than zero"));
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_invariant_classification() {
        let err = SimError::GenerationSkipped { from: 1, to: 3 };
        assert!(err.is_invariant_violation());
    }
}
