//! Core data structures for the bunnysim population-genetics simulation.

pub mod data;

pub use data::bunny::{Bunny, CauseOfDeath};
pub use data::environment::{Environment, SimulationMode, TimeSpeed};
pub use data::genetics::{Allele, GeneKind, GenePair, Genotype, Phenotype};
