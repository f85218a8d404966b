//! # Bunnysim Core
//!
//! The simulation engine for bunnysim, a population-genetics model of
//! natural selection.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The generation clock and its selection windows
//! - Mendelian inheritance and one-time mutation injection
//! - Parsing of the generation-0 specifiers
//! - Wolves and food as pluggable selection policies
//! - Population bookkeeping, statistics and run history
//! - Metrics collection and structured logging
//!
//! ## Example
//!
//! ```
//! use bunnysim_core::config::SimConfig;
//! use bunnysim_core::model::NaturalSelectionModel;
//!
//! let config = SimConfig {
//!     seed: Some(42),
//!     ..SimConfig::default()
//! };
//! let mut model = NaturalSelectionModel::new(config).unwrap();
//! model.add_a_mate();
//! for _ in 0..10 {
//!     model.step(1.0).unwrap();
//! }
//! assert_eq!(model.current_generation(), 1);
//! ```

/// Generation clock and clock-phase windows
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Error types
pub mod error;
/// Outward event notifications
pub mod events;
/// Per-gene dominance and pending mutations
pub mod gene_pool;
/// Run history persistence
pub mod history;
/// Generation-0 parsing
pub mod initializer;
/// Performance metrics and logging
pub mod metrics;
/// The model that drives a run
pub mod model;
/// Bunny collection and pedigrees
pub mod population;
/// Inheritance, pairing and mutation
pub mod reproduction;
/// Environmental selection agents
pub mod selection;
/// Population statistics
pub mod stats;

pub use error::{InitializerError, Result, SimError};
pub use events::SimEvent;
pub use model::NaturalSelectionModel;
