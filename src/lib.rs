//! # Bunnysim
//!
//! Headless runner for the bunnysim natural-selection model. The engine lives
//! in `bunnysim_core`; this crate adds configuration overrides, a fixed-rate
//! frame loop and the run summary.

pub mod app;
pub mod model;
