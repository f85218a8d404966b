//! The generation clock.
//!
//! Time advances in seconds; one generation is `seconds_per_generation`
//! seconds. The clock face starts at 12:00 (cycle 0.0) at every generation
//! boundary and selection agents act inside fixed windows of the cycle.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Fewest steps a generation may be divided into; bounds any incoming dt.
pub const MIN_STEPS_PER_GENERATION: f64 = 10.0;

/// Added to a non-integral generation count to absorb division error near boundaries.
const GENERATION_EPSILON: f64 = 1e-6;

/// Fraction of the generation cycle, measured clockwise from 12:00.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ClockWindow {
    pub min: f64,
    pub max: f64,
}

impl ClockWindow {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, cycle_percent: f64) -> bool {
        cycle_percent >= self.min && cycle_percent <= self.max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationClock {
    seconds_per_generation: f64,
    time_in_seconds: f64,
    current_generation: u32,
    is_running: bool,
}

impl GenerationClock {
    #[must_use]
    pub fn new(seconds_per_generation: f64) -> Self {
        debug_assert!(seconds_per_generation > 0.0);
        Self {
            seconds_per_generation,
            time_in_seconds: 0.0,
            current_generation: 0,
            is_running: false,
        }
    }

    /// Limits an external dt so a generation always takes at least
    /// [`MIN_STEPS_PER_GENERATION`] steps.
    #[must_use]
    pub fn clamp_dt(dt: f64, seconds_per_generation: f64) -> f64 {
        dt.max(0.0)
            .min(seconds_per_generation / MIN_STEPS_PER_GENERATION)
    }

    #[must_use]
    pub fn seconds_per_generation(&self) -> f64 {
        self.seconds_per_generation
    }

    #[must_use]
    pub fn time_in_seconds(&self) -> f64 {
        self.time_in_seconds
    }

    #[must_use]
    pub fn current_generation(&self) -> u32 {
        self.current_generation
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
    }

    #[must_use]
    pub fn seconds_to_generations(&self, seconds: f64) -> f64 {
        let generations = seconds / self.seconds_per_generation;
        if generations.fract() == 0.0 {
            generations
        } else {
            generations + GENERATION_EPSILON
        }
    }

    #[must_use]
    pub fn time_in_generations(&self) -> f64 {
        self.seconds_to_generations(self.time_in_seconds)
    }

    /// Position within the current generation, in `[0, 1)`.
    #[must_use]
    pub fn cycle_percent(&self) -> f64 {
        let percent =
            (self.time_in_seconds % self.seconds_per_generation) / self.seconds_per_generation;
        percent.clamp(0.0, 1.0)
    }

    /// Advances the clock by `dt` seconds.
    ///
    /// Returns the new generation when a boundary was crossed; the time is
    /// then snapped exactly onto the boundary instead of landing past it.
    pub fn step(&mut self, dt: f64) -> Result<Option<u32>> {
        if dt >= self.seconds_per_generation {
            return Err(SimError::StepTooLarge {
                dt,
                seconds_per_generation: self.seconds_per_generation,
            });
        }
        if !self.is_running {
            return Ok(None);
        }

        let next_time = self.time_in_seconds + dt;
        // Floor of a non-negative value always fits once the generation cap is validated.
        let next_generation = self.seconds_to_generations(next_time).floor() as u32;

        if next_generation > self.current_generation {
            debug_assert_eq!(
                next_generation,
                self.current_generation + 1,
                "generation skipped"
            );
            if next_generation != self.current_generation + 1 {
                return Err(SimError::GenerationSkipped {
                    from: self.current_generation,
                    to: next_generation,
                });
            }
            self.time_in_seconds = f64::from(next_generation) * self.seconds_per_generation;
            self.current_generation = next_generation;
            Ok(Some(next_generation))
        } else {
            self.time_in_seconds = next_time;
            Ok(None)
        }
    }

    /// Returns to generation 0 at 12:00 and stops.
    pub fn reset(&mut self) {
        self.time_in_seconds = 0.0;
        self.current_generation = 0;
        self.is_running = false;
    }
}
