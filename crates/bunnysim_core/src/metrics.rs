//! Run metrics and structured logging setup.
//!
//! Counters are atomic so a collector can be shared with a listener thread.

use bunnysim_data::CauseOfDeath;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Steps between periodic progress lines.
const LOG_EVERY_STEPS: u64 = 1000;

/// Counters collected over one run.
pub struct Metrics {
    step_count: AtomicU64,
    generation_count: AtomicU64,
    birth_count: AtomicU64,
    live_count: AtomicU64,
    deaths: Mutex<HashMap<CauseOfDeath, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("steps", &self.step_count())
            .field("generations", &self.generation_count())
            .field("births", &self.birth_count())
            .field("deaths", &self.total_deaths())
            .finish()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: AtomicU64::new(0),
            generation_count: AtomicU64::new(0),
            birth_count: AtomicU64::new(0),
            live_count: AtomicU64::new(0),
            deaths: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records an active step and the live population after it.
    pub fn record_step(&self, duration: Duration, live: usize, generation: u32) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
        self.live_count.store(live as u64, Ordering::Relaxed);

        let step = self.step_count.load(Ordering::Relaxed);
        if step % LOG_EVERY_STEPS == 0 {
            tracing::info!(
                step,
                generation,
                live,
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    pub fn record_generation(&self) {
        self.generation_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_births(&self, count: usize) {
        self.birth_count.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_death(&self, cause: CauseOfDeath) {
        let mut deaths = self.deaths.lock().unwrap_or_else(|e| e.into_inner());
        *deaths.entry(cause).or_insert(0) += 1;
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn birth_count(&self) -> u64 {
        self.birth_count.load(Ordering::Relaxed)
    }

    /// Live population after the last recorded step.
    #[must_use]
    pub fn live_count(&self) -> u64 {
        self.live_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths_by(&self, cause: CauseOfDeath) -> u64 {
        let deaths = self.deaths.lock().unwrap_or_else(|e| e.into_inner());
        deaths.get(&cause).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_deaths(&self) -> u64 {
        let deaths = self.deaths.lock().unwrap_or_else(|e| e.into_inner());
        deaths.values().sum()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Zeroes every counter and restarts the elapsed timer.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.step_count(), 0);
        assert_eq!(metrics.total_deaths(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new();
        metrics.record_step(Duration::from_micros(40), 12, 3);
        assert_eq!(metrics.step_count(), 1);
        assert_eq!(metrics.live_count(), 12);
    }

    #[test]
    fn test_deaths_by_cause() {
        let mut metrics = Metrics::new();
        metrics.record_death(CauseOfDeath::Wolves);
        metrics.record_death(CauseOfDeath::Wolves);
        metrics.record_death(CauseOfDeath::OldAge);
        metrics.record_births(8);
        assert_eq!(metrics.deaths_by(CauseOfDeath::Wolves), 2);
        assert_eq!(metrics.deaths_by(CauseOfDeath::LimitedFood), 0);
        assert_eq!(metrics.total_deaths(), 3);
        assert_eq!(metrics.birth_count(), 8);
        metrics.reset();
        assert_eq!(metrics.total_deaths(), 0);
    }
}
