//! Environmental selection agents.
//!
//! An agent owns a clock window and a [`CullPolicy`]. While enabled it acts on
//! the first step of a generation whose cycle position falls inside the
//! window, and never more than once per generation.

pub mod food;
pub mod wolves;

pub use food::{Food, ToughAndLimitedFood};
pub use wolves::{CamouflagePredation, Wolves};

use crate::clock::ClockWindow;
use crate::config::PercentRange;
use bunnysim_data::{Bunny, CauseOfDeath, Environment};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use uuid::Uuid;

/// Environmental settings a policy may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConditions {
    pub environment: Environment,
    pub tough_food: bool,
    pub limited_food: bool,
}

/// Decides which live bunnies an agent kills in one pass.
pub trait CullPolicy: Send {
    fn victims(
        &self,
        live: &[&Bunny],
        conditions: &SelectionConditions,
        rng: &mut dyn RngCore,
    ) -> Vec<(Uuid, CauseOfDeath)>;
}

/// Uniform draw from a percent range.
pub fn sample_percent(range: PercentRange, rng: &mut dyn RngCore) -> f64 {
    if range.max <= range.min {
        range.min
    } else {
        rng.gen_range(range.min..=range.max)
    }
}

/// Picks `round(fraction * group.len())` distinct bunnies of `group` at random.
pub fn cull_fraction(group: &[&Bunny], fraction: f64, rng: &mut dyn RngCore) -> Vec<Uuid> {
    let count = ((fraction.clamp(0.0, 1.0) * group.len() as f64).round() as usize).min(group.len());
    group
        .choose_multiple(rng, count)
        .map(|bunny| bunny.id)
        .collect()
}

/// Window gating shared by all agents.
pub struct SelectionAgent {
    name: &'static str,
    window: ClockWindow,
    policy: Box<dyn CullPolicy>,
    acted_generation: Option<u32>,
}

impl std::fmt::Debug for SelectionAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionAgent")
            .field("name", &self.name)
            .field("window", &self.window)
            .field("acted_generation", &self.acted_generation)
            .finish()
    }
}

impl SelectionAgent {
    #[must_use]
    pub fn new(name: &'static str, window: ClockWindow, policy: Box<dyn CullPolicy>) -> Self {
        Self {
            name,
            window,
            policy,
            acted_generation: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn window(&self) -> ClockWindow {
        self.window
    }

    #[must_use]
    pub fn acted_generation(&self) -> Option<u32> {
        self.acted_generation
    }

    pub fn set_policy(&mut self, policy: Box<dyn CullPolicy>) {
        self.policy = policy;
    }

    #[must_use]
    pub fn is_due(&self, generation: u32, cycle_percent: f64) -> bool {
        self.window.contains(cycle_percent) && self.acted_generation != Some(generation)
    }

    /// Runs the policy if the agent is due; returns the victims chosen.
    pub fn act(
        &mut self,
        generation: u32,
        cycle_percent: f64,
        live: &[&Bunny],
        conditions: &SelectionConditions,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<(Uuid, CauseOfDeath)>> {
        if !self.is_due(generation, cycle_percent) {
            return None;
        }
        self.acted_generation = Some(generation);
        let victims = self.policy.victims(live, conditions, rng);
        tracing::debug!(
            agent = self.name,
            generation,
            live = live.len(),
            victims = victims.len(),
            "Selection pass"
        );
        Some(victims)
    }

    /// Forgets which generation the agent last acted in.
    pub fn reset(&mut self) {
        self.acted_generation = None;
    }
}
