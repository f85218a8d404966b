//! Predation by wolves, biased against fur that stands out.

use super::{cull_fraction, sample_percent, CullPolicy, SelectionAgent, SelectionConditions};
use crate::config::{PercentRange, WolvesConfig};
use bunnysim_data::{Allele, Bunny, CauseOfDeath, Environment};
use rand::RngCore;
use uuid::Uuid;

/// Fur color wolves spot easily in `environment`.
#[must_use]
pub fn visible_fur(environment: Environment) -> Allele {
    match environment {
        Environment::Equator => Allele::WhiteFur,
        Environment::Arctic => Allele::BrownFur,
    }
}

/// Eats a sampled share of the population; bunnies whose fur contrasts with
/// the environment are eaten `visible_multiplier` times as often, as long as
/// both fur colors are present.
#[derive(Debug, Clone, PartialEq)]
pub struct CamouflagePredation {
    pub percent_to_eat: PercentRange,
    pub visible_multiplier: f64,
}

impl CullPolicy for CamouflagePredation {
    fn victims(
        &self,
        live: &[&Bunny],
        conditions: &SelectionConditions,
        rng: &mut dyn RngCore,
    ) -> Vec<(Uuid, CauseOfDeath)> {
        let percent = sample_percent(self.percent_to_eat, rng);
        let standout = visible_fur(conditions.environment);
        let (visible, hidden): (Vec<&Bunny>, Vec<&Bunny>) =
            live.iter().copied().partition(|b| b.phenotype.fur == standout);

        let eaten = if visible.is_empty() || hidden.is_empty() {
            cull_fraction(live, percent, rng)
        } else {
            let mut eaten = cull_fraction(&visible, percent * self.visible_multiplier, rng);
            eaten.extend(cull_fraction(&hidden, percent, rng));
            eaten
        };
        eaten
            .into_iter()
            .map(|id| (id, CauseOfDeath::Wolves))
            .collect()
    }
}

#[derive(Debug)]
pub struct Wolves {
    pub enabled: bool,
    agent: SelectionAgent,
}

impl Wolves {
    #[must_use]
    pub fn new(config: &WolvesConfig) -> Self {
        let policy = CamouflagePredation {
            percent_to_eat: config.percent_to_eat,
            visible_multiplier: config.visible_multiplier,
        };
        Self {
            enabled: config.enabled,
            agent: SelectionAgent::new("wolves", config.window, Box::new(policy)),
        }
    }

    #[must_use]
    pub fn agent(&self) -> &SelectionAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut SelectionAgent {
        &mut self.agent
    }

    /// Hunts if enabled and due.
    pub fn hunt(
        &mut self,
        generation: u32,
        cycle_percent: f64,
        live: &[&Bunny],
        conditions: &SelectionConditions,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<(Uuid, CauseOfDeath)>> {
        if !self.enabled {
            return None;
        }
        self.agent
            .act(generation, cycle_percent, live, conditions, rng)
    }
}
