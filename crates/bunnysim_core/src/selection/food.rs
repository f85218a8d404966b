//! Food supply: tough food favours long teeth, limited food starves a share of everyone.

use super::{cull_fraction, sample_percent, CullPolicy, SelectionAgent, SelectionConditions};
use crate::config::{FoodConfig, PercentRange};
use bunnysim_data::{Bunny, CauseOfDeath};
use rand::RngCore;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ToughAndLimitedFood {
    pub short_teeth_percent_to_die: PercentRange,
    pub long_teeth_percent_to_die: PercentRange,
    pub limited_percent_to_die: PercentRange,
}

impl CullPolicy for ToughAndLimitedFood {
    fn victims(
        &self,
        live: &[&Bunny],
        conditions: &SelectionConditions,
        rng: &mut dyn RngCore,
    ) -> Vec<(Uuid, CauseOfDeath)> {
        let mut victims = Vec::new();

        if conditions.tough_food {
            let (long, short): (Vec<&Bunny>, Vec<&Bunny>) =
                live.iter().copied().partition(|b| b.phenotype.has_long_teeth());
            let short_percent = sample_percent(self.short_teeth_percent_to_die, rng);
            let long_percent = sample_percent(self.long_teeth_percent_to_die, rng);
            victims.extend(
                cull_fraction(&short, short_percent, rng)
                    .into_iter()
                    .chain(cull_fraction(&long, long_percent, rng))
                    .map(|id| (id, CauseOfDeath::ToughFood)),
            );
        }

        if conditions.limited_food {
            let already: HashSet<Uuid> = victims.iter().map(|(id, _)| *id).collect();
            let survivors: Vec<&Bunny> = live
                .iter()
                .copied()
                .filter(|b| !already.contains(&b.id))
                .collect();
            let percent = sample_percent(self.limited_percent_to_die, rng);
            victims.extend(
                cull_fraction(&survivors, percent, rng)
                    .into_iter()
                    .map(|id| (id, CauseOfDeath::LimitedFood)),
            );
        }

        victims
    }
}

#[derive(Debug)]
pub struct Food {
    pub is_tough: bool,
    pub is_limited: bool,
    agent: SelectionAgent,
}

impl Food {
    #[must_use]
    pub fn new(config: &FoodConfig) -> Self {
        let policy = ToughAndLimitedFood {
            short_teeth_percent_to_die: config.short_teeth_percent_to_die,
            long_teeth_percent_to_die: config.long_teeth_percent_to_die,
            limited_percent_to_die: config.limited_percent_to_die,
        };
        Self {
            is_tough: config.tough,
            is_limited: config.limited,
            agent: SelectionAgent::new("food", config.window, Box::new(policy)),
        }
    }

    /// Food only selects when at least one of its factors is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_tough || self.is_limited
    }

    #[must_use]
    pub fn agent(&self) -> &SelectionAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut SelectionAgent {
        &mut self.agent
    }

    pub fn feed(
        &mut self,
        generation: u32,
        cycle_percent: f64,
        live: &[&Bunny],
        conditions: &SelectionConditions,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<(Uuid, CauseOfDeath)>> {
        if !self.is_enabled() {
            return None;
        }
        self.agent.act(generation, cycle_percent, live, conditions, rng)
    }
}
