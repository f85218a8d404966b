//! Command-line input: mutation requests and configuration overrides.

use crate::model::config::{PopulationSpec, SimConfig};
use crate::model::data::{Environment, GeneKind};
use std::str::FromStr;

/// A mutation to introduce before the run starts, written `gene:dominant` or
/// `gene:recessive` (e.g. `fur:dominant`, `teeth:recessive`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRequest {
    pub gene: GeneKind,
    pub mutant_is_dominant: bool,
}

impl FromStr for MutationRequest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (gene, dominance) = s
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("expected gene:dominant or gene:recessive, got '{s}'"))?;
        let gene = gene.parse::<GeneKind>()?;
        let mutant_is_dominant = match dominance.trim().to_ascii_lowercase().as_str() {
            "dominant" => true,
            "recessive" => false,
            other => anyhow::bail!("unknown dominance '{other}' (expected dominant or recessive)"),
        };
        Ok(Self {
            gene,
            mutant_is_dominant,
        })
    }
}

/// Values given on the command line that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub mutations: Option<String>,
    pub population: Option<String>,
    pub environment: Option<Environment>,
    pub wolves: bool,
    pub tough_food: bool,
    pub limited_food: bool,
}

impl CliOverrides {
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(mutations) = &self.mutations {
            config.population.mutations = mutations.clone();
        }
        if let Some(population) = &self.population {
            config.population.population = PopulationSpec::from_cli(population);
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        // Flags only switch agents on; the file decides otherwise.
        config.wolves.enabled |= self.wolves;
        config.food.tough |= self.tough_food;
        config.food.limited |= self.limited_food;
    }
}
