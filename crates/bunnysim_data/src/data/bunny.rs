use crate::data::genetics::{Genotype, Phenotype};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Why a bunny died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CauseOfDeath {
    /// Reached the maximum age.
    OldAge,
    /// Eaten by wolves.
    Wolves,
    /// Could not chew tough food.
    ToughFood,
    /// Starved under limited food.
    LimitedFood,
}

impl fmt::Display for CauseOfDeath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CauseOfDeath::OldAge => "old age",
            CauseOfDeath::Wolves => "wolves",
            CauseOfDeath::ToughFood => "tough food",
            CauseOfDeath::LimitedFood => "limited food",
        })
    }
}

/// One individual of the population.
///
/// Parents are referenced by id only; they are looked up in the owning
/// collection and stay resolvable after death.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bunny {
    /// Stable identity within a run.
    pub id: Uuid,
    pub genotype: Genotype,
    /// Derived at birth from the genotype and the gene pool's dominance.
    pub phenotype: Phenotype,
    pub father_id: Option<Uuid>,
    pub mother_id: Option<Uuid>,
    /// Generation in which the bunny was born.
    pub generation: u32,
    pub is_alive: bool,
    /// Set only on the bunnies that first received a mutation.
    pub is_original_mutant: bool,
    pub cause_of_death: Option<CauseOfDeath>,
    /// Generation in which the bunny died.
    pub death_generation: Option<u32>,
}

impl Bunny {
    /// Creates a live bunny with no parents (generation 0 or an added mate).
    #[must_use]
    pub fn root(id: Uuid, genotype: Genotype, phenotype: Phenotype, generation: u32) -> Self {
        Self {
            id,
            genotype,
            phenotype,
            father_id: None,
            mother_id: None,
            generation,
            is_alive: true,
            is_original_mutant: false,
            cause_of_death: None,
            death_generation: None,
        }
    }

    /// Age in generations at `current_generation`.
    #[must_use]
    pub fn age(&self, current_generation: u32) -> u32 {
        current_generation.saturating_sub(self.generation)
    }

    #[must_use]
    pub fn has_parents(&self) -> bool {
        self.father_id.is_some() && self.mother_id.is_some()
    }

    /// Short display name derived from the id.
    #[must_use]
    pub fn name(&self) -> String {
        let id = self.id.simple().to_string();
        format!("bunny-{}-gen{}", &id[..6], self.generation)
    }
}
