//! Per-gene dominance and pending mutations.

use crate::error::{Result, SimError};
use bunnysim_data::{Allele, GeneKind, Genotype, Phenotype};
use serde::{Deserialize, Serialize};

/// Mutable record for one gene.
///
/// `dominant_allele` moves from `None` to a concrete allele exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    kind: GeneKind,
    dominant_allele: Option<Allele>,
    mutation_coming: bool,
}

impl Gene {
    #[must_use]
    pub fn new(kind: GeneKind) -> Self {
        Self {
            kind,
            dominant_allele: None,
            mutation_coming: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GeneKind {
        self.kind
    }

    #[must_use]
    pub fn normal_allele(&self) -> Allele {
        self.kind.normal_allele()
    }

    #[must_use]
    pub fn mutant_allele(&self) -> Allele {
        self.kind.mutant_allele()
    }

    #[must_use]
    pub fn dominant_allele(&self) -> Option<Allele> {
        self.dominant_allele
    }

    #[must_use]
    pub fn recessive_allele(&self) -> Option<Allele> {
        self.dominant_allele.map(|dominant| {
            if dominant == self.normal_allele() {
                self.mutant_allele()
            } else {
                self.normal_allele()
            }
        })
    }

    /// True once a mutation has been introduced for this gene.
    #[must_use]
    pub fn is_mutated(&self) -> bool {
        self.dominant_allele.is_some()
    }

    /// True while a mutation waits to be injected into the next litters.
    #[must_use]
    pub fn mutation_coming(&self) -> bool {
        self.mutation_coming
    }

    /// Fixes which allele is dominant. Fails if dominance was already assigned.
    pub fn set_dominant_allele(&mut self, allele: Allele) -> Result<()> {
        debug_assert_eq!(allele.gene(), self.kind);
        if let Some(current) = self.dominant_allele {
            return Err(SimError::DominanceReassigned {
                gene: self.kind,
                current,
            });
        }
        self.dominant_allele = Some(allele);
        Ok(())
    }

    /// Introduces the mutant allele: assigns dominance and queues injection.
    pub fn add_mutation(&mut self, mutant_is_dominant: bool) -> Result<()> {
        let dominant = if mutant_is_dominant {
            self.mutant_allele()
        } else {
            self.normal_allele()
        };
        self.set_dominant_allele(dominant)?;
        self.mutation_coming = true;
        tracing::info!(gene = %self.kind, dominant = %dominant, "Mutation introduced");
        Ok(())
    }

    /// Allele denoted by an abbreviation letter, given the current dominance.
    #[must_use]
    pub fn allele_for_letter(&self, is_dominant_letter: bool) -> Option<Allele> {
        if is_dominant_letter {
            self.dominant_allele
        } else {
            self.recessive_allele()
        }
    }

    pub(crate) fn clear_mutation_coming(&mut self) {
        self.mutation_coming = false;
    }
}

/// The three genes of the population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenePool {
    fur: Gene,
    ears: Gene,
    teeth: Gene,
}

impl Default for GenePool {
    fn default() -> Self {
        Self::new()
    }
}

impl GenePool {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fur: Gene::new(GeneKind::Fur),
            ears: Gene::new(GeneKind::Ears),
            teeth: Gene::new(GeneKind::Teeth),
        }
    }

    #[must_use]
    pub fn gene(&self, kind: GeneKind) -> &Gene {
        match kind {
            GeneKind::Fur => &self.fur,
            GeneKind::Ears => &self.ears,
            GeneKind::Teeth => &self.teeth,
        }
    }

    pub fn gene_mut(&mut self, kind: GeneKind) -> &mut Gene {
        match kind {
            GeneKind::Fur => &mut self.fur,
            GeneKind::Ears => &mut self.ears,
            GeneKind::Teeth => &mut self.teeth,
        }
    }

    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        [&self.fur, &self.ears, &self.teeth].into_iter()
    }

    /// Genes whose mutation is waiting to be injected.
    #[must_use]
    pub fn pending_mutations(&self) -> Vec<GeneKind> {
        self.genes()
            .filter(|gene| gene.mutation_coming())
            .map(Gene::kind)
            .collect()
    }

    /// Visible traits of `genotype` under the current dominance assignments.
    #[must_use]
    pub fn phenotype_of(&self, genotype: &Genotype) -> Phenotype {
        Phenotype {
            fur: genotype.fur.expressed(self.fur.dominant_allele()),
            ears: genotype.ears.expressed(self.ears.dominant_allele()),
            teeth: genotype.teeth.expressed(self.teeth.dominant_allele()),
        }
    }

    /// Forgets every dominance assignment and pending mutation.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
