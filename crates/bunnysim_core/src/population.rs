//! The bunny collection: every bunny of the run, live and dead.
//!
//! Bunnies live in a flat arena in creation order and are addressed by id.
//! Parent links are ids into the same arena, so dead ancestors stay
//! resolvable for pedigree queries and nothing is ever removed before a
//! full restart.

use crate::error::{Result, SimError};
use crate::gene_pool::GenePool;
use crate::initializer::InitialPopulation;
use crate::reproduction;
use crate::stats::PhenotypeCounts;
use bunnysim_data::{Bunny, CauseOfDeath, GeneKind, Genotype};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Outcome of one round of mating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LitterReport {
    pub born: Vec<Uuid>,
    /// Number of original mutants created per gene.
    pub mutations: Vec<(GeneKind, usize)>,
    pub pairs: usize,
}

/// Ancestor tree of one bunny.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedigreeNode {
    pub bunny_id: Uuid,
    pub is_alive: bool,
    pub father: Option<Box<PedigreeNode>>,
    pub mother: Option<Box<PedigreeNode>>,
}

impl PedigreeNode {
    /// Number of generations in the tree, counting this bunny.
    #[must_use]
    pub fn depth(&self) -> usize {
        let father = self.father.as_ref().map_or(0, |node| node.depth());
        let mother = self.mother.as_ref().map_or(0, |node| node.depth());
        1 + father.max(mother)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BunnyCollection {
    bunnies: Vec<Bunny>,
    index: HashMap<Uuid, usize>,
    live_count: usize,
}

impl BunnyCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, bunny: Bunny) -> Uuid {
        let id = bunny.id;
        debug_assert!(!self.index.contains_key(&id), "duplicate bunny id");
        if let (Some(father), Some(mother)) = (bunny.father_id, bunny.mother_id) {
            debug_assert!(self.index.contains_key(&father) && self.index.contains_key(&mother));
        }
        if bunny.is_alive {
            self.live_count += 1;
        }
        self.index.insert(id, self.bunnies.len());
        self.bunnies.push(bunny);
        id
    }

    fn next_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Uuid {
        loop {
            let id = Uuid::from_u128(rng.gen::<u128>());
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Adds a parentless bunny born in `generation`.
    pub fn add_root<R: Rng + ?Sized>(
        &mut self,
        genotype: Genotype,
        gene_pool: &GenePool,
        generation: u32,
        rng: &mut R,
    ) -> Uuid {
        let id = self.next_id(rng);
        let phenotype = gene_pool.phenotype_of(&genotype);
        self.insert(Bunny::root(id, genotype, phenotype, generation))
    }

    /// Creates generation 0 from validated varieties.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        initial: &InitialPopulation,
        gene_pool: &GenePool,
        rng: &mut R,
    ) -> Vec<Uuid> {
        let mut born = Vec::new();
        for variety in &initial.varieties {
            for _ in 0..variety.count {
                born.push(self.add_root(variety.genotype, gene_pool, 0, rng));
            }
        }
        tracing::debug!(count = born.len(), "Generation 0 created");
        born
    }

    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<&Bunny> {
        self.index.get(id).map(|&idx| &self.bunnies[idx])
    }

    /// Every bunny of the run, in creation order.
    #[must_use]
    pub fn all(&self) -> &[Bunny] {
        &self.bunnies
    }

    pub fn live(&self) -> impl Iterator<Item = &Bunny> {
        self.bunnies.iter().filter(|b| b.is_alive)
    }

    pub fn dead(&self) -> impl Iterator<Item = &Bunny> {
        self.bunnies.iter().filter(|b| !b.is_alive)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    #[must_use]
    pub fn dead_count(&self) -> usize {
        self.bunnies.len() - self.live_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bunnies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bunnies.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> PhenotypeCounts {
        PhenotypeCounts::from_bunnies(self.live())
    }

    /// Marks a bunny dead. Returns `false` if it was already dead.
    pub fn kill(&mut self, id: &Uuid, cause: CauseOfDeath, generation: u32) -> Result<bool> {
        let idx = *self.index.get(id).ok_or(SimError::UnknownBunny(*id))?;
        let bunny = &mut self.bunnies[idx];
        if !bunny.is_alive {
            return Ok(false);
        }
        bunny.is_alive = false;
        bunny.cause_of_death = Some(cause);
        bunny.death_generation = Some(generation);
        self.live_count -= 1;
        tracing::debug!(id = %id, cause = %cause, generation, "Bunny died");
        Ok(true)
    }

    /// Kills every live bunny whose age at `generation` reached `max_age`.
    pub fn age_bunnies(&mut self, generation: u32, max_age: u32) -> Vec<Uuid> {
        let expired: Vec<Uuid> = self
            .live()
            .filter(|b| b.age(generation) >= max_age)
            .map(|b| b.id)
            .collect();
        for id in &expired {
            if let Some(&idx) = self.index.get(id) {
                let bunny = &mut self.bunnies[idx];
                bunny.is_alive = false;
                bunny.cause_of_death = Some(CauseOfDeath::OldAge);
                bunny.death_generation = Some(generation);
                self.live_count -= 1;
            }
        }
        expired
    }

    /// Pairs all live adults (age ≥ 1) and adds a litter per pair, born in `generation`.
    ///
    /// Pending mutations are injected into the newborns and cleared from the
    /// gene pool once at least one bunny carries them.
    pub fn mate_bunnies<R: Rng + ?Sized>(
        &mut self,
        generation: u32,
        litter_size: u32,
        mutation_percentage: f64,
        gene_pool: &mut GenePool,
        rng: &mut R,
    ) -> LitterReport {
        let adults: Vec<Uuid> = self
            .live()
            .filter(|b| b.age(generation) >= 1)
            .map(|b| b.id)
            .collect();
        let pairs = reproduction::pair_mates(adults, rng);

        let mut newborns: Vec<(Uuid, Uuid, Genotype)> = Vec::new();
        for &(father_id, mother_id) in &pairs {
            let (Some(father), Some(mother)) = (self.get(&father_id), self.get(&mother_id)) else {
                continue;
            };
            let (father_genotype, mother_genotype) = (father.genotype, mother.genotype);
            for genotype in
                reproduction::produce_litter(&father_genotype, &mother_genotype, litter_size, rng)
            {
                newborns.push((father_id, mother_id, genotype));
            }
        }

        let plan = reproduction::plan_mutations(
            newborns.len(),
            &gene_pool.pending_mutations(),
            mutation_percentage,
            rng,
        );
        let mut original_mutants = vec![false; newborns.len()];
        let mut mutations = Vec::new();
        for (gene, indices) in plan {
            if indices.is_empty() {
                continue;
            }
            for &idx in &indices {
                reproduction::mutate(&mut newborns[idx].2, gene, rng);
                original_mutants[idx] = true;
            }
            gene_pool.gene_mut(gene).clear_mutation_coming();
            mutations.push((gene, indices.len()));
        }

        let mut born = Vec::with_capacity(newborns.len());
        for ((father_id, mother_id, genotype), is_original_mutant) in
            newborns.into_iter().zip(original_mutants)
        {
            let id = self.next_id(rng);
            let mut bunny = Bunny::root(id, genotype, gene_pool.phenotype_of(&genotype), generation);
            bunny.father_id = Some(father_id);
            bunny.mother_id = Some(mother_id);
            bunny.is_original_mutant = is_original_mutant;
            born.push(self.insert(bunny));
        }

        tracing::debug!(
            generation,
            pairs = pairs.len(),
            born = born.len(),
            "Litters produced"
        );
        LitterReport {
            born,
            mutations,
            pairs: pairs.len(),
        }
    }

    /// Ancestor tree of `id`, `depth` generations deep (1 = the bunny alone).
    #[must_use]
    pub fn pedigree(&self, id: &Uuid, depth: usize) -> Option<PedigreeNode> {
        if depth == 0 {
            return None;
        }
        let bunny = self.get(id)?;
        Some(PedigreeNode {
            bunny_id: bunny.id,
            is_alive: bunny.is_alive,
            father: bunny
                .father_id
                .and_then(|father| self.pedigree(&father, depth - 1))
                .map(Box::new),
            mother: bunny
                .mother_id
                .and_then(|mother| self.pedigree(&mother, depth - 1))
                .map(Box::new),
        })
    }

    /// Discards every bunny.
    pub fn clear(&mut self) {
        self.bunnies.clear();
        self.index.clear();
        self.live_count = 0;
    }
}
