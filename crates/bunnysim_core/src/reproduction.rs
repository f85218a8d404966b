//! Mendelian inheritance and first-time mutation injection.

use bunnysim_data::{Allele, GeneKind, GenePair, Genotype};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Pairs mates at random; with an odd count one bunny sits this generation out.
///
/// The first id of each pair is the father.
pub fn pair_mates<R: Rng + ?Sized>(mut candidates: Vec<Uuid>, rng: &mut R) -> Vec<(Uuid, Uuid)> {
    candidates.shuffle(rng);
    candidates
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Draws one allele of `pair`, each side with probability 1/2.
pub fn segregate<R: Rng + ?Sized>(pair: &GenePair, rng: &mut R) -> Allele {
    if rng.gen_bool(0.5) {
        pair.father
    } else {
        pair.mother
    }
}

/// Offspring genotype: for every gene, one allele from each parent, independently.
pub fn inherit_genotype<R: Rng + ?Sized>(
    father: &Genotype,
    mother: &Genotype,
    rng: &mut R,
) -> Genotype {
    let mut child = Genotype::default();
    for gene in GeneKind::ALL {
        let from_father = segregate(father.pair(gene), rng);
        let from_mother = segregate(mother.pair(gene), rng);
        *child.pair_mut(gene) = GenePair::new(from_father, from_mother);
    }
    child
}

/// A litter of `size` siblings.
pub fn produce_litter<R: Rng + ?Sized>(
    father: &Genotype,
    mother: &Genotype,
    size: u32,
    rng: &mut R,
) -> Vec<Genotype> {
    (0..size)
        .map(|_| inherit_genotype(father, mother, rng))
        .collect()
}

/// Newborn indices to receive each pending mutation.
///
/// Each gene gets `max(1, round(percentage * newborns))` distinct newborns and
/// no newborn is chosen for more than one gene. When the litter generation is
/// too small the later genes get fewer (possibly none).
pub fn plan_mutations<R: Rng + ?Sized>(
    newborns: usize,
    pending: &[GeneKind],
    percentage: f64,
    rng: &mut R,
) -> Vec<(GeneKind, Vec<usize>)> {
    if newborns == 0 || pending.is_empty() {
        return Vec::new();
    }
    let per_gene = ((percentage * newborns as f64).round() as usize).max(1);

    let mut indices: Vec<usize> = (0..newborns).collect();
    indices.shuffle(rng);
    let mut remaining = indices.into_iter();

    pending
        .iter()
        .map(|&gene| (gene, remaining.by_ref().take(per_gene).collect()))
        .collect()
}

/// Replaces one inherited allele of `gene`, father or mother side at random, with the mutant.
pub fn mutate<R: Rng + ?Sized>(genotype: &mut Genotype, gene: GeneKind, rng: &mut R) {
    let mutant = gene.mutant_allele();
    let pair = genotype.pair_mut(gene);
    if rng.gen_bool(0.5) {
        pair.father = mutant;
    } else {
        pair.mother = mutant;
    }
}
