use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three heritable traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeneKind {
    /// Fur color.
    Fur,
    /// Ear shape.
    Ears,
    /// Teeth length.
    Teeth,
}

impl GeneKind {
    /// All genes in canonical order.
    pub const ALL: [GeneKind; 3] = [GeneKind::Fur, GeneKind::Ears, GeneKind::Teeth];

    #[must_use]
    pub fn normal_allele(self) -> Allele {
        match self {
            GeneKind::Fur => Allele::WhiteFur,
            GeneKind::Ears => Allele::StraightEars,
            GeneKind::Teeth => Allele::ShortTeeth,
        }
    }

    #[must_use]
    pub fn mutant_allele(self) -> Allele {
        match self {
            GeneKind::Fur => Allele::BrownFur,
            GeneKind::Ears => Allele::FloppyEars,
            GeneKind::Teeth => Allele::LongTeeth,
        }
    }

    /// Letter naming the dominant allele of this gene.
    #[must_use]
    pub fn dominant_abbreviation(self) -> char {
        match self {
            GeneKind::Fur => 'F',
            GeneKind::Ears => 'E',
            GeneKind::Teeth => 'T',
        }
    }

    /// Letter naming the recessive allele of this gene.
    #[must_use]
    pub fn recessive_abbreviation(self) -> char {
        self.dominant_abbreviation().to_ascii_lowercase()
    }

    /// Resolves an abbreviation letter to its gene, and whether it names the dominant allele.
    #[must_use]
    pub fn from_abbreviation(letter: char) -> Option<(GeneKind, bool)> {
        GeneKind::ALL.into_iter().find_map(|gene| {
            if letter == gene.dominant_abbreviation() {
                Some((gene, true))
            } else if letter == gene.recessive_abbreviation() {
                Some((gene, false))
            } else {
                None
            }
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GeneKind::Fur => "fur",
            GeneKind::Ears => "ears",
            GeneKind::Teeth => "teeth",
        }
    }
}

impl fmt::Display for GeneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fur" => Ok(GeneKind::Fur),
            "ears" => Ok(GeneKind::Ears),
            "teeth" => Ok(GeneKind::Teeth),
            other => anyhow::bail!("unknown gene '{other}' (expected fur, ears or teeth)"),
        }
    }
}

/// A named trait variant. Alleles are identities and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allele {
    WhiteFur,
    BrownFur,
    StraightEars,
    FloppyEars,
    ShortTeeth,
    LongTeeth,
}

impl Allele {
    #[must_use]
    pub fn gene(self) -> GeneKind {
        match self {
            Allele::WhiteFur | Allele::BrownFur => GeneKind::Fur,
            Allele::StraightEars | Allele::FloppyEars => GeneKind::Ears,
            Allele::ShortTeeth | Allele::LongTeeth => GeneKind::Teeth,
        }
    }

    #[must_use]
    pub fn is_mutant(self) -> bool {
        self == self.gene().mutant_allele()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Allele::WhiteFur => "white fur",
            Allele::BrownFur => "brown fur",
            Allele::StraightEars => "straight ears",
            Allele::FloppyEars => "floppy ears",
            Allele::ShortTeeth => "short teeth",
            Allele::LongTeeth => "long teeth",
        }
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two alleles an organism carries for one gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenePair {
    /// Allele inherited from the father.
    pub father: Allele,
    /// Allele inherited from the mother.
    pub mother: Allele,
}

impl GenePair {
    #[must_use]
    pub fn new(father: Allele, mother: Allele) -> Self {
        debug_assert_eq!(
            father.gene(),
            mother.gene(),
            "gene pair mixes alleles of different genes"
        );
        Self { father, mother }
    }

    /// Homozygous pair of the gene's normal allele.
    #[must_use]
    pub fn normal(gene: GeneKind) -> Self {
        let allele = gene.normal_allele();
        Self::new(allele, allele)
    }

    #[must_use]
    pub fn gene(&self) -> GeneKind {
        self.father.gene()
    }

    #[must_use]
    pub fn is_homozygous(&self) -> bool {
        self.father == self.mother
    }

    #[must_use]
    pub fn contains(&self, allele: Allele) -> bool {
        self.father == allele || self.mother == allele
    }

    /// Number of copies of `allele` in this pair (0..=2).
    #[must_use]
    pub fn count(&self, allele: Allele) -> usize {
        usize::from(self.father == allele) + usize::from(self.mother == allele)
    }

    /// Visible allele given the gene's dominance assignment.
    ///
    /// Without an assignment the gene has never mutated, so the normal allele shows.
    #[must_use]
    pub fn expressed(&self, dominant: Option<Allele>) -> Allele {
        match dominant {
            None => self.gene().normal_allele(),
            Some(_) if self.is_homozygous() => self.father,
            Some(dominant) => dominant,
        }
    }
}

/// One organism's complete heritable makeup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genotype {
    pub fur: GenePair,
    pub ears: GenePair,
    pub teeth: GenePair,
}

impl Default for Genotype {
    fn default() -> Self {
        Self {
            fur: GenePair::normal(GeneKind::Fur),
            ears: GenePair::normal(GeneKind::Ears),
            teeth: GenePair::normal(GeneKind::Teeth),
        }
    }
}

impl Genotype {
    #[must_use]
    pub fn pair(&self, gene: GeneKind) -> &GenePair {
        match gene {
            GeneKind::Fur => &self.fur,
            GeneKind::Ears => &self.ears,
            GeneKind::Teeth => &self.teeth,
        }
    }

    pub fn pair_mut(&mut self, gene: GeneKind) -> &mut GenePair {
        match gene {
            GeneKind::Fur => &mut self.fur,
            GeneKind::Ears => &mut self.ears,
            GeneKind::Teeth => &mut self.teeth,
        }
    }

    /// True if any gene carries a mutant allele.
    #[must_use]
    pub fn has_mutation(&self) -> bool {
        GeneKind::ALL.into_iter().any(|gene| {
            let pair = self.pair(gene);
            pair.father.is_mutant() || pair.mother.is_mutant()
        })
    }
}

/// Visible trait combination of an organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phenotype {
    pub fur: Allele,
    pub ears: Allele,
    pub teeth: Allele,
}

impl Default for Phenotype {
    fn default() -> Self {
        Self {
            fur: Allele::WhiteFur,
            ears: Allele::StraightEars,
            teeth: Allele::ShortTeeth,
        }
    }
}

impl Phenotype {
    #[must_use]
    pub fn trait_for(&self, gene: GeneKind) -> Allele {
        match gene {
            GeneKind::Fur => self.fur,
            GeneKind::Ears => self.ears,
            GeneKind::Teeth => self.teeth,
        }
    }

    #[must_use]
    pub fn has_white_fur(&self) -> bool {
        self.fur == Allele::WhiteFur
    }

    #[must_use]
    pub fn has_long_teeth(&self) -> bool {
        self.teeth == Allele::LongTeeth
    }
}
